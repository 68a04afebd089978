//! Skill-name normalization.
//!
//! The registry stores one lowercase row per skill name; callers may
//! send any casing and duplicates. Normalization happens once, here,
//! before any name reaches the database.

/// Lowercase, trim, and deduplicate skill names, preserving first-seen
/// order. Empty names are dropped.
pub fn normalize(names: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        let normalized = name.trim().to_lowercase();
        if !normalized.is_empty() && !seen.contains(&normalized) {
            seen.push(normalized);
        }
    }
    seen
}

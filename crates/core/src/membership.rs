//! Membership and capacity accounting.
//!
//! A project's members are the leader plus every applicant whose
//! application is Accepted. These functions are the single definition
//! used by listing, detail, and "my projects" views so the count can
//! never drift between them. Capacity checks are computed over freshly
//! read state, never cached.

use crate::types::Date;

/// Number of members given the count of Accepted applications.
/// The leader is always counted.
pub fn members_count(accepted_applications: i64) -> i64 {
    accepted_applications + 1
}

/// Whether a viewer may apply to a project.
///
/// The leader can never apply to their own project, and a student with
/// any existing application row (whatever its status) cannot apply
/// again. An anonymous viewer is shown the button by default.
pub fn can_apply(viewer: Option<&str>, leader_id: &str, has_application: bool) -> bool {
    match viewer {
        Some(uid) if uid == leader_id => false,
        Some(_) => !has_application,
        None => true,
    }
}

/// Whether a project is expired-unfilled: still Recruiting but past its
/// deadline. Such projects are hidden from default listings, not deleted.
pub fn is_expired_unfilled(recruiting: bool, deadline: Date, today: Date) -> bool {
    recruiting && deadline < today
}

/// Whether accepting one more applicant stays within capacity.
///
/// `accepted_others` counts Accepted applications excluding the one
/// being decided, so re-accepting an already-Accepted application is
/// always allowed.
pub fn acceptance_within_capacity(accepted_others: i64, capacity: i32) -> bool {
    // leader + already-accepted others + the applicant being accepted
    members_count(accepted_others) + 1 <= i64::from(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leader_is_always_counted() {
        assert_eq!(members_count(0), 1);
        assert_eq!(members_count(2), 3);
    }

    #[test]
    fn leader_cannot_apply_to_own_project() {
        assert!(!can_apply(Some("alice"), "alice", false));
    }

    #[test]
    fn existing_application_blocks_reapply() {
        assert!(!can_apply(Some("bob"), "alice", true));
        assert!(can_apply(Some("bob"), "alice", false));
    }

    #[test]
    fn anonymous_viewer_sees_apply() {
        assert!(can_apply(None, "alice", false));
    }

    #[test]
    fn expired_only_when_recruiting_and_past_deadline() {
        let deadline = date(2026, 1, 10);
        assert!(is_expired_unfilled(true, deadline, date(2026, 1, 11)));
        assert!(!is_expired_unfilled(true, deadline, date(2026, 1, 10)));
        assert!(!is_expired_unfilled(false, deadline, date(2026, 1, 11)));
    }

    #[test]
    fn capacity_blocks_final_acceptance() {
        // capacity 3: leader + 2 accepted. One slot left with one other.
        assert!(acceptance_within_capacity(1, 3));
        assert!(!acceptance_within_capacity(2, 3));
        // capacity 1 means leader only, no acceptances at all.
        assert!(!acceptance_within_capacity(0, 1));
    }
}

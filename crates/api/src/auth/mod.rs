//! Credential handling.
//!
//! Identity is never ambient: every leader-privileged operation receives
//! the caller's uid as an explicit argument. This module only covers
//! hashing and verifying passwords at signup/login.

pub mod password;

//! Version label checks
//!
//! The document schema accepts any version string. The publish form
//! additionally requires `major.minor.patch`; [`is_semver`] is that rule, and
//! the validator applies it when `requireSemverVersion` is set.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEMVER_REGEX: Regex = Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").unwrap();
}

/// `true` for labels like `1.0.0`. Pre-release and build suffixes are rejected.
pub fn is_semver(version: &str) -> bool {
    SEMVER_REGEX.is_match(version)
}

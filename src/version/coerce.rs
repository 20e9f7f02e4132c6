//! Best-effort version coercion.
//!
//! Loosely formatted strings such as `"2"`, `"v1.4"` or `"release 3.0.1-beta"`
//! are normalized to `major.minor.patch`. Prerelease and build tags are dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;

/// First run of up to three dot-separated ASCII numeric segments, each at
/// most 16 digits and not part of a longer digit run.
static COERCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{1,16})(?:\.([0-9]{1,16}))?(?:\.([0-9]{1,16}))?(?:$|[^0-9])").unwrap()
});

/// Coerce `raw` into a canonical semantic version.
///
/// Returns `None` when nothing version-like is found.
pub fn coerce(raw: &str) -> Option<Version> {
    let caps = COERCE_PATTERN.captures(raw)?;
    let segment = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(segment(1)?, segment(2)?, segment(3)?))
}

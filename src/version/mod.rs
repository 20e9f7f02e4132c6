//! # Version matching
//!
//! Plugins publish loosely formatted version strings and depend on each other
//! through node-style range expressions. [`matches`] coerces the published
//! version and tests it against the range; anything that cannot be read as a
//! version or a range simply does not match.

pub mod coerce;
pub mod range;

pub use coerce::coerce;
pub use range::VersionRange;

/// Whether `raw_version`, once coerced, satisfies `range`.
///
/// Never fails: unreadable versions and unparseable ranges yield `false`.
pub fn matches(raw_version: &str, range: &str) -> bool {
    let Some(version) = coerce(raw_version) else {
        return false;
    };
    match VersionRange::parse(range) {
        Ok(range) => range.matches(&version),
        Err(e) => {
            log::debug!("Ignoring unparseable version range {:?}: {}", range, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_coerces_loose_versions() {
        assert!(matches("2.0.1", ">=2.0.0"));
        assert!(matches("2", ">=2.0.0"));
        assert!(matches("v2.1", "^2.0.0"));
        assert!(!matches("1.0.0", ">=2.0.0"));
    }

    #[test]
    fn test_non_versions_never_match() {
        assert!(!matches("latest", "*"));
        assert!(!matches("", ">=0.0.0"));
    }

    #[test]
    fn test_matches_skips_non_ascii_digit_runs() {
        assert!(matches("v\u{0663} 2.0.1", ">=2.0.0"));
        assert!(matches("2.0.1", "*.*.*"));
    }

    #[test]
    fn test_bad_ranges_never_match() {
        assert!(!matches("1.0.0", "definitely not a range"));
    }

    #[test]
    fn test_prerelease_tags_are_dropped_by_coercion() {
        assert!(matches("2.0.0-beta.1", ">=2.0.0"));
    }
}

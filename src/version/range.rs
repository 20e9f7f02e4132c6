//! Node-style version range expressions.
//!
//! Ranges are translated into one [`VersionReq`] per `||` alternative:
//!
//! | Input            | Translated comparator set |
//! |------------------|---------------------------|
//! | `1.2.3`          | `=1.2.3`                  |
//! | `1.2` / `1.2.x`  | `=1.2`                    |
//! | `>= 1.2.3 <2`    | `>=1.2.3, <2`             |
//! | `1.2.3 - 2.3`    | `>=1.2.3, <=2.3`          |
//! | `~>1.2`          | `~1.2`                    |
//! | `*`, `x.x`, empty| any version               |

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};

/// A parsed range expression such as `">=2.0.0"` or `"^1.2 || 2.x"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range expression.
    pub fn parse(expr: &str) -> Result<Self, semver::Error> {
        let alternatives = expr
            .split("||")
            .map(parse_alternative)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: expr.to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies any alternative of this range.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for VersionRange {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '~', '^'];

fn parse_alternative(expr: &str) -> Result<VersionReq, semver::Error> {
    let expr = expr.replace(',', " ");
    let expr = expr.trim();

    let comparators: Vec<String> = match split_hyphen(expr) {
        Some((low, high)) => [format!(">={low}"), format!("<={high}")]
            .iter()
            .filter_map(|token| translate(token))
            .collect(),
        None => join_operators(expr)
            .iter()
            .filter_map(|token| translate(token))
            .collect(),
    };

    if comparators.is_empty() {
        return Ok(VersionReq::STAR);
    }
    VersionReq::parse(&comparators.join(", "))
}

/// `"1.2.3 - 2.0"` splits into its bounds.
fn split_hyphen(expr: &str) -> Option<(&str, &str)> {
    let tokens: Vec<&str> = expr.split_whitespace().collect();
    match tokens.as_slice() {
        [low, "-", high] => Some((*low, *high)),
        _ => None,
    }
}

/// Glue detached operators onto the following version: `">= 1.2"` -> `">=1.2"`.
fn join_operators(expr: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending = String::new();
    for token in expr.split_whitespace() {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            pending.push_str(token);
            continue;
        }
        tokens.push(format!("{pending}{token}"));
        pending.clear();
    }
    if !pending.is_empty() {
        tokens.push(pending);
    }
    tokens
}

/// Translate one node-style comparator into `semver` syntax.
///
/// Returns `None` for tokens that accept every version.
fn translate(token: &str) -> Option<String> {
    let split = token
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(split);
    let op = if op == "~>" { "~" } else { op };
    let version = strip_v(version);

    if is_any(version) {
        return match op {
            "" | "=" | ">=" | "~" | "^" | "<=" => None,
            _ => Some("<0.0.0".to_string()),
        };
    }

    if has_wildcard(version) {
        let op = if op.is_empty() { "=" } else { op };
        return Some(format!("{op}{}", truncate_wildcard(version)));
    }

    if op.is_empty() {
        return Some(format!("={version}"));
    }
    Some(format!("{op}{version}"))
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

fn is_wildcard_segment(segment: &str) -> bool {
    matches!(segment, "x" | "X" | "*")
}

/// Empty, or a wildcard in the major position (`*`, `x.x`, `*.*.*`).
fn is_any(version: &str) -> bool {
    version.is_empty() || version.split('.').next().is_some_and(is_wildcard_segment)
}

fn has_wildcard(version: &str) -> bool {
    version.split('.').any(is_wildcard_segment)
}

/// `"1.x"` -> `"1"`, `"1.2.*"` -> `"1.2"`.
fn truncate_wildcard(version: &str) -> String {
    version
        .split('.')
        .take_while(|segment| !is_wildcard_segment(segment))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn satisfies(version: &str, range: &str) -> bool {
        VersionRange::parse(range).unwrap().matches(&v(version))
    }

    #[test]
    fn test_primitive_comparators() {
        assert!(satisfies("2.0.1", ">=2.0.0"));
        assert!(!satisfies("1.0.0", ">=2.0.0"));
        assert!(satisfies("1.9.9", "<2.0.0"));
        assert!(!satisfies("2.0.0", "<2.0.0"));
        assert!(satisfies("2.0.0", "<=2.0.0"));
        assert!(satisfies("2.0.1", ">2.0.0"));
        assert!(satisfies("2.0.0", "=2.0.0"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(satisfies("1.2.3", "1.2.3"));
        assert!(!satisfies("1.2.4", "1.2.3"));
        assert!(!satisfies("1.3.0", "1.2.3"));
    }

    #[test]
    fn test_partial_versions_act_as_x_ranges() {
        assert!(satisfies("1.2.9", "1.2"));
        assert!(!satisfies("1.3.0", "1.2"));
        assert!(satisfies("1.9.0", "1.x"));
        assert!(!satisfies("2.0.0", "1.x"));
        assert!(satisfies("1.2.7", "1.2.*"));
    }

    #[test]
    fn test_caret_and_tilde() {
        assert!(satisfies("1.5.0", "^1.2.0"));
        assert!(!satisfies("2.0.0", "^1.2.0"));
        assert!(satisfies("0.2.5", "^0.2.3"));
        assert!(!satisfies("0.3.0", "^0.2.3"));
        assert!(satisfies("1.2.9", "~1.2.3"));
        assert!(!satisfies("1.3.0", "~1.2.3"));
        assert!(satisfies("1.2.9", "~>1.2"));
    }

    #[test]
    fn test_comparator_sets_and_spacing() {
        assert!(satisfies("1.5.0", ">=1.2.0 <2.0.0"));
        assert!(!satisfies("2.0.0", ">=1.2.0 <2.0.0"));
        assert!(satisfies("1.5.0", ">= 1.2.0 < 2.0.0"));
        assert!(satisfies("1.5.0", ">=1.2.0, <2.0.0"));
        assert!(satisfies("1.2.3", ">=v1.2.3"));
    }

    #[test]
    fn test_hyphen_ranges() {
        assert!(satisfies("1.2.3", "1.2.3 - 2.3.4"));
        assert!(satisfies("2.3.4", "1.2.3 - 2.3.4"));
        assert!(!satisfies("2.3.5", "1.2.3 - 2.3.4"));
        assert!(satisfies("2.3.9", "1.2.3 - 2.3"));
        assert!(!satisfies("2.4.0", "1.2.3 - 2.3"));
    }

    #[test]
    fn test_alternatives() {
        assert!(satisfies("1.0.0", "1.x || >=3.0.0"));
        assert!(satisfies("3.1.0", "1.x || >=3.0.0"));
        assert!(!satisfies("2.0.0", "1.x || >=3.0.0"));
    }

    #[test]
    fn test_any_version() {
        assert!(satisfies("0.0.1", "*"));
        assert!(satisfies("9.9.9", ""));
        assert!(satisfies("4.0.0", "x"));
        assert!(satisfies("4.0.0", ">=*"));
        assert!(satisfies("1.5.0", "*.*.*"));
        assert!(satisfies("1.5.0", "x.x"));
        assert!(satisfies("0.1.0", "X.x.x"));
        assert!(!satisfies("1.5.0", "<x.x"));
    }

    #[test]
    fn test_trailing_wildcards_with_operators() {
        assert!(satisfies("1.9.0", "1.x.x"));
        assert!(!satisfies("2.0.0", "1.x.x"));
        assert!(satisfies("1.4.0", "<=1.x"));
        assert!(!satisfies("2.0.0", "<=1.x"));
        assert!(satisfies("2.0.0", ">1.x"));
    }

    #[test]
    fn test_invalid_range_fails_to_parse() {
        assert!(VersionRange::parse("not a range").is_err());
        assert!(VersionRange::parse(">=banana").is_err());
    }

    #[test]
    fn test_display_keeps_raw_expression() {
        let range: VersionRange = ">= 2.0.0".parse().unwrap();
        assert_eq!(range.to_string(), ">= 2.0.0");
        assert_eq!(range.as_str(), ">= 2.0.0");
    }
}

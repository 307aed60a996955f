//! Version - Dotted version strings (Titanium SDK, package releases)
//!
//! Versions are compared numerically, element by element, with missing
//! trailing elements treated as zero.
//!
//! # Examples
//! - `13.1.0.GA` == `13.1.0`
//! - `13.0` == `13.0.0`
//! - `13.0.0` < `13.0.1`
//!
//! Not semver: pre-release tags collapse to `0`.

use std::cmp::Ordering;
use std::fmt;

/// Parsed version: an ordered sequence of non-negative integers
#[derive(Debug, Clone, Default)]
pub struct VersionToken {
    parts: Vec<u64>,
}

impl VersionToken {
    /// Parse a version string
    ///
    /// `.GA` is dropped, `.RC` becomes a `-` separator, then the string is
    /// split on `.` and `-`. Each piece keeps its leading digits; a piece
    /// without any parses to `0`. Never fails.
    ///
    /// # Examples
    /// ```
    /// use titools::core::version::VersionToken;
    ///
    /// let v = VersionToken::parse("13.1.0.GA");
    /// assert_eq!(v.parts(), &[13, 1, 0]);
    /// ```
    pub fn parse(version: &str) -> Self {
        let normalized = version.replacen(".GA", "", 1).replacen(".RC", "-", 1);

        let parts = normalized
            .split(['.', '-'])
            .map(parse_piece)
            .collect();

        Self { parts }
    }

    /// Get the numeric parts
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn part(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

/// Leading digits of a piece, `0` when there are none
///
/// Values past `u64::MAX` saturate.
fn parse_piece(piece: &str) -> u64 {
    piece
        .trim()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}

impl Ord for VersionToken {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());

        for i in 0..len {
            match self.part(i).cmp(&other.part(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        Ordering::Equal
    }
}

impl PartialOrd for VersionToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the zero-padded ordering, so `13.0 == 13.0.0`.
impl PartialEq for VersionToken {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionToken {}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", joined.join("."))
    }
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionToken::parse(a).cmp(&VersionToken::parse(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard() {
        assert_eq!(VersionToken::parse("13.1.0").parts(), &[13, 1, 0]);
    }

    #[test]
    fn test_parse_ga_suffix() {
        assert_eq!(VersionToken::parse("13.1.0.GA").parts(), &[13, 1, 0]);
    }

    #[test]
    fn test_parse_rc_suffix() {
        // ".RC" acts as a separator, leaving an empty trailing piece
        assert_eq!(VersionToken::parse("13.1.0.RC").parts(), &[13, 1, 0, 0]);
        assert_eq!(VersionToken::parse("13.1.0.RC2").parts(), &[13, 1, 0, 2]);
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(VersionToken::parse("13.0.0-beta").parts(), &[13, 0, 0, 0]);
        assert_eq!(VersionToken::parse("unknown").parts(), &[0]);
        assert_eq!(VersionToken::parse("").parts(), &[0]);
        assert_eq!(VersionToken::parse("12.2x.1").parts(), &[12, 2, 1]);
    }

    #[test]
    fn test_parse_huge_piece_saturates() {
        assert_eq!(VersionToken::parse("99999999999999999999999").parts(), &[u64::MAX]);
        assert_eq!(
            compare_versions("99999999999999999999999", "1"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_equal() {
        assert_eq!(compare_versions("13.1.0", "13.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("13.1.0.GA", "13.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("13.1.0.RC", "13.1.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_lower() {
        assert_eq!(compare_versions("13.0.0", "13.1.0"), Ordering::Less);
        assert_eq!(compare_versions("12.1.0", "13.1.0"), Ordering::Less);
    }

    #[test]
    fn test_compare_higher() {
        assert_eq!(compare_versions("13.1.0", "13.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("14.0.0", "13.1.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_different_lengths() {
        assert_eq!(compare_versions("13.0", "13.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("13.0.0", "13.0.1"), Ordering::Less);
        assert_eq!(compare_versions("13.0.0.1", "13.0"), Ordering::Greater);
    }

    #[test]
    fn test_token_equality_is_padded() {
        assert_eq!(VersionToken::parse("13.0"), VersionToken::parse("13.0.0"));
        assert_eq!(VersionToken::parse("13.0").to_string(), "13.0");
    }

    #[test]
    fn test_sorting() {
        let mut versions: Vec<VersionToken> = ["12.0.0", "13.1.0.GA", "9.3", "13.0.1"]
            .iter()
            .map(|v| VersionToken::parse(v))
            .collect();
        versions.sort();

        let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["9.3", "12.0.0", "13.0.1", "13.1.0"]);
    }
}

use crate::boundary::BoundaryWarning;
use crate::domain::version::Version;
use crate::error::{ReleaseError, Result};

const PLACEHOLDER: &str = "{version}";

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Extract version text from tag by dropping one leading 'v'/'V' (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        self.name
            .strip_prefix('v')
            .or_else(|| self.name.strip_prefix('V'))
            .unwrap_or(&self.name)
    }
}

/// Tag naming pattern (e.g., "{version}", "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern; it must contain exactly one `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        match pattern.matches(PLACEHOLDER).count() {
            1 => Ok(TagPattern { pattern }),
            0 => Err(ReleaseError::tag(format!(
                "Pattern '{}' must contain {} placeholder",
                pattern, PLACEHOLDER
            ))),
            _ => Err(ReleaseError::tag(format!(
                "Pattern '{}' should have exactly one {} placeholder",
                pattern, PLACEHOLDER
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }

    /// Validate if a tag matches this pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.capture(tag).is_some()
    }

    /// Pull the version text out of a tag that follows this pattern
    fn capture<'t>(&self, tag: &'t str) -> Option<&'t str> {
        // Escape everything, then swap the escaped placeholder for a version group
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(
            &regex::escape(PLACEHOLDER),
            r"(\d+\.\d+\.\d+(?:[-+.]?[0-9A-Za-z][0-9A-Za-z.+-]*)?)",
        );

        let re = regex::Regex::new(&format!("^{}$", regex_pattern)).ok()?;
        re.captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Parse the version carried by a tag
    ///
    /// Tags following the pattern are parsed from their `{version}` part.
    /// Anything else falls back to stripping an optional leading 'v'/'V'.
    pub fn parse_version(&self, tag: &str) -> Result<Version> {
        match self.capture(tag) {
            Some(version) => Version::parse(version),
            None => Version::parse(Tag::new(tag).version_part()),
        }
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: PLACEHOLDER.to_string(),
        }
    }
}

/// Outcome of resolving the latest tag into a version
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTag {
    /// Latest tag name, if one was found
    pub tag: Option<String>,
    /// Version carried by the tag, or 0.0.0 when none is usable
    pub version: Version,
    /// Why the fallback version was used, if it was
    pub warning: Option<BoundaryWarning>,
}

/// Turn the latest tag (if any) into the version to bump from
///
/// Never fails: a missing tag gives 0.0.0, a tag that does not parse gives
/// 0.0.0 plus an [`BoundaryWarning::UnparsableTag`].
pub fn resolve_latest_version(latest_tag: Option<&str>, pattern: &TagPattern) -> ResolvedTag {
    let Some(tag) = latest_tag else {
        return ResolvedTag {
            tag: None,
            version: Version::INITIAL,
            warning: Some(BoundaryWarning::NoTags {
                fallback: Version::INITIAL.to_string(),
            }),
        };
    };

    match pattern.parse_version(tag) {
        Ok(version) => ResolvedTag {
            tag: Some(tag.to_string()),
            version,
            warning: None,
        },
        Err(e) => ResolvedTag {
            tag: Some(tag.to_string()),
            version: Version::INITIAL,
            warning: Some(BoundaryWarning::UnparsableTag {
                tag: tag.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("v1.2.3");
        assert_eq!(tag.name, "v1.2.3");
    }

    #[test]
    fn test_tag_version_part() {
        assert_eq!(Tag::new("v1.2.3").version_part(), "1.2.3");
        assert_eq!(Tag::new("V1.2.3").version_part(), "1.2.3");
        assert_eq!(Tag::new("1.2.3").version_part(), "1.2.3");
        // only one prefix character is dropped
        assert_eq!(Tag::new("vv1.2.3").version_part(), "v1.2.3");
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(TagPattern::new("release").is_err());
        assert!(TagPattern::new("{version}-{version}").is_err());
        assert!(TagPattern::new("v{version}").is_ok());
    }

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_default_pattern_is_bare_version() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.as_str(), "{version}");
        assert_eq!(pattern.format(&Version::new(0, 0, 1)), "0.0.1");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "release-1.2.3");
    }

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert!(pattern.matches("v1.2.3"));
        assert!(!pattern.matches("release-1.2.3"));
        assert!(!pattern.matches("v1.2"));
    }

    #[test]
    fn test_pattern_parse_version_via_pattern() {
        let pattern = TagPattern::new("thesis-{version}-final").unwrap();
        assert_eq!(
            pattern.parse_version("thesis-2.1.0-final").unwrap(),
            Version::new(2, 1, 0)
        );
    }

    #[test]
    fn test_pattern_parse_version_falls_back_to_prefix_strip() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.parse_version("v1.4.2").unwrap(), Version::new(1, 4, 2));
    }

    #[test]
    fn test_resolve_loose_release_tag_keeps_triple() {
        let pattern = TagPattern::new("thesis-v{version}").unwrap();
        let resolved = resolve_latest_version(Some("thesis-v1.0.0rc1"), &pattern);
        assert_eq!(resolved.version, Version::new(1, 0, 0));
        assert!(resolved.warning.is_none());

        let resolved = resolve_latest_version(Some("1.4.0.post2"), &TagPattern::default());
        assert_eq!(resolved.version, Version::new(1, 4, 0));
    }

    #[test]
    fn test_resolve_no_tag_defaults_to_zero() {
        let resolved = resolve_latest_version(None, &TagPattern::default());
        assert_eq!(resolved.version, Version::new(0, 0, 0));
        assert_eq!(resolved.tag, None);
        assert!(matches!(
            resolved.warning,
            Some(BoundaryWarning::NoTags { .. })
        ));
    }

    #[test]
    fn test_resolve_strips_leading_prefix() {
        let resolved = resolve_latest_version(Some("v1.2.3"), &TagPattern::default());
        assert_eq!(resolved.version, Version::new(1, 2, 3));
        assert_eq!(resolved.tag.as_deref(), Some("v1.2.3"));
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn test_resolve_malformed_tag_defaults_to_zero() {
        let resolved = resolve_latest_version(Some("draft-for-review"), &TagPattern::default());
        assert_eq!(resolved.version, Version::INITIAL);
        assert_eq!(resolved.tag.as_deref(), Some("draft-for-review"));
        match resolved.warning {
            Some(BoundaryWarning::UnparsableTag { tag, .. }) => assert_eq!(tag, "draft-for-review"),
            other => panic!("expected UnparsableTag warning, got {:?}", other),
        }
    }
}

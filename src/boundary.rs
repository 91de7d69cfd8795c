use std::fmt;

/// Non-fatal conditions met while resolving the release version.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag is reachable from HEAD
    NoTags { fallback: String },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Looking up the latest tag failed outright
    TagLookupFailed { reason: String },
    /// Fetching tags from the remote failed; local tags are used
    FetchFailed { remote: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { fallback } => {
                write!(f, "No tags found, starting from version {}", fallback)
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::TagLookupFailed { reason } => {
                write!(f, "Could not look up the latest tag: {}", reason)
            }
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}. Using local tags",
                    remote, reason
                )
            }
        }
    }
}

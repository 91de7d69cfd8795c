use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Ordering is lexicographic over (major, minor, patch), which the derived
/// `Ord` gives us through field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version used when no usable tag exists
    pub const INITIAL: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse the release triple out of a version string (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// A single leading `v`/`V` is stripped. Pre-release and build metadata are
    /// accepted but dropped, so "1.2.3-rc.1" parses as 1.2.3. Looser release
    /// strings such as "1.0.0rc1", "1.0.0.post1" or "01.2.3" keep their
    /// leading triple.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        match semver::Version::parse(clean) {
            Ok(parsed) => Ok(Version::from(parsed)),
            Err(e) => Self::parse_release_triple(clean).ok_or_else(|| {
                ReleaseError::version(format!(
                    "Invalid version format: '{}' - expected X.Y.Z ({})",
                    text, e
                ))
            }),
        }
    }

    /// Leading `X.Y.Z` followed by nothing, a non-numeric suffix or a dotted
    /// word ("1.0.0.post1"). A fourth numeric component is rejected.
    fn parse_release_triple(text: &str) -> Option<Self> {
        let re = regex::Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:[^0-9.].*|\.[A-Za-z].*)?$").ok()?;
        let caps = re.captures(text)?;
        let component = |i: usize| caps.get(i)?.as_str().parse::<u64>().ok();

        Some(Version::new(component(1)?, component(2)?, component(3)?))
    }

    /// Bump version according to bump mode
    ///
    /// Exactly one component increments and every component after it resets to
    /// zero. Fails only if the incremented component would overflow.
    pub fn bump(&self, mode: BumpMode) -> Result<Self> {
        let overflow = || {
            ReleaseError::version(format!("Cannot apply {} bump to {}: overflow", mode, self))
        };

        let next = match mode {
            BumpMode::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            BumpMode::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            BumpMode::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };

        Ok(next)
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version::new(v.major, v.minor, v.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Granularity of a version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BumpMode {
    Major,
    Minor,
    Patch,
}

impl BumpMode {
    pub const ALL: [BumpMode; 3] = [BumpMode::Major, BumpMode::Minor, BumpMode::Patch];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpMode::Major => "major",
            BumpMode::Minor => "minor",
            BumpMode::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpMode {
    type Err = ReleaseError;

    /// Parse a bump mode name; anything outside major/minor/patch is rejected
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(BumpMode::Major),
            "minor" => Ok(BumpMode::Minor),
            "patch" => Ok(BumpMode::Patch),
            _ => Err(ReleaseError::invalid_argument(format!(
                "Invalid bump mode '{}' (expected one of: major, minor, patch)",
                s
            ))),
        }
    }
}

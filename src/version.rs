use std::fmt;

use crate::error::{ReleaseError, Result};

/// Semantic version representation (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Classification of an entire commit range since the last release.
///
/// Variant order encodes severity, so reducing a commit set is `max`:
/// `Breaking > Feature > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeClass {
    Patch,
    Feature,
    Breaking,
}

impl Version {
    /// The version used when no prior release exists
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    pub fn parse(tag: &str) -> Result<Self> {
        // Remove 'v' or 'V' prefix
        let clean_tag = tag.trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = clean_tag.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| ReleaseError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to the detected change class.
    ///
    /// - **Breaking**: major += 1, minor = 0, patch = 0
    /// - **Feature**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    pub fn bump(&self, class: ChangeClass) -> Self {
        match class {
            ChangeClass::Breaking => Version {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            },
            ChangeClass::Feature => Version {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
            },
            ChangeClass::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch + 1,
            },
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeClass::Breaking => "breaking (major)",
            ChangeClass::Feature => "feature (minor)",
            ChangeClass::Patch => "patch",
        };
        write!(f, "{}", name)
    }
}

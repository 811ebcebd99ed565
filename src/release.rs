use std::path::Path;

use crate::config::Config;
use crate::error::{PublishStep, ReleaseError, Result};
use crate::git::Repository;
use crate::version::Version;
use crate::version_file;

/// Outcome of the version reader.
///
/// The two fallback cases both resolve to `0.0.0` but stay distinguishable,
/// so an unparsable tag is surfaced to the operator instead of silently
/// passing as "no release yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentVersion {
    /// No annotated tag exists; valid initial state, not an error
    NoPriorRelease,
    /// The latest annotated tag parsed as a semantic version
    Released { tag: String, version: Version },
    /// The latest annotated tag exists but is not a semantic version
    UnparsableTag { tag: String },
}

impl CurrentVersion {
    /// The effective version this outcome resolves to
    pub fn version(&self) -> Version {
        match self {
            CurrentVersion::Released { version, .. } => *version,
            CurrentVersion::NoPriorRelease | CurrentVersion::UnparsableTag { .. } => Version::ZERO,
        }
    }

    /// The tag the commit range starts after, if one exists
    pub fn tag(&self) -> Option<&str> {
        match self {
            CurrentVersion::Released { tag, .. } | CurrentVersion::UnparsableTag { tag } => {
                Some(tag)
            }
            CurrentVersion::NoPriorRelease => None,
        }
    }
}

/// Outcome of the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Confirmed,
    Mismatch { actual: Version },
}

/// Reads the current released version from the latest reachable annotated tag.
pub fn current_version<R: Repository>(repo: &R) -> Result<CurrentVersion> {
    match repo.latest_annotated_tag()? {
        None => Ok(CurrentVersion::NoPriorRelease),
        Some(tag) => match Version::parse(&tag) {
            Ok(version) => Ok(CurrentVersion::Released { tag, version }),
            Err(_) => Ok(CurrentVersion::UnparsableTag { tag }),
        },
    }
}

/// Publishes a release: rewrite the version declaration, stage it, commit,
/// and create the annotated tag.
///
/// Steps run in order and are not atomic; a failure surfaces the step that
/// caused it and leaves already-completed steps in place. `on_step` is
/// invoked before each step starts, for progress reporting.
pub fn publish<R: Repository>(
    repo: &R,
    config: &Config,
    next: Version,
    mut on_step: impl FnMut(PublishStep),
) -> Result<()> {
    let path = Path::new(&config.version_file.path);

    on_step(PublishStep::RewriteVersionFile);
    version_file::rewrite_declaration(path, &config.version_file.key, &next)
        .map_err(|e| ReleaseError::publish(PublishStep::RewriteVersionFile, e))?;

    on_step(PublishStep::StageVersionFile);
    repo.stage_file(path)
        .map_err(|e| ReleaseError::publish(PublishStep::StageVersionFile, e))?;

    on_step(PublishStep::CreateCommit);
    repo.commit(&format!("chore(release): {}", next))
        .map_err(|e| ReleaseError::publish(PublishStep::CreateCommit, e))?;

    on_step(PublishStep::CreateTag);
    let tag = config.tag_name(&next);
    repo.create_annotated_tag(&tag, &format!("Release {}", tag))
        .map_err(|e| ReleaseError::publish(PublishStep::CreateTag, e))?;

    Ok(())
}

/// Re-reads the current version after publishing and compares it
/// structurally against the expected one.
pub fn verify<R: Repository>(repo: &R, expected: Version) -> Result<Verification> {
    let actual = current_version(repo)?.version();
    if actual == expected {
        Ok(Verification::Confirmed)
    } else {
        Ok(Verification::Mismatch { actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_current_version_no_tag() {
        let repo = MockRepository::new();
        let current = current_version(&repo).unwrap();
        assert_eq!(current, CurrentVersion::NoPriorRelease);
        assert_eq!(current.version(), Version::ZERO);
        assert_eq!(current.tag(), None);
    }

    #[test]
    fn test_current_version_from_tag() {
        let repo = MockRepository::new();
        repo.add_tag("v1.2.3");
        let current = current_version(&repo).unwrap();
        assert_eq!(current.version(), Version::new(1, 2, 3));
        assert_eq!(current.tag(), Some("v1.2.3"));
    }

    #[test]
    fn test_current_version_unparsable_tag_falls_back_to_zero() {
        let repo = MockRepository::new();
        repo.add_tag("release-2024");
        let current = current_version(&repo).unwrap();
        assert_eq!(
            current,
            CurrentVersion::UnparsableTag {
                tag: "release-2024".to_string()
            }
        );
        assert_eq!(current.version(), Version::ZERO);
    }

    #[test]
    fn test_verify_confirmed() {
        let repo = MockRepository::new();
        repo.add_tag("v2.0.0");
        assert_eq!(
            verify(&repo, Version::new(2, 0, 0)).unwrap(),
            Verification::Confirmed
        );
    }

    #[test]
    fn test_verify_mismatch() {
        let repo = MockRepository::new();
        repo.add_tag("v9.9.9");
        assert_eq!(
            verify(&repo, Version::new(2, 0, 0)).unwrap(),
            Verification::Mismatch {
                actual: Version::new(9, 9, 9)
            }
        );
    }
}

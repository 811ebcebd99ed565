use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The publisher's side-effecting steps, in execution order.
///
/// Carried inside [ReleaseError::Publish] so a failure always names the step
/// that caused it. Completed steps are never rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    RewriteVersionFile,
    StageVersionFile,
    CreateCommit,
    CreateTag,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStep::RewriteVersionFile => "rewrite version file",
            PublishStep::StageVersionFile => "stage version file",
            PublishStep::CreateCommit => "create release commit",
            PublishStep::CreateTag => "create annotated tag",
        };
        write!(f, "{}", name)
    }
}

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Version file not found: {}", .0.display())]
    VersionFileMissing(PathBuf),

    #[error("No `{} = \"X.Y.Z\"` declaration found in {}", .key, .path.display())]
    DeclarationNotFound { key: String, path: PathBuf },

    #[error("Release step '{step}' failed: {source}")]
    Publish {
        step: PublishStep,
        #[source]
        source: Box<ReleaseError>,
    },
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Wrap an error with the publish step it occurred in
    pub fn publish(step: PublishStep, source: ReleaseError) -> Self {
        ReleaseError::Publish {
            step,
            source: Box::new(source),
        }
    }

    /// The publish step this error occurred in, if any
    pub fn failed_step(&self) -> Option<PublishStep> {
        match self {
            ReleaseError::Publish { step, .. } => Some(*step),
            _ => None,
        }
    }
}

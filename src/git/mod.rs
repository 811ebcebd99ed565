//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository
//! operations a release needs, allowing for a real git2 implementation and
//! a mock implementation for testing.
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations so the release pipeline is testable without a real
//! repository.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Repository operations used by the release pipeline.
///
/// A release run is single-threaded and assumes exclusive access to the
/// working tree, so implementors are not required to be thread-safe. All
/// methods return [crate::error::Result] and should map underlying errors
/// (like `git2::Error`) to [crate::error::ReleaseError] variants.
///
/// - [Git2Repository](repository::Git2Repository): real implementation over `git2`
/// - [MockRepository](mock::MockRepository): in-memory implementation for tests
pub trait Repository {
    /// Name of the most recent annotated tag reachable from HEAD.
    ///
    /// Returns `Ok(None)` when no annotated tag exists; that is a valid
    /// state (no prior release), not an error.
    fn latest_annotated_tag(&self) -> Result<Option<String>>;

    /// Full messages (subject and body) of every commit strictly after
    /// `tag` up to HEAD, in chronological order (oldest first).
    ///
    /// With `tag` = `None`, returns every commit reachable from HEAD.
    fn messages_since_tag(&self, tag: Option<&str>) -> Result<Vec<String>>;

    /// Stage a single file in the index.
    fn stage_file(&self, path: &Path) -> Result<()>;

    /// Create a commit of the current index on HEAD with the given message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag pointing at HEAD.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;
}

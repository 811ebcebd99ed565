use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Repository operation a [MockRepository] can be told to fail at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Stage,
    Commit,
    Tag,
}

#[derive(Default)]
struct MockState {
    /// Annotated tags in creation order; the last one is the most recent
    tags: Vec<String>,
    /// Messages of commits made since the latest tag
    messages: Vec<String>,
    staged: Vec<PathBuf>,
    commits: Vec<String>,
    fail_on: Option<MockFailure>,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    state: RefCell<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            state: RefCell::new(MockState::default()),
        }
    }

    /// Add an existing annotated tag (most recently added wins)
    pub fn add_tag(&self, name: impl Into<String>) {
        self.state.borrow_mut().tags.push(name.into());
    }

    /// Add a commit message to the range since the latest tag
    pub fn add_commit(&self, message: impl Into<String>) {
        self.state.borrow_mut().messages.push(message.into());
    }

    /// Make the given operation fail when next invoked
    pub fn fail_on(&self, failure: MockFailure) {
        self.state.borrow_mut().fail_on = Some(failure);
    }

    /// Files staged through this mock
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.state.borrow().staged.clone()
    }

    /// Messages of commits created through this mock
    pub fn created_commits(&self) -> Vec<String> {
        self.state.borrow().commits.clone()
    }

    /// All tags, both pre-seeded and created through this mock
    pub fn tags(&self) -> Vec<String> {
        self.state.borrow().tags.clone()
    }

    fn check_failure(&self, op: MockFailure, what: &str) -> Result<()> {
        if self.state.borrow().fail_on == Some(op) {
            return Err(ReleaseError::config(format!("mock failure: {}", what)));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_annotated_tag(&self) -> Result<Option<String>> {
        Ok(self.state.borrow().tags.last().cloned())
    }

    fn messages_since_tag(&self, _tag: Option<&str>) -> Result<Vec<String>> {
        Ok(self.state.borrow().messages.clone())
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        self.check_failure(MockFailure::Stage, "stage")?;
        self.state.borrow_mut().staged.push(path.to_path_buf());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.check_failure(MockFailure::Commit, "commit")?;
        let mut state = self.state.borrow_mut();
        state.commits.push(message.to_string());
        // Committing starts a fresh range on top of the new HEAD
        state.messages.clear();
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, _message: &str) -> Result<()> {
        self.check_failure(MockFailure::Tag, "tag")?;
        let mut state = self.state.borrow_mut();
        if state.tags.iter().any(|t| t == name) {
            return Err(ReleaseError::config(format!("tag '{}' already exists", name)));
        }
        state.tags.push(name.to_string());
        Ok(())
    }
}

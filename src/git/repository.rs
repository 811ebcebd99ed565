use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository as Git2Repo};

use crate::error::{ReleaseError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    /// Resolves a path to its index-relative form inside the working tree.
    fn workdir_relative(&self, path: &Path) -> Result<std::path::PathBuf> {
        let workdir = self.repo.workdir().ok_or_else(|| {
            ReleaseError::config("Repository has no working tree (bare repository)")
        })?;

        let canonical = path.canonicalize()?;
        let workdir = workdir.canonicalize()?;
        let relative = canonical.strip_prefix(&workdir).map_err(|_| {
            ReleaseError::config(format!(
                "'{}' is outside the repository working tree",
                path.display()
            ))
        })?;

        Ok(relative.to_path_buf())
    }
}

impl super::Repository for Git2Repository {
    fn latest_annotated_tag(&self) -> Result<Option<String>> {
        // Map every annotated tag to the commit it points at. Lightweight
        // tags peel to a commit but not to a tag object, so they are skipped.
        let mut annotated: HashMap<Oid, String> = HashMap::new();
        let tags = self.repo.tag_names(None)?;

        for name in tags.iter().flatten() {
            if let Ok(reference) = self.repo.find_reference(&format!("refs/tags/{}", name)) {
                if reference.peel_to_tag().is_ok() {
                    if let Ok(commit) = reference.peel_to_commit() {
                        annotated.insert(commit.id(), name.to_string());
                    }
                }
            }
        }

        if annotated.is_empty() {
            return Ok(None);
        }

        // Walk history from HEAD; the first tagged commit is the latest tag
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(name) = annotated.get(&oid) {
                return Ok(Some(name.clone()));
            }
        }

        Ok(None)
    }

    fn messages_since_tag(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        if let Some(tag) = tag {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", tag))?;
            let commit = reference.peel_to_commit()?;
            revwalk.hide(commit.id())?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            messages.push(commit.message().unwrap_or("").to_string());
        }

        // Reverse to get chronological order (oldest first)
        messages.reverse();
        Ok(messages)
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        let relative = self.workdir_relative(path)?;

        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.repo.head()?.peel_to_commit()?;
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }
}

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Rewrites the `KEY = "X.Y.Z"` declaration in the designated source file.
///
/// Only the quoted value on the declaration line changes; every other byte
/// of the file is preserved. A missing file or a file without a matching
/// declaration line is fatal and leaves the file untouched.
pub fn rewrite_declaration(path: &Path, key: &str, next: &Version) -> Result<()> {
    let content = fs::read_to_string(path)
        .map_err(|_| ReleaseError::VersionFileMissing(path.to_path_buf()))?;

    let pattern = format!(r#"(?m)^(\s*{}\s*=\s*")[^"]*(")"#, regex::escape(key));
    let re = Regex::new(&pattern)
        .map_err(|e| ReleaseError::config(format!("Invalid version key '{}': {}", key, e)))?;

    if !re.is_match(&content) {
        return Err(ReleaseError::DeclarationNotFound {
            key: key.to_string(),
            path: path.to_path_buf(),
        });
    }

    let updated = re.replace(&content, format!("${{1}}{}${{2}}", next));
    fs::write(path, updated.as_bytes())?;
    Ok(())
}

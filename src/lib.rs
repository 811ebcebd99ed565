pub mod config;
pub mod conventional;
pub mod error;
pub mod git;
pub mod release;
pub mod ui;
pub mod version;
pub mod version_file;

pub use error::{ReleaseError, Result};

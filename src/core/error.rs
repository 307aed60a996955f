//! Errors raised while syncing a knowledge block into a target file

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single sync call
///
/// None of these leave a partially written target behind: the new content
/// is composed in memory and written once, after every check passed.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The AGENTS-TEMPLATE.md file is missing
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The template has no usable documentation index
    #[error("invalid template: {0}")]
    TemplateFormat(String),

    /// Reading or writing a file failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

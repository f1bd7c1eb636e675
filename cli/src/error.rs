// cli/src/error.rs — sigdoc Error Taxonomy
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T, E = SigDocError> = std::result::Result<T, E>;

/// Structural failures raised by key handling, the artifact store and the
/// trust registry. Verification outcomes are never reported through this type.
#[derive(Debug, Error)]
pub enum SigDocError {
    /// Malformed PEM, artifact file or canonical payload.
    #[error("malformed {what}: {reason}")]
    Format { what: &'static str, reason: String },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Wrong or missing password, corrupt key data, unusable key parameters.
    #[error("key error: {0}")]
    Key(String),

    #[error("no private key loaded")]
    NoKey,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl SigDocError {
    pub(crate) fn format(what: &'static str, reason: impl ToString) -> Self {
        SigDocError::Format { what, reason: reason.to_string() }
    }

    pub(crate) fn key(reason: impl ToString) -> Self {
        SigDocError::Key(reason.to_string())
    }

    /// Maps a filesystem error, keeping "missing file" distinct from other I/O failures.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SigDocError::NotFound(path.to_path_buf())
        } else {
            SigDocError::Io { path: path.to_path_buf(), source }
        }
    }
}

// cli/src/docs/files.rs — text file plumbing shared by key and artifact persistence
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SigDocError};

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SigDocError::from_io(path, e))
}

/// Writes `contents`, replacing whatever is at `path`. Missing parent directories are created.
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SigDocError::from_io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| SigDocError::from_io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

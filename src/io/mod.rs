pub mod output;

use crate::errors::CogniError;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &[u8]) -> Result<(), CogniError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| CogniError::io(&e, Some(path.to_path_buf())))
}

pub fn ensure_dir(path: &Path) -> Result<(), CogniError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| CogniError::io(&e, Some(path.to_path_buf())))?;
    }
    Ok(())
}

//! File collaborators: whole-file read and write.

use std::fs;
use std::path::Path;

use alloc::vec::Vec;

use crate::CodecError;

/// Read an entire file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>, CodecError> {
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Create or truncate `path` and write `bytes` to it.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    fs::write(path, bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

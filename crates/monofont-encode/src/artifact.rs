//! Artifact writing.
//!
//! Artifacts are assembled in memory and written through a temporary file
//! in the destination directory, then renamed into place. A failed write
//! leaves any previous file untouched and never a truncated one.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{event, Level};

use crate::error::EncodeError;

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    /// Destination path.
    pub path: PathBuf,
    /// Bytes written.
    pub len: usize,
    /// BLAKE3 hash of the contents.
    pub hash: String,
}

/// Computes the BLAKE3 hash of artifact bytes as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Atomically writes `bytes` to `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<WrittenArtifact, EncodeError> {
    let unwritable = |source: std::io::Error| EncodeError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(unwritable)?;
    tmp.write_all(bytes).map_err(unwritable)?;
    tmp.as_file().sync_all().map_err(unwritable)?;
    tmp.persist(path).map_err(|e| unwritable(e.error))?;

    let hash = hash_bytes(bytes);
    event!(
        Level::DEBUG,
        path = %path.display(),
        len = bytes.len(),
        hash = %hash,
        "wrote artifact"
    );
    Ok(WrittenArtifact {
        path: path.to_path_buf(),
        len: bytes.len(),
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.rs");
        std::fs::write(&path, "old").unwrap();

        let written = write_atomic(&path, b"new contents").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
        assert_eq!(written.len, 12);
        assert_eq!(written.hash, hash_bytes(b"new contents"));
        assert_eq!(written.hash.len(), 64);
    }

    #[test]
    fn test_missing_directory_is_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("font.bin");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, EncodeError::DestinationUnwritable { .. }));
        assert!(!path.exists());
    }
}

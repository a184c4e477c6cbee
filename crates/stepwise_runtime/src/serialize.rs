//! Trace export and import using `MessagePack`.
//!
//! Exported traces keep their struct field names, so a file written here can
//! be read back into the same trace type or inspected with any `MessagePack`
//! tool.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use stepwise_foundation::{Error, ErrorKind, Result};

/// Serializes a value to `MessagePack` bytes with named fields.
///
/// # Errors
///
/// Returns a `Serialization` error if encoding fails.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a value from `MessagePack` bytes.
///
/// # Errors
///
/// Returns a `Serialization` error if decoding fails.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}

/// Writes already-encoded bytes to a file, replacing it if it exists.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be created or written.
pub fn write_bytes<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

/// Saves a value to a file as `MessagePack`.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_to_file<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    write_bytes(&to_bytes(value)?, path)
}

/// Loads a value from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoding fails.
pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}

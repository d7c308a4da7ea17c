//! Capability-based file access.

use std::io::{self, BufReader};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use serde::de::DeserializeOwned;

use crate::DataError;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the I/O error raised while opening the parent directory or
/// reading the entry's metadata, including `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Read and decode a JSON document from `path`.
///
/// `what` names the document in decoding errors.
///
/// # Errors
/// Returns [`DataError::Open`] when the file cannot be opened and
/// [`DataError::Decode`] when its contents are not the expected JSON.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use refuel_core::PlanRequest;
/// use refuel_data::read_json;
///
/// # fn main() -> Result<(), refuel_data::DataError> {
/// let request: PlanRequest = read_json(Utf8Path::new("request.json"), "plan request")?;
/// println!("{} stations", request.stations.len());
/// # Ok(())
/// # }
/// ```
pub fn read_json<T: DeserializeOwned>(path: &Utf8Path, what: &'static str) -> Result<T, DataError> {
    let file = open_utf8_file(path).map_err(|source| DataError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::Decode { source, what })
}

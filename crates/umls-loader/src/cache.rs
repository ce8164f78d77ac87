//! JSON caches of extracted vocabularies.
//!
//! A cache file is trusted whenever it exists and no refresh is requested;
//! source file timestamps are not compared. Writes overwrite the whole file
//! and are not atomic, so an interrupted write leaves a corrupt cache.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::types::{UmlsError, UmlsResult};

/// File name of the vocabulary registry cache.
pub const REGISTRY_CACHE_FILE: &str = "umls_sab.json";

/// Path of the concept cache for a vocabulary, e.g. `ICD9CM_umls.json`.
pub fn concept_cache_path<P: AsRef<Path>>(directory: P, abbreviation: &str) -> PathBuf {
    directory
        .as_ref()
        .join(format!("{}_umls.json", abbreviation))
}

/// Path of the registry cache.
pub fn registry_cache_path<P: AsRef<Path>>(directory: P) -> PathBuf {
    directory.as_ref().join(REGISTRY_CACHE_FILE)
}

/// Serializes `value` to `path`, replacing any existing file.
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> UmlsResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Deserializes a value from `path`.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> UmlsResult<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(UmlsError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

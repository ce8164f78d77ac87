//! RRF file discovery.

use std::fs;
use std::path::Path;

use tracing::debug;
use umls_types::well_known::{MRCONSO, MRDEF, MRREL, MRSAB, MRSAT};

use crate::types::{RrfFiles, UmlsError, UmlsResult};

/// Discovers the RRF files of an extract directory.
///
/// MRCONSO, MRREL and MRSAB are required; MRSAT and MRDEF are optional
/// passes and may be absent from small subsets.
pub fn discover_rrf_files<P: AsRef<Path>>(path: P) -> UmlsResult<RrfFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(UmlsError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = RrfFiles::new(path);

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        match &*filename_str {
            MRCONSO => files.mrconso = Some(entry.path()),
            MRREL => files.mrrel = Some(entry.path()),
            MRSAT => files.mrsat = Some(entry.path()),
            MRDEF => files.mrdef = Some(entry.path()),
            MRSAB => files.mrsab = Some(entry.path()),
            _ => continue,
        }
        debug!(
            "Found {} ({})",
            filename_str,
            format_bytes(entry.metadata()?.len())
        );
    }

    if !files.has_required_files() {
        let missing = files.missing_files();
        return Err(UmlsError::RequiredFileMissing {
            files: missing.join(", "),
            directory: path.display().to_string(),
        });
    }

    Ok(files)
}

/// Formats a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

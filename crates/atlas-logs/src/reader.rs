//! Reading flag records from `.log` and `.log.gz` files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use atlas_core::FlagRecord;
use flate2::read::GzDecoder;

use crate::error::LogError;

pub const LOG_SUFFIX: &str = ".log";
pub const COMPRESSED_LOG_SUFFIX: &str = ".log.gz";

/// Whether a file name carries one of the recognized log suffixes.
#[must_use]
pub fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(LOG_SUFFIX) || name.ends_with(COMPRESSED_LOG_SUFFIX))
}

fn is_compressed(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(COMPRESSED_LOG_SUFFIX))
}

/// Recognized log files directly inside `dir`, sorted by file name.
///
/// Subdirectories and files with other suffixes are skipped.
///
/// # Errors
///
/// Returns [`LogError::Io`] if the directory cannot be listed.
pub fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>, LogError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| LogError::io(dir, e))? {
        let entry = entry.map_err(|e| LogError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_log_file(&path) {
            files.push(path);
        } else {
            tracing::trace!(path = %path.display(), "skipping non-log file");
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one log file, decompressing `.log.gz` transparently.
///
/// Blank lines are skipped. The first line that is not valid JSON (including
/// bytes that are not UTF-8) aborts the read for the whole file.
///
/// # Errors
///
/// [`LogError::Io`] on open/read failures (including corrupt gzip data) and
/// [`LogError::Parse`] with the offending line number.
pub fn read_log_file(path: &Path) -> Result<Vec<FlagRecord>, LogError> {
    let file = File::open(path).map_err(|e| LogError::io(path, e))?;
    let reader: Box<dyn Read> = if is_compressed(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut reader = BufReader::new(reader);
    let mut records = Vec::new();
    let mut line = Vec::new();
    let mut number = 0;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| LogError::io(path, e))?;
        if read == 0 {
            break;
        }
        number += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let value = serde_json::from_slice(&line).map_err(|source| LogError::Parse {
            path: path.to_path_buf(),
            line: number,
            source,
        })?;
        records.push(FlagRecord::new(value));
    }
    tracing::debug!(path = %path.display(), flags = records.len(), "read log file");
    Ok(records)
}

/// Read every recognized log file in `dir`, in file-name order.
///
/// # Errors
///
/// Propagates the first [`LogError`] from listing or reading.
pub fn read_log_dir(dir: &Path) -> Result<Vec<FlagRecord>, LogError> {
    let mut records = Vec::new();
    for file in list_log_files(dir)? {
        records.extend(read_log_file(&file)?);
    }
    Ok(records)
}

/// Read a single log file, or every log file of a directory.
///
/// # Errors
///
/// See [`read_log_file`] and [`read_log_dir`].
pub fn read_path(path: &Path) -> Result<Vec<FlagRecord>, LogError> {
    if path.is_dir() {
        read_log_dir(path)
    } else {
        read_log_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("flags.log", true)]
    #[case("flags.log.gz", true)]
    #[case("flags.gz", false)]
    #[case("flags.geojson", false)]
    #[case("flags.log.bak", false)]
    fn recognizes_log_suffixes(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_log_file(Path::new(name)), expected);
    }

    #[test]
    fn compressed_detection_only_for_log_gz() {
        assert!(is_compressed(Path::new("/tmp/a.log.gz")));
        assert!(!is_compressed(Path::new("/tmp/a.log")));
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::model::application::Application;

/// Error type for data-file I/O.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the application list from `path`. A missing file is an empty tracker;
/// unreadable or invalid content (including field values that fail their
/// grammar) is an error rather than silent data loss.
pub fn load_applications(path: &Path) -> Result<Vec<Application>, DataError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save the application list to `path` atomically: write a temp file in the
/// same directory, then persist it over the target.
pub fn save_applications(path: &Path, applications: &[Application]) -> Result<(), DataError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }

    let text = serde_json::to_string_pretty(applications).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(|source| DataError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tmp.persist(path).map_err(|e| DataError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

//! Incremental-sync boundary: the `from` date read at start, today's date written at the end.

use crate::domain::models::DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Lower bound used when no cursor file is configured.
pub const DEFAULT_FROM: NaiveDate = match NaiveDate::from_ymd_opt(2012, 1, 1) {
    Some(d) => d,
    None => panic!("invalid default from date"),
};

#[derive(thiserror::Error, Debug)]
pub enum CursorError {
    #[error("could not read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid date {value:?} in {path}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("could not write date information to file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn read_from(path: Option<&Path>) -> Result<NaiveDate, CursorError> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(DEFAULT_FROM);
    };
    let raw = std::fs::read_to_string(path).map_err(|source| CursorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = raw.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| CursorError::InvalidDate {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

/// Returns whether a file was written.
pub fn write_to(path: Option<&Path>, date: NaiveDate) -> Result<bool, CursorError> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(false);
    };
    std::fs::write(path, date.format(DATE_FORMAT).to_string()).map_err(|source| {
        CursorError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(true)
}

use crate::domain::models::DownloadTarget;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Split at the last `.`; the extension keeps its dot, a name without one has none.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) => file_name.split_at(idx),
        None => (file_name, ""),
    }
}

/// First `{base}_{n}{ext}` (n >= 2) that does not exist in `dir`.
pub fn unused_file_name(dir: &Path, file_name: &str) -> String {
    let (base, ext) = split_extension(file_name);
    let mut n = 2u64;
    loop {
        let candidate = format!("{}_{}{}", base, n, ext);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Stream `content` into the target. Returns the path actually written.
///
/// An existing file is overwritten unless `rename_on_collision` is set.
pub fn write_file(
    content: &mut dyn Read,
    target: &DownloadTarget,
    rename_on_collision: bool,
) -> Result<PathBuf, WriteError> {
    std::fs::create_dir_all(&target.directory).map_err(|source| WriteError::CreateDir {
        path: target.directory.clone(),
        source,
    })?;

    let mut file_name = target.file_name.clone();
    if rename_on_collision && target.directory.join(&file_name).exists() {
        file_name = unused_file_name(&target.directory, &file_name);
        info!("file with same name exists -> rename to {}", file_name);
    }
    let path = target.directory.join(&file_name);
    debug!(path = %path.display(), "writing file");

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(source) => return Err(WriteError::Write { path, source }),
    };
    if let Err(source) = copy_into(content, file) {
        // Only a file this call created and truncated is removed.
        let _ = std::fs::remove_file(&path);
        return Err(WriteError::Write { path, source });
    }
    Ok(path)
}

fn copy_into(content: &mut dyn Read, file: File) -> std::io::Result<u64> {
    let mut out = BufWriter::new(file);
    let written = std::io::copy(content, &mut out)?;
    out.flush()?;
    Ok(written)
}

use crate::domain::models::{DownloadTarget, FALLBACK_LABEL, FileAttachment, RunConfig};
use std::path::PathBuf;

/// Map a name to something every common filesystem accepts as a path segment.
pub fn to_valid_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\n' | '\r'))
        .map(|c| match c {
            ':' | '\\' | '/' | '*' | '?' | '|' | '<' | '>' | '\'' => '-',
            other => other,
        })
        .collect()
}

/// `output_dir[/attached_to_type[/display_name]]`
pub fn build_directory(cfg: &RunConfig, attached_to_type: &str, display_name: &str) -> PathBuf {
    let mut dir = cfg.output_dir.clone();
    if !cfg.use_subdirectories {
        return dir;
    }
    dir.push(segment(attached_to_type.to_string()));
    if !display_name.is_empty() {
        dir.push(segment(to_valid_file_name(display_name)));
    }
    dir
}

// `.` and `..` would step out of the intended directory.
fn segment(name: String) -> String {
    if !name.is_empty() && name.chars().all(|c| c == '.') {
        FALLBACK_LABEL.to_string()
    } else {
        name
    }
}

pub fn download_target(
    cfg: &RunConfig,
    attachment: &FileAttachment,
    display_name: &str,
) -> DownloadTarget {
    let file_name = if attachment.file_name.contains(['/', '\\']) {
        to_valid_file_name(&attachment.file_name)
    } else {
        attachment.file_name.clone()
    };
    DownloadTarget {
        directory: build_directory(cfg, attachment.owner_type(), display_name),
        file_name,
    }
}

use crate::domain::models::{
    DATE_FORMAT, DownloadTarget, FileAttachment, RunConfig, RunSummary, SyncWindow,
};
use crate::services::api::AccountApi;
use crate::services::cursor;
use crate::services::output::{print_one, summary_rows};
use crate::services::paths::download_target;
use crate::services::resolver::{NameResolver, Resolution};
use crate::services::writer::write_file;
use anyhow::Context;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// What happened to one listing entry.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Downloaded(PathBuf),
    Planned(DownloadTarget),
    SkippedToday,
    Failed { file_id: Option<String>, reason: String },
}

/// Whole run: cursor, listing, per-file work, report, cursor again.
pub fn handle_sync<A: AccountApi + ?Sized>(
    cfg: &RunConfig,
    api: &A,
    today: NaiveDate,
) -> anyhow::Result<RunSummary> {
    info!(
        "downloading files from Blueworks Live account {} for user {}",
        cfg.account, cfg.credentials.user
    );
    info!("will store files in directory: {}", cfg.output_dir.display());

    let from = cursor::read_from(cfg.from_file.as_deref()).context("reading 'from' date")?;
    if cfg.from_file.is_some() {
        info!("from date: {}", from.format(DATE_FORMAT));
    }
    let window = SyncWindow { from, to: today };

    let summary = sync_attachments(cfg, api, window)?;
    print_one(cfg.json, summary.clone(), summary_rows)?;
    persist_cursor(cfg, window.to);
    Ok(summary)
}

pub fn sync_attachments<A: AccountApi + ?Sized>(
    cfg: &RunConfig,
    api: &A,
    window: SyncWindow,
) -> anyhow::Result<RunSummary> {
    let listing = api
        .list_files(window.from)
        .context("error calling the Blueworks Live REST API")?;

    let mut summary = RunSummary {
        listed: listing.files.len(),
        output_dir: cfg.output_dir.display().to_string(),
        from: window.from.format(DATE_FORMAT).to_string(),
        to: window.to.format(DATE_FORMAT).to_string(),
        ..Default::default()
    };
    let today = window.to.format(DATE_FORMAT).to_string();
    let resolver = NameResolver::new(api);

    for raw in &listing.files {
        match process_entry(cfg, api, &resolver, raw, &today) {
            Outcome::Downloaded(path) => {
                summary.downloaded += 1;
                info!("#{} downloaded to {}", summary.downloaded, path.display());
            }
            Outcome::Planned(target) => {
                summary.planned += 1;
                debug!(path = %target.path().display(), "planned");
            }
            Outcome::SkippedToday => summary.skipped += 1,
            Outcome::Failed { file_id, reason } => {
                summary.errors += 1;
                summary.failures.push(format!(
                    "{}: {}",
                    file_id.as_deref().unwrap_or("<no id>"),
                    reason
                ));
            }
        }
    }
    Ok(summary)
}

pub fn process_entry<A: AccountApi + ?Sized>(
    cfg: &RunConfig,
    api: &A,
    resolver: &NameResolver<'_, A>,
    raw: &serde_json::Value,
    today: &str,
) -> Outcome {
    let attachment: FileAttachment = match serde_json::from_value(raw.clone()) {
        Ok(a) => a,
        Err(e) => {
            error!(entry = %raw, "malformed listing entry, skipping: {}", e);
            return Outcome::Failed {
                file_id: raw["fileId"].as_str().map(str::to_string),
                reason: e.to_string(),
            };
        }
    };
    let id = attachment.file_id.as_str();
    let name = attachment.file_name.as_str();
    debug!(
        id,
        size = ?attachment.file_size,
        uploader = ?attachment.upload_user_id,
        uploaded = %attachment.upload_date,
        "listing entry"
    );

    if cfg.skip_today && attachment.upload_date.starts_with(today) {
        info!("will skip this file because it is from today, id={} name={}", id, name);
        return Outcome::SkippedToday;
    }

    let resolution = if cfg.use_subdirectories {
        resolver.resolve(
            attachment.attached_to_type.as_deref(),
            attachment.attached_to_id.as_deref(),
        )
    } else {
        Resolution::NotApplicable
    };
    let target = download_target(cfg, &attachment, resolution.display_name());

    if cfg.list_only {
        info!(
            "would download file id={} name={} to {}",
            id,
            name,
            target.directory.display()
        );
        return Outcome::Planned(target);
    }

    info!(
        "will download file id={} name={} to {}",
        id,
        name,
        target.directory.display()
    );
    let mut content = match api.download_file(id) {
        Ok(content) => content,
        Err(e) => {
            error!("could not download file id={} name={} - will skip this file: {}", id, name, e);
            return Outcome::Failed {
                file_id: Some(id.to_string()),
                reason: e.to_string(),
            };
        }
    };
    match write_file(content.as_mut(), &target, cfg.rename_on_collision) {
        Ok(path) => {
            info!("downloaded file id={} name={} to {}", id, name, path.display());
            info!("FILEINFO: {}", raw);
            Outcome::Downloaded(path)
        }
        Err(e) => {
            error!("could not store file id={} name={}: {}", id, name, e);
            Outcome::Failed {
                file_id: Some(id.to_string()),
                reason: e.to_string(),
            }
        }
    }
}

fn persist_cursor(cfg: &RunConfig, today: NaiveDate) {
    match cursor::write_to(cfg.to_file.as_deref(), today) {
        Ok(true) => info!(
            "until today: {} -> date information written to file {}",
            today.format(DATE_FORMAT),
            cfg.to_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        ),
        Ok(false) => {}
        Err(e) => warn!("{}", e),
    }
}

use crate::domain::models::{JsonOut, RunSummary};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    rows: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for row in rows(&data) {
            println!("{}", row);
        }
    }
    Ok(())
}

pub fn summary_rows(s: &RunSummary) -> Vec<String> {
    let mut rows = vec![format!(
        "Downloaded {} files to directory: {}",
        s.downloaded, s.output_dir
    )];
    if s.planned > 0 {
        rows.push(format!("Would download {} files (list only)", s.planned));
    }
    rows.push(format!(
        "listed: {}\tskipped: {}\terrors: {}",
        s.listed, s.skipped, s.errors
    ));
    for failure in &s.failures {
        rows.push(format!("failed: {}", failure));
    }
    rows.push(format!("window: {} .. {}", s.from, s.to));
    rows
}

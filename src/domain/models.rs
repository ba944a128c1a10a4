use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Display label used whenever an owner name is missing or cannot be resolved.
pub const FALLBACK_LABEL: &str = "other";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything one run needs, fixed before the first request goes out.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub account: String,
    pub server: reqwest::Url,
    pub output_dir: PathBuf,
    pub from_file: Option<PathBuf>,
    pub to_file: Option<PathBuf>,
    pub use_subdirectories: bool,
    pub list_only: bool,
    pub rename_on_collision: bool,
    pub skip_today: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// One entry of the `ListFiles` response.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    #[serde(deserialize_with = "id_string")]
    pub file_id: String,
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient_size")]
    pub file_size: Option<u64>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub upload_user_id: Option<String>,
    pub upload_date: String,
    #[serde(default)]
    pub attached_to_type: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub attached_to_id: Option<String>,
}

// The API is not consistent about quoting ids.
fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected id, got {}", other))),
    }
}

fn optional_id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("expected id, got {}", other))),
    }
}

/// Informational only, so anything that is not a size reads as unknown.
fn lenient_size<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

impl FileAttachment {
    /// Owner type as received, or the fallback label when absent.
    pub fn owner_type(&self) -> &str {
        self.attached_to_type.as_deref().unwrap_or(FALLBACK_LABEL)
    }
}

/// Raw listing; entries are decoded one by one so a bad record only costs itself.
/// The `files` array itself is required: a body without it is not a listing.
#[derive(Debug, Deserialize, Default)]
pub struct FileListing {
    pub files: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct NamedItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ProcessDataResponse {
    #[serde(default)]
    pub items: HashMap<String, NamedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub process_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppListResponse {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WorkDetailResponse {
    pub work: NamedItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl DownloadTarget {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub listed: usize,
    pub downloaded: usize,
    pub planned: usize,
    pub skipped: usize,
    pub errors: usize,
    pub failures: Vec<String>,
    pub output_dir: String,
    pub from: String,
    pub to: String,
}

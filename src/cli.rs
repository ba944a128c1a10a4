use crate::domain::models::{Credentials, RunConfig};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_SERVER: &str = "https://www.blueworkslive.com";
pub const DEFAULT_OUTPUT_DIR: &str = "./downloads";
pub const DEFAULT_CURSOR_WRITE_FILE: &str = "./timestamp.txt";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid server url {url}: {reason}")]
    InvalidServer { url: String, reason: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Parser, Debug)]
#[command(
    name = "bwlsync",
    version,
    about = "Download file attachments from a Blueworks Live account"
)]
pub struct Cli {
    #[arg(help = "Account user name")]
    pub user: String,
    #[arg(help = "Account password")]
    pub password: String,
    #[arg(help = "Blueworks Live account name")]
    pub account: String,
    #[arg(
        short = 'd',
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory to store downloads"
    )]
    pub output_dir: PathBuf,
    #[arg(
        short = 'f',
        value_name = "FILE",
        help = "File to read the 'from' date from"
    )]
    pub from_file: Option<String>,
    #[arg(
        short = 't',
        value_name = "FILE",
        default_value = DEFAULT_CURSOR_WRITE_FILE,
        help = "File to write today's date to (empty to disable)"
    )]
    pub to_file: String,
    #[arg(short = 's', help = "Use subdirectories named by type and owner")]
    pub subdirectories: bool,
    #[arg(short = 'l', help = "List files only, do not download")]
    pub list_only: bool,
    #[arg(
        short = 'r',
        help = "Rename file if a file with the same name already exists"
    )]
    pub rename: bool,
    #[arg(
        short = 'n',
        help = "Skip attachments uploaded today; the next incremental run picks them up"
    )]
    pub skip_today: bool,
    #[arg(long, default_value = DEFAULT_SERVER, help = "REST API server base url")]
    pub server: String,
    #[arg(long, help = "Output machine-readable JSON summary")]
    pub json: bool,
    #[arg(short = 'v', long, help = "Debug-level logging")]
    pub verbose: bool,
    #[arg(short = 'q', long, help = "Only log warnings and errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig, ConfigError> {
        if self.user.is_empty() {
            return Err(ConfigError::Empty("user"));
        }
        if self.account.is_empty() {
            return Err(ConfigError::Empty("account"));
        }
        let server =
            reqwest::Url::parse(&self.server).map_err(|e| ConfigError::InvalidServer {
                url: self.server.clone(),
                reason: e.to_string(),
            })?;

        Ok(RunConfig {
            credentials: Credentials {
                user: self.user,
                password: self.password,
            },
            account: self.account,
            server,
            output_dir: self.output_dir,
            from_file: non_empty_path(self.from_file),
            to_file: non_empty_path(Some(self.to_file)),
            use_subdirectories: self.subdirectories,
            list_only: self.list_only,
            rename_on_collision: self.rename,
            skip_today: self.skip_today,
            json: self.json,
        })
    }
}

fn non_empty_path(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from)
}

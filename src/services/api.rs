use crate::domain::models::{
    AppListResponse, Credentials, DATE_FORMAT, FileListing, ProcessDataResponse, RunConfig,
    WorkDetailResponse,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::debug;

/// API version pinned by the app and work endpoints.
pub const API_VERSION: &str = "20110917";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned an unexpected body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{what} {id} not found in {endpoint} response")]
    NotFound {
        endpoint: &'static str,
        what: &'static str,
        id: String,
    },
    #[error("cannot build url for {endpoint}: {reason}")]
    Url {
        endpoint: &'static str,
        reason: String,
    },
}

/// Remote account operations the sync needs.
pub trait AccountApi {
    fn list_files(&self, from: NaiveDate) -> Result<FileListing, ApiError>;
    fn download_file(&self, file_id: &str) -> Result<Box<dyn Read>, ApiError>;
    fn lookup_process_name(&self, process_id: &str) -> Result<String, ApiError>;
    /// There is no direct lookup from process id to app, so this scans the app list.
    fn lookup_app_name_by_process_id(&self, process_id: &str) -> Result<String, ApiError>;
    fn lookup_instance_name(&self, work_id: &str) -> Result<String, ApiError>;
}

pub fn basic_auth_value(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.user, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

pub struct BwlClient {
    http: Client,
    base: String,
    account: String,
    auth: HeaderValue,
}

impl BwlClient {
    pub fn new(cfg: &RunConfig) -> anyhow::Result<Self> {
        let mut auth = HeaderValue::from_str(&basic_auth_value(&cfg.credentials))?;
        auth.set_sensitive(true);
        let http = Client::builder()
            .user_agent(concat!("bwlsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base: cfg.server.as_str().trim_end_matches('/').to_string(),
            account: cfg.account.clone(),
            auth,
        })
    }

    pub fn endpoint_url(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/scr/api/{}", self.base, endpoint)).map_err(|e| {
            ApiError::Url {
                endpoint,
                reason: e.to_string(),
            }
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("account", &self.account);
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn get(&self, endpoint: &'static str, params: &[(&str, &str)]) -> Result<Response, ApiError> {
        let url = self.endpoint_url(endpoint, params)?;
        debug!(%url, "api call");
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }
        Ok(resp)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let body = self
            .get(endpoint, params)?
            .bytes()
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl AccountApi for BwlClient {
    fn list_files(&self, from: NaiveDate) -> Result<FileListing, ApiError> {
        let from = from.format(DATE_FORMAT).to_string();
        self.get_json("ListFiles", &[("from", &from)])
    }

    fn download_file(&self, file_id: &str) -> Result<Box<dyn Read>, ApiError> {
        let resp = self.get("FileDownload", &[("fileItemId", file_id)])?;
        Ok(Box::new(resp))
    }

    fn lookup_process_name(&self, process_id: &str) -> Result<String, ApiError> {
        let resp: ProcessDataResponse =
            self.get_json("ProcessData", &[("processId", process_id)])?;
        process_name(resp, process_id)
    }

    fn lookup_app_name_by_process_id(&self, process_id: &str) -> Result<String, ApiError> {
        let resp: AppListResponse = self.get_json("AppList", &[("version", API_VERSION)])?;
        app_name_for_process(resp, process_id)
    }

    fn lookup_instance_name(&self, work_id: &str) -> Result<String, ApiError> {
        let resp: WorkDetailResponse = self.get_json(
            "WorkDetail",
            &[("version", API_VERSION), ("workId", work_id)],
        )?;
        Ok(resp.work.name)
    }
}

fn process_name(mut resp: ProcessDataResponse, process_id: &str) -> Result<String, ApiError> {
    resp.items
        .remove(process_id)
        .map(|item| item.name)
        .ok_or_else(|| ApiError::NotFound {
            endpoint: "ProcessData",
            what: "process",
            id: process_id.to_string(),
        })
}

fn app_name_for_process(resp: AppListResponse, process_id: &str) -> Result<String, ApiError> {
    resp.apps
        .into_iter()
        .filter(|app| app.process_id.as_deref() == Some(process_id))
        .find_map(|app| app.name)
        .ok_or_else(|| ApiError::NotFound {
            endpoint: "AppList",
            what: "app for process",
            id: process_id.to_string(),
        })
}

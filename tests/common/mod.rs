#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const USER: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const ACCOUNT: &str = "acme";
/// base64("alice:secret")
pub const EXPECTED_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

#[derive(Clone)]
pub struct Route {
    pub endpoint: &'static str,
    pub query_contains: Option<String>,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn json(endpoint: &'static str, body: serde_json::Value) -> Self {
        Self {
            endpoint,
            query_contains: None,
            status: 200,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn download(file_id: &str, body: &[u8]) -> Self {
        Self {
            endpoint: "FileDownload",
            query_contains: Some(format!("fileItemId={}", file_id)),
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub target: String,
    pub authorization: Option<String>,
}

/// Canned stand-in for the account's REST API.
pub struct FakeServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                serve(stream, &routes, &seen);
            }
        });
        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<Recorded> {
        let prefix = format!("/scr/api/{}?", endpoint);
        self.requests()
            .into_iter()
            .filter(|r| r.target.starts_with(&prefix))
            .collect()
    }
}

fn serve(stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<Recorded>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
    let mut authorization = None;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("authorization")
        {
            authorization = Some(value.trim().to_string());
        }
    }
    seen.lock().expect("lock").push(Recorded {
        target: target.clone(),
        authorization,
    });

    let route = routes.iter().find(|r| {
        target.starts_with(&format!("/scr/api/{}?", r.endpoint))
            && r.query_contains
                .as_deref()
                .map(|q| target.contains(q))
                .unwrap_or(true)
    });
    let (status, body) = match route {
        Some(r) => (r.status, r.body.clone()),
        None => (404, b"{}".to_vec()),
    };
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    };
    let mut stream = stream;
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub out: PathBuf,
    pub timestamp: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        Self {
            out: root.join("downloads"),
            timestamp: root.join("timestamp.txt"),
            root,
            _tmp: tmp,
        }
    }

    /// Base invocation: credentials, server, output dir and cursor file all point into the sandbox.
    pub fn cmd(&self, server: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("bwlsync");
        cmd.current_dir(&self.root)
            .env_remove("RUST_LOG")
            .env_remove("BWLSYNC_LOG")
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .args([USER, PASSWORD, ACCOUNT])
            .arg("--server")
            .arg(server)
            .arg("-d")
            .arg(&self.out)
            .arg("-t")
            .arg(&self.timestamp);
        cmd
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}

pub fn listing(files: serde_json::Value) -> Route {
    Route::json("ListFiles", serde_json::json!({ "files": files }))
}

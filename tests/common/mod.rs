//! Common test utilities for reclaim integration tests

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// Migration id used for directory-mode fixtures
#[allow(dead_code)]
pub const MIGRATION_ID: &str = "0b7f3a2e-1c4d-4e5f-8a9b-0c1d2e3f4a5b";

/// A temporary directory holding config, report and exclusion files
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the workspace, returning its full path
    pub fn write_file(&self, path: &str, content: &[u8]) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Write a config file pointing at `endpoint`
    pub fn write_config(&self, endpoint: &str) -> PathBuf {
        let config = format!(
            r#"{{"api_endpoint": "{endpoint}", "username": "admin", "password": "secret"}}"#
        );
        self.write_file("config.json", config.as_bytes())
    }

    /// Write a plain JSONL report listing `paths` as missing on source
    #[allow(dead_code)]
    pub fn write_report(&self, name: &str, paths: &[&str]) -> PathBuf {
        self.write_file(name, report_body(paths).as_bytes())
    }

    /// Create `<migration id>-<timestamp>/verification-discrepancy.jsonl.gz`
    #[allow(dead_code)]
    pub fn create_verification_dir(&self, paths: &[&str]) -> PathBuf {
        let dir = format!("{MIGRATION_ID}-1700000000000");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(report_body(paths).as_bytes())
            .expect("Failed to compress report");
        let compressed = encoder.finish().expect("Failed to finish gzip stream");
        self.write_file(
            &format!("{dir}/verification-discrepancy.jsonl.gz"),
            &compressed,
        );
        self.path.join(dir)
    }

    #[allow(dead_code)]
    pub fn write_exclusions(&self, patterns: &[&str]) -> PathBuf {
        let mut content = patterns.join("\n");
        content.push('\n');
        self.write_file("exclusions.txt", content.as_bytes())
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn report_body(paths: &[&str]) -> String {
    let mut body = String::new();
    for path in paths {
        body.push_str(&format!(
            "{{\"scanResult\":\"MISSING_ON_SOURCE\",\"targetPath\":\"{path}\",\"sourcePath\":null}}\n"
        ));
    }
    body.push_str("{\"scanResult\":\"MATCH\",\"targetPath\":\"/matched\"}\n");
    body
}

/// Build a command for the reclaim binary
#[allow(deprecated)]
pub fn reclaim_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("reclaim").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Endpoint that refuses connections
#[allow(dead_code)]
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9";

type Responder = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

/// Minimal HTTP/1.1 server answering one request per connection
///
/// Every request is recorded as `"METHOD target"`. Any 3xx status is sent
/// with `Location: /login`.
#[allow(dead_code)]
pub struct StubServer {
    pub endpoint: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let responder: Arc<Responder> = Arc::new(responder);
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(&stream, &recorded, responder.as_ref());
            }
        });

        Self { endpoint, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn serve(
    stream: &TcpStream,
    recorded: &Mutex<Vec<String>>,
    responder: &Responder,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    recorded.lock().unwrap().push(format!("{method} {target}"));
    let (status, body) = responder(&method, &target);

    let location = if (300..400).contains(&status) {
        "Location: /login\r\n"
    } else {
        ""
    };
    let response = format!(
        "HTTP/1.1 {status} Stub\r\n{location}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut writer = stream;
    writer.write_all(response.as_bytes())?;
    writer.flush()
}

//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::Span;
use yamlink::{HttpServer, MappingStore, Refresher, ServiceConfig, Shutdown};

/// A running service bound to an ephemeral local port.
#[allow(dead_code)]
pub struct TestService {
    pub addr: SocketAddr,
    pub store: Arc<MappingStore>,
    pub mapping_path: PathBuf,
    pub shutdown: Shutdown,
    server: JoinHandle<()>,
    refresher: JoinHandle<()>,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.server.await;
        let _ = self.refresher.await;
    }
}

/// Replace the mapping file atomically and stamp it `offset_secs` after the
/// current time, so the refresh loop sees a strictly newer mtime regardless
/// of the filesystem's timestamp granularity.
#[allow(dead_code)]
pub fn write_mapping(path: &Path, content: &str, offset_secs: u64) {
    let staged = path.with_extension("yaml.tmp");
    fs::write(&staged, content).unwrap();
    fs::File::options()
        .write(true)
        .open(&staged)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
        .unwrap();
    fs::rename(&staged, path).unwrap();
}

/// Start the full service: initial load, refresh loop, HTTP server.
#[allow(dead_code)]
pub async fn start_service(mapping: &str, refresh_interval: Duration) -> TestService {
    let dir = tempfile::tempdir().unwrap();
    let mapping_path = dir.path().join("mapping.yaml");
    fs::write(&mapping_path, mapping).unwrap();

    let store = Arc::new(MappingStore::open(&mapping_path, Span::none()).unwrap());
    let shutdown = Shutdown::new();

    let refresher = Refresher::new(store.clone(), refresh_interval).spawn(shutdown.subscribe());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&ServiceConfig::default(), store.clone(), Span::none());
    let server_shutdown = shutdown.subscribe();
    let server = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    TestService {
        addr,
        store,
        mapping_path,
        shutdown,
        server,
        refresher,
        _dir: dir,
    }
}

/// HTTP client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

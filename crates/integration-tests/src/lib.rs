//! Shared helpers for Vitrine integration tests.
//!
//! Tests run the real server router on an ephemeral port and drive it
//! through the real client pipeline.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use tempfile::TempDir;

use vitrine_server::config::ServerConfig;
use vitrine_server::persister::EventPersister;
use vitrine_server::state::AppState;

/// A live in-process telemetry server.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:41123`.
    pub base_url: String,
    /// Root of the date-partitioned event log.
    pub logs_dir: PathBuf,
    _tmp: TempDir,
}

/// Spawn the server on an ephemeral port with a throwaway logs directory.
///
/// # Panics
///
/// Panics on any setup failure; tests have no use for a degraded server.
pub async fn spawn_server() -> TestServer {
    let tmp = TempDir::new().unwrap();
    let logs_dir = tmp.path().join("logs");
    let config = ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        logs_dir: logs_dir.clone(),
        static_dir: tmp.path().join("public"),
    };

    let persister = EventPersister::new(&logs_dir).unwrap();
    let state = AppState::new(config, persister);
    let app = vitrine_server::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        logs_dir,
        _tmp: tmp,
    }
}

/// Collect every stored event file currently under the logs root.
#[must_use]
pub fn stored_event_files(logs_dir: &std::path::Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(partitions) = std::fs::read_dir(logs_dir) else {
        return files;
    };
    for partition in partitions.flatten() {
        if let Ok(entries) = std::fs::read_dir(partition.path()) {
            files.extend(entries.flatten().map(|e| e.path()));
        }
    }
    files.sort();
    files
}

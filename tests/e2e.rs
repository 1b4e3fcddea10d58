use std::{
    process::{Child, Command, Stdio},
    time::Duration,
};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::{net::TcpStream, time::sleep};

/// Find an available port by binding to port 0
fn find_available_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Wait for a TCP server to be ready
async fn wait_for_server(port: u16, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

struct TestServer {
    process: Child,
    port: u16,
}

impl TestServer {
    async fn start(args: &[&str]) -> Self {
        let port = find_available_port();

        let process = Command::new(env!("CARGO_BIN_EXE_lands-mock"))
            .args(["--port", &port.to_string()])
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to start lands-mock");

        assert!(
            wait_for_server(port, Duration::from_secs(30)).await,
            "server did not become ready in time"
        );

        TestServer { process, port }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    async fn get_json(&self, path: &str) -> Value {
        let response = reqwest::get(self.url(path)).await.expect("request failed");
        assert_eq!(response.status(), 200, "GET {path}");
        assert_eq!(
            response.headers()["content-type"], "application/json",
            "GET {path}"
        );
        response.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

#[tokio::test]
async fn test_sample_serves_four_lands() {
    let server = TestServer::start(&["sample"]).await;

    let before = now_ms();
    let body = server.get_json("/lands").await;
    let after = now_ms();

    assert_eq!(body["success"], true);
    let ids: Vec<_> = body["data"]["lands"]
        .as_array()
        .unwrap()
        .iter()
        .map(|land| land["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, ["land_001", "land_002", "land_003", "land_004"]);

    let timestamp = body["timestamp"].as_i64().unwrap();
    let last_updated = body["data"]["last_updated"].as_i64().unwrap();
    assert!((before..=after).contains(&timestamp));
    assert!((before..=after).contains(&last_updated));
    for land in body["data"]["lands"].as_array().unwrap() {
        assert!(land["updated_at"].as_i64().unwrap() >= before);
    }
}

#[tokio::test]
async fn test_sample_claims_alias_and_cors() {
    let server = TestServer::start(&["sample"]).await;

    let response = reqwest::get(server.url("/lands/claims")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sample_unknown_path_is_404() {
    let server = TestServer::start(&["sample"]).await;

    let response = reqwest::get(server.url("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_regions_match_their_hash() {
    let server = TestServer::start(&[
        "walk",
        "--regions",
        "20",
        "--chunks-per-region",
        "100",
    ])
    .await;

    let body = server.get_json("/regions").await;
    let regions = body["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 20);
    for region in regions {
        assert!(region["chunks"].as_array().unwrap().len() <= 100);
        assert_eq!(region["world"], "world");
    }

    // serde_json orders object keys, so this is the sorted-key compact form
    let canonical = serde_json::to_vec(&body["regions"]).unwrap();
    let expected = hex::encode(Sha256::digest(&canonical));
    assert_eq!(body["hash"].as_str().unwrap(), expected);
}

#[tokio::test]
async fn test_status_is_stable() {
    let server = TestServer::start(&["jitter", "--regions", "5"]).await;

    let first = server.get_json("/status").await;
    let second = server.get_json("/status").await;
    assert_eq!(first["hash"], second["hash"]);
    assert_eq!(first["timestamp"], second["timestamp"]);

    let regions = server.get_json("/regions").await;
    assert_eq!(regions["hash"], first["hash"]);
    assert!(regions.get("regions").is_some());
    assert!(first.get("regions").is_none());
}

#[tokio::test]
async fn test_generated_unknown_path_is_404() {
    let server = TestServer::start(&["walk", "--regions", "1"]).await;

    let response = reqwest::get(server.url("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), 404);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    let response = reqwest::get(server.url("/lands")).await.unwrap();
    assert_eq!(response.status(), 404);
}

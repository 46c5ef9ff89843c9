use axum::{http::StatusCode, routing::get, Router};
use configuration::ClientConfig;
use requester::error::RequesterError;
use requester::Requester;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn requester_for(addr: SocketAddr, output: &Path, timeout_ms: u64) -> Requester {
    let config = ClientConfig {
        server_url: format!("http://{}/cotacao", addr),
        timeout_ms,
        output_path: output.to_path_buf(),
    };
    Requester::new(&config).unwrap()
}

#[tokio::test]
async fn writes_bid_to_output_file() {
    let app = Router::new().route("/cotacao", get(|| async { r#"{"bid":"5.43"}"# }));
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cotacao.txt");

    let contents = requester_for(addr, &output, 1_000).run().await.unwrap();

    assert_eq!(contents, "Dólar: 5.43");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Dólar: 5.43");
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let app = Router::new().route("/cotacao", get(|| async { r#"{"code":"USD","bid":"5.4312"}"# }));
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();

    let bid = requester_for(addr, &dir.path().join("out.txt"), 1_000)
        .fetch_bid()
        .await
        .unwrap();

    assert_eq!(bid, "5.4312");
}

#[tokio::test]
async fn error_status_aborts_without_writing() {
    let app = Router::new().route(
        "/cotacao",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Error getting dollar rate") }),
    );
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cotacao.txt");

    let err = requester_for(addr, &output, 1_000).run().await.unwrap_err();

    assert!(matches!(err, RequesterError::Status(500, _)));
    assert!(!output.exists());
}

#[tokio::test]
async fn missing_bid_aborts_without_writing() {
    let app = Router::new().route("/cotacao", get(|| async { r#"{"code":"USD"}"# }));
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cotacao.txt");

    let err = requester_for(addr, &output, 1_000).run().await.unwrap_err();

    assert!(matches!(err, RequesterError::Decode(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn slow_server_times_out_without_writing() {
    let app = Router::new().route(
        "/cotacao",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            r#"{"bid":"5.43"}"#
        }),
    );
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cotacao.txt");

    let err = requester_for(addr, &output, 50).run().await.unwrap_err();

    assert!(matches!(err, RequesterError::Timeout(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn unwritable_output_is_reported() {
    let app = Router::new().route("/cotacao", get(|| async { r#"{"bid":"5.43"}"# }));
    let addr = spawn(app).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("cotacao.txt");

    let err = requester_for(addr, &output, 1_000).run().await.unwrap_err();

    assert!(matches!(err, RequesterError::Write { .. }));
}

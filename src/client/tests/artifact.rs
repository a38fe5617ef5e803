use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::test_helpers::create_test_client;
use crate::error::{Error, TransportError};

#[tokio::test]
async fn test_fetch_artifact_returns_body_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cache/artifact.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 fake".as_slice()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let url = format!("{}/cache/artifact.pdf", mock_server.uri());

    let bytes = client.fetch_artifact(&url).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7 fake");
}

#[tokio::test]
async fn test_fetch_artifact_propagates_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let url = format!("{}/gone.pdf", mock_server.uri());

    let err = client.fetch_artifact(&url).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::UnexpectedStatus { status: 404 })
    ));
}

#[tokio::test]
async fn test_save_artifact_writes_file_and_reports_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cache/report.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"converted".as_slice()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let url = format!("{}/cache/report.docx", mock_server.uri());

    let temp_dir = tempfile::tempdir().unwrap();
    let target = temp_dir.path().join("report.docx");

    let written = client.save_artifact(&url, &target).await.unwrap();
    assert_eq!(written, 9);
    assert_eq!(std::fs::read(&target).unwrap(), b"converted");
}

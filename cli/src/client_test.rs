use super::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpParticipantClient {
    let base = parse_base_url(&server.uri()).unwrap();
    HttpParticipantClient::new(&base).unwrap()
}

// =============================================================
// parse_base_url
// =============================================================

#[test]
fn base_url_gets_trailing_slash() {
    let url = parse_base_url("http://localhost:3000/app").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/app/");
}

#[test]
fn base_url_root_unchanged() {
    let url = parse_base_url("http://localhost:3000/").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/");
}

#[test]
fn base_url_rejects_garbage() {
    assert!(matches!(parse_base_url("not a url"), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(parse_base_url("mailto:someone@example.com"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn listing_url_is_relative_to_base() {
    let base = parse_base_url("http://localhost:3000/app").unwrap();
    let client = HttpParticipantClient::new(&base).unwrap();
    assert_eq!(client.url().as_str(), "http://localhost:3000/app/api/identity/participants");
}

// =============================================================
// fetch_participants
// =============================================================

#[tokio::test]
async fn fetch_decodes_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/identity/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Alice" },
            { "id": "2", "name": "Bob" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let batch = client_for(&server).fetch_participants().await.unwrap();
    let names: Vec<&str> = batch.participants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn fetch_non_success_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/identity/participants"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_participants().await.unwrap_err();
    assert_eq!(err, FetchError::Status { status: 503, body: "Service Unavailable".into() });
}

#[tokio::test]
async fn fetch_non_json_success_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/identity/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_participants().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
    assert_eq!(err.display_body(), "<html>maintenance</html>");
}

#[tokio::test]
async fn fetch_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = parse_base_url(&format!("http://{addr}/")).unwrap();
    let client = HttpParticipantClient::new(&base).unwrap();

    let err = client.fetch_participants().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

use roster_http::{HttpError, HttpErrorKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn error_for(status: u16) -> HttpError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let response = reqwest::get(format!("{}/api/teams", server.uri()))
        .await
        .expect("request should reach the mock server");

    HttpError::from_response(&response, "Problem fetching data from API")
}

#[tokio::test]
async fn not_found_response_is_client() {
    let err = error_for(404).await;
    assert_eq!(err.kind(), Some(HttpErrorKind::Client));
    assert_eq!(err.status(), 404);
    assert!(err.url().is_some_and(|u| u.ends_with("/api/teams")));
}

#[tokio::test]
async fn server_error_response_is_server() {
    let err = error_for(503).await;
    assert_eq!(err.kind(), Some(HttpErrorKind::Server));
    assert_eq!(err.message(), "Problem fetching data from API");
}

/// HTTP facade tests: requests go through the axum router to a mocked fiscal-code service
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cfiscale_api::api::router;
use cfiscale_api::config::{Config, ServiceConfig, DEFAULT_VALIDITY_MARKER};
use cfiscale_api::handlers::AppState;
use cfiscale_api::orchestrator::FiscalCodeOrchestrator;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_state(base_url: String) -> Arc<AppState> {
    let service = ServiceConfig::new(base_url);
    Arc::new(AppState {
        config: Config {
            port: 0,
            service: service.clone(),
        },
        orchestrator: FiscalCodeOrchestrator::new(service).unwrap(),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn identity_request(uri: &str, name: &str) -> Request<Body> {
    let payload = serde_json::json!({
        "name": name,
        "surname": "berlusconi",
        "birth_city": "milano",
        "birth_date": "29/09/1936",
        "gender": "M"
    });
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_compute_route() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/CalcolaCodiceFiscale"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<string>BRLSLV36P29F205W</string>"),
        )
        .mount(&mock_server)
        .await;

    let app = router(test_state(mock_server.uri()));
    let response = app
        .oneshot(identity_request("/api/v1/fiscal-codes", "silvio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["fiscal_code"], "BRLSLV36P29F205W");
}

#[tokio::test]
async fn test_compute_route_rejects_blank_name() {
    let mock_server = MockServer::start().await;

    let app = router(test_state(mock_server.uri()));
    let response = app
        .oneshot(identity_request("/api/v1/fiscal-codes", "   "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verification_route() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ControllaCodiceFiscale"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("<string>{}</string>", DEFAULT_VALIDITY_MARKER)),
        )
        .mount(&mock_server)
        .await;

    let app = router(test_state(mock_server.uri()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/fiscal-codes/BRLSLV36P29F205W/verification")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["fiscal_code"], "BRLSLV36P29F205W");
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_verified_route_reports_verification_error_next_to_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/CalcolaCodiceFiscale"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<string>BRLSLV36P29F205W</string>"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ControllaCodiceFiscale"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let app = router(test_state(mock_server.uri()));
    let response = app
        .oneshot(identity_request("/api/v1/fiscal-codes/verified", "silvio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["fiscal_code"], "BRLSLV36P29F205W");
    assert_eq!(body["verified"], false);
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops"))
        .mount(&mock_server)
        .await;

    let app = router(test_state(mock_server.uri()));
    let response = app
        .oneshot(identity_request("/api/v1/fiscal-codes/verified", "silvio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

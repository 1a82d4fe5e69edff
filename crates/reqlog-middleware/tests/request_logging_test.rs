//! End-to-end tests driving an axum router through the logging middleware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::{ConnectInfo, Path};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower::ServiceExt;
use tower_http::timeout::TimeoutLayer;

use reqlog_core::config::request_log::RequestLogConfig;
use reqlog_core::{AppError, Severity};
use reqlog_middleware::{HandlerError, MemorySink, RequestLogger, attach_error};

async fn health() -> &'static str {
    "ok"
}

async fn get_user(Path(id): Path<u64>) -> String {
    format!("user {id}")
}

async fn get_person(Path(name): Path<String>) -> String {
    format!("person {name}")
}

async fn get_order_item(Path((order, item)): Path<(u64, u64)>) -> String {
    format!("order {order} item {item}")
}

async fn create_order(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn crash() -> Result<(), HandlerError> {
    Err(AppError::internal("db timeout").into())
}

async fn flaky() -> Response {
    let mut response = StatusCode::BAD_GATEWAY.into_response();
    attach_error(&mut response, "upstream reset");
    attach_error(&mut response, "retry failed");
    response
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(20)).await;
    "done"
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users/{id}", get(get_user))
        .route("/people/{name}", get(get_person))
        .route("/orders/{order}/items/{item}", get(get_order_item))
        .route("/orders/{id}", post(create_order))
        .route("/crash", get(crash))
        .route("/flaky", get(flaky))
        .route("/slow", get(slow))
        .route("/static/{*file}", get(health))
}

fn app(config: RequestLogConfig) -> (Router, MemorySink) {
    let sink = MemorySink::new();
    let logger = RequestLogger::new(&config, Arc::new(sink.clone())).expect("valid config");
    (logger.install(router()), sink)
}

async fn send(app: &Router, method: &str, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("user-agent", "reqlog-tests/1.0")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_skip_exact_path() {
    let (app, sink) = app(RequestLogConfig {
        skip_paths: vec!["/health".into()],
        ..Default::default()
    });

    assert_eq!(send(&app, "GET", "/health").await, StatusCode::OK);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_not_found_order_logs_warning_with_normalized_path() {
    let (app, sink) = app(RequestLogConfig::default());

    assert_eq!(send(&app, "POST", "/orders/17").await, StatusCode::NOT_FOUND);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.severity, Severity::Warn);
    assert_eq!(record.path, "/orders/:id");
    assert_eq!(record.method, "POST");
    assert_eq!(record.status, 404);
    assert_eq!(record.message, "Request");
    assert_eq!(record.user_agent, "reqlog-tests/1.0");
}

#[tokio::test]
async fn test_server_error_message_from_attached_error() {
    let (app, sink) = app(RequestLogConfig::default());

    assert_eq!(
        send(&app, "GET", "/crash").await,
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert_eq!(records[0].message, "db timeout");
}

#[tokio::test]
async fn test_multiple_errors_joined() {
    let (app, sink) = app(RequestLogConfig::default());

    send(&app, "GET", "/flaky").await;

    assert_eq!(sink.records()[0].message, "upstream reset;retry failed");
}

#[tokio::test]
async fn test_success_logs_info_once_per_request() {
    let (app, sink) = app(RequestLogConfig::default());

    send(&app, "GET", "/users/42").await;
    send(&app, "GET", "/users/43").await;

    let records = sink.records();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.severity, Severity::Info);
        assert_eq!(record.path, "/users/:id");
    }
}

#[tokio::test]
async fn test_query_string_appended_after_substitution() {
    let (app, sink) = app(RequestLogConfig::default());

    send(&app, "GET", "/users/42?expand=42").await;

    assert_eq!(sink.records()[0].path, "/users/:id?expand=42");
}

#[tokio::test]
async fn test_percent_encoded_param_normalized() {
    let (app, sink) = app(RequestLogConfig {
        skip_paths: vec!["/people/:name?hidden=1".into()],
        ..Default::default()
    });

    assert_eq!(send(&app, "GET", "/people/John%20Doe").await, StatusCode::OK);
    send(&app, "GET", "/people/caf%C3%A9").await;
    send(&app, "GET", "/people/Jane%20Roe?hidden=1").await;

    let records = sink.records();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.path, "/people/:name");
    }
}

#[tokio::test]
async fn test_multiple_params_normalized() {
    let (app, sink) = app(RequestLogConfig::default());

    send(&app, "GET", "/orders/5/items/9").await;

    assert_eq!(sink.records()[0].path, "/orders/:order/items/:item");
}

#[tokio::test]
async fn test_skip_methods_any_status() {
    let (app, sink) = app(RequestLogConfig {
        skip_methods: vec!["POST".into()],
        ..Default::default()
    });

    send(&app, "POST", "/orders/17").await;
    assert!(sink.is_empty());

    send(&app, "GET", "/health").await;
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_skip_pattern_on_normalized_path() {
    let (app, sink) = app(RequestLogConfig {
        skip_path_regexp: Some("^/static/".into()),
        ..Default::default()
    });

    send(&app, "GET", "/static/css/site.css").await;
    send(&app, "GET", "/users/1").await;

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "/users/:id");
}

#[tokio::test]
async fn test_skip_pattern_sees_normalized_not_raw_path() {
    let (app, sink) = app(RequestLogConfig {
        skip_path_regexp: Some(r"^/users/:id$".into()),
        ..Default::default()
    });

    send(&app, "GET", "/users/99").await;

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_min_level_suppresses_info() {
    let (app, sink) = app(RequestLogConfig {
        level: "WARN".into(),
        ..Default::default()
    });

    send(&app, "GET", "/health").await;
    send(&app, "POST", "/orders/1").await;

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, 404);
}

#[tokio::test]
async fn test_latency_covers_handler_time() {
    let (app, sink) = app(RequestLogConfig::default());

    send(&app, "GET", "/slow").await;

    assert!(sink.records()[0].latency >= Duration::from_millis(20));
}

#[tokio::test]
async fn test_timeout_logged_as_request_timeout() {
    let sink = MemorySink::new();
    let logger =
        RequestLogger::new(&RequestLogConfig::default(), Arc::new(sink.clone())).unwrap();
    let app = logger.install(router().layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_millis(5),
    )));

    let status = send(&app, "GET", "/slow").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    let record = &sink.records()[0];
    assert_eq!(record.status, 408);
    assert_eq!(record.severity, Severity::Warn);
}

#[tokio::test]
async fn test_utc_timestamp() {
    let (app, sink) = app(RequestLogConfig {
        utc: true,
        ..Default::default()
    });

    send(&app, "GET", "/health").await;

    assert_eq!(sink.records()[0].timestamp.offset().local_minus_utc(), 0);
}

#[tokio::test]
async fn test_local_timestamp_when_utc_disabled() {
    let (app, sink) = app(RequestLogConfig {
        utc: false,
        ..Default::default()
    });

    send(&app, "GET", "/health").await;

    assert_eq!(
        sink.records()[0].timestamp.offset().local_minus_utc(),
        chrono::Local::now().offset().local_minus_utc()
    );
}

#[tokio::test]
async fn test_client_ip_from_connect_info() {
    let (app, sink) = app(RequestLogConfig::default());

    let mut request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 40000))));
    app.oneshot(request).await.unwrap();

    let record = &sink.records()[0];
    assert_eq!(record.client_ip, "192.0.2.10");
    assert_eq!(record.user_agent, "");
}

#[tokio::test]
async fn test_client_ip_from_forwarded_header() {
    let (app, sink) = app(RequestLogConfig::default());

    let request = Request::builder()
        .uri("/health")
        .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap();

    assert_eq!(sink.records()[0].client_ip, "203.0.113.5");
}

#[test]
fn test_bad_level_fails_construction() {
    let config = RequestLogConfig {
        level: "NOTALEVEL".into(),
        ..Default::default()
    };
    assert!(RequestLogger::new(&config, Arc::new(MemorySink::new())).is_err());
}

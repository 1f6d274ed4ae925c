//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener
//! - Stop gracefully on shutdown

use axum::{
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ConverterConfig;
use crate::http::convert::convert;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::StatusResponse;
use crate::lifecycle::ShutdownListener;
use crate::observability::spans::http_request_span;

/// Conversion page, compiled into the binary.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConverterConfig>,
}

/// HTTP server for the converter.
pub struct HttpServer {
    router: Router,
    config: Arc<ConverterConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `ServiceBuilder` runs layers top to bottom, so the request ID is set
    /// before the trace span is created. The body limit sits outside the
    /// timeout: `TimeoutLayer` needs a `Default` response body, which the
    /// limit's response body does not have.
    #[allow(deprecated)]
    fn build_router(config: &ConverterConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/convert", post(convert))
            .route("/status", get(status))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(propagate_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(http_request_span))
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strict_gender = self.config.matching.strict_gender,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::operational())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::http::request::X_REQUEST_ID;

    fn app() -> Router {
        HttpServer::new(ConverterConfig::default()).router()
    }

    async fn post_convert(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/convert")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_convert_success_body() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "US", "size": 9, "gender": "men" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["input"], json!({ "scale": "US", "size": 9, "gender": "men" }));
        assert_eq!(body["conversions"]["US"].as_f64(), Some(9.0));
        assert_eq!(body["conversions"]["EU"].as_f64(), Some(42.5));
        assert_eq!(body["conversions"]["UK"].as_f64(), Some(8.5));
        assert_eq!(body["conversions"]["CM"].as_f64(), Some(27.0));
    }

    #[tokio::test]
    async fn test_convert_echoes_text_size() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "EU", "size": "38", "gender": "women" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"]["size"], json!("38"));
        assert_eq!(body["conversions"]["CM"].as_f64(), Some(23.8));
    }

    #[tokio::test]
    async fn test_convert_missing_gender() {
        let (status, body) =
            post_convert(app(), json!({ "scale": "US", "size": 9 }).to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }

    #[tokio::test]
    async fn test_convert_out_of_range() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "US", "size": 100, "gender": "men" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Size out of range or invalid." })
        );
    }

    #[tokio::test]
    async fn test_convert_non_numeric_size() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "CM", "size": "abc", "gender": "women" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_convert_malformed_body() {
        let (status, body) = post_convert(app(), "{ not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Malformed request body" }));
    }

    #[tokio::test]
    async fn test_convert_non_object_body() {
        let (status, body) = post_convert(app(), "[\"US\", 9, \"men\"]".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Malformed request body" }));
    }

    #[tokio::test]
    async fn test_convert_non_string_gender_uses_womens_chart() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "UK", "size": 8, "gender": 1 }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"]["gender"], json!(1));
        assert_eq!(body["conversions"]["US"].as_f64(), Some(10.0));
    }

    #[tokio::test]
    async fn test_convert_non_string_scale_not_found() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": 5, "size": 8, "gender": "men" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Size out of range or invalid." })
        );
    }

    #[tokio::test]
    async fn test_convert_false_size_is_missing() {
        let (status, body) = post_convert(
            app(),
            json!({ "scale": "US", "size": false, "gender": "men" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }

    #[tokio::test]
    async fn test_strict_gender_config() {
        let mut config = ConverterConfig::default();
        config.matching.strict_gender = true;
        let app = HttpServer::new(config).router();

        let (status, _) = post_convert(
            app,
            json!({ "scale": "UK", "size": 8, "gender": "banana" }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/convert"));
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], json!("operational"));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_request_id_assigned_and_preserved() {
        let response = app()
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/status")
                    .header(X_REQUEST_ID, "client-chosen-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-chosen-id");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = ConverterConfig::default();
        config.limits.max_body_size = 64;
        let app = HttpServer::new(config).router();

        let body = json!({ "scale": "US", "size": 9, "gender": "men", "pad": "x".repeat(256) })
            .to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/convert")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_oversized_body_without_content_length() {
        let mut config = ConverterConfig::default();
        config.limits.max_body_size = 64;
        let app = HttpServer::new(config).router();

        // No Content-Length header: the limit trips while the JSON extractor
        // buffers the body.
        let body = json!({ "scale": "US", "size": 9, "gender": "men", "pad": "x".repeat(256) })
            .to_string();
        let (status, body) = post_convert(app, body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": "Request body too large" }));
    }
}

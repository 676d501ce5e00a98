//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health and redirect handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::ServiceConfig;
use crate::http::handlers::{health_handler, redirect_handler};
use crate::http::request::{request_id, UuidRequestId};
use crate::reload::MappingStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MappingStore>,
    /// Span handler events are recorded under.
    pub span: Span,
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServiceConfig, store: Arc<MappingStore>, span: Span) -> Self {
        let state = AppState { store, span };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .route("/health", get(health_handler))
            .route("/{*path}", get(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::http::handlers::HEALTH_BODY;
    use crate::http::request::X_REQUEST_ID;
    use axum::http::{header, StatusCode};
    use axum::response::Response;
    use std::fs;
    use tower::ServiceExt;

    const MAPPING: &str = r#"
team:
  docs:
    - https://docs.example.com/0
    - https://docs.example.com/1
  wiki: https://wiki.example.com
my docs: https://example.com/spaced
"#;

    fn server() -> (tempfile::TempDir, HttpServer) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        fs::write(&path, MAPPING).unwrap();

        let store = Arc::new(MappingStore::open(&path, Span::none()).unwrap());
        let server = HttpServer::new(&ServiceConfig::default(), store, Span::none());
        (dir, server)
    }

    async fn get(server: &HttpServer, uri: &str) -> Response {
        server
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (_dir, server) = server();

        for uri in ["/", "/health"] {
            let response = get(&server, uri).await;
            assert_eq!(response.status(), StatusCode::OK, "uri {uri}");
            assert_eq!(body_text(response).await, HEALTH_BODY);
        }
    }

    #[tokio::test]
    async fn test_redirects_to_resolved_value() {
        let (_dir, server) = server();

        let response = get(&server, "/team/docs/1").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://docs.example.com/1"
        );

        let response = get(&server, "/team/wiki/").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://wiki.example.com");
    }

    #[tokio::test]
    async fn test_percent_encoded_path() {
        let (_dir, server) = server();

        let response = get(&server, "/my%20docs").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/spaced"
        );
    }

    #[tokio::test]
    async fn test_lookup_failures_are_uniform_404() {
        let (_dir, server) = server();

        // missing key, index out of range, type mismatch, not a leaf
        for uri in ["/nope", "/team/docs/7", "/team/docs/first", "/team"] {
            let response = get(&server, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
            assert_eq!(body_text(response).await, "Not Found");
        }
    }

    #[tokio::test]
    async fn test_extra_slashes_are_empty_segments() {
        let (_dir, server) = server();
        let document = Document::from_yaml_str(MAPPING).unwrap();

        for uri in ["//team/wiki", "/team//wiki", "//team/docs/0"] {
            assert!(document.lookup(uri).is_err(), "lookup {uri}");

            let response = get(&server, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
            assert!(!response.headers().contains_key(header::LOCATION));
        }
    }

    #[tokio::test]
    async fn test_non_utf8_path_is_404() {
        let (_dir, server) = server();

        for uri in ["/%FF", "/team/%C3%28"] {
            let response = get(&server, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
            assert_eq!(body_text(response).await, "Not Found");
        }
    }

    #[tokio::test]
    async fn test_non_string_value_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        fs::write(&path, "port: 8080\nhome: https://example.com\n").unwrap();
        let store = Arc::new(MappingStore::open(&path, Span::none()).unwrap());
        let server = HttpServer::new(&ServiceConfig::default(), store, Span::none());

        let response = get(&server, "/port").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(&server, "/home").await;
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_set_and_propagated() {
        let (_dir, server) = server();

        let response = get(&server, "/team/wiki").await;
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/team/wiki")
                    .header(X_REQUEST_ID, "client-id-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-id-42");
    }
}

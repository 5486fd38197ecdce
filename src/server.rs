use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, request::Parts, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hyper::Server;
use serde::Serialize;
use std::any::Any;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info};

/// Structured error body: `{"error": "..."}`.
#[derive(Debug, Clone, Copy)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Endpoint not found",
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed",
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chains_loaded: usize,
    pub version: &'static str,
}

/// Full catalog, pre-rendered at startup
async fn list_chains(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.chains_body.clone(),
    )
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        chains_loaded: state.catalog.len(),
        version: state.version,
    })
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!(panic = %detail, "Request handler panicked");
    ApiError::internal().into_response()
}

/// Matches request origins against an allow-list of exact origins and
/// `scheme://*.domain` patterns.
#[derive(Debug, Clone)]
pub struct OriginMatcher {
    exact: Vec<String>,
    wildcard: Vec<(String, String)>,
}

impl OriginMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut exact = Vec::new();
        let mut wildcard = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().trim_end_matches('/');
            match pattern.split_once('*') {
                Some((prefix, suffix)) => wildcard.push((prefix.to_string(), suffix.to_string())),
                None => exact.push(pattern.to_string()),
            }
        }
        Self { exact, wildcard }
    }

    pub fn matches(&self, origin: &str) -> bool {
        if self.exact.iter().any(|o| o == origin) {
            return true;
        }
        self.wildcard.iter().any(|(prefix, suffix)| {
            origin.len() > prefix.len() + suffix.len()
                && origin.starts_with(prefix.as_str())
                && origin.ends_with(suffix.as_str())
                && is_host_labels(&origin[prefix.len()..origin.len() - suffix.len()])
        })
    }
}

// One or more dot-separated DNS labels
fn is_host_labels(s: &str) -> bool {
    s.split('.').all(|label| {
        !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let matcher = OriginMatcher::new(allowed_origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(|o| matcher.matches(o)).unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the router: catalog and health under `/api`, JSON errors elsewhere.
pub fn create_server(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/chains", get(list_chains).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(cors_layer(allowed_origins));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(handle_panic)))
        .with_state(state)
}

/// Serve `app` on all interfaces until Ctrl-C.
pub async fn start_server(app: Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server running on http://localhost:{port}");
    info!("Catalog:      http://localhost:{port}/api/chains");
    info!("Health check: http://localhost:{port}/api/health");

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

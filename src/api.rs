// 🌐 HTTP API - placeholder endpoints for deployment health checks
//
// GET     → JSON payload
// OPTIONS → 200 with an empty body (CORS preflight)
// other   → 405 {"error": "Method not allowed"}
//
// Every response carries the same three CORS headers.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::warn;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

// ============================================================================
// RESPONSE BODIES
// ============================================================================

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    message: String,
    endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// Endpoints advertised by the index
pub fn endpoints() -> Vec<EndpointInfo> {
    vec![
        EndpointInfo {
            path: "/api",
            method: "GET",
            description: "API index listing the available endpoints",
        },
        EndpointInfo {
            path: "/api/demo",
            method: "GET",
            description: "Demo endpoint returning a greeting",
        },
    ]
}

// ============================================================================
// HANDLERS
// ============================================================================

/// ANY /api - index
async fn index(method: Method) -> Response {
    match method {
        Method::GET => Json(IndexResponse {
            message: format!("Crypto Tax Dashboard API v{}", crate::VERSION),
            endpoints: endpoints(),
        })
        .into_response(),
        Method::OPTIONS => StatusCode::OK.into_response(),
        _ => method_not_allowed(&method),
    }
}

/// ANY /api/demo - demo greeting
async fn demo(method: Method) -> Response {
    match method {
        Method::GET => Json(MessageResponse {
            message: "Hello from the Crypto Tax Dashboard demo endpoint".to_string(),
        })
        .into_response(),
        Method::OPTIONS => StatusCode::OK.into_response(),
        _ => method_not_allowed(&method),
    }
}

fn method_not_allowed(method: &Method) -> Response {
    warn!(%method, "method not allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed",
        }),
    )
        .into_response()
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the API router with CORS headers and request tracing
pub fn router() -> Router {
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ));

    Router::new()
        .route("/api", any(index))
        .route("/api/", any(index))
        .route("/api/demo", any(demo))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// TESTS
// ============================================================================

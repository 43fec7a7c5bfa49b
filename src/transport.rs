use std::io;

use axum::{
    body::{self, Body},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post_service,
    Json, Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde::Serialize;
use serde_json::Value;

use crate::constants::MCP_PATH;
use crate::service::Weather;

/// Server error reserved for methods the stateless endpoint does not serve
pub const METHOD_NOT_ALLOWED_CODE: i32 = -32000;

/// JSON-RPC internal error
pub const INTERNAL_ERROR_CODE: i32 = -32603;

/// JSON-RPC parse error
pub const PARSE_ERROR_CODE: i32 = -32700;

/// Upper bound when reading a plain-text rejection body
const REJECTION_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct JsonRpcErrorEnvelope {
    jsonrpc: &'static str,
    error: JsonRpcError,
    id: Value,
}

/// Creates a JSON-RPC error response with a null id
fn json_rpc_error_response(status: StatusCode, code: i32, message: &'static str) -> Response {
    let envelope = JsonRpcErrorEnvelope {
        jsonrpc: "2.0",
        error: JsonRpcError { code, message },
        id: Value::Null,
    };
    (status, Json(envelope)).into_response()
}

/// Builds the HTTP router serving MCP at `/mcp`.
///
/// `factory` is called once per POST; each call must return a new server.
/// No session id is issued, so GET (server-initiated streams) and DELETE
/// (session termination) are rejected.
pub fn router<F>(factory: F) -> Router
where
    F: Fn() -> io::Result<Weather> + Send + Sync + 'static,
{
    let config = StreamableHttpServerConfig {
        stateful_mode: false,
        sse_keep_alive: None,
        ..Default::default()
    };
    let service = StreamableHttpService::new(factory, LocalSessionManager::default().into(), config);

    Router::new().route(
        MCP_PATH,
        post_service(service)
            .layer(middleware::map_response(json_rpc_rejections))
            .get(method_not_allowed)
            .delete(method_not_allowed),
    )
}

async fn method_not_allowed() -> Response {
    json_rpc_error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        METHOD_NOT_ALLOWED_CODE,
        "Method not allowed.",
    )
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Rewrites the plain-text rejections of the MCP service as JSON-RPC errors.
///
/// A 500 means the session could not be set up (-32603). A 4xx whose body
/// reports a deserialization failure means the request body was not a
/// JSON-RPC message (-32700, HTTP 400). Other responses pass through.
async fn json_rpc_rejections(response: Response) -> Response {
    let status = response.status();
    if is_json(&response) || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Error handling MCP request: session setup failed");
        return json_rpc_error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_CODE,
            "Internal server error",
        );
    }

    if !status.is_client_error() {
        return response;
    }

    let (parts, rejection) = response.into_parts();
    let bytes = match body::to_bytes(rejection, REJECTION_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read MCP rejection body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let reason = String::from_utf8_lossy(&bytes).into_owned();
    if reason.contains("deserialize") {
        tracing::warn!(%reason, "Rejected unparsable MCP request body");
        return json_rpc_error_response(StatusCode::BAD_REQUEST, PARSE_ERROR_CODE, "Parse error");
    }

    Response::from_parts(parts, Body::from(bytes))
}

//! # Protocol Driver
//!
//! The thin HTTP adapter around [`crate::registry::MatchRegistry`]: one POST
//! route, one s-expression in, one s-expression out, with the fixed header
//! set the original protocol's `BaseHTTPRequestHandler` subclass sent on
//! every response. Each request that might run a player's search is
//! off-loaded to `spawn_blocking`, since the player framework's timers are
//! synchronous wall-clock budgets, not async tasks.

pub mod codec;
pub mod error;
pub mod sexpr;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response as AxumResponse};
use axum::routing::post;
use axum::Router;

use crate::protocol::codec::{parse_request, Request, Response};
use crate::protocol::error::ProtocolError;
use crate::registry::MatchRegistry;

const MAX_PORT_SCAN: u16 = 100;

/// Binds the first free port starting at `port` (scanning upward, per `§6`)
/// and serves GGP requests until interrupted.
pub async fn serve(registry: Arc<MatchRegistry>, port: u16) -> std::io::Result<()> {
    let app = Router::new().route("/", post(handle)).with_state(registry);

    let mut last_err = None;
    for candidate in port..port.saturating_add(MAX_PORT_SCAN) {
        match tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], candidate))).await {
            Ok(listener) => {
                tracing::info!(port = candidate, "listening for GGP requests");
                return axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;
            },
            Err(e) => {
                tracing::warn!(port = candidate, error = %e, "port unavailable, scanning upward");
                last_err = Some(e);
            },
        }
    }
    Err(last_err.expect("the scan range is non-empty"))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("received interrupt, shutting down");
}

async fn handle(State(registry): State<Arc<MatchRegistry>>, headers: HeaderMap, body: Bytes) -> AxumResponse {
    if !headers.contains_key(axum::http::header::CONTENT_LENGTH) {
        return render(Err(ProtocolError::MissingContentLength));
    }
    let text = match std::str::from_utf8(&body) {
        Ok(t) => t.to_string(),
        Err(_) => return render(Err(ProtocolError::Malformed("body is not valid UTF-8".to_string()))),
    };

    let result = tokio::task::spawn_blocking(move || dispatch(&registry, &text))
        .await
        .unwrap_or_else(|e| Err(ProtocolError::Internal(format!("search task panicked: {e}"))));
    render(result)
}

fn dispatch(registry: &MatchRegistry, body: &str) -> Result<Response, ProtocolError> {
    let request = parse_request(body)?;
    tracing::debug!(?request, "dispatching GGP request");
    match request {
        Request::Info => Ok(Response::Info { name: registry.player_name().to_string(), busy: !registry.accepts_new_match() }),
        Request::Start { game_id, role, rules, start_clock, play_clock } => {
            registry.start(game_id.clone(), &role, &rules, start_clock, play_clock).map_err(ProtocolError::from_match_error)?;
            tracing::info!(%game_id, %role, "started match");
            Ok(Response::Ready)
        },
        Request::Play { game_id, moves } => {
            let action = registry.play(&game_id, moves.as_deref()).map_err(ProtocolError::from_match_error)?;
            tracing::debug!(%game_id, %action, "chose move");
            Ok(Response::Action(action))
        },
        Request::Stop { game_id, moves } => {
            registry.stop(&game_id, moves.as_deref()).map_err(ProtocolError::from_match_error)?;
            tracing::info!(%game_id, "stopped match");
            Ok(Response::Done)
        },
        Request::Abort { game_id } => {
            registry.abort(&game_id).map_err(ProtocolError::from_match_error)?;
            tracing::info!(%game_id, "aborted match");
            Ok(Response::Done)
        },
    }
}

fn render(result: Result<Response, ProtocolError>) -> AxumResponse {
    let (status, body) = match result {
        Ok(response) => (StatusCode::OK, response.to_source()),
        Err(e) => {
            tracing::warn!(error = %e, status = e.status(), "request failed");
            (StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), String::new())
        },
    };

    let mut response = body.into_response();
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(axum::http::header::CONTENT_TYPE, "text/acl".parse().unwrap());
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert("Access-Control-Allow-Methods", "POST, GET, OPTIONS".parse().unwrap());
    headers.insert("Access-Control-Allow-Headers", "Content-Type".parse().unwrap());
    headers.insert("Access-Control-Allow-Age", "86400".parse().unwrap());
    response
}

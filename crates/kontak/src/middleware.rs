//! Request middleware: method override and the session/cookie layer.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use kontak_core::SessionId;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "kontak_session";

/// Rewrite `POST /x?_method=PUT|DELETE` to the overridden verb.
///
/// HTML forms can only emit GET and POST; edit and delete forms post
/// with a `_method` query parameter instead. Must run *before* routing,
/// so it is applied around the whole router, not via `Router::layer`.
pub fn method_override(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }
    let target = req
        .uri()
        .query()
        .and_then(|q| q.split('&').find_map(|pair| pair.strip_prefix("_method=")));
    match target {
        Some("PUT" | "put") => *req.method_mut() = Method::PUT,
        Some("DELETE" | "delete") => *req.method_mut() = Method::DELETE,
        _ => {}
    }
    req
}

fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .and_then(SessionId::parse)
}

/// Resolve the request's session and expose it to handlers.
///
/// Reads the session cookie, creates a fresh session when the cookie is
/// absent, expired, or malformed, stores the [`SessionId`] in request
/// extensions, and refreshes the cookie on the way out.
pub async fn session_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = session_from_headers(req.headers());
    let id = state.sessions.resolve(existing);
    req.extensions_mut().insert(id.clone());

    let mut response = next.run(req).await;
    let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

//! Session store and the login guard.
//!
//! Sessions are random tokens held in memory and referenced by an HttpOnly
//! cookie; they do not survive a restart. The guard is an explicit
//! middleware: it resolves the cookie to a user id placed in request
//! extensions, so handlers read the identity from request context rather
//! than any ambient state.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use parking_lot::RwLock;
use rand::Rng;
use serde_json::json;

use crate::web::server::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Identity of the logged-in user, inserted by [`require_login`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

/// In-memory session map: token -> user id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, i64>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a user and return its token.
    pub fn create(&self, user_id: i64) -> String {
        let bytes: [u8; 32] = rand::rng().random();
        let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        self.inner.write().insert(token.clone(), user_id);
        token
    }

    /// Resolve a token to its user id.
    pub fn user_for(&self, token: &str) -> Option<i64> {
        self.inner.read().get(token).copied()
    }

    /// End a session. Unknown tokens are ignored.
    pub fn remove(&self, token: &str) {
        self.inner.write().remove(token);
    }
}

/// Extract the session token from a request's Cookie header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value that starts a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Build the Set-Cookie value that ends a session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Login guard middleware.
///
/// On a valid session, inserts [`CurrentUser`] into request extensions and
/// continues. Otherwise page routes get a 303 redirect to `/login`, and
/// `/api/*` routes get 401 JSON.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = session_token(request.headers()).and_then(|t| state.sessions.user_for(&t));

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser(user_id));
            next.run(request).await
        }
        None => reject(request.uri().path()),
    }
}

fn reject(path: &str) -> Response {
    if path.starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "login_required",
                "message": "log in to use this endpoint"
            })),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

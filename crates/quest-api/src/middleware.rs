use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tracing::{error, warn};

use quest_types::Role;

use crate::state::AppState;

/// Identity attached to requests that passed basic auth.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_name: String,
    pub role: Role,
}

/// Check HTTP Basic credentials against the user directory.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let (user_name, password) = basic_credentials(req.headers()).ok_or_else(unauthorized)?;

    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || {
        if users.check_user(&user_name, &password) {
            users.get_user(&user_name).ok()
        } else {
            None
        }
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?
    .ok_or_else(unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        user_name: user.user_name,
        role: user.role,
    });
    Ok(next.run(req).await)
}

/// Decode `Authorization: Basic base64(user:pass)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Basic "))?;

    let decoded = B64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn unauthorized() -> Response {
    warn!("Basic auth rejected");
    let mut res = (StatusCode::UNAUTHORIZED, "Access denied").into_response();
    res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"quest\""),
    );
    res
}

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Extract and validate the token from the Authorization header (API routes).
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::InvalidToken
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Extract and validate the session cookie (page routes). Anything missing or
/// invalid goes back to the login page; an invalid cookie is also cleared.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return Redirect::to("/login").into_response();
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            debug!("Rejected session cookie: {}", e);
            (clear_session(jar), Redirect::to("/login")).into_response()
        }
    }
}

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{error, info};

use sentra_types::models::{NewUser, User};

use crate::middleware::{clear_session, session_cookie};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_page() -> impl IntoResponse {
    views::login(None)
}

pub async fn signup_page() -> impl IntoResponse {
    views::signup()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state.users.find_by_credentials(&form.email, &form.password) {
        Ok(Some(user)) => user,
        Ok(None) => return views::login(Some("Invalid credentials")).into_response(),
        Err(e) => {
            error!("User lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!("User {} logged in", user.id);
    start_session(&state, jar, &user)
}

/// POST /signup: no field is validated and emails may repeat.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NewUser>,
) -> Response {
    let user = match state.users.create_user(form) {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to create user: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!("User {} signed up", user.id);
    start_session(&state, jar, &user)
}

/// POST /logout: the token itself stays valid; only the cookie is dropped.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_session(jar), Redirect::to("/login"))
}

fn start_session(state: &AppState, jar: CookieJar, user: &User) -> Response {
    match state.tokens.issue(user) {
        Ok(token) => (jar.add(session_cookie(token)), Redirect::to("/dashboard")).into_response(),
        Err(e) => {
            error!("Failed to issue token for user {}: {}", user.id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub mod analysis;
pub mod auth;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod pipeline;
pub mod reports;
pub mod state;
pub mod token;
pub mod views;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::middleware::{require_bearer, require_session};
use crate::state::AppState;

/// Build the full application: JSON API under `/api` plus the browser pages.
pub fn router(state: AppState) -> Router {
    let api_protected = Router::new()
        .route("/upload_docs", post(docs::upload_docs))
        .route("/docs/{doc_id}", get(docs::get_doc))
        .route_layer(from_fn_with_state(state.clone(), require_bearer));

    let api_open = Router::new()
        .route("/sentiment-analysis-docs", post(analysis::analyze_docs))
        .route("/sentiment-analysis-comments", post(analysis::analyze_comments))
        .route("/report-gen-docs", post(reports::generate_report));

    let api = api_protected.merge(api_open).layer(CorsLayer::permissive());

    let protected_pages = Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::dashboard))
        .route("/analytics", get(pages::analytics))
        .route("/article/{id}", get(pages::article))
        .route(
            "/upload-comment",
            get(pages::upload_comment_page).post(pages::upload_comment),
        )
        .route("/my-comments", get(pages::my_comments))
        .route("/settings", get(pages::settings))
        .route("/success", get(pages::success))
        .route(
            "/upload-docs",
            get(pages::upload_docs_page).post(pages::upload_docs),
        )
        .route(
            "/sentiment-analysis-comments",
            get(pages::sentiment_comments_page).post(pages::sentiment_comments),
        )
        .route("/word-cloud", get(pages::word_cloud))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let public_pages = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout));

    Router::new()
        .nest("/api", api)
        .merge(protected_pages)
        .merge(public_pages)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
}

use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};

use sentra_store::articles::find_or_first;
use sentra_types::api::{Claims, Sentiment};
use sentra_types::models::{Comment, NewComment};

use crate::docs::read_upload;
use crate::pipeline::PipelineError;
use crate::state::AppState;
use crate::views::{self, AnalyticsSummary};

/// Words shorter than this are left out of the word cloud.
const MIN_WORD_LEN: usize = 4;
const WORD_CLOUD_SIZE: usize = 20;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

fn load_comments(state: &AppState) -> Result<Vec<Comment>, StatusCode> {
    state.comments.list_comments().map_err(|e| {
        error!("Failed to list comments: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let comments = load_comments(&state)?;
    Ok(views::dashboard(&claims, &state.articles, &comments))
}

pub async fn article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let article = find_or_first(&state.articles, &article_id).ok_or(StatusCode::NOT_FOUND)?;
    let comments = load_comments(&state)?;
    Ok(views::article(&claims, article, &comments))
}

pub async fn upload_comment_page(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    views::upload_comment(&claims, &state.articles, false)
}

pub async fn upload_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<NewComment>,
) -> Result<impl IntoResponse, StatusCode> {
    let comment = state.comments.add_comment(form).map_err(|e| {
        error!("Failed to store comment: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    info!("User {} added comment {}", claims.sub, comment.id);
    Ok(views::upload_comment(&claims, &state.articles, true))
}

pub async fn my_comments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let comments = load_comments(&state)?;
    Ok(views::my_comments(&claims, &comments))
}

/// Shows the stored account when it still exists. Tokens outlive the in-memory
/// user table across restarts, so the claims alone are the fallback.
pub async fn settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    let user = state.users.get_user(&claims.sub).unwrap_or_else(|e| {
        warn!("User lookup for settings failed: {}", e);
        None
    });
    views::settings(&claims, user.as_ref())
}

pub async fn success(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    views::success(&claims)
}

pub async fn upload_docs_page(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    views::upload_docs(&claims, None)
}

/// POST /upload-docs: runs the upload → analyze → report pipeline for one file.
pub async fn upload_docs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Response {
    // A body that breaks off mid-read had a file attached, so it is a failure
    // rather than a missing file.
    let result = match read_upload(&mut multipart).await {
        Ok(upload) => state.pipeline().run(upload),
        Err(e) => Err(PipelineError::Unreadable(e)),
    };

    match result {
        Ok(run) => {
            info!(
                "User {} pipeline done: doc {} report {}",
                claims.sub, run.doc_id, run.report.id
            );
            Redirect::to("/success").into_response()
        }
        Err(e) => {
            if !matches!(e, PipelineError::MissingFile) {
                error!("Upload pipeline for user {} failed: {}", claims.sub, e);
            }
            views::upload_docs(&claims, Some(e.user_message())).into_response()
        }
    }
}

pub async fn sentiment_comments_page(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    views::sentiment_comments(&claims, None)
}

#[derive(Debug, Deserialize)]
pub struct CommentBatchForm {
    #[serde(default)]
    pub comments: String,
}

/// Splits a textarea into one comment per non-blank line.
pub fn split_comments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub async fn sentiment_comments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<CommentBatchForm>,
) -> impl IntoResponse {
    let comments = split_comments(&form.comments);
    let result = state.analyzer.analyze_comments(&comments).unwrap_or_else(|e| {
        warn!("Comment analysis failed: {}", e);
        Vec::new()
    });
    views::sentiment_comments(&claims, Some(&result))
}

pub async fn analytics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let comments = load_comments(&state)?;
    let texts: Vec<String> = comments.into_iter().map(|c| c.text).collect();
    let scored = state.analyzer.analyze_comments(&texts).map_err(|e| {
        error!("Comment analysis failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let count = |s: Sentiment| scored.iter().filter(|r| r.sentiment == s).count();
    let summary = AnalyticsSummary {
        articles: state.articles.len(),
        comments: texts.len(),
        positive: count(Sentiment::Positive),
        negative: count(Sentiment::Negative),
    };
    Ok(views::analytics(&claims, &summary))
}

/// Most frequent words across all comments, highest count first.
pub fn top_words(comments: &[Comment], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for c in comments {
        for word in c.text.split(|ch: char| !ch.is_alphanumeric()) {
            if word.chars().count() >= MIN_WORD_LEN {
                *counts.entry(word.to_lowercase()).or_default() += 1;
            }
        }
    }

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(limit);
    words
}

pub async fn word_cloud(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let comments = load_comments(&state)?;
    Ok(views::word_cloud(&claims, &top_words(&comments, WORD_CLOUD_SIZE)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            id: 1,
            name: "n".into(),
            category: "c".into(),
            text: text.into(),
            article_id: "a1".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(
            split_comments("  This is frustrating \n\n\r\nGreat job\n   "),
            vec!["This is frustrating".to_string(), "Great job".to_string()]
        );
        assert!(split_comments("").is_empty());
    }

    #[test]
    fn words_ranked_by_frequency() {
        let comments = vec![
            comment("Billing is slow, billing is broken"),
            comment("Slow service; BILLING again"),
        ];
        let words = top_words(&comments, 3);

        assert_eq!(words[0], ("billing".to_string(), 3));
        assert_eq!(words[1], ("slow".to_string(), 2));
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|(w, _)| w != "is"));
    }
}

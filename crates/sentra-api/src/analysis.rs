use axum::{Json, extract::State, response::IntoResponse};

use sentra_types::api::{
    AnalysisResponse, CommentAnalysisParams, CommentSentiment, DocAnalysisParams, DocSentiment,
    Sentiment, TaskRequest,
};

use crate::error::{ApiError, ServiceError};
use crate::state::AppState;

/// Any comment containing this word (case-insensitive) is scored negative.
const NEGATIVE_KEYWORD: &str = "frustrating";

const DOC_CONFIDENCE: f64 = 0.7;
const COMMENT_CONFIDENCE: f64 = 0.9;

pub trait Analyzer: Send + Sync {
    fn analyze_documents(&self, doc_ids: &[String]) -> Result<Vec<DocSentiment>, ServiceError>;

    fn analyze_comments(&self, comments: &[String])
    -> Result<Vec<CommentSentiment>, ServiceError>;
}

/// Stand-in scorer: documents are always neutral, comments are keyword-matched.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordAnalyzer;

pub fn classify_comment(text: &str) -> Sentiment {
    if text.to_lowercase().contains(NEGATIVE_KEYWORD) {
        Sentiment::Negative
    } else {
        Sentiment::Positive
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze_documents(&self, doc_ids: &[String]) -> Result<Vec<DocSentiment>, ServiceError> {
        Ok(doc_ids
            .iter()
            .map(|id| DocSentiment {
                doc_id: id.clone(),
                sentiment: Sentiment::Neutral,
                confidence: DOC_CONFIDENCE,
            })
            .collect())
    }

    fn analyze_comments(
        &self,
        comments: &[String],
    ) -> Result<Vec<CommentSentiment>, ServiceError> {
        Ok(comments
            .iter()
            .enumerate()
            .map(|(idx, comment)| CommentSentiment {
                comment_id: idx + 1,
                comment: comment.clone(),
                sentiment: classify_comment(comment),
                confidence: COMMENT_CONFIDENCE,
            })
            .collect())
    }
}

/// POST /api/sentiment-analysis-docs
pub async fn analyze_docs(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest<DocAnalysisParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.analyzer.analyze_documents(&req.params.doc_ids)?;
    Ok(Json(AnalysisResponse {
        success: true,
        data,
    }))
}

/// POST /api/sentiment-analysis-comments
pub async fn analyze_comments(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest<CommentAnalysisParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.analyzer.analyze_comments(&req.params.comments)?;
    Ok(Json(AnalysisResponse {
        success: true,
        data,
    }))
}

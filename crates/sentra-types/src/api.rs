use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// Identity carried by both the session cookie and the bearer header.
/// `exp` is only present when a token lifetime is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

// -- Sentiment --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSentiment {
    pub doc_id: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSentiment {
    /// 1-based position of the comment in the submitted list.
    pub comment_id: usize,
    pub comment: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub url: String,
}

// -- Task envelopes --

/// Body shape shared by the analysis and report endpoints. Callers also send
/// `auth`, `task` and `options`; those are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TaskRequest<P> {
    #[serde(default)]
    pub params: P,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocAnalysisParams {
    #[serde(default)]
    pub doc_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentAnalysisParams {
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    #[serde(default)]
    pub analysis_results: Vec<DocSentiment>,
}

// -- Responses --

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub task: bool,
    pub doc_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub success: bool,
    pub report_id: Uuid,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

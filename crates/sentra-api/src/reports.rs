use axum::{Json, extract::State, response::IntoResponse};
use uuid::Uuid;

use sentra_types::api::{DocSentiment, Report, ReportParams, ReportResponse, TaskRequest};

use crate::error::{ApiError, ServiceError};
use crate::state::AppState;

pub trait ReportGenerator: Send + Sync {
    fn generate(&self, analysis: &[DocSentiment]) -> Result<Report, ServiceError>;
}

/// Hands out a report id and link without rendering anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubReporter;

impl ReportGenerator for StubReporter {
    fn generate(&self, _analysis: &[DocSentiment]) -> Result<Report, ServiceError> {
        let id = Uuid::new_v4();
        Ok(Report {
            id,
            url: report_url(&id),
        })
    }
}

pub fn report_url(id: &Uuid) -> String {
    format!("/report/{}", id)
}

/// POST /api/report-gen-docs
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest<ReportParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.reporter.generate(&req.params.analysis_results)?;
    Ok(Json(ReportResponse {
        success: true,
        report_id: report.id,
        url: report.url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_report_gets_a_fresh_id() {
        let a = StubReporter.generate(&[]).unwrap();
        let b = StubReporter.generate(&[]).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.url, format!("/report/{}", a.id));
    }
}

//! Upload → analyze → report sequencing for the document upload page.
//!
//! Each run walks `AwaitingUpload → Uploading → Analyzing → Reporting → Succeeded`.
//! The first failing step stops the run and is reported with the stage it
//! failed in. Nothing is retried and nothing already stored is rolled back.

use std::fmt;

use axum::extract::multipart::MultipartError;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use sentra_store::DocumentStore;
use sentra_types::api::Report;

use crate::analysis::Analyzer;
use crate::error::ServiceError;
use crate::reports::ReportGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingUpload,
    Uploading,
    Analyzing,
    Reporting,
    Succeeded,
    Errored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::AwaitingUpload => "awaiting upload",
            Stage::Uploading => "uploading",
            Stage::Analyzing => "analyzing",
            Stage::Reporting => "reporting",
            Stage::Succeeded => "succeeded",
            Stage::Errored => "errored",
        })
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please choose a CSV file.")]
    MissingFile,

    #[error("upload form could not be read")]
    Unreadable(#[source] MultipartError),

    #[error("pipeline failed while {stage}")]
    Step {
        stage: Stage,
        #[source]
        source: ServiceError,
    },
}

impl PipelineError {
    /// Message shown on the upload page. Step failures never expose their cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::MissingFile => "Please choose a CSV file.",
            PipelineError::Unreadable(_) | PipelineError::Step { .. } => "Pipeline failed.",
        }
    }

    /// Where the run stopped.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::MissingFile => Stage::AwaitingUpload,
            PipelineError::Unreadable(_) | PipelineError::Step { .. } => Stage::Errored,
        }
    }
}

/// A file taken from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub doc_id: Uuid,
    pub report: Report,
}

pub struct Pipeline<'a> {
    docs: &'a dyn DocumentStore,
    analyzer: &'a dyn Analyzer,
    reporter: &'a dyn ReportGenerator,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        docs: &'a dyn DocumentStore,
        analyzer: &'a dyn Analyzer,
        reporter: &'a dyn ReportGenerator,
    ) -> Self {
        Self {
            docs,
            analyzer,
            reporter,
        }
    }

    pub fn run(&self, upload: Option<Upload>) -> Result<PipelineRun, PipelineError> {
        let upload = upload.ok_or(PipelineError::MissingFile)?;

        let doc_id = step(Stage::Uploading, || {
            Ok(self.docs.put(&upload.file_name, upload.bytes)?)
        })?;

        // The analysis output is not forwarded; the report is requested with an empty list.
        let _analysis = step(Stage::Analyzing, || {
            self.analyzer.analyze_documents(&[doc_id.to_string()])
        })?;

        let report = step(Stage::Reporting, || self.reporter.generate(&[]))?;

        debug!("Pipeline {}: doc {} report {}", Stage::Succeeded, doc_id, report.id);
        Ok(PipelineRun { doc_id, report })
    }
}

fn step<T>(
    stage: Stage,
    f: impl FnOnce() -> Result<T, ServiceError>,
) -> Result<T, PipelineError> {
    debug!("Pipeline {}", stage);
    f().map_err(|source| {
        warn!("Pipeline failed while {}: {}", stage, source);
        PipelineError::Step { stage, source }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use sentra_store::{MemoryStore, StoreError};
    use sentra_types::api::{DocSentiment, Sentiment};
    use sentra_types::models::Document;

    use super::*;
    use crate::analysis::KeywordAnalyzer;
    use crate::reports::StubReporter;

    fn csv() -> Option<Upload> {
        Some(Upload {
            file_name: "data.csv".into(),
            bytes: Bytes::from_static(b"a,b\n1,2\n"),
        })
    }

    struct BrokenDocs;

    impl DocumentStore for BrokenDocs {
        fn put(&self, _name: &str, _content: Bytes) -> sentra_store::Result<Uuid> {
            Err(StoreError::Poisoned("test".into()))
        }

        fn get(&self, id: &Uuid) -> sentra_store::Result<Document> {
            Err(StoreError::NotFound {
                kind: "document",
                id: id.to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingDocs {
        inner: MemoryStore,
        ids: Mutex<Vec<Uuid>>,
    }

    impl DocumentStore for RecordingDocs {
        fn put(&self, name: &str, content: Bytes) -> sentra_store::Result<Uuid> {
            let id = self.inner.put(name, content)?;
            self.ids.lock().unwrap().push(id);
            Ok(id)
        }

        fn get(&self, id: &Uuid) -> sentra_store::Result<Document> {
            self.inner.get(id)
        }
    }

    struct BrokenAnalyzer;

    impl Analyzer for BrokenAnalyzer {
        fn analyze_documents(
            &self,
            _doc_ids: &[String],
        ) -> Result<Vec<DocSentiment>, ServiceError> {
            Err(ServiceError::Analysis("model not loaded".into()))
        }

        fn analyze_comments(
            &self,
            _comments: &[String],
        ) -> Result<Vec<sentra_types::api::CommentSentiment>, ServiceError> {
            Err(ServiceError::Analysis("model not loaded".into()))
        }
    }

    struct BrokenReporter;

    impl ReportGenerator for BrokenReporter {
        fn generate(&self, _analysis: &[DocSentiment]) -> Result<Report, ServiceError> {
            Err(ServiceError::Report("offline".into()))
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        seen: Mutex<Vec<usize>>,
    }

    impl ReportGenerator for RecordingReporter {
        fn generate(&self, analysis: &[DocSentiment]) -> Result<Report, ServiceError> {
            self.seen.lock().unwrap().push(analysis.len());
            StubReporter.generate(analysis)
        }
    }

    struct CountingAnalyzer {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Analyzer for CountingAnalyzer {
        fn analyze_documents(
            &self,
            doc_ids: &[String],
        ) -> Result<Vec<DocSentiment>, ServiceError> {
            self.calls.lock().unwrap().push(doc_ids.to_vec());
            KeywordAnalyzer.analyze_documents(doc_ids)
        }

        fn analyze_comments(
            &self,
            comments: &[String],
        ) -> Result<Vec<sentra_types::api::CommentSentiment>, ServiceError> {
            KeywordAnalyzer.analyze_comments(comments)
        }
    }

    #[test]
    fn successful_run_stores_document() {
        let store = MemoryStore::new();
        let run = Pipeline::new(&store, &KeywordAnalyzer, &StubReporter)
            .run(csv())
            .unwrap();

        let doc = store.get(&run.doc_id).unwrap();
        assert_eq!(doc.name, "data.csv");
        assert_eq!(run.report.url, format!("/report/{}", run.report.id));
    }

    #[test]
    fn missing_file_stops_before_upload() {
        let store = MemoryStore::new();
        let err = Pipeline::new(&store, &KeywordAnalyzer, &StubReporter)
            .run(None)
            .unwrap_err();

        assert!(matches!(err, PipelineError::MissingFile));
        assert_eq!(err.stage(), Stage::AwaitingUpload);
        assert_eq!(err.user_message(), "Please choose a CSV file.");
    }

    #[test]
    fn store_failure_is_reported_as_upload_step() {
        let err = Pipeline::new(&BrokenDocs, &KeywordAnalyzer, &StubReporter)
            .run(csv())
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Step {
                stage: Stage::Uploading,
                ..
            }
        ));
        assert_eq!(err.stage(), Stage::Errored);
        assert_eq!(err.user_message(), "Pipeline failed.");
    }

    #[test]
    fn analysis_failure_keeps_uploaded_document() {
        let store = RecordingDocs::default();
        let err = Pipeline::new(&store, &BrokenAnalyzer, &StubReporter)
            .run(csv())
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Step {
                stage: Stage::Analyzing,
                ..
            }
        ));
        // No rollback: the document written in the upload step is still there.
        let ids = store.ids.lock().unwrap();
        assert_eq!(ids.len(), 1);
        assert!(store.inner.get(&ids[0]).is_ok());
    }

    #[test]
    fn report_failure_is_reported_as_report_step() {
        let store = MemoryStore::new();
        let err = Pipeline::new(&store, &KeywordAnalyzer, &BrokenReporter)
            .run(csv())
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Step {
                stage: Stage::Reporting,
                ..
            }
        ));
    }

    #[test]
    fn analysis_sees_new_doc_but_report_gets_nothing() {
        let store = MemoryStore::new();
        let analyzer = CountingAnalyzer {
            calls: Mutex::new(Vec::new()),
        };
        let reporter = RecordingReporter::default();

        let run = Pipeline::new(&store, &analyzer, &reporter).run(csv()).unwrap();

        let calls = analyzer.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec![run.doc_id.to_string()]]);
        assert_eq!(reporter.seen.lock().unwrap().as_slice(), &[0]);

        let sentiments = KeywordAnalyzer.analyze_documents(&calls[0]).unwrap();
        assert_eq!(sentiments[0].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn repeated_runs_are_not_deduplicated() {
        let store = MemoryStore::new();
        let pipeline = Pipeline::new(&store, &KeywordAnalyzer, &StubReporter);

        let first = pipeline.run(csv()).unwrap();
        let second = pipeline.run(csv()).unwrap();

        assert_ne!(first.doc_id, second.doc_id);
        assert_ne!(first.report.id, second.report.id);
    }
}

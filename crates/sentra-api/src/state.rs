use std::sync::Arc;

use sentra_store::articles::seed_articles;
use sentra_store::{CommentStore, DocumentStore, MemoryStore, UserStore};
use sentra_types::models::Article;

use crate::analysis::{Analyzer, KeywordAnalyzer};
use crate::pipeline::Pipeline;
use crate::reports::{ReportGenerator, StubReporter};
use crate::token::TokenService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: Arc<dyn UserStore>,
    pub docs: Arc<dyn DocumentStore>,
    pub comments: Arc<dyn CommentStore>,
    pub analyzer: Arc<dyn Analyzer>,
    pub reporter: Arc<dyn ReportGenerator>,
    pub tokens: TokenService,
    pub articles: Vec<Article>,
    pub max_upload_bytes: usize,
}

impl AppStateInner {
    /// All stores backed by one `MemoryStore`, with the stub analyzer and reporter.
    pub fn in_memory(tokens: TokenService, max_upload_bytes: usize) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            docs: store.clone(),
            comments: store,
            analyzer: Arc::new(KeywordAnalyzer),
            reporter: Arc::new(StubReporter),
            tokens,
            articles: seed_articles(),
            max_upload_bytes,
        }
    }

    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(
            self.docs.as_ref(),
            self.analyzer.as_ref(),
            self.reporter.as_ref(),
        )
    }
}

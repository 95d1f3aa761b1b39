pub mod articles;
pub mod queries;

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use sentra_types::models::{Comment, Document, NewComment, NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait UserStore: Send + Sync {
    /// Assigns the next sequential id. Emails are not required to be unique.
    fn create_user(&self, new: NewUser) -> Result<User>;

    fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>>;

    fn get_user(&self, id: &str) -> Result<Option<User>>;
}

pub trait DocumentStore: Send + Sync {
    fn put(&self, name: &str, content: Bytes) -> Result<Uuid>;

    fn get(&self, id: &Uuid) -> Result<Document>;
}

pub trait CommentStore: Send + Sync {
    fn add_comment(&self, new: NewComment) -> Result<Comment>;

    /// All comments in insertion order.
    fn list_comments(&self) -> Result<Vec<Comment>>;
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    documents: HashMap<Uuid, Document>,
    comments: Vec<Comment>,
}

/// Process-local backing for every store trait. Nothing is evicted and
/// nothing survives a restart.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("In-memory store initialised");
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn with_tables<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let mut tables = self
            .tables
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        f(&mut tables)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

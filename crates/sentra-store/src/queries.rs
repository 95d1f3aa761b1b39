use bytes::Bytes;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use sentra_types::models::{Comment, DEFAULT_ROLE, Document, NewComment, NewUser, User};

use crate::{CommentStore, DocumentStore, MemoryStore, Result, StoreError, UserStore};

impl UserStore for MemoryStore {
    fn create_user(&self, new: NewUser) -> Result<User> {
        self.with_tables(|t| {
            // Ids are derived from the table size; safe because rows are never removed
            // and the whole table is locked for the insert.
            let user = User {
                id: (t.users.len() + 1).to_string(),
                name: new.name,
                email: new.email,
                phone: new.phone,
                username: new.username,
                password: new.password,
                role: DEFAULT_ROLE.to_string(),
            };
            t.users.push(user.clone());
            debug!("Created user {}", user.id);
            Ok(user)
        })
    }

    fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.with_tables(|t| {
            Ok(t.users
                .iter()
                .find(|u| u.email == email && u.password == password)
                .cloned())
        })
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.with_tables(|t| Ok(t.users.iter().find(|u| u.id == id).cloned()))
    }
}

impl DocumentStore for MemoryStore {
    fn put(&self, name: &str, content: Bytes) -> Result<Uuid> {
        self.with_tables(|t| {
            let mut id = Uuid::new_v4();
            while t.documents.contains_key(&id) {
                id = Uuid::new_v4();
            }
            debug!("Stored document {} ({}, {} bytes)", id, name, content.len());
            t.documents.insert(
                id,
                Document {
                    id,
                    name: name.to_string(),
                    content,
                },
            );
            Ok(id)
        })
    }

    fn get(&self, id: &Uuid) -> Result<Document> {
        self.with_tables(|t| {
            t.documents
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound {
                    kind: "document",
                    id: id.to_string(),
                })
        })
    }
}

impl CommentStore for MemoryStore {
    fn add_comment(&self, new: NewComment) -> Result<Comment> {
        self.with_tables(|t| {
            let comment = Comment {
                id: t.comments.len() as u64 + 1,
                name: new.name,
                category: new.category,
                text: new.text,
                article_id: new.article_id,
                created_at: Utc::now(),
            };
            t.comments.push(comment.clone());
            Ok(comment)
        })
    }

    fn list_comments(&self) -> Result<Vec<Comment>> {
        self.with_tables(|t| Ok(t.comments.clone()))
    }
}

//! Collaborator traits supplied by the surrounding application.
//!
//! The core only ever asks two things of its host: "who is performing this
//! operation?" (to stamp audit fields) and "persist these image bytes" (to
//! fill a note's image list). Both must tolerate degraded answers: no user,
//! or a storage failure surfaced as an error.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::RecordId;

use crate::error::{DomainError, Result};

/// Resolves the user behind the current operation, if any.
///
/// Implementations typically read a session cookie or header. "No user" is a
/// normal answer: audit fields are then simply left absent.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn current_user(&self) -> Option<RecordId>;
}

/// Resolver that always answers with the same identity.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(Option<RecordId>);

impl FixedIdentity {
    /// Resolves to the given user.
    pub fn user(id: RecordId) -> Self {
        Self(Some(id))
    }

    /// Resolves to no user.
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl From<Option<RecordId>> for FixedIdentity {
    fn from(id: Option<RecordId>) -> Self {
        Self(id)
    }
}

#[async_trait]
impl IdentityResolver for FixedIdentity {
    async fn current_user(&self) -> Option<RecordId> {
        self.0
    }
}

/// Persists raw image bytes and returns an opaque reference.
///
/// The core stores the reference verbatim in a note's image list and never
/// interprets it.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn persist(&self, bytes: Vec<u8>) -> Result<String>;
}

#[derive(Debug, Default)]
struct MemoryImageState {
    images: Vec<Vec<u8>>,
    fail_on_persist: bool,
}

/// In-memory image store for tests and single-process runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    state: Arc<RwLock<MemoryImageState>>,
}

impl MemoryImageStore {
    /// Creates a new empty in-memory image store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next persist call.
    pub fn set_fail_on_persist(&self, fail: bool) {
        self.state.write().unwrap().fail_on_persist = fail;
    }

    /// Returns the number of stored images.
    pub fn image_count(&self) -> usize {
        self.state.read().unwrap().images.len()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn persist(&self, bytes: Vec<u8>) -> Result<String> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_persist {
            return Err(DomainError::ImageStorage(
                "in-memory store configured to fail".to_string(),
            ));
        }
        state.images.push(bytes);
        Ok(format!("mem://images/{}", state.images.len()))
    }
}

//! In-memory audit store for single-node deployments and tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::types::AuditId;
use audithub_entity::audit::Audit;

use crate::filter::AuditFilter;
use crate::store::{AuditMutation, AuditStore};

/// In-memory [`AuditStore`] implementation.
///
/// Atomicity comes from holding the document's shard lock for the whole
/// read-validate-mutate cycle; the mutation runs against a working copy,
/// so a failed mutation leaves the stored document untouched.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    audits: DashMap<AuditId, Audit>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            audits: DashMap::new(),
        }
    }

    /// Number of stored audits.
    pub fn len(&self) -> usize {
        self.audits.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.audits.is_empty()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn find(&self, id: AuditId) -> AppResult<Option<Audit>> {
        Ok(self.audits.get(&id).map(|entry| entry.clone()))
    }

    async fn find_all(&self, filter: &AuditFilter) -> AppResult<Vec<Audit>> {
        let mut matches: Vec<Audit> = self
            .audits
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.clone())
            .collect();
        matches.sort_by_key(|a| a.created_at);
        Ok(matches)
    }

    async fn insert(&self, audit: Audit) -> AppResult<Audit> {
        if self.audits.contains_key(&audit.id) {
            return Err(AppError::conflict(format!(
                "Audit {} already exists",
                audit.id
            )));
        }
        self.audits.insert(audit.id, audit.clone());
        Ok(audit)
    }

    async fn atomic_update(&self, id: AuditId, mutation: AuditMutation) -> AppResult<Audit> {
        let mut entry = self
            .audits
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Audit {id} not found")))?;

        let mut working = entry.clone();
        mutation(&mut working)?;
        working.updated_at = Utc::now();
        *entry = working.clone();
        Ok(working)
    }

    async fn delete(&self, id: AuditId) -> AppResult<bool> {
        Ok(self.audits.remove(&id).is_some())
    }
}

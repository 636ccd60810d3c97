// Copyright 2025 Cowboy AI, LLC.

//! Case persistence port
//!
//! Saves are optimistic: the caller states the version it loaded, and a
//! save against any other stored version is refused. That keeps two
//! commands on the same case from interleaving their history pushes.

use crate::case::Case;
use crate::entity::{AggregateRoot, CaseMarker, EntityId};
use crate::errors::{DomainError, DomainResult};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Repository trait for loading and saving cases
#[cfg_attr(test, mockall::automock)]
pub trait CaseRepository: Send + Sync {
    /// Load a case by id
    fn load(&self, id: EntityId<CaseMarker>) -> DomainResult<Option<Case>>;

    /// Store `case`, which must carry the version following `expected_version`
    ///
    /// `expected_version` is `None` for a case that has never been stored.
    fn save(&self, case: &Case, expected_version: Option<u64>) -> DomainResult<()>;
}

/// In-memory repository for testing
#[derive(Clone, Default)]
pub struct InMemoryCaseRepository {
    storage: Arc<RwLock<HashMap<EntityId<CaseMarker>, Case>>>,
}

impl InMemoryCaseRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cases
    pub fn len(&self) -> usize {
        self.storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CaseRepository for InMemoryCaseRepository {
    fn load(&self, id: EntityId<CaseMarker>) -> DomainResult<Option<Case>> {
        Ok(self
            .storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }

    fn save(&self, case: &Case, expected_version: Option<u64>) -> DomainResult<()> {
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        let stored = storage.get(&case.id()).map(|stored| stored.version());
        if stored != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                expected: expected_version.unwrap_or_default(),
                actual: stored.unwrap_or_default(),
            });
        }
        storage.insert(case.id(), case.clone());
        Ok(())
    }
}

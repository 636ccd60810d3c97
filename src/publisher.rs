// Copyright 2025 Cowboy AI, LLC.

//! Statistics export port
//!
//! Every non-empty [`CaseChanged`] is handed to a [`CaseChangedPublisher`]
//! after the case has been saved.

use crate::events::{CaseChanged, DomainEvent};
use std::sync::{Arc, PoisonError, RwLock};

/// Downstream consumer of case change events
#[cfg_attr(test, mockall::automock)]
pub trait CaseChangedPublisher: Send + Sync {
    /// Publish one event
    fn publish(&self, event: &CaseChanged) -> Result<(), String>;
}

/// Publisher that keeps every event in memory
#[derive(Clone, Default)]
pub struct InMemoryCaseChangedPublisher {
    published: Arc<RwLock<Vec<CaseChanged>>>,
}

impl InMemoryCaseChangedPublisher {
    /// Create an empty publisher
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first
    pub fn published(&self) -> Vec<CaseChanged> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CaseChangedPublisher for InMemoryCaseChangedPublisher {
    fn publish(&self, event: &CaseChanged) -> Result<(), String> {
        tracing::debug!(
            event_type = event.event_type(),
            case_id = %event.case_id(),
            records = event.change_records.len(),
            "recording case event"
        );
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

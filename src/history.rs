// Copyright 2025 Cowboy AI, LLC.

//! Append-only history collections
//!
//! A [`History`] only grows. Entries are immutable once created and the
//! collection exposes no update or delete operation; appending is restricted
//! to the crate's mutation commands.

use crate::entity::{CaseMarker, EntityId, HistoryEntryMarker};
use crate::identifiers::Ident;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One recorded value snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryEntry<S> {
    id: EntityId<HistoryEntryMarker>,
    case_id: EntityId<CaseMarker>,
    snapshot: S,
    recorded_at: DateTime<Utc>,
    actor: Option<Ident>,
}

impl<S> HistoryEntry<S> {
    /// Entry identity
    pub fn id(&self) -> EntityId<HistoryEntryMarker> {
        self.id
    }

    /// Case the entry belongs to
    pub fn case_id(&self) -> EntityId<CaseMarker> {
        self.case_id
    }

    /// The recorded value
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// When the value was recorded
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Who initiated the change that produced this entry
    pub fn actor(&self) -> Option<&Ident> {
        self.actor.as_ref()
    }
}

/// Append-only list of history entries for one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct History<S> {
    entries: Vec<HistoryEntry<S>>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> History<S> {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(
        &mut self,
        case_id: EntityId<CaseMarker>,
        snapshot: S,
        recorded_at: DateTime<Utc>,
        actor: Option<&Ident>,
    ) {
        self.entries.push(HistoryEntry {
            id: EntityId::new(),
            case_id,
            snapshot,
            recorded_at,
            actor: actor.cloned(),
        });
    }

    /// Iterate entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry<S>> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry<S>> {
        self.entries.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, S> IntoIterator for &'a History<S> {
    type Item = &'a HistoryEntry<S>;
    type IntoIter = std::slice::Iter<'a, HistoryEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

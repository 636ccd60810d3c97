// Copyright 2025 Cowboy AI, LLC.

//! Typed identities and the aggregate root contract

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// A typed entity ID using phantom types for type safety
///
/// The phantom type parameter ensures that a case id can never be passed
/// where a partial treatment id or a change record id is expected.
///
/// # Examples
///
/// ```rust
/// use appeal_case_core::{EntityId, markers::{CaseMarker, PartialTreatmentMarker}};
///
/// let case_id = EntityId::<CaseMarker>::new();
/// let treatment_id = EntityId::<PartialTreatmentMarker>::new();
/// assert_ne!(case_id.as_uuid(), treatment_id.as_uuid());
///
/// // These are different types - won't compile if mixed up:
/// // let _: EntityId<CaseMarker> = treatment_id; // ERROR!
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId<T> {
    id: Uuid,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> EntityId<T> {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            _phantom: PhantomData,
        }
    }

    /// Create an entity ID from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.id
    }
}

// Manual impls so markers need not implement the traits themselves.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> std::hash::Hash for EntityId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.id).finish()
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<EntityId<T>> for Uuid {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

impl<T> JsonSchema for EntityId<T> {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "EntityId".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <Uuid as JsonSchema>::json_schema(gen)
    }
}

/// Contract for aggregate roots
///
/// All changes to entities within an aggregate go through the root. The
/// version is used by the persistence collaborator for optimistic
/// concurrency control.
pub trait AggregateRoot: Sized {
    /// The type of ID for this aggregate
    type Id: Copy + Eq + Send + Sync;

    /// Get the aggregate's ID
    fn id(&self) -> Self::Id;

    /// Get the aggregate's version for optimistic concurrency
    fn version(&self) -> u64;

    /// Increment the version
    fn increment_version(&mut self);
}

/// Marker for case ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseMarker;

/// Marker for partial treatment ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialTreatmentMarker;

/// Marker for change record ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeRecordMarker;

/// Marker for history entry ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryEntryMarker;

// Copyright 2025 Cowboy AI, LLC.

//! Domain events
//!
//! Events represent facts that have occurred in the domain. Every mutation
//! command produces exactly one [`CaseChanged`]: the next case snapshot plus
//! the change records the command decided were worth keeping.

use crate::case::Case;
use crate::change_record::{ChangeRecord, Field};
use crate::entity::{CaseMarker, EntityId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base trait for all domain events
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Get the aggregate ID this event relates to
    fn aggregate_id(&self) -> Uuid;

    /// Get the event type name
    fn event_type(&self) -> &'static str;

    /// Get the schema version
    fn version(&self) -> &'static str {
        "v1"
    }
}

/// Output of one mutation command
///
/// Consumers that need before/after values beyond the change records
/// re-read the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseChanged {
    /// The case after the command
    pub case: Case,
    /// Change records, in the order the fields were touched
    pub change_records: Vec<ChangeRecord>,
}

impl CaseChanged {
    /// Reference to the changed case
    pub fn case_id(&self) -> EntityId<CaseMarker> {
        self.case.id()
    }

    /// Whether the command changed nothing
    pub fn is_empty(&self) -> bool {
        self.change_records.is_empty()
    }

    /// Fields touched, in order
    pub fn fields(&self) -> Vec<Field> {
        self.change_records.iter().map(|r| r.field).collect()
    }

    /// The case after the command
    pub fn into_case(self) -> Case {
        self.case
    }
}

impl DomainEvent for CaseChanged {
    fn aggregate_id(&self) -> Uuid {
        *self.case.id().as_uuid()
    }

    fn event_type(&self) -> &'static str {
        "CaseChanged"
    }
}

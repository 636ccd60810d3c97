// Copyright 2025 Cowboy AI, LLC.

//! # Appeal Case Core
//!
//! Case-state model for administrative appeal processing.
//!
//! This crate provides the building blocks for tracking an appeal case
//! through its lifecycle:
//! - **Case**: one aggregate with shared base state and a variant per case kind
//! - **Mutations**: pure commands that take a snapshot and return the next one
//! - **Change Records**: one audit entry per field that actually changed
//! - **History**: append-only collections of outgoing values
//! - **Status**: derived on demand, never stored
//! - **Progression**: outcome classification and partial treatment rules
//! - **Command Handler**: the transaction boundary with optimistic saves
//!
//! ## Design Principles
//!
//! 1. **Type Safety**: Phantom-typed identifiers for cases, treatments and records
//! 2. **Immutability**: Commands never modify the snapshot they are given
//! 3. **Derivation**: Status and completion are functions of the snapshot
//! 4. **Append Only**: History has a single append operation and nothing else
//! 5. **Explicit Failures**: Unknown and unclassified codes are surfaced, not guessed

#![warn(missing_docs)]

mod change_record;
mod codes;
mod commands;
mod config;
mod entity;
mod errors;
mod events;
mod flow;
mod history;
mod identifiers;
mod publisher;
mod repository;
mod service;
mod state_machine;
mod status;

pub mod case;
pub mod derived;
pub mod mutations;
pub mod progression;
pub mod spawn;

// Re-export core types
pub use case::{
    AppealCase, Case, CaseBase, CaseKind, CourtAppealCase, Decision, DocumentReference,
    HasExternalCourtFields, HasPartialTreatments, Hold, NewCase, NotifiedProcessingTime,
    OrdinaryCase, PartialTreatment, ProcessingDuration, ReopeningRequest,
};
pub use change_record::{ChangeRecord, ChangeValue, Field};
pub use codes::{
    BenefitDomain, LegalBasis, Outcome, PartyIdType, ReferenceCode, TimeUnit, UnassignmentReason,
};
pub use commands::CaseCommand;
pub use config::MutationPolicy;
pub use entity::{AggregateRoot, EntityId};
pub use errors::{DomainError, DomainResult};
pub use events::{CaseChanged, DomainEvent};
pub use flow::{FlowInput, FlowState};
pub use history::{History, HistoryEntry};
pub use identifiers::{Ident, PartyId, UnitId};
pub use mutations::CommandContext;
pub use progression::{OutcomeClass, Progression};
pub use publisher::{CaseChangedPublisher, InMemoryCaseChangedPublisher};
pub use repository::{CaseRepository, InMemoryCaseRepository};
pub use service::CaseCommandHandler;
pub use spawn::SpawnKind;
pub use state_machine::{MealyStateTransitions, State, TransitionInput};
pub use status::{derive_status, CaseStatus};

/// Marker types for typed identities
pub mod markers {
    pub use crate::entity::{
        CaseMarker, ChangeRecordMarker, HistoryEntryMarker, PartialTreatmentMarker,
    };
}

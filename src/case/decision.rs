// Copyright 2025 Cowboy AI, LLC.

//! Decision state and partial treatments
//!
//! A [`Decision`] groups what one cycle of decision-making produces: the
//! outcome, the legal basis it cites, its co-signing round trip and its
//! completion timestamps. Ordinary, court and reopening cases carry exactly
//! one; appeal cases carry one per [`PartialTreatment`].

use crate::case::values::{CoSigner, CoSignerSnapshot, Completion};
use crate::codes::{LegalBasis, Outcome};
use crate::entity::{EntityId, PartialTreatmentMarker};
use crate::flow::FlowState;
use crate::history::History;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome, legal basis, co-signer and completion of one decision cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    pub(crate) outcome: Option<Outcome>,
    pub(crate) secondary_outcomes: BTreeSet<Outcome>,
    pub(crate) legal_basis: BTreeSet<LegalBasis>,
    pub(crate) co_signer: Option<CoSigner>,
    pub(crate) co_signer_flow_state: FlowState,
    pub(crate) co_signer_history: History<CoSignerSnapshot>,
    pub(crate) completion: Completion,
}

impl Decision {
    /// Primary outcome
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Secondary outcomes
    pub fn secondary_outcomes(&self) -> &BTreeSet<Outcome> {
        &self.secondary_outcomes
    }

    /// Legal basis used in the decision
    pub fn legal_basis(&self) -> &BTreeSet<LegalBasis> {
        &self.legal_basis
    }

    /// Current co-signer
    pub fn co_signer(&self) -> Option<&CoSigner> {
        self.co_signer.as_ref()
    }

    /// Co-signing flow state
    pub fn co_signer_flow_state(&self) -> FlowState {
        self.co_signer_flow_state
    }

    /// Prior co-signer states
    pub fn co_signer_history(&self) -> &History<CoSignerSnapshot> {
        &self.co_signer_history
    }

    /// Completion marker
    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// When the caseworker finished this decision
    pub fn completed_by_caseworker_at(&self) -> Option<DateTime<Utc>> {
        self.completion.completed_by_caseworker_at
    }

    /// When this decision was fully completed
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completion.completed_at
    }
}

/// One cycle of decision-making within an appeal case ("delbehandling")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialTreatment {
    id: EntityId<PartialTreatmentMarker>,
    opened_at: DateTime<Utc>,
    pub(crate) decision: Decision,
}

impl PartialTreatment {
    /// Open an empty partial treatment
    pub fn open(opened_at: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::new(),
            opened_at,
            decision: Decision::default(),
        }
    }

    /// Treatment identity
    pub fn id(&self) -> EntityId<PartialTreatmentMarker> {
        self.id
    }

    /// When the treatment was opened
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// The decision state of this treatment
    pub fn decision(&self) -> &Decision {
        &self.decision
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Case commands
//!
//! A [`CaseCommand`] is the serializable request form of one mutation. The
//! command handler receives these; the functions in [`crate::mutations`] do
//! the work.

use crate::case::{Case, DocumentReference, Hold, NotifiedProcessingTime};
use crate::codes::{LegalBasis, Outcome, UnassignmentReason};
use crate::config::MutationPolicy;
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use crate::flow::FlowState;
use crate::identifiers::{Ident, PartyId, UnitId};
use crate::mutations::{self, CommandContext};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One mutation request against a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CaseCommand {
    /// Assign, reassign or withdraw the assignment
    SetAssignment {
        /// New assignee and unit; `None` withdraws
        assignee: Option<(Ident, UnitId)>,
        /// Why the outgoing assignment ended
        reason: Option<UnassignmentReason>,
    },
    /// Select or clear the co-signer
    SetCoSigner {
        /// New co-signer
        co_signer: Option<Ident>,
    },
    /// Move the co-signing flow
    SetCoSignerFlowState {
        /// Target flow state
        flow_state: FlowState,
    },
    /// Put on or lift a hold
    SetHold {
        /// New hold window
        hold: Option<Hold>,
    },
    /// Correct the received date
    SetReceivedAtAppealsBody {
        /// New date
        date: NaiveDate,
    },
    /// Set or clear the deadline
    SetDeadline {
        /// New deadline
        deadline: Option<NaiveDate>,
    },
    /// Replace the submitted legal basis
    SetSubmittedLegalBasis {
        /// New codes
        legal_basis: BTreeSet<LegalBasis>,
    },
    /// Replace the decision legal basis
    SetDecisionLegalBasis {
        /// New codes
        legal_basis: BTreeSet<LegalBasis>,
    },
    /// Set or clear the outcome
    SetOutcome {
        /// New outcome
        outcome: Option<Outcome>,
    },
    /// Replace the secondary outcomes
    SetSecondaryOutcomes {
        /// New outcomes
        outcomes: BTreeSet<Outcome>,
    },
    /// Mark the caseworker's part done
    SetCompletedByCaseworker {
        /// Completion time; `None` unmarks
        at: Option<DateTime<Utc>>,
    },
    /// Mark the decision fully completed
    SetCompleted {
        /// Completion time; `None` unmarks
        at: Option<DateTime<Utc>>,
    },
    /// Attach a document
    AddDocumentReference {
        /// Document to attach
        document: DocumentReference,
    },
    /// Detach a document
    RemoveDocumentReference {
        /// Document to detach
        document: DocumentReference,
    },
    /// Record a communicated processing time
    SetNotifiedProcessingTime {
        /// Communicated value; `None` withdraws
        value: Option<NotifiedProcessingTime>,
        /// Who was told
        recipients: Vec<PartyId>,
    },
    /// Void the case
    SetErroneouslyRegistered {
        /// Why
        reason: String,
    },
    /// Replace the klager
    SetKlager {
        /// New klager
        party: PartyId,
    },
    /// Replace the party the case concerns
    SetConcernedParty {
        /// New party
        party: PartyId,
    },
    /// Select or clear the reviewer of legality
    SetReviewer {
        /// New reviewer
        reviewer: Option<Ident>,
    },
    /// Move the legality review flow
    SetReviewerFlowState {
        /// Target flow state
        flow_state: FlowState,
    },
    /// Correct the sent-to-court time
    SetSentToCourt {
        /// New time
        at: DateTime<Utc>,
    },
    /// Record the court ruling
    SetRulingReceived {
        /// Receipt time
        at: Option<DateTime<Utc>>,
    },
    /// Request a new appeal case after the ruling
    RequestNewAppealCase {
        /// Request time
        at: Option<DateTime<Utc>>,
    },
    /// Request a new case after the court reversed the decision
    RequestNewCaseAfterReversal {
        /// Request time
        at: Option<DateTime<Utc>>,
    },
    /// Open the next partial treatment
    ReopenPartialTreatment,
}

impl CaseCommand {
    /// Command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            CaseCommand::SetAssignment { .. } => "set_assignment",
            CaseCommand::SetCoSigner { .. } => "set_co_signer",
            CaseCommand::SetCoSignerFlowState { .. } => "set_co_signer_flow_state",
            CaseCommand::SetHold { .. } => "set_hold",
            CaseCommand::SetReceivedAtAppealsBody { .. } => "set_received_at_appeals_body",
            CaseCommand::SetDeadline { .. } => "set_deadline",
            CaseCommand::SetSubmittedLegalBasis { .. } => "set_submitted_legal_basis",
            CaseCommand::SetDecisionLegalBasis { .. } => "set_decision_legal_basis",
            CaseCommand::SetOutcome { .. } => "set_outcome",
            CaseCommand::SetSecondaryOutcomes { .. } => "set_secondary_outcomes",
            CaseCommand::SetCompletedByCaseworker { .. } => "set_completed_by_caseworker",
            CaseCommand::SetCompleted { .. } => "set_completed",
            CaseCommand::AddDocumentReference { .. } => "add_document_reference",
            CaseCommand::RemoveDocumentReference { .. } => "remove_document_reference",
            CaseCommand::SetNotifiedProcessingTime { .. } => "set_notified_processing_time",
            CaseCommand::SetErroneouslyRegistered { .. } => "set_erroneously_registered",
            CaseCommand::SetKlager { .. } => "set_klager",
            CaseCommand::SetConcernedParty { .. } => "set_concerned_party",
            CaseCommand::SetReviewer { .. } => "set_reviewer",
            CaseCommand::SetReviewerFlowState { .. } => "set_reviewer_flow_state",
            CaseCommand::SetSentToCourt { .. } => "set_sent_to_court",
            CaseCommand::SetRulingReceived { .. } => "set_ruling_received",
            CaseCommand::RequestNewAppealCase { .. } => "request_new_appeal_case",
            CaseCommand::RequestNewCaseAfterReversal { .. } => "request_new_case_after_reversal",
            CaseCommand::ReopenPartialTreatment => "reopen_partial_treatment",
        }
    }

    /// Run the command against `case`
    pub fn apply(
        self,
        case: &Case,
        policy: &MutationPolicy,
        ctx: &CommandContext,
    ) -> DomainResult<CaseChanged> {
        use CaseCommand as C;
        match self {
            C::SetAssignment { assignee, reason } => {
                mutations::set_assignment(case, assignee, reason, ctx)
            }
            C::SetCoSigner { co_signer } => mutations::set_co_signer(case, co_signer, ctx),
            C::SetCoSignerFlowState { flow_state } => {
                mutations::set_co_signer_flow_state(case, flow_state, ctx)
            }
            C::SetHold { hold } => mutations::set_hold(case, hold, ctx),
            C::SetReceivedAtAppealsBody { date } => {
                mutations::set_received_at_appeals_body(case, date, ctx)
            }
            C::SetDeadline { deadline } => mutations::set_deadline(case, deadline, ctx),
            C::SetSubmittedLegalBasis { legal_basis } => {
                mutations::set_submitted_legal_basis(case, legal_basis, ctx)
            }
            C::SetDecisionLegalBasis { legal_basis } => {
                mutations::set_decision_legal_basis(case, legal_basis, ctx)
            }
            C::SetOutcome { outcome } => mutations::set_outcome(case, outcome, ctx),
            C::SetSecondaryOutcomes { outcomes } => {
                mutations::set_secondary_outcomes(case, outcomes, ctx)
            }
            C::SetCompletedByCaseworker { at } => {
                mutations::set_completed_by_caseworker(case, at, ctx)
            }
            C::SetCompleted { at } => mutations::set_completed(case, at, ctx),
            C::AddDocumentReference { document } => {
                mutations::add_document_reference(case, document, ctx)
            }
            C::RemoveDocumentReference { document } => {
                mutations::remove_document_reference(case, &document, ctx)
            }
            C::SetNotifiedProcessingTime { value, recipients } => {
                mutations::set_notified_processing_time(case, value, recipients, ctx)
            }
            C::SetErroneouslyRegistered { reason } => {
                mutations::set_erroneously_registered(case, reason, ctx)
            }
            C::SetKlager { party } => mutations::set_klager(case, party, ctx),
            C::SetConcernedParty { party } => mutations::set_concerned_party(case, party, ctx),
            C::SetReviewer { reviewer } => mutations::set_reviewer(case, reviewer, ctx),
            C::SetReviewerFlowState { flow_state } => {
                mutations::set_reviewer_flow_state(case, flow_state, ctx)
            }
            C::SetSentToCourt { at } => mutations::set_sent_to_court(case, at, ctx),
            C::SetRulingReceived { at } => mutations::set_ruling_received(case, at, ctx),
            C::RequestNewAppealCase { at } => mutations::request_new_appeal_case(case, at, ctx),
            C::RequestNewCaseAfterReversal { at } => {
                mutations::request_new_case_after_reversal(case, at, ctx)
            }
            C::ReopenPartialTreatment => mutations::reopen_partial_treatment(
                case,
                usize::from(policy.max_partial_treatments),
                ctx,
            ),
        }
    }
}

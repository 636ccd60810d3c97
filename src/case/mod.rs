// Copyright 2025 Cowboy AI, LLC.

//! The case aggregate
//!
//! A [`Case`] is a shared base record plus a [`CaseKind`] carrying the
//! variant-only state. Identity and source reference are fixed at creation.
//! Everything else changes only through the commands in
//! [`crate::mutations`], which work on a snapshot and hand back the next one.

pub mod decision;
pub mod values;
pub mod variants;

pub use decision::{Decision, PartialTreatment};
pub use values::{
    Assignment, AssignmentSnapshot, CoSigner, CoSignerSnapshot, Completion, DocumentReference,
    ErrorMarker, Hold, NotifiedProcessingTime, PartiesSnapshot, ProcessingDuration,
    ProcessingTimeSnapshot, ReviewerSnapshot,
};
pub use variants::{
    AppealCase, CaseKind, CourtAppealCase, HasExternalCourtFields, HasPartialTreatments,
    OrdinaryCase, ReopeningRequest,
};

use crate::codes::{BenefitDomain, LegalBasis};
use crate::entity::{AggregateRoot, CaseMarker, EntityId};
use crate::errors::{DomainError, DomainResult};
use crate::flow::FlowState;
use crate::history::History;
use crate::identifiers::{Ident, PartyId};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Input for creating a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    /// The appellant
    pub klager: PartyId,
    /// The party the case concerns
    pub concerned_party: PartyId,
    /// Benefit domain
    pub benefit_domain: BenefitDomain,
    /// Reference in the originating system
    pub source_reference: String,
    /// Date the appeals body received the case
    pub received_at_appeals_body: NaiveDate,
    /// Initial deadline
    pub deadline: Option<NaiveDate>,
    /// Legal basis submitted with the request
    pub submitted_legal_basis: BTreeSet<LegalBasis>,
    /// Documents copied forward from a prior case
    pub document_references: IndexSet<DocumentReference>,
}

impl NewCase {
    /// Minimal input; the party the case concerns defaults to the klager
    pub fn new(
        klager: PartyId,
        benefit_domain: BenefitDomain,
        source_reference: impl Into<String>,
        received_at_appeals_body: NaiveDate,
    ) -> Self {
        Self {
            concerned_party: klager.clone(),
            klager,
            benefit_domain,
            source_reference: source_reference.into(),
            received_at_appeals_body,
            deadline: None,
            submitted_legal_basis: BTreeSet::new(),
            document_references: IndexSet::new(),
        }
    }

    /// Set the party the case concerns
    pub fn with_concerned_party(mut self, party: PartyId) -> Self {
        self.concerned_party = party;
        self
    }

    /// Set the initial deadline
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the submitted legal basis
    pub fn with_submitted_legal_basis(mut self, legal_basis: BTreeSet<LegalBasis>) -> Self {
        self.submitted_legal_basis = legal_basis;
        self
    }

    /// Set the copied-forward documents
    pub fn with_document_references(mut self, documents: IndexSet<DocumentReference>) -> Self {
        self.document_references = documents;
        self
    }
}

/// Fields shared by every kind of case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseBase {
    pub(crate) id: EntityId<CaseMarker>,
    pub(crate) klager: PartyId,
    pub(crate) concerned_party: PartyId,
    pub(crate) party_history: History<PartiesSnapshot>,
    pub(crate) benefit_domain: BenefitDomain,
    pub(crate) source_reference: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) modified_at: DateTime<Utc>,
    pub(crate) received_at_appeals_body: NaiveDate,
    pub(crate) deadline: Option<NaiveDate>,
    pub(crate) assignment: Option<Assignment>,
    pub(crate) assignment_history: History<AssignmentSnapshot>,
    pub(crate) hold: Option<Hold>,
    pub(crate) hold_history: History<Hold>,
    pub(crate) reviewer: Option<Ident>,
    pub(crate) reviewer_flow_state: FlowState,
    pub(crate) reviewer_returned_at: Option<DateTime<Utc>>,
    pub(crate) reviewer_history: History<ReviewerSnapshot>,
    pub(crate) decision: Decision,
    pub(crate) error_marker: Option<ErrorMarker>,
    pub(crate) notified_processing_time: Option<NotifiedProcessingTime>,
    pub(crate) processing_time_history: History<ProcessingTimeSnapshot>,
    pub(crate) document_references: IndexSet<DocumentReference>,
    pub(crate) submitted_legal_basis: BTreeSet<LegalBasis>,
}

impl CaseBase {
    /// Case identity
    pub fn id(&self) -> EntityId<CaseMarker> {
        self.id
    }

    /// The appellant
    pub fn klager(&self) -> &PartyId {
        &self.klager
    }

    /// The party the case concerns
    pub fn concerned_party(&self) -> &PartyId {
        &self.concerned_party
    }

    /// Prior parties
    pub fn party_history(&self) -> &History<PartiesSnapshot> {
        &self.party_history
    }

    /// Benefit domain
    pub fn benefit_domain(&self) -> &BenefitDomain {
        &self.benefit_domain
    }

    /// Reference in the originating system
    pub fn source_reference(&self) -> &str {
        &self.source_reference
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Date received at the appeals body
    pub fn received_at_appeals_body(&self) -> NaiveDate {
        self.received_at_appeals_body
    }

    /// Deadline
    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Current assignment
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Prior assignments
    pub fn assignment_history(&self) -> &History<AssignmentSnapshot> {
        &self.assignment_history
    }

    /// Current hold window
    pub fn hold(&self) -> Option<&Hold> {
        self.hold.as_ref()
    }

    /// Prior hold windows
    pub fn hold_history(&self) -> &History<Hold> {
        &self.hold_history
    }

    /// Reviewer of legality
    pub fn reviewer(&self) -> Option<&Ident> {
        self.reviewer.as_ref()
    }

    /// Reviewer flow state
    pub fn reviewer_flow_state(&self) -> FlowState {
        self.reviewer_flow_state
    }

    /// When the reviewer last returned the case
    pub fn reviewer_returned_at(&self) -> Option<DateTime<Utc>> {
        self.reviewer_returned_at
    }

    /// Prior reviewer states
    pub fn reviewer_history(&self) -> &History<ReviewerSnapshot> {
        &self.reviewer_history
    }

    /// Error/void marker
    pub fn error_marker(&self) -> Option<&ErrorMarker> {
        self.error_marker.as_ref()
    }

    /// Notified processing time
    pub fn notified_processing_time(&self) -> Option<&NotifiedProcessingTime> {
        self.notified_processing_time.as_ref()
    }

    /// Every processing time ever communicated
    pub fn processing_time_history(&self) -> &History<ProcessingTimeSnapshot> {
        &self.processing_time_history
    }

    /// Documents copied forward from a prior case
    pub fn document_references(&self) -> &IndexSet<DocumentReference> {
        &self.document_references
    }

    /// Legal basis submitted with the request
    pub fn submitted_legal_basis(&self) -> &BTreeSet<LegalBasis> {
        &self.submitted_legal_basis
    }
}

/// A case ("behandling"): shared base state plus variant state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Case {
    pub(crate) base: CaseBase,
    pub(crate) kind: CaseKind,
    version: u64,
}

impl Case {
    /// Create a case of the given kind
    pub fn create(new: NewCase, kind: CaseKind, created_at: DateTime<Utc>) -> DomainResult<Self> {
        if new.source_reference.trim().is_empty() {
            return Err(DomainError::invalid("source reference must not be blank"));
        }
        Ok(Self {
            base: CaseBase {
                id: EntityId::new(),
                klager: new.klager,
                concerned_party: new.concerned_party,
                party_history: History::new(),
                benefit_domain: new.benefit_domain,
                source_reference: new.source_reference,
                created_at,
                modified_at: created_at,
                received_at_appeals_body: new.received_at_appeals_body,
                deadline: new.deadline,
                assignment: None,
                assignment_history: History::new(),
                hold: None,
                hold_history: History::new(),
                reviewer: None,
                reviewer_flow_state: FlowState::NotSent,
                reviewer_returned_at: None,
                reviewer_history: History::new(),
                decision: Decision::default(),
                error_marker: None,
                notified_processing_time: None,
                processing_time_history: History::new(),
                document_references: new.document_references,
                submitted_legal_basis: new.submitted_legal_basis,
            },
            kind,
            version: 0,
        })
    }

    /// Create an ordinary case
    pub fn ordinary(
        new: NewCase,
        details: OrdinaryCase,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::create(new, CaseKind::Ordinary(details), created_at)
    }

    /// Create an appeal case with its first partial treatment
    pub fn appeal(
        new: NewCase,
        ordinary_case_id: Option<EntityId<CaseMarker>>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let details = AppealCase::new(ordinary_case_id, None, None, created_at);
        Self::create(new, CaseKind::Appeal(details), created_at)
    }

    /// Create a case pending at the external court
    pub fn appeal_in_court(
        new: NewCase,
        sent_to_court_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::create(
            new,
            CaseKind::AppealInCourt(CourtAppealCase::new(sent_to_court_at)),
            created_at,
        )
    }

    /// Create a reopening request for `source_case_id`
    pub fn reopening_request(
        new: NewCase,
        source_case_id: EntityId<CaseMarker>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::create(
            new,
            CaseKind::ReopeningRequest(ReopeningRequest { source_case_id }),
            created_at,
        )
    }

    /// Case identity
    pub fn id(&self) -> EntityId<CaseMarker> {
        self.base.id
    }

    /// Shared base state
    pub fn base(&self) -> &CaseBase {
        &self.base
    }

    /// Variant state
    pub fn kind(&self) -> &CaseKind {
        &self.kind
    }

    /// Whether the error/void marker is set
    pub fn is_erroneously_registered(&self) -> bool {
        self.base.error_marker.is_some()
    }

    /// Partial treatments, for appeal cases
    pub fn partial_treatments(&self) -> Option<&dyn HasPartialTreatments> {
        match &self.kind {
            CaseKind::Appeal(appeal) => Some(appeal),
            _ => None,
        }
    }

    /// External-court timestamps, for cases pending at the court
    pub fn external_court(&self) -> Option<&dyn HasExternalCourtFields> {
        match &self.kind {
            CaseKind::AppealInCourt(court) => Some(court),
            _ => None,
        }
    }

    /// The decision currently being worked on
    ///
    /// For appeal cases this is the current partial treatment's decision.
    pub fn decision(&self) -> &Decision {
        match &self.kind {
            CaseKind::Appeal(appeal) => appeal
                .partial_treatments
                .last()
                .map(|treatment| &treatment.decision)
                .unwrap_or(&self.base.decision),
            _ => &self.base.decision,
        }
    }

    pub(crate) fn decision_mut(&mut self) -> DomainResult<&mut Decision> {
        match &mut self.kind {
            CaseKind::Appeal(appeal) => appeal
                .partial_treatments
                .last_mut()
                .map(|treatment| &mut treatment.decision)
                .ok_or_else(|| DomainError::BusinessRuleViolation {
                    rule: "appeal case has no partial treatment to decide".to_string(),
                }),
            _ => Ok(&mut self.base.decision),
        }
    }
}

impl AggregateRoot for Case {
    type Id = EntityId<CaseMarker>;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn increment_version(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_case() -> NewCase {
        NewCase::new(
            PartyId::person("12345678910").unwrap(),
            BenefitDomain::new("SYK").unwrap(),
            "SRC-1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_create_sets_timestamps_and_defaults() {
        let now = Utc::now();
        let case = Case::ordinary(new_case(), OrdinaryCase::default(), now).unwrap();
        assert_eq!(case.base().created_at(), now);
        assert_eq!(case.base().modified_at(), now);
        assert_eq!(case.base().klager(), case.base().concerned_party());
        assert!(case.base().assignment().is_none());
        assert_eq!(case.version(), 0);
        assert_eq!(case.kind().name(), "ordinary");
    }

    #[test]
    fn test_blank_source_reference_is_rejected() {
        let mut input = new_case();
        input.source_reference = "  ".to_string();
        let err = Case::ordinary(input, OrdinaryCase::default(), Utc::now()).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_appeal_routes_decision_to_current_treatment() {
        let now = Utc::now();
        let mut case = Case::appeal(new_case(), None, now).unwrap();
        assert_eq!(case.partial_treatments().unwrap().partial_treatments().len(), 1);
        case.decision_mut().unwrap().outcome = Some(crate::codes::Outcome::Withdrawn);
        assert_eq!(case.decision().outcome(), Some(crate::codes::Outcome::Withdrawn));
        assert_eq!(case.base().decision.outcome(), None);
    }

    #[test]
    fn test_appeal_without_treatments_cannot_be_decided() {
        let details = AppealCase::with_partial_treatments(None, Vec::new());
        let mut case = Case::create(new_case(), CaseKind::Appeal(details), Utc::now()).unwrap();
        assert!(case.decision_mut().is_err());
    }

    #[test]
    fn test_capabilities_match_kind() {
        let now = Utc::now();
        let court = Case::appeal_in_court(new_case(), now, now).unwrap();
        assert!(court.external_court().is_some());
        assert!(court.partial_treatments().is_none());
        assert_eq!(court.external_court().unwrap().sent_to_court_at(), now);
    }

    #[test]
    fn test_case_serializes_with_kind_tag() {
        let case = Case::reopening_request(new_case(), EntityId::new(), Utc::now()).unwrap();
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["kind"]["type"], "ReopeningRequest");
        let back: Case = serde_json::from_value(json).unwrap();
        assert_eq!(back, case);
    }
}

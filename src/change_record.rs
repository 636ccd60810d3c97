// Copyright 2025 Cowboy AI, LLC.

//! Change records: one audit entry per field transition
//!
//! [`ChangeRecord::capture`] is the single factory. It suppresses entries
//! where the old and new text are both absent or textually equal, which
//! keeps the audit trail free of no-op transitions and makes repeated
//! application of the same value produce nothing.

use crate::codes::ReferenceCode;
use crate::entity::{CaseMarker, ChangeRecordMarker, EntityId};
use crate::identifiers::{Ident, PartyId, UnitId};
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed enumeration of audited fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Field {
    /// Assignee identity
    AssigneeIdent,
    /// Assignee unit
    AssigneeUnit,
    /// Assignment timestamp
    AssignedAt,
    /// Co-signer identity
    CoSignerIdent,
    /// Co-signer flow state
    CoSignerFlowState,
    /// Hold window
    Hold,
    /// Received at appeals body date
    ReceivedAtAppealsBody,
    /// Deadline date
    Deadline,
    /// Legal basis submitted with the request
    SubmittedLegalBasis,
    /// Legal basis used in the decision
    DecisionLegalBasis,
    /// Primary outcome
    Outcome,
    /// Secondary outcomes
    SecondaryOutcomes,
    /// Completed by caseworker timestamp
    CompletedByCaseworkerAt,
    /// Fully completed timestamp
    CompletedAt,
    /// Document reference added or removed
    DocumentReference,
    /// Notified processing time
    NotifiedProcessingTime,
    /// Error/void marker
    ErroneouslyRegistered,
    /// Reviewer of legality identity
    ReviewerIdent,
    /// Reviewer of legality flow state
    ReviewerFlowState,
    /// Klager
    Klager,
    /// Party the case concerns
    ConcernedParty,
    /// Sent to external court timestamp
    SentToCourt,
    /// Ruling received from external court timestamp
    RulingReceived,
    /// Start new appeal case timestamp
    NewAppealCaseRequested,
    /// Start new case after court reversal timestamp
    NewCaseAfterReversalRequested,
    /// A partial treatment was opened
    PartialTreatment,
}

impl Field {
    /// Stable export code for the statistics collaborator
    pub fn code(&self) -> &'static str {
        match self {
            Field::AssigneeIdent => "ASSIGNEE_IDENT",
            Field::AssigneeUnit => "ASSIGNEE_UNIT",
            Field::AssignedAt => "ASSIGNED_AT",
            Field::CoSignerIdent => "CO_SIGNER_IDENT",
            Field::CoSignerFlowState => "CO_SIGNER_FLOW_STATE",
            Field::Hold => "HOLD",
            Field::ReceivedAtAppealsBody => "RECEIVED_AT_APPEALS_BODY",
            Field::Deadline => "DEADLINE",
            Field::SubmittedLegalBasis => "SUBMITTED_LEGAL_BASIS",
            Field::DecisionLegalBasis => "DECISION_LEGAL_BASIS",
            Field::Outcome => "OUTCOME",
            Field::SecondaryOutcomes => "SECONDARY_OUTCOMES",
            Field::CompletedByCaseworkerAt => "COMPLETED_BY_CASEWORKER_AT",
            Field::CompletedAt => "COMPLETED_AT",
            Field::DocumentReference => "DOCUMENT_REFERENCE",
            Field::NotifiedProcessingTime => "NOTIFIED_PROCESSING_TIME",
            Field::ErroneouslyRegistered => "ERRONEOUSLY_REGISTERED",
            Field::ReviewerIdent => "REVIEWER_IDENT",
            Field::ReviewerFlowState => "REVIEWER_FLOW_STATE",
            Field::Klager => "KLAGER",
            Field::ConcernedParty => "CONCERNED_PARTY",
            Field::SentToCourt => "SENT_TO_COURT",
            Field::RulingReceived => "RULING_RECEIVED",
            Field::NewAppealCaseRequested => "NEW_APPEAL_CASE_REQUESTED",
            Field::NewCaseAfterReversalRequested => "NEW_CASE_AFTER_REVERSAL_REQUESTED",
            Field::PartialTreatment => "PARTIAL_TREATMENT",
        }
    }
}

/// A single audited field transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangeRecord {
    /// Record identity
    pub id: EntityId<ChangeRecordMarker>,
    /// Who made the change; `None` for system-initiated changes
    pub actor: Option<Ident>,
    /// Which field changed
    pub field: Field,
    /// Text of the outgoing value
    pub from_value: Option<String>,
    /// Text of the incoming value
    pub to_value: Option<String>,
    /// Case the change belongs to
    pub case_id: EntityId<CaseMarker>,
    /// When the change was recorded
    pub recorded_at: DateTime<Utc>,
}

impl ChangeRecord {
    /// Build a change record, or `None` when nothing actually changed
    ///
    /// # Examples
    ///
    /// ```rust
    /// use appeal_case_core::{ChangeRecord, EntityId, Field};
    ///
    /// let case_id = EntityId::new();
    /// let now = chrono::Utc::now();
    /// assert!(ChangeRecord::capture(None, Field::Deadline, None, None, case_id, now).is_none());
    /// assert!(ChangeRecord::capture(
    ///     None,
    ///     Field::Deadline,
    ///     Some("2024-01-01".into()),
    ///     Some("2024-01-01".into()),
    ///     case_id,
    ///     now,
    /// )
    /// .is_none());
    /// assert!(ChangeRecord::capture(None, Field::Deadline, None, Some("2024-01-01".into()), case_id, now).is_some());
    /// ```
    pub fn capture(
        actor: Option<&Ident>,
        field: Field,
        from_value: Option<String>,
        to_value: Option<String>,
        case_id: EntityId<CaseMarker>,
        recorded_at: DateTime<Utc>,
    ) -> Option<ChangeRecord> {
        if from_value == to_value {
            return None;
        }
        Some(ChangeRecord {
            id: EntityId::new(),
            actor: actor.cloned(),
            field,
            from_value,
            to_value,
            case_id,
            recorded_at,
        })
    }
}

/// Text rendering of a value for the audit trail
pub trait ChangeValue {
    /// Render as audit text
    fn change_value(&self) -> String;
}

impl ChangeValue for Ident {
    fn change_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl ChangeValue for UnitId {
    fn change_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl ChangeValue for PartyId {
    fn change_value(&self) -> String {
        self.to_string()
    }
}

impl ChangeValue for NaiveDate {
    fn change_value(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl ChangeValue for DateTime<Utc> {
    fn change_value(&self) -> String {
        self.to_rfc3339()
    }
}

impl<T: ReferenceCode> ChangeValue for T {
    fn change_value(&self) -> String {
        self.code().to_string()
    }
}

/// Render an optional value
pub fn text<T: ChangeValue>(value: Option<&T>) -> Option<String> {
    value.map(ChangeValue::change_value)
}

/// Render a collection as a sorted, comma-joined list; empty becomes absent
pub fn joined<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items: Vec<String> = values.into_iter().map(|s| s.as_ref().to_string()).collect();
    if items.is_empty() {
        return None;
    }
    items.sort();
    Some(items.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_id() -> EntityId<CaseMarker> {
        EntityId::new()
    }

    #[test]
    fn test_both_absent_produces_nothing() {
        assert!(ChangeRecord::capture(None, Field::Hold, None, None, case_id(), Utc::now()).is_none());
    }

    #[test]
    fn test_equal_text_produces_nothing() {
        let actor = Ident::new("Z1").unwrap();
        let record = ChangeRecord::capture(
            Some(&actor),
            Field::AssigneeIdent,
            Some("B1".into()),
            Some("B1".into()),
            case_id(),
            Utc::now(),
        );
        assert!(record.is_none());
    }

    #[test]
    fn test_real_transition_is_recorded() {
        let actor = Ident::new("Z1").unwrap();
        let id = case_id();
        let record = ChangeRecord::capture(
            Some(&actor),
            Field::AssigneeIdent,
            Some("B1".into()),
            None,
            id,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(record.actor, Some(actor));
        assert_eq!(record.field, Field::AssigneeIdent);
        assert_eq!(record.from_value.as_deref(), Some("B1"));
        assert_eq!(record.to_value, None);
        assert_eq!(record.case_id, id);
    }

    #[test]
    fn test_joined_is_order_independent() {
        assert_eq!(joined(["b", "a"]), joined(["a", "b"]));
        assert_eq!(joined(Vec::<String>::new()), None);
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Value objects held by a case
//!
//! Value objects are immutable, compared by value, and updated by
//! replacement. Constructors reject structurally invalid input.

use crate::change_record::ChangeValue;
use crate::codes::{ReferenceCode, TimeUnit, UnassignmentReason};
use crate::errors::{DomainError, DomainResult};
use crate::flow::FlowState;
use crate::identifiers::{Ident, PartyId, UnitId};
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current assignment ("tildeling")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Assignment {
    /// Assigned caseworker
    pub assignee: Ident,
    /// Unit the caseworker works on behalf of
    pub unit: UnitId,
    /// When the assignment was made
    pub assigned_at: DateTime<Utc>,
}

/// Current co-signer ("medunderskriver")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoSigner {
    /// Co-signer identity
    pub ident: Ident,
    /// When the co-signer was selected
    pub assigned_at: DateTime<Utc>,
}

/// Temporary hold window ("satt på vent")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "HoldFields")]
pub struct Hold {
    from: NaiveDate,
    to: NaiveDate,
    reason: String,
}

impl Hold {
    /// Create a hold window; `from` must not be after `to`
    pub fn new(from: NaiveDate, to: NaiveDate, reason: impl Into<String>) -> DomainResult<Self> {
        if from > to {
            return Err(DomainError::invalid(format!(
                "hold window starts {from} after it ends {to}"
            )));
        }
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DomainError::invalid("hold reason must not be blank"));
        }
        Ok(Self { from, to, reason })
    }

    /// First day on hold
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day on hold
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Why the case is on hold
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Deserialize)]
struct HoldFields {
    from: NaiveDate,
    to: NaiveDate,
    reason: String,
}

impl TryFrom<HoldFields> for Hold {
    type Error = DomainError;

    fn try_from(fields: HoldFields) -> DomainResult<Self> {
        Self::new(fields.from, fields.to, fields.reason)
    }
}

impl ChangeValue for Hold {
    fn change_value(&self) -> String {
        format!(
            "{}..{} {}",
            self.from.change_value(),
            self.to.change_value(),
            self.reason
        )
    }
}

/// Completion marker ("ferdigstilling")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Completion {
    /// When the caseworker finished their part
    pub completed_by_caseworker_at: Option<DateTime<Utc>>,
    /// When the case was fully completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Who completed it
    pub completed_by: Option<Ident>,
}

/// Marks a case as erroneously registered ("feilregistrering")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorMarker {
    /// Who marked the case
    pub marked_by: Ident,
    /// When it was marked
    pub marked_at: DateTime<Utc>,
    /// Why it was marked
    pub reason: String,
}

/// Length of an estimated processing time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "DurationFields")]
pub struct ProcessingDuration {
    value: u32,
    unit: TimeUnit,
}

impl ProcessingDuration {
    /// Create a duration; zero is rejected
    pub fn new(value: u32, unit: TimeUnit) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::invalid("processing duration must be positive"));
        }
        Ok(Self { value, unit })
    }

    /// Number of units
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Unit of time
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }
}

#[derive(Deserialize)]
struct DurationFields {
    value: u32,
    unit: TimeUnit,
}

impl TryFrom<DurationFields> for ProcessingDuration {
    type Error = DomainError;

    fn try_from(fields: DurationFields) -> DomainResult<Self> {
        Self::new(fields.value, fields.unit)
    }
}

/// Processing-time estimate communicated to the parties ("varslet behandlingstid")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "ProcessingTimeFields")]
pub struct NotifiedProcessingTime {
    deadline: Option<NaiveDate>,
    duration: Option<ProcessingDuration>,
}

impl NotifiedProcessingTime {
    /// Create an estimate; at least one of deadline and duration is required
    pub fn new(
        deadline: Option<NaiveDate>,
        duration: Option<ProcessingDuration>,
    ) -> DomainResult<Self> {
        if deadline.is_none() && duration.is_none() {
            return Err(DomainError::invalid(
                "notified processing time needs a deadline or a duration",
            ));
        }
        Ok(Self { deadline, duration })
    }

    /// Communicated deadline
    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Communicated duration
    pub fn duration(&self) -> Option<ProcessingDuration> {
        self.duration
    }
}

#[derive(Deserialize)]
struct ProcessingTimeFields {
    deadline: Option<NaiveDate>,
    duration: Option<ProcessingDuration>,
}

impl TryFrom<ProcessingTimeFields> for NotifiedProcessingTime {
    type Error = DomainError;

    fn try_from(fields: ProcessingTimeFields) -> DomainResult<Self> {
        Self::new(fields.deadline, fields.duration)
    }
}

impl ChangeValue for NotifiedProcessingTime {
    fn change_value(&self) -> String {
        let deadline = self
            .deadline
            .map(|d| d.change_value())
            .unwrap_or_default();
        let duration = self
            .duration
            .map(|d| format!("{} {}", d.value, d.unit.code()))
            .unwrap_or_default();
        format!("{deadline}|{duration}")
    }
}

/// A document copied forward from a prior case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "DocumentFields")]
pub struct DocumentReference {
    /// Source document (journal post) in the archive
    pub source_document: String,
    /// Selected document within that source
    pub selected_document: String,
}

impl DocumentReference {
    /// Create a reference; both parts are required
    pub fn new(
        source_document: impl Into<String>,
        selected_document: impl Into<String>,
    ) -> DomainResult<Self> {
        let source_document = source_document.into();
        let selected_document = selected_document.into();
        if source_document.trim().is_empty() || selected_document.trim().is_empty() {
            return Err(DomainError::invalid(
                "document reference needs both source and selected document",
            ));
        }
        Ok(Self {
            source_document,
            selected_document,
        })
    }
}

#[derive(Deserialize)]
struct DocumentFields {
    source_document: String,
    selected_document: String,
}

impl TryFrom<DocumentFields> for DocumentReference {
    type Error = DomainError;

    fn try_from(fields: DocumentFields) -> DomainResult<Self> {
        Self::new(fields.source_document, fields.selected_document)
    }
}

impl ChangeValue for DocumentReference {
    fn change_value(&self) -> String {
        format!("{}/{}", self.source_document, self.selected_document)
    }
}

/// Outgoing assignment pushed to history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssignmentSnapshot {
    /// The assignment being replaced
    pub assignment: Assignment,
    /// Why it was withdrawn
    pub reason: Option<UnassignmentReason>,
}

/// Outgoing co-signer state pushed to history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoSignerSnapshot {
    /// The co-signer being replaced, if any
    pub co_signer: Option<CoSigner>,
    /// Outgoing flow state
    pub flow_state: FlowState,
}

/// Outgoing parties pushed to history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartiesSnapshot {
    /// Klager at the time
    pub klager: PartyId,
    /// Party the case concerned at the time
    pub concerned_party: PartyId,
}

/// A communicated processing time and who was told
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProcessingTimeSnapshot {
    /// The value communicated; `None` when an earlier estimate was withdrawn
    pub value: Option<NotifiedProcessingTime>,
    /// Parties that were notified
    pub recipients: Vec<PartyId>,
}

/// Outgoing reviewer-of-legality state pushed to history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewerSnapshot {
    /// Reviewer being replaced, if any
    pub reviewer: Option<Ident>,
    /// Outgoing flow state
    pub flow_state: FlowState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_hold_rejects_inverted_window() {
        assert!(Hold::new(date(2024, 2, 1), date(2024, 1, 1), "waiting").is_err());
        assert!(Hold::new(date(2024, 1, 1), date(2024, 1, 1), "waiting").is_ok());
        assert!(Hold::new(date(2024, 1, 1), date(2024, 2, 1), " ").is_err());
    }

    #[test]
    fn test_processing_time_needs_some_value() {
        assert!(NotifiedProcessingTime::new(None, None).is_err());
        let weeks = ProcessingDuration::new(12, TimeUnit::Weeks).unwrap();
        let value = NotifiedProcessingTime::new(None, Some(weeks)).unwrap();
        assert_eq!(value.change_value(), "|12 1");
        assert!(ProcessingDuration::new(0, TimeUnit::Months).is_err());
    }

    #[test]
    fn test_document_reference_text() {
        let doc = DocumentReference::new("JP1", "D1").unwrap();
        assert_eq!(doc.change_value(), "JP1/D1");
        assert!(DocumentReference::new("", "D1").is_err());
    }

    #[test]
    fn test_deserialization_runs_the_same_checks() {
        let inverted = r#"{"from":"2024-05-01","to":"2024-01-01","reason":"records"}"#;
        assert!(serde_json::from_str::<Hold>(inverted).is_err());
        let blank = r#"{"from":"2024-01-01","to":"2024-05-01","reason":"  "}"#;
        assert!(serde_json::from_str::<Hold>(blank).is_err());

        assert!(serde_json::from_str::<ProcessingDuration>(r#"{"value":0,"unit":"1"}"#).is_err());
        assert!(serde_json::from_str::<NotifiedProcessingTime>(r#"{}"#).is_err());
        let doc = r#"{"source_document":"JP1","selected_document":""}"#;
        assert!(serde_json::from_str::<DocumentReference>(doc).is_err());
    }

    #[test]
    fn test_valid_values_survive_json() {
        let hold = Hold::new(date(2024, 1, 1), date(2024, 5, 1), "records").unwrap();
        let back: Hold = serde_json::from_value(serde_json::to_value(&hold).unwrap()).unwrap();
        assert_eq!(back, hold);

        let weeks = ProcessingDuration::new(12, TimeUnit::Weeks).unwrap();
        let time = NotifiedProcessingTime::new(Some(date(2024, 9, 1)), Some(weeks)).unwrap();
        let back: NotifiedProcessingTime =
            serde_json::from_value(serde_json::to_value(&time).unwrap()).unwrap();
        assert_eq!(back, time);
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Case variants and the capabilities they expose
//!
//! Variant-only state is reached through capability traits rather than by
//! matching on the variant, so shared rules only depend on what a case can
//! do: [`HasPartialTreatments`] for appeal cases and
//! [`HasExternalCourtFields`] for cases pending at the external court.

use crate::case::decision::PartialTreatment;
use crate::entity::{CaseMarker, EntityId};
use crate::identifiers::UnitId;
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Access to the ordered partial treatments of a case
pub trait HasPartialTreatments {
    /// All partial treatments, oldest first
    fn partial_treatments(&self) -> &[PartialTreatment];

    /// The most recent partial treatment
    fn current_partial_treatment(&self) -> Option<&PartialTreatment> {
        self.partial_treatments().last()
    }

    /// The first partial treatment
    fn first_partial_treatment(&self) -> Option<&PartialTreatment> {
        self.partial_treatments().first()
    }
}

/// Access to the timestamps of a case pending at the external court
pub trait HasExternalCourtFields {
    /// When the case was sent to the court
    fn sent_to_court_at(&self) -> DateTime<Utc>;

    /// When the court's ruling was received
    fn ruling_received_at(&self) -> Option<DateTime<Utc>>;

    /// Explicit request to start a new appeal case
    fn new_appeal_case_requested_at(&self) -> Option<DateTime<Utc>>;

    /// Explicit request to start a new case after the court reversed the decision
    fn new_case_after_reversal_requested_at(&self) -> Option<DateTime<Utc>>;
}

/// Ordinary first-round case ("klagebehandling")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrdinaryCase {
    /// Date the first instance received the complaint
    pub received_at_first_instance: Option<NaiveDate>,
    /// First-instance unit (display only)
    pub first_instance_unit: Option<UnitId>,
    /// First-instance caseworker (display only)
    pub first_instance_caseworker: Option<String>,
    /// Comment passed on from the first instance
    pub first_instance_comment: Option<String>,
}

/// Appeal case ("ankebehandling")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AppealCase {
    /// Ordinary case this appeal follows, when one exists
    pub ordinary_case_id: Option<EntityId<CaseMarker>>,
    /// First-instance decision date (display only)
    pub first_instance_decision_date: Option<NaiveDate>,
    /// First-instance unit (display only)
    pub first_instance_unit: Option<UnitId>,
    pub(crate) partial_treatments: Vec<PartialTreatment>,
}

impl AppealCase {
    /// Create appeal details with its first partial treatment opened at `opened_at`
    pub fn new(
        ordinary_case_id: Option<EntityId<CaseMarker>>,
        first_instance_decision_date: Option<NaiveDate>,
        first_instance_unit: Option<UnitId>,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ordinary_case_id,
            first_instance_decision_date,
            first_instance_unit,
            partial_treatments: vec![PartialTreatment::open(opened_at)],
        }
    }

    /// Create appeal details with an explicit treatment list
    pub fn with_partial_treatments(
        ordinary_case_id: Option<EntityId<CaseMarker>>,
        partial_treatments: Vec<PartialTreatment>,
    ) -> Self {
        Self {
            ordinary_case_id,
            first_instance_decision_date: None,
            first_instance_unit: None,
            partial_treatments,
        }
    }
}

impl HasPartialTreatments for AppealCase {
    fn partial_treatments(&self) -> &[PartialTreatment] {
        &self.partial_treatments
    }
}

/// Appeal pending at the external court ("anke i Trygderetten")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourtAppealCase {
    pub(crate) sent_to_court_at: DateTime<Utc>,
    pub(crate) ruling_received_at: Option<DateTime<Utc>>,
    pub(crate) new_appeal_case_requested_at: Option<DateTime<Utc>>,
    pub(crate) new_case_after_reversal_requested_at: Option<DateTime<Utc>>,
}

impl CourtAppealCase {
    /// Create court details for a case sent at `sent_to_court_at`
    pub fn new(sent_to_court_at: DateTime<Utc>) -> Self {
        Self {
            sent_to_court_at,
            ruling_received_at: None,
            new_appeal_case_requested_at: None,
            new_case_after_reversal_requested_at: None,
        }
    }
}

impl HasExternalCourtFields for CourtAppealCase {
    fn sent_to_court_at(&self) -> DateTime<Utc> {
        self.sent_to_court_at
    }

    fn ruling_received_at(&self) -> Option<DateTime<Utc>> {
        self.ruling_received_at
    }

    fn new_appeal_case_requested_at(&self) -> Option<DateTime<Utc>> {
        self.new_appeal_case_requested_at
    }

    fn new_case_after_reversal_requested_at(&self) -> Option<DateTime<Utc>> {
        self.new_case_after_reversal_requested_at
    }
}

/// Request to reopen an earlier case ("omgjøringskrav")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReopeningRequest {
    /// Case the request was opened from
    pub source_case_id: EntityId<CaseMarker>,
}

/// Kind-specific state of a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "details")]
pub enum CaseKind {
    /// Ordinary case
    Ordinary(OrdinaryCase),
    /// Appeal case
    Appeal(AppealCase),
    /// Appeal pending at the external court
    AppealInCourt(CourtAppealCase),
    /// Reopening request
    ReopeningRequest(ReopeningRequest),
}

impl CaseKind {
    /// Discriminator name used in persistence and logs
    pub fn name(&self) -> &'static str {
        match self {
            CaseKind::Ordinary(_) => "ordinary",
            CaseKind::Appeal(_) => "appeal",
            CaseKind::AppealInCourt(_) => "appeal-in-court",
            CaseKind::ReopeningRequest(_) => "reopening-request",
        }
    }
}

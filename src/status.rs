// Copyright 2025 Cowboy AI, LLC.

//! Case status derivation
//!
//! Status is never stored. It is evaluated as an ordered list of
//! predicates over the snapshot, terminal states first, first match wins.
//! Appeal cases read the co-signer state of their current partial treatment
//! and the derived completion and hold values from [`crate::derived`].
//!
//! An appeal whose completed first treatment has no outcome, or an outcome
//! in neither progression set, has no status; derivation fails the same way
//! [`crate::progression::next_step`] does.

use crate::case::{Case, Decision};
use crate::derived::{effective_completed_at, effective_completed_by_caseworker_at, hold_start};
use crate::errors::DomainResult;
use crate::flow::FlowState;
use crate::progression::completed_first_treatment;
use crate::state_machine::State;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Displayable case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Voided by the error marker
    ErroneouslyRegistered,
    /// Fully completed
    Completed,
    /// Caseworker's part is done
    CompletedByCaseworker,
    /// Temporarily on hold
    OnHold,
    /// With the co-signer
    #[serde(rename = "SENT_TO_COSIGNER")]
    SentToCoSigner,
    /// Returned from the co-signer
    ReturnedToCaseworker,
    /// Co-signer selected, not yet sent
    #[serde(rename = "COSIGNER_SELECTED")]
    CoSignerSelected,
    /// Assigned to a caseworker
    Assigned,
    /// Not assigned
    Unassigned,
    /// Waiting period over, second partial treatment under way
    SecondTreatment,
}

impl State for CaseStatus {
    fn name(&self) -> &'static str {
        match self {
            CaseStatus::ErroneouslyRegistered => "ERRONEOUSLY_REGISTERED",
            CaseStatus::Completed => "COMPLETED",
            CaseStatus::CompletedByCaseworker => "COMPLETED_BY_CASEWORKER",
            CaseStatus::OnHold => "ON_HOLD",
            CaseStatus::SentToCoSigner => "SENT_TO_COSIGNER",
            CaseStatus::ReturnedToCaseworker => "RETURNED_TO_CASEWORKER",
            CaseStatus::CoSignerSelected => "COSIGNER_SELECTED",
            CaseStatus::Assigned => "ASSIGNED",
            CaseStatus::Unassigned => "UNASSIGNED",
            CaseStatus::SecondTreatment => "SECOND_TREATMENT",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatus::ErroneouslyRegistered | CaseStatus::Completed
        )
    }
}

fn co_signer_status(decision: &Decision) -> Option<CaseStatus> {
    match decision.co_signer_flow_state() {
        FlowState::Sent => Some(CaseStatus::SentToCoSigner),
        FlowState::Returned => Some(CaseStatus::ReturnedToCaseworker),
        _ if decision.co_signer().is_some() => Some(CaseStatus::CoSignerSelected),
        _ => None,
    }
}

/// Derive the status of `case`
pub fn derive_status(case: &Case) -> DomainResult<CaseStatus> {
    if case.is_erroneously_registered() {
        return Ok(CaseStatus::ErroneouslyRegistered);
    }
    completed_first_treatment(case)?;

    if effective_completed_at(case).is_some() {
        return Ok(CaseStatus::Completed);
    }
    if effective_completed_by_caseworker_at(case).is_some() {
        return Ok(CaseStatus::CompletedByCaseworker);
    }
    if case.base().hold().is_some() {
        return Ok(CaseStatus::OnHold);
    }

    let treatment_count = case
        .partial_treatments()
        .map(|t| t.partial_treatments().len())
        .unwrap_or(0);
    let waiting = hold_start(case).is_some();
    if waiting && treatment_count == 1 {
        return Ok(CaseStatus::OnHold);
    }
    if let Some(status) = co_signer_status(case.decision()) {
        return Ok(status);
    }
    if waiting && treatment_count > 1 {
        return Ok(CaseStatus::SecondTreatment);
    }
    Ok(if case.base().assignment().is_some() {
        CaseStatus::Assigned
    } else {
        CaseStatus::Unassigned
    })
}

impl Case {
    /// Current status, derived from the snapshot
    pub fn status(&self) -> DomainResult<CaseStatus> {
        derive_status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Hold;
    use crate::codes::Outcome;
    use crate::errors::DomainError;
    use crate::identifiers::UnitId;
    use crate::mutations::fixtures::*;
    use crate::mutations::*;
    use test_case::test_case;

    #[test]
    fn test_base_status_ladder() {
        let case = ordinary();
        assert_eq!(case.status().unwrap(), CaseStatus::Unassigned);

        let unit = UnitId::new("4291").unwrap();
        let case = set_assignment(&case, Some((ident("B1"), unit)), None, &ctx_at(1))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::Assigned);

        let case = set_co_signer(&case, Some(ident("M1")), &ctx_at(2))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::CoSignerSelected);

        let case = set_co_signer_flow_state(&case, FlowState::Sent, &ctx_at(3))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::SentToCoSigner);

        let case = set_co_signer_flow_state(&case, FlowState::Returned, &ctx_at(4))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::ReturnedToCaseworker);

        let hold = Hold::new(date(2024, 3, 1), date(2024, 3, 20), "records").unwrap();
        let case = set_hold(&case, Some(hold), &ctx_at(5)).unwrap().into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::OnHold);

        let case = set_completed_by_caseworker(&case, Some(ctx_at(6).now()), &ctx_at(6))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::CompletedByCaseworker);

        let case = set_completed(&case, Some(ctx_at(7).now()), &ctx_at(7))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::Completed);
        assert!(case.status().unwrap().is_terminal());

        let case = set_erroneously_registered(&case, "duplicate", &ctx_at(8))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::ErroneouslyRegistered);
    }

    #[test]
    fn test_appeal_waits_then_moves_to_second_treatment() {
        let case = set_outcome(&appeal(), Some(Outcome::Affirmed), &ctx_at(1))
            .unwrap()
            .into_case();
        let case = set_completed(&case, Some(ctx_at(2).now()), &ctx_at(2))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::OnHold);

        let case = reopen_partial_treatment(&case, 2, &ctx_at(3))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::SecondTreatment);

        let case = set_co_signer(&case, Some(ident("M1")), &ctx_at(4))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::CoSignerSelected);
    }

    #[test]
    fn test_appeal_single_finishing_treatment_completes() {
        let case = set_outcome(&appeal(), Some(Outcome::Withdrawn), &ctx_at(1))
            .unwrap()
            .into_case();
        let case = set_completed(&case, Some(ctx_at(2).now()), &ctx_at(2))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::Completed);
    }

    #[test_case(Outcome::Withdrawn => CaseStatus::Completed ; "withdrawn finishes")]
    #[test_case(Outcome::UpheldInFavor => CaseStatus::Completed ; "upheld in favor finishes")]
    #[test_case(Outcome::Affirmed => CaseStatus::OnHold ; "affirmed waits")]
    #[test_case(Outcome::PartiallyGranted => CaseStatus::OnHold ; "partially granted waits")]
    fn test_completed_first_treatment(outcome: Outcome) -> CaseStatus {
        let case = set_outcome(&appeal(), Some(outcome), &ctx_at(1))
            .unwrap()
            .into_case();
        set_completed(&case, Some(ctx_at(2).now()), &ctx_at(2))
            .unwrap()
            .into_case()
            .status()
            .unwrap()
    }

    #[test]
    fn test_unclassified_completed_treatment_has_no_status() {
        let unit = UnitId::new("4291").unwrap();
        let case = set_assignment(&appeal(), Some((ident("B1"), unit)), None, &ctx_at(1))
            .unwrap()
            .into_case();
        let case = set_outcome(&case, Some(Outcome::Dismissed), &ctx_at(2))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::Assigned);

        let case = set_completed(&case, Some(ctx_at(3).now()), &ctx_at(3))
            .unwrap()
            .into_case();
        assert_eq!(
            case.status(),
            Err(DomainError::UnclassifiedOutcome("11".to_string()))
        );
        assert_eq!(
            crate::progression::next_step(&case).unwrap_err(),
            DomainError::UnclassifiedOutcome("11".to_string())
        );

        let marked = set_erroneously_registered(&case, "duplicate", &ctx_at(4))
            .unwrap()
            .into_case();
        assert_eq!(marked.status().unwrap(), CaseStatus::ErroneouslyRegistered);
    }

    #[test]
    fn test_completed_treatment_without_outcome_has_no_status() {
        let case = set_completed_by_caseworker(&appeal(), Some(ctx_at(1).now()), &ctx_at(1))
            .unwrap()
            .into_case();
        assert!(case.status().unwrap_err().is_validation_error());
    }

    #[test]
    fn test_approved_flow_without_co_signer_falls_through() {
        let case = set_co_signer_flow_state(&ordinary(), FlowState::Approved, &ctx_at(1))
            .unwrap()
            .into_case();
        assert_eq!(case.status().unwrap(), CaseStatus::Unassigned);
    }

    #[test]
    fn test_status_serializes_as_its_name() {
        for status in [
            CaseStatus::SentToCoSigner,
            CaseStatus::CoSignerSelected,
            CaseStatus::SecondTreatment,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.name()));
        }
    }
}

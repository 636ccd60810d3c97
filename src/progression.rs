// Copyright 2025 Cowboy AI, LLC.

//! Outcome classification and sub-case progression
//!
//! Two disjoint outcome sets drive what happens after a partial treatment
//! is completed. Outcomes in neither set are surfaced as
//! [`DomainError::UnclassifiedOutcome`]; no default is guessed.

use crate::case::Case;
use crate::codes::{Outcome, ReferenceCode};
use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcomes that fully dispose of the matter
pub const FINISHING: [Outcome; 4] = [
    Outcome::Withdrawn,
    Outcome::CourtReversed,
    Outcome::UpheldInFavor,
    Outcome::UpheldAgainstFavor,
];

/// Outcomes after which an instructional letter and a further treatment are expected
pub const REQUIRES_FURTHER_ACTION: [Outcome; 3] = [
    Outcome::Affirmed,
    Outcome::Rejected,
    Outcome::PartiallyGranted,
];

/// Outcomes that send the case on to the external court
pub const SENT_TO_EXTERNAL_COURT: [Outcome; 3] = [
    Outcome::PartiallyGranted,
    Outcome::ProposedRejected,
    Outcome::ProposedAffirmed,
];

/// Which progression set an outcome falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeClass {
    /// The case is finished after this treatment
    Finishing,
    /// The case waits for a further treatment
    RequiresFurtherAction,
}

impl OutcomeClass {
    /// Set membership without failing on unclassified outcomes
    pub fn of(outcome: Outcome) -> Option<Self> {
        if FINISHING.contains(&outcome) {
            Some(OutcomeClass::Finishing)
        } else if REQUIRES_FURTHER_ACTION.contains(&outcome) {
            Some(OutcomeClass::RequiresFurtherAction)
        } else {
            None
        }
    }
}

/// Classify `outcome`, failing when it belongs to neither set
pub fn classify(outcome: Outcome) -> DomainResult<OutcomeClass> {
    OutcomeClass::of(outcome)
        .ok_or_else(|| DomainError::UnclassifiedOutcome(outcome.code().to_string()))
}

/// What the first partial treatment's outcome means for an appeal case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progression {
    /// The first treatment is still being worked on
    InProgress,
    /// The case is done; an information letter is expected next
    Finished,
    /// Waiting for the further treatment to be opened
    OnHold,
    /// A second treatment is open
    SecondTreatment,
}

/// Decide the next step of an appeal case from its first partial treatment
pub fn next_step(case: &Case) -> DomainResult<Progression> {
    let treatments = case
        .partial_treatments()
        .ok_or(DomainError::UnsupportedForKind {
            operation: "next_step",
            kind: case.kind().name(),
        })?;

    if treatments.partial_treatments().len() > 1 {
        debug!(case_id = %case.id(), "second partial treatment already open");
        return Ok(Progression::SecondTreatment);
    }

    let Some((outcome, class)) = completed_first_treatment(case)? else {
        return Ok(Progression::InProgress);
    };
    let step = match class {
        OutcomeClass::Finishing => Progression::Finished,
        OutcomeClass::RequiresFurtherAction => Progression::OnHold,
    };
    info!(case_id = %case.id(), outcome = %outcome, ?step, "partial treatment progression decided");
    Ok(step)
}

/// Outcome and class of an appeal's completed first partial treatment
///
/// `None` for other kinds and while the first treatment is open. A completed
/// treatment without an outcome, or with an unclassified one, is an error.
pub(crate) fn completed_first_treatment(
    case: &Case,
) -> DomainResult<Option<(Outcome, OutcomeClass)>> {
    let Some(first) = case
        .partial_treatments()
        .and_then(|treatments| treatments.first_partial_treatment())
    else {
        return Ok(None);
    };
    let decision = first.decision();
    if decision.completed_at().is_none() && decision.completed_by_caseworker_at().is_none() {
        return Ok(None);
    }
    let outcome = decision.outcome().ok_or_else(|| {
        DomainError::invalid("a completed partial treatment must carry an outcome")
    })?;
    Ok(Some((outcome, classify(outcome)?)))
}

/// Whether the current decision's outcome sends the case to the external court
pub fn should_be_sent_to_external_court(case: &Case) -> bool {
    case.decision()
        .outcome()
        .is_some_and(|outcome| SENT_TO_EXTERNAL_COURT.contains(&outcome))
}

/// Whether a court case should give rise to a new appeal case
///
/// True when the request timestamp is set, or when the case was referred back.
pub fn should_create_new_appeal_case(case: &Case) -> bool {
    let Some(court) = case.external_court() else {
        return false;
    };
    court.new_appeal_case_requested_at().is_some()
        || case.decision().outcome() == Some(Outcome::ReferredBack)
}

/// Whether a court case should give rise to a new case after the court reversed the decision
///
/// Both the request timestamp and the court-reversed outcome are required.
pub fn should_create_new_case_after_court_reversal(case: &Case) -> bool {
    let Some(court) = case.external_court() else {
        return false;
    };
    court.new_case_after_reversal_requested_at().is_some()
        && case.decision().outcome() == Some(Outcome::CourtReversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::fixtures::*;
    use crate::mutations::{
        reopen_partial_treatment, request_new_case_after_reversal, set_completed, set_outcome,
    };
    use test_case::test_case;

    #[test_case(Outcome::Withdrawn => Some(OutcomeClass::Finishing))]
    #[test_case(Outcome::CourtReversed => Some(OutcomeClass::Finishing))]
    #[test_case(Outcome::UpheldInFavor => Some(OutcomeClass::Finishing))]
    #[test_case(Outcome::UpheldAgainstFavor => Some(OutcomeClass::Finishing))]
    #[test_case(Outcome::Affirmed => Some(OutcomeClass::RequiresFurtherAction))]
    #[test_case(Outcome::Rejected => Some(OutcomeClass::RequiresFurtherAction))]
    #[test_case(Outcome::PartiallyGranted => Some(OutcomeClass::RequiresFurtherAction))]
    #[test_case(Outcome::Dismissed => None)]
    #[test_case(Outcome::ReferredBack => None)]
    fn test_outcome_class(outcome: Outcome) -> Option<OutcomeClass> {
        OutcomeClass::of(outcome)
    }

    #[test]
    fn test_sets_are_disjoint() {
        assert!(FINISHING.iter().all(|o| !REQUIRES_FURTHER_ACTION.contains(o)));
    }

    #[test]
    fn test_unclassified_outcome_is_surfaced() {
        assert_eq!(
            classify(Outcome::Dismissed),
            Err(DomainError::UnclassifiedOutcome("11".to_string()))
        );
    }

    fn completed_appeal(outcome: Outcome) -> Case {
        let case = set_outcome(&appeal(), Some(outcome), &ctx_at(1))
            .unwrap()
            .into_case();
        set_completed(&case, Some(ctx_at(2).now()), &ctx_at(2))
            .unwrap()
            .into_case()
    }

    #[test]
    fn test_next_step_from_first_treatment() {
        assert_eq!(next_step(&appeal()).unwrap(), Progression::InProgress);
        assert_eq!(
            next_step(&completed_appeal(Outcome::Withdrawn)).unwrap(),
            Progression::Finished
        );
        let held = completed_appeal(Outcome::Affirmed);
        assert_eq!(next_step(&held).unwrap(), Progression::OnHold);
        let second = reopen_partial_treatment(&held, 2, &ctx_at(3))
            .unwrap()
            .into_case();
        assert_eq!(next_step(&second).unwrap(), Progression::SecondTreatment);
        assert!(next_step(&completed_appeal(Outcome::Dismissed)).is_err());
        assert!(next_step(&ordinary()).is_err());
    }

    #[test]
    fn test_court_reversal_needs_both_conditions() {
        let case = court();
        assert!(!should_create_new_case_after_court_reversal(&case));

        let reversed = set_outcome(&case, Some(Outcome::CourtReversed), &ctx_at(1))
            .unwrap()
            .into_case();
        assert!(!should_create_new_case_after_court_reversal(&reversed));

        let requested_only = request_new_case_after_reversal(&case, Some(t0()), &ctx_at(1))
            .unwrap()
            .into_case();
        assert!(!should_create_new_case_after_court_reversal(&requested_only));

        let both = request_new_case_after_reversal(&reversed, Some(t0()), &ctx_at(2))
            .unwrap()
            .into_case();
        assert!(should_create_new_case_after_court_reversal(&both));
    }

    #[test]
    fn test_referred_back_creates_new_appeal_case() {
        let case = court();
        assert!(!should_create_new_appeal_case(&case));
        let referred = set_outcome(&case, Some(Outcome::ReferredBack), &ctx_at(1))
            .unwrap()
            .into_case();
        assert!(should_create_new_appeal_case(&referred));
        assert!(!should_create_new_appeal_case(&ordinary()));
    }

    #[test_case(Outcome::PartiallyGranted => true)]
    #[test_case(Outcome::ProposedRejected => true)]
    #[test_case(Outcome::ProposedAffirmed => true)]
    #[test_case(Outcome::Affirmed => false)]
    fn test_sent_to_external_court(outcome: Outcome) -> bool {
        let case = set_outcome(&appeal(), Some(outcome), &ctx_at(1))
            .unwrap()
            .into_case();
        should_be_sent_to_external_court(&case)
    }
}

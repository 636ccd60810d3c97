// Copyright 2025 Cowboy AI, LLC.

//! Derived completion and hold values
//!
//! Nothing here is stored. Every value is recomputed from the snapshot it is
//! given, so two equal snapshots always agree.

use crate::case::{Case, Decision};
use crate::progression::OutcomeClass;
use chrono::{DateTime, Utc};

/// The decision whose completion timestamps count as the case's own
///
/// Non-appeal cases have a single decision. For appeal cases:
/// no treatment gives nothing; a single treatment counts only when its
/// outcome finishes the case; with two or more the second treatment counts.
pub fn effective_decision(case: &Case) -> Option<&Decision> {
    let Some(treatments) = case.partial_treatments() else {
        return Some(case.decision());
    };
    match treatments.partial_treatments() {
        [] => None,
        [only] => only
            .decision()
            .outcome()
            .and_then(OutcomeClass::of)
            .filter(|class| *class == OutcomeClass::Finishing)
            .map(|_| only.decision()),
        [_, second, ..] => Some(second.decision()),
    }
}

/// When the caseworker's part of the case counts as done
pub fn effective_completed_by_caseworker_at(case: &Case) -> Option<DateTime<Utc>> {
    effective_decision(case).and_then(Decision::completed_by_caseworker_at)
}

/// When the case counts as fully completed
pub fn effective_completed_at(case: &Case) -> Option<DateTime<Utc>> {
    effective_decision(case).and_then(Decision::completed_at)
}

/// Start of the wait for a further treatment of an appeal case
///
/// Set only when the first treatment is completed with an outcome that
/// requires further action.
pub fn hold_start(case: &Case) -> Option<DateTime<Utc>> {
    let first = case.partial_treatments()?.first_partial_treatment()?;
    let decision = first.decision();
    let class = decision.outcome().and_then(OutcomeClass::of)?;
    if class != OutcomeClass::RequiresFurtherAction {
        return None;
    }
    decision
        .completed_at()
        .or_else(|| decision.completed_by_caseworker_at())
}

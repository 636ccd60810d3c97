// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::Case;
use crate::change_record::{joined, text, Field};
use crate::codes::{Outcome, ReferenceCode};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use std::collections::BTreeSet;

/// Set or clear the primary outcome of the current decision
pub fn set_outcome(
    case: &Case,
    outcome: Option<Outcome>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.decision().outcome() == outcome {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let decision = next.decision_mut()?;
    let outgoing = std::mem::replace(&mut decision.outcome, outcome);
    changes.record(Field::Outcome, text(outgoing.as_ref()), text(outcome.as_ref()));
    Ok(changes.finish(next))
}

/// Replace the secondary outcomes of the current decision
pub fn set_secondary_outcomes(
    case: &Case,
    outcomes: BTreeSet<Outcome>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if *case.decision().secondary_outcomes() == outcomes {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let decision = next.decision_mut()?;
    changes.record(
        Field::SecondaryOutcomes,
        joined(decision.secondary_outcomes.iter().map(|o| o.code())),
        joined(outcomes.iter().map(|o| o.code())),
    );
    decision.secondary_outcomes = outcomes;
    Ok(changes.finish(next))
}

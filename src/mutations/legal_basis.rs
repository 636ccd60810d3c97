// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::Case;
use crate::change_record::{joined, Field};
use crate::codes::LegalBasis;
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use std::collections::BTreeSet;

fn codes(set: &BTreeSet<LegalBasis>) -> Option<String> {
    joined(set.iter().map(LegalBasis::as_str))
}

/// Replace the legal basis submitted with the originating request
pub fn set_submitted_legal_basis(
    case: &Case,
    legal_basis: BTreeSet<LegalBasis>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.base.submitted_legal_basis == legal_basis {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    changes.record(
        Field::SubmittedLegalBasis,
        codes(&next.base.submitted_legal_basis),
        codes(&legal_basis),
    );
    next.base.submitted_legal_basis = legal_basis;
    Ok(changes.finish(next))
}

/// Replace the legal basis cited by the current decision
pub fn set_decision_legal_basis(
    case: &Case,
    legal_basis: BTreeSet<LegalBasis>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if *case.decision().legal_basis() == legal_basis {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let decision = next.decision_mut()?;
    changes.record(
        Field::DecisionLegalBasis,
        codes(&decision.legal_basis),
        codes(&legal_basis),
    );
    decision.legal_basis = legal_basis;
    Ok(changes.finish(next))
}

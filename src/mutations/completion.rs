// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::Case;
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use chrono::{DateTime, Utc};

/// Mark (or unmark) the caseworker's part of the current decision as done
///
/// The acting identity is kept as the completer.
pub fn set_completed_by_caseworker(
    case: &Case,
    completed_at: Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.decision().completed_by_caseworker_at() == completed_at {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let completion = &mut next.decision_mut()?.completion;
    let outgoing = std::mem::replace(&mut completion.completed_by_caseworker_at, completed_at);
    completion.completed_by = completed_at.and(ctx.actor().cloned());
    changes.record(
        Field::CompletedByCaseworkerAt,
        text(outgoing.as_ref()),
        text(completed_at.as_ref()),
    );
    Ok(changes.finish(next))
}

/// Mark (or unmark) the current decision as fully completed
pub fn set_completed(
    case: &Case,
    completed_at: Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.decision().completed_at() == completed_at {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let completion = &mut next.decision_mut()?.completion;
    let outgoing = std::mem::replace(&mut completion.completed_at, completed_at);
    changes.record(
        Field::CompletedAt,
        text(outgoing.as_ref()),
        text(completed_at.as_ref()),
    );
    Ok(changes.finish(next))
}

// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, ReviewerSnapshot};
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use crate::flow::FlowState;
use crate::identifiers::Ident;

fn push_outgoing(next: &mut Case, ctx: &CommandContext) {
    if next.base.reviewer.is_none() && next.base.reviewer_flow_state == FlowState::NotSent {
        return;
    }
    let snapshot = ReviewerSnapshot {
        reviewer: next.base.reviewer.clone(),
        flow_state: next.base.reviewer_flow_state,
    };
    let case_id = next.id();
    next.base
        .reviewer_history
        .append(case_id, snapshot, ctx.now(), ctx.actor());
}

/// Select (or clear) the reviewer of legality ("ROL")
pub fn set_reviewer(
    case: &Case,
    reviewer: Option<Ident>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.base.reviewer == reviewer {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    push_outgoing(&mut next, ctx);
    let outgoing = std::mem::replace(&mut next.base.reviewer, reviewer);
    changes.record(
        Field::ReviewerIdent,
        text(outgoing.as_ref()),
        text(next.base.reviewer.as_ref()),
    );
    Ok(changes.finish(next))
}

/// Move the legality review flow to `flow_state`
///
/// Returning the case to the caseworker stamps the return time.
pub fn set_reviewer_flow_state(
    case: &Case,
    flow_state: FlowState,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.base.reviewer_flow_state == flow_state {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    push_outgoing(&mut next, ctx);
    let outgoing = std::mem::replace(&mut next.base.reviewer_flow_state, flow_state);
    if flow_state == FlowState::Returned {
        next.base.reviewer_returned_at = Some(ctx.now());
    }
    changes.record(
        Field::ReviewerFlowState,
        text(Some(&outgoing)),
        text(Some(&flow_state)),
    );
    Ok(changes.finish(next))
}

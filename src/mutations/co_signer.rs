// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, CoSigner, CoSignerSnapshot, Decision};
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use crate::flow::FlowState;
use crate::identifiers::Ident;

fn push_outgoing(decision: &mut Decision, case: &Case, ctx: &CommandContext) {
    if decision.co_signer.is_none() && decision.co_signer_flow_state == FlowState::NotSent {
        return;
    }
    decision.co_signer_history.append(
        case.id(),
        CoSignerSnapshot {
            co_signer: decision.co_signer.clone(),
            flow_state: decision.co_signer_flow_state,
        },
        ctx.now(),
        ctx.actor(),
    );
}

/// Select (or clear) the co-signer of the current decision
///
/// The flow state is left as it is.
pub fn set_co_signer(
    case: &Case,
    co_signer: Option<Ident>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.decision().co_signer().map(|c| &c.ident) == co_signer.as_ref() {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let decision = next.decision_mut()?;
    push_outgoing(decision, case, ctx);

    let outgoing = decision.co_signer.take();
    decision.co_signer = co_signer.map(|ident| CoSigner {
        ident,
        assigned_at: ctx.now(),
    });
    changes.record(
        Field::CoSignerIdent,
        text(outgoing.as_ref().map(|c| &c.ident)),
        text(decision.co_signer.as_ref().map(|c| &c.ident)),
    );
    Ok(changes.finish(next))
}

/// Move the co-signing flow of the current decision to `flow_state`
pub fn set_co_signer_flow_state(
    case: &Case,
    flow_state: FlowState,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.decision().co_signer_flow_state() == flow_state {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let decision = next.decision_mut()?;
    push_outgoing(decision, case, ctx);

    let outgoing = decision.co_signer_flow_state;
    decision.co_signer_flow_state = flow_state;
    changes.record(
        Field::CoSignerFlowState,
        text(Some(&outgoing)),
        text(Some(&flow_state)),
    );
    Ok(changes.finish(next))
}

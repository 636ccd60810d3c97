// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, Hold};
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;

/// Put the case on hold for `hold`, or lift the hold with `None`
pub fn set_hold(case: &Case, hold: Option<Hold>, ctx: &CommandContext) -> DomainResult<CaseChanged> {
    if case.base.hold == hold {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let outgoing = next.base.hold.take();
    if let Some(outgoing) = &outgoing {
        let case_id = next.id();
        next.base
            .hold_history
            .append(case_id, outgoing.clone(), ctx.now(), ctx.actor());
    }

    changes.record(Field::Hold, text(outgoing.as_ref()), text(hold.as_ref()));
    next.base.hold = hold;
    Ok(changes.finish(next))
}

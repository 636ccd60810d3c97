// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, PartiesSnapshot};
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use crate::identifiers::PartyId;

fn push_outgoing(next: &mut Case, ctx: &CommandContext) {
    let snapshot = PartiesSnapshot {
        klager: next.base.klager.clone(),
        concerned_party: next.base.concerned_party.clone(),
    };
    let case_id = next.id();
    next.base
        .party_history
        .append(case_id, snapshot, ctx.now(), ctx.actor());
}

/// Replace the klager
pub fn set_klager(case: &Case, klager: PartyId, ctx: &CommandContext) -> DomainResult<CaseChanged> {
    if case.base.klager == klager {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    push_outgoing(&mut next, ctx);
    let outgoing = std::mem::replace(&mut next.base.klager, klager);
    changes.record(
        Field::Klager,
        text(Some(&outgoing)),
        text(Some(&next.base.klager)),
    );
    Ok(changes.finish(next))
}

/// Replace the party the case concerns
pub fn set_concerned_party(
    case: &Case,
    party: PartyId,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.base.concerned_party == party {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    push_outgoing(&mut next, ctx);
    let outgoing = std::mem::replace(&mut next.base.concerned_party, party);
    changes.record(
        Field::ConcernedParty,
        text(Some(&outgoing)),
        text(Some(&next.base.concerned_party)),
    );
    Ok(changes.finish(next))
}

// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, NotifiedProcessingTime, ProcessingTimeSnapshot};
use crate::change_record::{text, Field};
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;
use crate::identifiers::PartyId;

/// Record a processing time communicated to `recipients`, or withdraw it with `None`
///
/// Unlike the other histories, this one keeps every communicated value
/// together with who was told, so the incoming value is appended rather
/// than the outgoing one.
pub fn set_notified_processing_time(
    case: &Case,
    value: Option<NotifiedProcessingTime>,
    recipients: Vec<PartyId>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if value.is_some() && recipients.is_empty() {
        return Err(DomainError::invalid(
            "a communicated processing time needs at least one recipient",
        ));
    }
    if case.base.notified_processing_time == value {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let case_id = next.id();
    next.base.processing_time_history.append(
        case_id,
        ProcessingTimeSnapshot {
            value: value.clone(),
            recipients,
        },
        ctx.now(),
        ctx.actor(),
    );
    let outgoing = std::mem::replace(&mut next.base.notified_processing_time, value);
    changes.record(
        Field::NotifiedProcessingTime,
        text(outgoing.as_ref()),
        text(next.base.notified_processing_time.as_ref()),
    );
    Ok(changes.finish(next))
}

// Copyright 2025 Cowboy AI, LLC.

use super::{ChangeSet, CommandContext};
use crate::case::{Case, CaseKind, PartialTreatment};
use crate::change_record::Field;
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;

/// Open the next partial treatment of an appeal case
///
/// Refused unless the current treatment has been completed (by the
/// caseworker or fully) and the case holds fewer than `max` treatments.
pub fn reopen_partial_treatment(
    case: &Case,
    max: usize,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let kind = case.kind.name();
    let mut next = case.clone();
    let CaseKind::Appeal(appeal) = &mut next.kind else {
        return Err(DomainError::UnsupportedForKind {
            operation: "reopen_partial_treatment",
            kind,
        });
    };

    let count = appeal.partial_treatments.len();
    if count >= max {
        return Err(DomainError::BusinessRuleViolation {
            rule: format!("an appeal case holds at most {max} partial treatments"),
        });
    }
    let current_done = appeal.partial_treatments.last().is_some_and(|t| {
        t.decision.completed_at().is_some() || t.decision.completed_by_caseworker_at().is_some()
    });
    if count > 0 && !current_done {
        return Err(DomainError::BusinessRuleViolation {
            rule: "the current partial treatment must be completed before another is opened"
                .to_string(),
        });
    }

    appeal
        .partial_treatments
        .push(PartialTreatment::open(ctx.now()));

    let mut changes = ChangeSet::new(case, ctx);
    changes.record(
        Field::PartialTreatment,
        Some(count.to_string()),
        Some((count + 1).to_string()),
    );
    Ok(changes.finish(next))
}

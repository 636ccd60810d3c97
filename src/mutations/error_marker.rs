// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, ErrorMarker};
use crate::change_record::Field;
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;

/// Mark the case as erroneously registered
///
/// The marker is one-way. Marking an already marked case does nothing.
pub fn set_erroneously_registered(
    case: &Case,
    reason: impl Into<String>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let reason = reason.into();
    if reason.trim().is_empty() {
        return Err(DomainError::invalid(
            "marking a case as erroneously registered requires a reason",
        ));
    }
    let marked_by = ctx
        .actor()
        .cloned()
        .ok_or_else(|| {
            DomainError::invalid("marking a case as erroneously registered requires an actor")
        })?;

    if case.is_erroneously_registered() {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    changes.record(Field::ErroneouslyRegistered, None, Some(reason.clone()));
    next.base.error_marker = Some(ErrorMarker {
        marked_by,
        marked_at: ctx.now(),
        reason,
    });
    Ok(changes.finish(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::fixtures::*;

    #[test]
    fn test_marking_is_one_way() {
        let case = ordinary();
        let event = set_erroneously_registered(&case, "duplicate", &ctx_at(1)).unwrap();
        assert!(event.case.is_erroneously_registered());
        assert_eq!(event.case.base().error_marker().unwrap().marked_by, ident("Z100"));

        let again = set_erroneously_registered(&event.case, "other", &ctx_at(2)).unwrap();
        assert!(again.is_empty());
        assert_eq!(again.case.base().error_marker().unwrap().reason, "duplicate");
    }

    #[test]
    fn test_requires_actor_and_reason() {
        let case = ordinary();
        assert!(set_erroneously_registered(&case, " ", &ctx_at(1))
            .unwrap_err()
            .is_validation_error());
        let system = CommandContext::at(None, t0());
        assert!(set_erroneously_registered(&case, "duplicate", &system).is_err());
    }
}

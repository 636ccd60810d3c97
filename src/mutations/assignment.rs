// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Assignment, AssignmentSnapshot, Case};
use crate::change_record::{text, Field};
use crate::codes::UnassignmentReason;
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;
use crate::identifiers::{Ident, UnitId};

/// Assign the case to `assignee` in `unit`, or withdraw the assignment with `None`
///
/// The outgoing assignment is pushed to history tagged with `reason`.
/// Withdrawing requires a reason; replacing one assignee with another
/// defaults to [`UnassignmentReason::Reassigned`].
pub fn set_assignment(
    case: &Case,
    assignee: Option<(Ident, UnitId)>,
    reason: Option<UnassignmentReason>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let current = case.base.assignment.as_ref();
    let unchanged_target = match (current, &assignee) {
        (None, None) => true,
        (Some(a), Some((ident, unit))) => a.assignee == *ident && a.unit == *unit,
        _ => false,
    };
    if unchanged_target {
        return Ok(unchanged(case));
    }

    let reason = match (&assignee, reason) {
        (_, Some(reason)) => Some(reason),
        (Some(_), None) => Some(UnassignmentReason::Reassigned),
        (None, None) => {
            return Err(DomainError::invalid(
                "withdrawing an assignment requires a reason",
            ))
        }
    };

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    let outgoing = next.base.assignment.take();

    if let Some(outgoing) = &outgoing {
        let case_id = next.id();
        next.base.assignment_history.append(
            case_id,
            AssignmentSnapshot {
                assignment: outgoing.clone(),
                reason,
            },
            ctx.now(),
            ctx.actor(),
        );
    }

    let incoming = assignee.map(|(assignee, unit)| Assignment {
        assignee,
        unit,
        assigned_at: ctx.now(),
    });

    changes.record(
        Field::AssigneeIdent,
        text(outgoing.as_ref().map(|a| &a.assignee)),
        text(incoming.as_ref().map(|a| &a.assignee)),
    );
    changes.record(
        Field::AssigneeUnit,
        text(outgoing.as_ref().map(|a| &a.unit)),
        text(incoming.as_ref().map(|a| &a.unit)),
    );
    changes.record(
        Field::AssignedAt,
        text(outgoing.as_ref().map(|a| &a.assigned_at)),
        text(incoming.as_ref().map(|a| &a.assigned_at)),
    );

    next.base.assignment = incoming;
    Ok(changes.finish(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::fixtures::*;
    use pretty_assertions::assert_eq;

    fn unit() -> UnitId {
        UnitId::new("4291").unwrap()
    }

    #[test]
    fn test_first_assignment_pushes_no_history() {
        let case = ordinary();
        let event = set_assignment(&case, Some((ident("B1"), unit())), None, &ctx_at(1)).unwrap();
        assert!(event.case.base().assignment_history().is_empty());
        assert_eq!(
            event.fields(),
            vec![Field::AssigneeIdent, Field::AssigneeUnit, Field::AssignedAt]
        );
        assert_eq!(event.case.base().modified_at(), ctx_at(1).now());
    }

    #[test]
    fn test_reassignment_pushes_outgoing_once() {
        let case = ordinary();
        let case = set_assignment(&case, Some((ident("B1"), unit())), None, &ctx_at(1))
            .unwrap()
            .into_case();
        let case = set_assignment(&case, Some((ident("B2"), unit())), None, &ctx_at(2))
            .unwrap()
            .into_case();

        let history: Vec<_> = case.base().assignment_history().iter().collect();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].snapshot().assignment.assignee, ident("B1"));
        assert_eq!(
            history[0].snapshot().reason,
            Some(UnassignmentReason::Reassigned)
        );
        assert_eq!(case.base().assignment().unwrap().assignee, ident("B2"));

        let again = set_assignment(&case, Some((ident("B2"), unit())), None, &ctx_at(3)).unwrap();
        assert!(again.is_empty());
        assert_eq!(again.case.base().assignment_history().len(), 1);
        assert_eq!(again.case, case);
    }

    #[test]
    fn test_withdrawal_requires_reason_and_leaves_case_untouched() {
        let case = ordinary();
        let case = set_assignment(&case, Some((ident("B1"), unit())), None, &ctx_at(1))
            .unwrap()
            .into_case();
        let before = case.clone();
        assert!(set_assignment(&case, None, None, &ctx_at(2)).is_err());
        assert_eq!(case, before);

        let event = set_assignment(
            &case,
            None,
            Some(UnassignmentReason::ExtendedAbsence),
            &ctx_at(2),
        )
        .unwrap();
        assert!(event.case.base().assignment().is_none());
        assert_eq!(
            event.case.base().assignment_history().last().unwrap().snapshot().reason,
            Some(UnassignmentReason::ExtendedAbsence)
        );
        let ident_record = &event.change_records[0];
        assert_eq!(ident_record.from_value.as_deref(), Some("B1"));
        assert_eq!(ident_record.to_value, None);
    }

    #[test]
    fn test_unit_change_alone_records_only_unit_and_timestamp() {
        let case = ordinary();
        let case = set_assignment(&case, Some((ident("B1"), unit())), None, &ctx_at(1))
            .unwrap()
            .into_case();
        let event = set_assignment(
            &case,
            Some((ident("B1"), UnitId::new("4295").unwrap())),
            None,
            &ctx_at(2),
        )
        .unwrap();
        assert_eq!(event.fields(), vec![Field::AssigneeUnit, Field::AssignedAt]);
    }
}

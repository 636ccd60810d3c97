// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::Case;
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;
use chrono::NaiveDate;

/// Correct the date the appeals body received the case
pub fn set_received_at_appeals_body(
    case: &Case,
    received: NaiveDate,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let outgoing = case.base.received_at_appeals_body;
    if outgoing == received {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    next.base.received_at_appeals_body = received;
    changes.record(
        Field::ReceivedAtAppealsBody,
        text(Some(&outgoing)),
        text(Some(&received)),
    );
    Ok(changes.finish(next))
}

/// Set or clear the deadline
pub fn set_deadline(
    case: &Case,
    deadline: Option<NaiveDate>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let outgoing = case.base.deadline;
    if outgoing == deadline {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    next.base.deadline = deadline;
    changes.record(
        Field::Deadline,
        text(outgoing.as_ref()),
        text(deadline.as_ref()),
    );
    Ok(changes.finish(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::fixtures::*;

    #[test]
    fn test_deadline_set_and_repeat() {
        let case = ordinary();
        let event = set_deadline(&case, Some(date(2024, 6, 1)), &ctx_at(1)).unwrap();
        assert_eq!(event.change_records[0].to_value.as_deref(), Some("2024-06-01"));
        let again = set_deadline(&event.case, Some(date(2024, 6, 1)), &ctx_at(2)).unwrap();
        assert!(again.is_empty());
        assert_eq!(again.case.base().modified_at(), ctx_at(1).now());
    }

    #[test]
    fn test_received_date_correction() {
        let case = ordinary();
        let event = set_received_at_appeals_body(&case, date(2024, 1, 15), &ctx_at(1)).unwrap();
        let record = &event.change_records[0];
        assert_eq!(record.field, Field::ReceivedAtAppealsBody);
        assert_eq!(record.from_value.as_deref(), Some("2024-02-01"));
        assert_eq!(record.to_value.as_deref(), Some("2024-01-15"));
    }
}

// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, CaseKind, CourtAppealCase};
use crate::change_record::{text, Field};
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;
use chrono::{DateTime, Utc};

fn court_mut<'a>(case: &'a mut Case, operation: &'static str) -> DomainResult<&'a mut CourtAppealCase> {
    let kind = case.kind.name();
    match &mut case.kind {
        CaseKind::AppealInCourt(court) => Ok(court),
        _ => Err(DomainError::UnsupportedForKind { operation, kind }),
    }
}

fn set_timestamp(
    case: &Case,
    operation: &'static str,
    field: Field,
    value: Option<DateTime<Utc>>,
    slot: fn(&mut CourtAppealCase) -> &mut Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let mut next = case.clone();
    let current = slot(court_mut(&mut next, operation)?);
    if *current == value {
        return Ok(unchanged(case));
    }
    let outgoing = std::mem::replace(current, value);

    let mut changes = ChangeSet::new(case, ctx);
    changes.record(field, text(outgoing.as_ref()), text(value.as_ref()));
    Ok(changes.finish(next))
}

/// Correct when the case was sent to the external court
pub fn set_sent_to_court(
    case: &Case,
    sent_at: DateTime<Utc>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    let mut next = case.clone();
    let court = court_mut(&mut next, "set_sent_to_court")?;
    if court.sent_to_court_at == sent_at {
        return Ok(unchanged(case));
    }
    let outgoing = std::mem::replace(&mut court.sent_to_court_at, sent_at);

    let mut changes = ChangeSet::new(case, ctx);
    changes.record(Field::SentToCourt, text(Some(&outgoing)), text(Some(&sent_at)));
    Ok(changes.finish(next))
}

/// Record (or clear) when the court's ruling arrived
pub fn set_ruling_received(
    case: &Case,
    received_at: Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    set_timestamp(
        case,
        "set_ruling_received",
        Field::RulingReceived,
        received_at,
        |court| &mut court.ruling_received_at,
        ctx,
    )
}

/// Record (or clear) a request to start a new appeal case after the ruling
pub fn request_new_appeal_case(
    case: &Case,
    requested_at: Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    set_timestamp(
        case,
        "request_new_appeal_case",
        Field::NewAppealCaseRequested,
        requested_at,
        |court| &mut court.new_appeal_case_requested_at,
        ctx,
    )
}

/// Record (or clear) a request to start a new case after the court reversed the decision
pub fn request_new_case_after_reversal(
    case: &Case,
    requested_at: Option<DateTime<Utc>>,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    set_timestamp(
        case,
        "request_new_case_after_reversal",
        Field::NewCaseAfterReversalRequested,
        requested_at,
        |court| &mut court.new_case_after_reversal_requested_at,
        ctx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::fixtures::*;
    use chrono::Duration;

    #[test]
    fn test_ruling_received_on_court_case() {
        let case = court();
        let at = t0() + Duration::days(30);
        let event = set_ruling_received(&case, Some(at), &ctx_at(1)).unwrap();
        assert_eq!(event.case.external_court().unwrap().ruling_received_at(), Some(at));
        assert_eq!(event.fields(), vec![Field::RulingReceived]);
        assert!(set_ruling_received(&event.case, Some(at), &ctx_at(2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_court_fields_refused_on_other_kinds() {
        let err = request_new_appeal_case(&ordinary(), Some(t0()), &ctx_at(1)).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedForKind {
                operation: "request_new_appeal_case",
                kind: "ordinary",
            }
        );
        assert!(set_sent_to_court(&appeal(), t0(), &ctx_at(1)).is_err());
    }

    #[test]
    fn test_sent_to_court_correction() {
        let case = court();
        let corrected = t0() - Duration::days(1);
        let event = set_sent_to_court(&case, corrected, &ctx_at(1)).unwrap();
        assert_eq!(event.case.external_court().unwrap().sent_to_court_at(), corrected);
        assert_eq!(event.case.base().modified_at(), ctx_at(1).now());
    }
}

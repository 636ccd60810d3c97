// Copyright 2025 Cowboy AI, LLC.

//! Mutation commands
//!
//! One function per mutable concern. Every command follows the same shape:
//!
//! 1. read the current value(s) of the governed field(s);
//! 2. when a history collection belongs to the field and the field holds a
//!    recorded value, push the outgoing value to that history;
//! 3. write the new value(s) and stamp the last-modified time;
//! 4. capture one change record per logical field touched;
//! 5. return a [`CaseChanged`] with the next snapshot and the records.
//!
//! Commands take the current snapshot by reference and never modify it.
//! Input validation happens before anything is written, so a failed command
//! leaves nothing behind. Commands do not judge whether a transition is
//! legal for the case's status; that is the caller's responsibility (see
//! [`crate::config::MutationPolicy`] for the opt-in guards).
//!
//! Setting a value equal to the current one is a no-op: the returned event
//! carries the unchanged snapshot and no change records.

mod assignment;
mod co_signer;
mod completion;
mod court;
mod dates;
mod documents;
mod error_marker;
mod hold;
mod legal_basis;
mod outcome;
mod parties;
mod processing_time;
mod reviewer;
mod treatments;

pub use assignment::set_assignment;
pub use co_signer::{set_co_signer, set_co_signer_flow_state};
pub use completion::{set_completed, set_completed_by_caseworker};
pub use court::{
    request_new_appeal_case, request_new_case_after_reversal, set_ruling_received,
    set_sent_to_court,
};
pub use dates::{set_deadline, set_received_at_appeals_body};
pub use documents::{add_document_reference, remove_document_reference};
pub use error_marker::set_erroneously_registered;
pub use hold::set_hold;
pub use legal_basis::{set_decision_legal_basis, set_submitted_legal_basis};
pub use outcome::{set_outcome, set_secondary_outcomes};
pub use parties::{set_concerned_party, set_klager};
pub use processing_time::set_notified_processing_time;
pub use reviewer::{set_reviewer, set_reviewer_flow_state};
pub use treatments::reopen_partial_treatment;

use crate::case::Case;
use crate::change_record::{ChangeRecord, Field};
use crate::entity::{CaseMarker, EntityId};
use crate::events::CaseChanged;
use crate::identifiers::Ident;
use chrono::{DateTime, Utc};

/// Who is acting, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    actor: Option<Ident>,
    now: DateTime<Utc>,
}

impl CommandContext {
    /// Context for `actor` at the current wall-clock time
    pub fn new(actor: Option<Ident>) -> Self {
        Self::at(actor, Utc::now())
    }

    /// Context for `actor` at a fixed time
    pub fn at(actor: Option<Ident>, now: DateTime<Utc>) -> Self {
        Self { actor, now }
    }

    /// Acting identity; `None` for system-initiated commands
    pub fn actor(&self) -> Option<&Ident> {
        self.actor.as_ref()
    }

    /// Command time
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Collects change records for one command
pub(crate) struct ChangeSet<'a> {
    ctx: &'a CommandContext,
    case_id: EntityId<CaseMarker>,
    records: Vec<ChangeRecord>,
}

impl<'a> ChangeSet<'a> {
    pub(crate) fn new(case: &Case, ctx: &'a CommandContext) -> Self {
        Self {
            ctx,
            case_id: case.id(),
            records: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, field: Field, from: Option<String>, to: Option<String>) {
        if let Some(record) = ChangeRecord::capture(
            self.ctx.actor(),
            field,
            from,
            to,
            self.case_id,
            self.ctx.now(),
        ) {
            self.records.push(record);
        }
    }

    /// Seal the command, stamping last-modified when anything changed
    pub(crate) fn finish(self, mut case: Case) -> CaseChanged {
        if !self.records.is_empty() {
            case.base.modified_at = self.ctx.now();
        }
        CaseChanged {
            case,
            change_records: self.records,
        }
    }
}

/// Event for a command that changed nothing
pub(crate) fn unchanged(case: &Case) -> CaseChanged {
    CaseChanged {
        case: case.clone(),
        change_records: Vec::new(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::case::{Case, NewCase, OrdinaryCase};
    use crate::codes::BenefitDomain;
    use crate::identifiers::{Ident, PartyId};
    use crate::mutations::CommandContext;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    pub fn ctx_at(minutes: i64) -> CommandContext {
        CommandContext::at(
            Some(Ident::new("Z100").unwrap()),
            t0() + Duration::minutes(minutes),
        )
    }

    pub fn ident(value: &str) -> Ident {
        Ident::new(value).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn new_case() -> NewCase {
        NewCase::new(
            PartyId::person("12345678910").unwrap(),
            BenefitDomain::new("SYK").unwrap(),
            "SRC-1",
            date(2024, 2, 1),
        )
    }

    pub fn ordinary() -> Case {
        Case::ordinary(new_case(), OrdinaryCase::default(), t0()).unwrap()
    }

    pub fn appeal() -> Case {
        Case::appeal(new_case(), None, t0()).unwrap()
    }

    pub fn court() -> Case {
        Case::appeal_in_court(new_case(), t0(), t0()).unwrap()
    }
}

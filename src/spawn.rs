// Copyright 2025 Cowboy AI, LLC.

//! Spawning follow-up cases
//!
//! A spawned case inherits the parties, benefit domain, source reference and
//! documents of its source. Its submitted legal basis is seeded from the
//! source's decision legal basis, or from the source's own submitted legal
//! basis when the decision cites none. The court-derived spawns are gated by
//! the predicates in [`crate::progression`].

use crate::case::{AppealCase, Case, CaseKind, NewCase, OrdinaryCase};
use crate::derived::effective_completed_at;
use crate::errors::{DomainError, DomainResult};
use crate::mutations::CommandContext;
use crate::progression::{
    should_be_sent_to_external_court, should_create_new_appeal_case,
    should_create_new_case_after_court_reversal,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which follow-up case to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// Appeal case sent on to the external court
    CourtCase,
    /// New appeal case after the court referred the case back
    AppealFromCourtCase,
    /// New first-round case after the court reversed the decision
    AfterCourtReversal,
    /// Reopening request for a completed case
    ReopeningRequest,
}

impl SpawnKind {
    /// Spawn this kind of case from `source`
    pub fn spawn(self, source: &Case, ctx: &CommandContext) -> DomainResult<Case> {
        match self {
            SpawnKind::CourtCase => spawn_court_case(source, ctx),
            SpawnKind::AppealFromCourtCase => spawn_appeal_from_court_case(source, ctx),
            SpawnKind::AfterCourtReversal => spawn_after_court_reversal(source, ctx),
            SpawnKind::ReopeningRequest => spawn_reopening_request(source, ctx),
        }
    }
}

fn inherit(source: &Case, ctx: &CommandContext) -> NewCase {
    let base = source.base();
    let legal_basis = if source.decision().legal_basis().is_empty() {
        base.submitted_legal_basis().clone()
    } else {
        source.decision().legal_basis().clone()
    };
    NewCase::new(
        base.klager().clone(),
        base.benefit_domain().clone(),
        base.source_reference(),
        ctx.now().date_naive(),
    )
    .with_concerned_party(base.concerned_party().clone())
    .with_submitted_legal_basis(legal_basis)
    .with_document_references(base.document_references().clone())
}

fn require_kind(source: &Case, expected: &str, operation: &'static str) -> DomainResult<()> {
    if source.kind().name() == expected {
        Ok(())
    } else {
        Err(DomainError::UnsupportedForKind {
            operation,
            kind: source.kind().name(),
        })
    }
}

fn refuse(rule: &str) -> DomainError {
    DomainError::BusinessRuleViolation {
        rule: rule.to_string(),
    }
}

fn spawned(source: &Case, case: Case) -> Case {
    info!(
        source_id = %source.id(),
        case_id = %case.id(),
        kind = case.kind().name(),
        "spawned follow-up case"
    );
    case
}

/// Send an appeal case on to the external court
pub fn spawn_court_case(source: &Case, ctx: &CommandContext) -> DomainResult<Case> {
    require_kind(source, "appeal", "spawn_court_case")?;
    if !should_be_sent_to_external_court(source) {
        return Err(refuse("the outcome does not send the case to the external court"));
    }
    let case = Case::appeal_in_court(inherit(source, ctx), ctx.now(), ctx.now())?;
    Ok(spawned(source, case))
}

/// Start a new appeal case after the external court referred the case back
pub fn spawn_appeal_from_court_case(source: &Case, ctx: &CommandContext) -> DomainResult<Case> {
    require_kind(source, "appeal-in-court", "spawn_appeal_from_court_case")?;
    if !should_create_new_appeal_case(source) {
        return Err(refuse("no new appeal case was requested from the court ruling"));
    }
    let details = AppealCase::new(None, None, None, ctx.now());
    let case = Case::create(inherit(source, ctx), CaseKind::Appeal(details), ctx.now())?;
    Ok(spawned(source, case))
}

/// Start a new first-round case after the external court reversed the decision
pub fn spawn_after_court_reversal(source: &Case, ctx: &CommandContext) -> DomainResult<Case> {
    require_kind(source, "appeal-in-court", "spawn_after_court_reversal")?;
    if !should_create_new_case_after_court_reversal(source) {
        return Err(refuse(
            "a new case after reversal needs both the request and the court-reversed outcome",
        ));
    }
    let case = Case::ordinary(inherit(source, ctx), OrdinaryCase::default(), ctx.now())?;
    Ok(spawned(source, case))
}

/// Open a reopening request for a completed case
pub fn spawn_reopening_request(source: &Case, ctx: &CommandContext) -> DomainResult<Case> {
    if source.is_erroneously_registered() {
        return Err(DomainError::TerminalState {
            case_id: source.id().to_string(),
        });
    }
    if effective_completed_at(source).is_none() {
        return Err(refuse("only a completed case can be reopened"));
    }
    let case = Case::reopening_request(inherit(source, ctx), source.id(), ctx.now())?;
    Ok(spawned(source, case))
}

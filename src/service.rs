// Copyright 2025 Cowboy AI, LLC.

//! Case command handler
//!
//! The handler is the transaction boundary: it loads the case, applies the
//! policy guards, runs exactly one command, saves the next snapshot with an
//! optimistic version check and hands non-empty events to the publisher.
//! A refused guard or a failed command leaves the repository untouched.
//!
//! The save is the commit point. An event the publisher rejects after the
//! save does not fail the command; it waits in the handler's outbox until
//! [`CaseCommandHandler::flush_pending`] delivers it.

use crate::case::Case;
use crate::commands::CaseCommand;
use crate::config::MutationPolicy;
use crate::entity::{AggregateRoot, CaseMarker, EntityId};
use crate::errors::{DomainError, DomainResult};
use crate::events::CaseChanged;
use crate::flow::FlowState;
use crate::mutations::CommandContext;
use crate::publisher::CaseChangedPublisher;
use crate::repository::CaseRepository;
use crate::spawn::SpawnKind;
use crate::state_machine::State;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Runs case commands against a repository and publisher
pub struct CaseCommandHandler<R, P> {
    repository: R,
    publisher: P,
    policy: MutationPolicy,
    pending: Mutex<Vec<CaseChanged>>,
}

impl<R: CaseRepository, P: CaseChangedPublisher> CaseCommandHandler<R, P> {
    /// Create a handler
    pub fn new(repository: R, publisher: P, policy: MutationPolicy) -> Self {
        Self {
            repository,
            publisher,
            policy,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Active policy
    pub fn policy(&self) -> &MutationPolicy {
        &self.policy
    }

    /// Store a newly created case
    pub fn register(&self, case: &Case) -> DomainResult<EntityId<CaseMarker>> {
        self.repository.save(case, None)?;
        info!(case_id = %case.id(), kind = case.kind().name(), "case registered");
        Ok(case.id())
    }

    /// Run one command against the stored case
    pub fn handle(
        &self,
        case_id: EntityId<CaseMarker>,
        command: CaseCommand,
        ctx: &CommandContext,
    ) -> DomainResult<CaseChanged> {
        let name = command.name();
        let case = self.load(case_id)?;

        if let Err(err) = self.check_guards(&case, &command) {
            warn!(case_id = %case_id, command = name, error = %err, "command refused by policy");
            return Err(err);
        }

        let mut event = command.apply(&case, &self.policy, ctx)?;
        if event.is_empty() {
            debug!(case_id = %case_id, command = name, "command changed nothing");
            return Ok(event);
        }

        event.case.increment_version();
        self.repository.save(&event.case, Some(case.version()))?;
        if let Err(reason) = self.publisher.publish(&event) {
            warn!(
                case_id = %case_id,
                command = name,
                error = %reason,
                "publish failed, event kept for retry"
            );
            self.outbox().push(event.clone());
        }

        info!(
            case_id = %case_id,
            command = name,
            version = event.case.version(),
            fields = ?event.fields(),
            "case changed"
        );
        Ok(event)
    }

    /// Spawn and store a follow-up case from the stored source case
    pub fn spawn(
        &self,
        source_id: EntityId<CaseMarker>,
        kind: SpawnKind,
        ctx: &CommandContext,
    ) -> DomainResult<Case> {
        let source = self.load(source_id)?;
        let case = kind.spawn(&source, ctx)?;
        self.register(&case)?;
        Ok(case)
    }

    /// Events saved but not yet accepted by the publisher, oldest first
    pub fn pending(&self) -> Vec<CaseChanged> {
        self.outbox().clone()
    }

    /// Retry every pending event in order
    ///
    /// Delivered events leave the outbox. Returns how many were delivered, or
    /// `PublishFailed` with the last rejection when any remain.
    pub fn flush_pending(&self) -> DomainResult<usize> {
        let mut outbox = self.outbox();
        let mut last_error = None;
        let before = outbox.len();
        outbox.retain(|event| match self.publisher.publish(event) {
            Ok(()) => false,
            Err(reason) => {
                last_error = Some(reason);
                true
            }
        });
        let delivered = before - outbox.len();
        debug!(delivered, remaining = outbox.len(), "flushed pending events");
        match last_error {
            Some(reason) => Err(DomainError::PublishFailed(reason)),
            None => Ok(delivered),
        }
    }

    fn outbox(&self) -> MutexGuard<'_, Vec<CaseChanged>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, case_id: EntityId<CaseMarker>) -> DomainResult<Case> {
        self.repository
            .load(case_id)?
            .ok_or_else(|| DomainError::CaseNotFound(case_id.to_string()))
    }

    fn check_guards(&self, case: &Case, command: &CaseCommand) -> DomainResult<()> {
        if self.policy.guard_erroneously_registered && case.is_erroneously_registered() {
            return Err(DomainError::TerminalState {
                case_id: case.id().to_string(),
            });
        }
        if !self.policy.strict_co_signer_flow {
            return Ok(());
        }
        match command {
            CaseCommand::SetCoSignerFlowState { flow_state } => {
                check_flow(case.decision().co_signer_flow_state(), *flow_state)
            }
            CaseCommand::SetReviewerFlowState { flow_state } => {
                check_flow(case.base().reviewer_flow_state(), *flow_state)
            }
            _ => Ok(()),
        }
    }
}

fn check_flow(from: FlowState, to: FlowState) -> DomainResult<()> {
    if from.can_reach(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidStateTransition {
            from: from.name().to_string(),
            to: to.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_record::Field;
    use crate::mutations::fixtures::*;
    use crate::publisher::{InMemoryCaseChangedPublisher, MockCaseChangedPublisher};
    use crate::repository::{InMemoryCaseRepository, MockCaseRepository};
    use mockall::predicate::eq;

    fn handler(
        policy: MutationPolicy,
    ) -> CaseCommandHandler<InMemoryCaseRepository, InMemoryCaseChangedPublisher> {
        CaseCommandHandler::new(
            InMemoryCaseRepository::new(),
            InMemoryCaseChangedPublisher::new(),
            policy,
        )
    }

    fn deadline() -> CaseCommand {
        CaseCommand::SetDeadline {
            deadline: Some(date(2024, 6, 1)),
        }
    }

    #[test]
    fn test_handle_saves_and_publishes() {
        let handler = handler(MutationPolicy::default());
        let id = handler.register(&ordinary()).unwrap();

        let event = handler.handle(id, deadline(), &ctx_at(1)).unwrap();
        assert_eq!(event.case.version(), 1);
        assert_eq!(handler.publisher.published().len(), 1);

        let stored = handler.repository.load(id).unwrap().unwrap();
        assert_eq!(stored.base().deadline(), Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_noop_is_neither_saved_nor_published() {
        let handler = handler(MutationPolicy::default());
        let id = handler.register(&ordinary()).unwrap();
        handler.handle(id, deadline(), &ctx_at(1)).unwrap();

        let again = handler.handle(id, deadline(), &ctx_at(2)).unwrap();
        assert!(again.is_empty());
        assert_eq!(again.case.version(), 1);
        assert_eq!(handler.publisher.published().len(), 1);
    }

    #[test]
    fn test_terminal_guard_is_opt_in() {
        let marked = crate::mutations::set_erroneously_registered(&ordinary(), "dup", &ctx_at(0))
            .unwrap()
            .into_case();

        let lenient = handler(MutationPolicy::default());
        let id = lenient.register(&marked).unwrap();
        assert!(lenient.handle(id, deadline(), &ctx_at(1)).is_ok());

        let strict = handler(MutationPolicy {
            guard_erroneously_registered: true,
            ..MutationPolicy::default()
        });
        let id = strict.register(&marked).unwrap();
        let err = strict.handle(id, deadline(), &ctx_at(1)).unwrap_err();
        assert!(matches!(err, DomainError::TerminalState { .. }));
        assert!(strict.publisher.published().is_empty());
    }

    #[test]
    fn test_strict_flow_refuses_skipping_the_co_signer() {
        let strict = handler(MutationPolicy {
            strict_co_signer_flow: true,
            ..MutationPolicy::default()
        });
        let id = strict.register(&ordinary()).unwrap();
        let err = strict
            .handle(
                id,
                CaseCommand::SetCoSignerFlowState {
                    flow_state: FlowState::Approved,
                },
                &ctx_at(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStateTransition {
                from: "NotSent".to_string(),
                to: "Approved".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_case_is_reported() {
        let handler = handler(MutationPolicy::default());
        let err = handler.handle(EntityId::new(), deadline(), &ctx_at(1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_publish_failure_keeps_committed_change() {
        let repository = InMemoryCaseRepository::new();
        let mut publisher = MockCaseChangedPublisher::new();
        let mut calls = 0;
        publisher.expect_publish().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err("export down".to_string())
            } else {
                Ok(())
            }
        });
        let handler =
            CaseCommandHandler::new(repository.clone(), publisher, MutationPolicy::default());
        let id = handler.register(&ordinary()).unwrap();

        let event = handler.handle(id, deadline(), &ctx_at(1)).unwrap();
        assert_eq!(event.fields(), vec![Field::Deadline]);

        let stored = repository.load(id).unwrap().unwrap();
        assert_eq!(stored.version(), 1);
        assert_eq!(stored.base().deadline(), Some(date(2024, 6, 1)));
        assert_eq!(handler.pending(), vec![event]);

        assert_eq!(handler.flush_pending(), Ok(1));
        assert!(handler.pending().is_empty());
    }

    #[test]
    fn test_flush_reports_events_still_pending() {
        let mut publisher = MockCaseChangedPublisher::new();
        publisher
            .expect_publish()
            .returning(|_| Err("export down".to_string()));
        let handler = CaseCommandHandler::new(
            InMemoryCaseRepository::new(),
            publisher,
            MutationPolicy::default(),
        );
        let id = handler.register(&ordinary()).unwrap();
        handler.handle(id, deadline(), &ctx_at(1)).unwrap();

        let err = handler.flush_pending().unwrap_err();
        assert_eq!(err, DomainError::PublishFailed("export down".to_string()));
        assert_eq!(handler.pending().len(), 1);
    }

    #[test]
    fn test_save_uses_loaded_version() {
        let case = ordinary();
        let id = case.id();
        let mut repository = MockCaseRepository::new();
        repository
            .expect_load()
            .with(eq(id))
            .returning(move |_| Ok(Some(case.clone())));
        repository
            .expect_save()
            .withf(|saved, expected| saved.version() == 1 && *expected == Some(0))
            .times(1)
            .returning(|_, _| Ok(()));

        let handler = CaseCommandHandler::new(
            repository,
            InMemoryCaseChangedPublisher::new(),
            MutationPolicy::default(),
        );
        handler.handle(id, deadline(), &ctx_at(1)).unwrap();
        assert!(handler.pending().is_empty());
    }

    #[test]
    fn test_spawn_stores_follow_up_case() {
        let handler = handler(MutationPolicy::default());
        let done = crate::mutations::set_completed(&ordinary(), Some(t0()), &ctx_at(0))
            .unwrap()
            .into_case();
        let id = handler.register(&done).unwrap();
        let spawned = handler
            .spawn(id, SpawnKind::ReopeningRequest, &ctx_at(1))
            .unwrap();
        assert_eq!(handler.repository.len(), 2);
        assert!(handler.repository.load(spawned.id()).unwrap().is_some());
    }
}

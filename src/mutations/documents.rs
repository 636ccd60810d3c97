// Copyright 2025 Cowboy AI, LLC.

use super::{unchanged, ChangeSet, CommandContext};
use crate::case::{Case, DocumentReference};
use crate::change_record::{text, Field};
use crate::errors::DomainResult;
use crate::events::CaseChanged;

/// Attach a document reference; attaching one already present does nothing
pub fn add_document_reference(
    case: &Case,
    document: DocumentReference,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if case.base.document_references.contains(&document) {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    changes.record(Field::DocumentReference, None, text(Some(&document)));
    next.base.document_references.insert(document);
    Ok(changes.finish(next))
}

/// Detach a document reference; detaching one not present does nothing
pub fn remove_document_reference(
    case: &Case,
    document: &DocumentReference,
    ctx: &CommandContext,
) -> DomainResult<CaseChanged> {
    if !case.base.document_references.contains(document) {
        return Ok(unchanged(case));
    }

    let mut next = case.clone();
    let mut changes = ChangeSet::new(&next, ctx);
    next.base.document_references.shift_remove(document);
    changes.record(Field::DocumentReference, text(Some(document)), None);
    Ok(changes.finish(next))
}

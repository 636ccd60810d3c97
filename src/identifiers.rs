// Copyright 2025 Cowboy AI, LLC.

//! Identifier value objects for people, units and parties

use crate::codes::{PartyIdType, ReferenceCode};
use crate::errors::{DomainError, DomainResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a caseworker, co-signer, reviewer or system actor
///
/// Never blank; the constructor rejects empty or whitespace-only input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub struct Ident(String);

impl Ident {
    /// Create an ident, rejecting blank input
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("ident must not be blank"));
        }
        Ok(Self(value))
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ident {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organisational unit ("enhet") owning an assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub struct UnitId(String);

impl UnitId {
    /// Create a unit id, rejecting blank input
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("unit id must not be blank"));
        }
        Ok(Self(value))
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UnitId {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A party reference: (party-type, party-id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "PartyIdFields")]
pub struct PartyId {
    /// Kind of identifier
    pub kind: PartyIdType,
    /// Identifier value in that kind's numbering scheme
    pub value: String,
}

impl PartyId {
    /// Create a party id, rejecting blank values
    pub fn new(kind: PartyIdType, value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("party id must not be blank"));
        }
        Ok(Self { kind, value })
    }

    /// Person identified by national identity number
    pub fn person(value: impl Into<String>) -> DomainResult<Self> {
        Self::new(PartyIdType::Person, value)
    }

    /// Organisation identified by organisation number
    pub fn organisation(value: impl Into<String>) -> DomainResult<Self> {
        Self::new(PartyIdType::Organisation, value)
    }
}

#[derive(Deserialize)]
struct PartyIdFields {
    kind: PartyIdType,
    value: String,
}

impl TryFrom<PartyIdFields> for PartyId {
    type Error = DomainError;

    fn try_from(fields: PartyIdFields) -> DomainResult<Self> {
        Self::new(fields.kind, fields.value)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.code(), self.value)
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Command handler configuration
//!
//! Mutation commands enforce only structural validity. The guards in
//! [`MutationPolicy`] are opt-in checks applied by
//! [`crate::service::CaseCommandHandler`] before a command runs.

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Guards applied at the transaction boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MutationPolicy {
    /// Refuse every command on an erroneously registered case
    pub guard_erroneously_registered: bool,
    /// Check co-signer and reviewer flow transitions against the flow machine
    pub strict_co_signer_flow: bool,
    /// Upper bound on partial treatments per appeal case
    pub max_partial_treatments: u8,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            guard_erroneously_registered: false,
            strict_co_signer_flow: false,
            max_partial_treatments: 2,
        }
    }
}

impl MutationPolicy {
    /// Parse a policy from JSON; missing keys take their defaults
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let policy: Self = serde_json::from_str(json).context("invalid mutation policy JSON")?;
        if policy.max_partial_treatments == 0 {
            anyhow::bail!("max_partial_treatments must be at least 1");
        }
        Ok(policy)
    }

    /// Read a policy from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading mutation policy from {}", path.display()))?;
        let policy = Self::from_json_str(&text)
            .with_context(|| format!("parsing mutation policy from {}", path.display()))?;
        info!(
            path = %path.display(),
            guard_erroneously_registered = policy.guard_erroneously_registered,
            strict_co_signer_flow = policy.strict_co_signer_flow,
            max_partial_treatments = policy.max_partial_treatments,
            "mutation policy loaded"
        );
        Ok(policy)
    }
}

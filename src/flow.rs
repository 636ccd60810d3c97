// Copyright 2025 Cowboy AI, LLC.

//! Co-signer and reviewer flow state (Mealy)
//!
//! ```text
//!   NotSent --Send--> Sent --Return--> Returned --Send--> Sent
//!                      |
//!                      +---Approve---> Approved
//!   (any) --Reset--> NotSent
//! ```

use crate::codes::ReferenceCode;
use crate::state_machine::{MealyStateTransitions, State, TransitionInput};
use serde::{Deserialize, Serialize};

/// Where a decision is in its co-signing (or legality review) round trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlowState {
    /// Not sent to the second reader
    #[default]
    NotSent,
    /// With the second reader
    Sent,
    /// Returned to the caseworker
    Returned,
    /// Approved by the second reader
    Approved,
}

impl ReferenceCode for FlowState {
    const KIND: &'static str = "flow state";

    fn all() -> &'static [Self] {
        &[
            FlowState::NotSent,
            FlowState::Sent,
            FlowState::Returned,
            FlowState::Approved,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            FlowState::NotSent => "NOT_SENT",
            FlowState::Sent => "SENT",
            FlowState::Returned => "RETURNED",
            FlowState::Approved => "APPROVED",
        }
    }
}

crate::codes::code_serde!(FlowState);

impl State for FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::NotSent => "NotSent",
            FlowState::Sent => "Sent",
            FlowState::Returned => "Returned",
            FlowState::Approved => "Approved",
        }
    }
}

/// Inputs that drive flow transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowInput {
    /// Hand the decision to the second reader
    Send,
    /// Second reader hands it back
    Return,
    /// Second reader approves
    Approve,
    /// Start over
    Reset,
}

impl TransitionInput for FlowInput {
    fn description(&self) -> String {
        format!("{self:?}")
    }
}

impl FlowState {
    /// Whether any input moves this state to `target`
    pub fn can_reach(&self, target: FlowState) -> bool {
        *self == target
            || [
                FlowInput::Send,
                FlowInput::Return,
                FlowInput::Approve,
                FlowInput::Reset,
            ]
            .iter()
            .any(|input| self.can_transition_to(&target, input))
    }
}

impl MealyStateTransitions for FlowState {
    type Input = FlowInput;

    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool {
        self.valid_transitions(input).contains(target)
    }

    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self> {
        use FlowInput as I;
        use FlowState as S;
        match (*self, input) {
            (S::NotSent, I::Send) | (S::Returned, I::Send) => vec![S::Sent],
            (S::Sent, I::Return) => vec![S::Returned],
            (S::Sent, I::Approve) => vec![S::Approved],
            (_, I::Reset) => vec![S::NotSent],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_second_reader() {
        use FlowInput as I;
        use FlowState as S;

        assert!(S::NotSent.can_transition_to(&S::Sent, &I::Send));
        assert!(S::Sent.can_transition_to(&S::Returned, &I::Return));
        assert!(S::Returned.can_transition_to(&S::Sent, &I::Send));
        assert!(S::Sent.can_transition_to(&S::Approved, &I::Approve));
    }

    #[test]
    fn test_invalid_paths() {
        use FlowInput as I;
        use FlowState as S;

        assert!(!S::NotSent.can_transition_to(&S::Returned, &I::Return));
        assert!(!S::Approved.can_transition_to(&S::Sent, &I::Send));
        assert!(S::Approved.valid_transitions(&I::Approve).is_empty());
        assert!(!S::NotSent.can_reach(S::Approved));
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&FlowState::NotSent).unwrap();
        assert_eq!(json, "\"NOT_SENT\"");
        let back: FlowState = serde_json::from_str("\"RETURNED\"").unwrap();
        assert_eq!(back, FlowState::Returned);
        assert!(serde_json::from_str::<FlowState>("\"Returned\"").is_err());
    }

    #[test]
    fn test_reset_is_always_allowed() {
        for state in FlowState::all() {
            assert!(state.can_reach(FlowState::NotSent));
        }
    }
}

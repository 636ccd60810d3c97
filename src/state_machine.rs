// Copyright 2025 Cowboy AI, LLC.

//! State machine traits
//!
//! Case status is never stored; it is derived from the case's fields and
//! exposed as a [`State`]. Flow states for co-signing and legality review
//! are small Mealy machines whose transitions depend on the current state
//! and the requested input.
//!
//! Mutation commands do not consult these machines. They are used by
//! callers, and by the command handler when strict flow checking is enabled.

use std::fmt::Debug;

/// Input to a state machine transition
pub trait TransitionInput: Debug + Clone + Send + Sync {
    /// Get a description of this input for logging
    fn description(&self) -> String;
}

/// Trait for types that can be used as states in a state machine
pub trait State: Debug + Clone + PartialEq + Eq + Send + Sync {
    /// Get the name of this state for logging/debugging
    fn name(&self) -> &'static str;

    /// Check if this is a terminal state
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Mealy Machine: the next state depends on current state AND input
///
/// Transitions carry no output of their own; the change record written by
/// the mutation command is the observable effect.
pub trait MealyStateTransitions: State {
    /// The input type for transitions
    type Input: TransitionInput;

    /// Check if a transition is valid given the input
    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool;

    /// Get valid transitions for a given input
    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self>;
}

//! Error types for the solver and for file loading.

use crate::{Action, State};
use thiserror::Error;

/// Errors that abort a solve. No partial results are returned.
#[derive(Error, Debug)]
pub enum SolveError {
    /// Start or goal state lies on an obstacle or outside the grid
    #[error("invalid state {state}: {reason}")]
    InvalidState { state: State, reason: String },

    /// Transition model returned something that is not a distribution over admissible states
    #[error("malformed transition distribution for {state} under {action}: {reason}")]
    MalformedDistribution {
        state: State,
        action: Action,
        reason: String,
    },

    /// Reward model returned a vector not aligned with the successors
    #[error("reward model returned {got} rewards for {expected} successors")]
    MalformedRewards { expected: usize, got: usize },

    /// Reward model returned NaN or an infinite reward
    #[error("non-finite reward {reward} for entering {successor}")]
    NonFiniteReward { successor: State, reward: f64 },

    /// Policy handed to evaluation has no action for a non-goal state
    #[error("policy assigns no action to {state}")]
    MissingAction { state: State },

    /// A single policy evaluation ran out of sweeps
    #[error("policy evaluation did not converge within {sweeps} sweeps (last delta {delta})")]
    NonConvergence { sweeps: usize, delta: f64 },

    /// Solver configured with unusable parameters
    #[error("invalid solver parameter: {0}")]
    InvalidParameter(String),
}

impl SolveError {
    pub fn invalid_state(state: State, reason: impl Into<String>) -> Self {
        SolveError::InvalidState {
            state,
            reason: reason.into(),
        }
    }

    pub fn malformed(state: State, action: Action, reason: impl Into<String>) -> Self {
        SolveError::MalformedDistribution {
            state,
            action,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading layouts, configuration or saved solutions
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid grid layout: {0}")]
    Layout(String),
}

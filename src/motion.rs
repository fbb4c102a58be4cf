//! Stochastic motion models: turn an intended action into a distribution
//! over successor cells.

use crate::error::SolveError;
use crate::{Action, Grid, State};

/// Allowed deviation of a probability sum from 1
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Successor distribution for one (state, action) pair.
/// `successors[i]` is reached with probability `probabilities[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub successors: Vec<State>,
    pub probabilities: Vec<f64>,
}

impl Outcome {
    pub fn new(successors: Vec<State>, probabilities: Vec<f64>) -> Self {
        Outcome {
            successors,
            probabilities,
        }
    }

    /// Probability 1 of landing on `state`
    pub fn certain(state: State) -> Self {
        Self::new(vec![state], vec![1.0])
    }

    /// Check that this is a probability distribution. Never normalises.
    pub fn validate(&self, state: State, action: Action) -> Result<(), SolveError> {
        if self.successors.len() != self.probabilities.len() {
            return Err(SolveError::malformed(
                state,
                action,
                format!(
                    "{} successors but {} probabilities",
                    self.successors.len(),
                    self.probabilities.len()
                ),
            ));
        }
        if self.successors.is_empty() {
            return Err(SolveError::malformed(state, action, "no successors"));
        }
        if let Some(p) = self
            .probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(SolveError::malformed(
                state,
                action,
                format!("invalid probability {}", p),
            ));
        }

        let total: f64 = self.probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SolveError::malformed(
                state,
                action,
                format!("probabilities sum to {}", total),
            ));
        }
        Ok(())
    }
}

/// Maps (state, action) to a distribution over successors.
///
/// Implementations must be pure: the same query always yields the same outcome.
pub trait TransitionModel {
    fn transition(&self, state: State, action: Action, grid: &Grid) -> Outcome;
}

impl<M: TransitionModel + ?Sized> TransitionModel for Box<M> {
    fn transition(&self, state: State, action: Action, grid: &Grid) -> Outcome {
        (**self).transition(state, action, grid)
    }
}

/// Moves to the intended cell with probability 1; stays put when it is blocked
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicMotion;

impl TransitionModel for DeterministicMotion {
    fn transition(&self, state: State, action: Action, grid: &Grid) -> Outcome {
        let next = state.offset(action.dx, action.dy);
        if grid.is_blocked(next) {
            Outcome::certain(state)
        } else {
            Outcome::certain(next)
        }
    }
}

/// Slippery motion: the intended direction with probability `1 - drift`,
/// each perpendicular direction with `drift / 2`.
/// A blocked successor collapses onto the current state.
#[derive(Debug, Clone, Copy)]
pub struct DriftMotion {
    pub drift: f64,
}

impl DriftMotion {
    pub const DEFAULT_DRIFT: f64 = 0.2;

    pub fn new(drift: f64) -> Self {
        DriftMotion { drift }
    }
}

impl Default for DriftMotion {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRIFT)
    }
}

impl TransitionModel for DriftMotion {
    fn transition(&self, state: State, action: Action, grid: &Grid) -> Outcome {
        let [left, right] = action.perpendicular();
        let successors = [action, left, right]
            .iter()
            .map(|a| {
                let next = state.offset(a.dx, a.dy);
                if grid.is_blocked(next) {
                    state
                } else {
                    next
                }
            })
            .collect();
        let side = self.drift / 2.0;

        Outcome::new(successors, vec![1.0 - self.drift, side, side])
    }
}

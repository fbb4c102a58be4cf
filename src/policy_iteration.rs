//! Policy iteration for stochastic shortest-path problems on a grid.
//!
//! The solver alternates two phases until the policy stops changing:
//!
//! - **Evaluation**: repeated sweeps of Bellman expectation backups for the
//!   current policy. Updates are written into the value table as soon as they
//!   are computed, so later states in a sweep read the new values of earlier
//!   ones (Gauss–Seidel). Sweeps stop once the largest change in a sweep is at
//!   most `epsilon`.
//! - **Improvement**: a fresh greedy policy, taking for every state the first
//!   action (in action-set order) with the highest Q-value.
//!
//! Goal states stay in the value table at 0 and never receive an action.

use crate::error::SolveError;
use crate::motion::TransitionModel;
use crate::reward::RewardModel;
use crate::{Action, ActionSet, Grid, State};
use log::{debug, info, log_enabled, Level};
use std::collections::{BTreeMap, BTreeSet};

/// State → value, iterated in state order
pub type ValueFunction = BTreeMap<State, f64>;

/// State → chosen action, for every non-goal admissible state
pub type Policy = BTreeMap<State, Action>;

/// Convergence parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Evaluation stops once a sweep changes no value by more than this
    pub epsilon: f64,
    /// Discount factor, in [0, 1)
    pub discount: f64,
    /// Upper bound on sweeps per evaluation; `None` is unbounded
    pub max_sweeps: Option<usize>,
}

impl SolverParams {
    pub const DEFAULT_EPSILON: f64 = 0.001;
    pub const DEFAULT_DISCOUNT: f64 = 0.9;

    pub fn new(epsilon: f64, discount: f64) -> Self {
        SolverParams {
            epsilon,
            discount,
            max_sweeps: None,
        }
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = Some(max_sweeps);
        self
    }

    pub fn validate(&self) -> Result<(), SolveError> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SolveError::InvalidParameter(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(0.0..1.0).contains(&self.discount) {
            return Err(SolveError::InvalidParameter(format!(
                "discount must be in [0, 1), got {}",
                self.discount
            )));
        }
        if self.max_sweeps == Some(0) {
            return Err(SolveError::InvalidParameter(
                "max_sweeps must allow at least one sweep".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EPSILON, Self::DEFAULT_DISCOUNT)
    }
}

/// Result of one policy evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub sweeps: usize,
    /// Largest value change of each sweep, in order
    pub deltas: Vec<f64>,
}

/// A converged value function and policy
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub value: ValueFunction,
    pub policy: Policy,
    /// Outer (evaluate + improve) iterations, including the final one that
    /// confirmed the policy was stable
    pub iterations: usize,
    /// Evaluation sweeps summed over all iterations
    pub sweeps: usize,
}

impl Solution {
    pub fn action(&self, state: State) -> Option<Action> {
        self.policy.get(&state).copied()
    }

    pub fn value_of(&self, state: State) -> Option<f64> {
        self.value.get(&state).copied()
    }
}

/// Policy-iteration solver over a fixed grid, action set and models
pub struct PolicyIteration<T, R> {
    grid: Grid,
    actions: ActionSet,
    transition: T,
    reward: R,
    params: SolverParams,
    lose: BTreeSet<State>,
}

impl<T: TransitionModel, R: RewardModel> PolicyIteration<T, R> {
    pub fn new(
        grid: Grid,
        actions: ActionSet,
        transition: T,
        reward: R,
        params: SolverParams,
    ) -> Result<Self, SolveError> {
        params.validate()?;
        if actions.is_empty() {
            return Err(SolveError::InvalidParameter(
                "action set is empty".to_string(),
            ));
        }

        let lose = grid.lose_states();
        Ok(PolicyIteration {
            grid,
            actions,
            transition,
            reward,
            params,
            lose,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Run policy iteration from the all-zero value function and the
    /// first-action policy until the policy is stable.
    pub fn solve(&self, start: State, goals: &[State]) -> Result<Solution, SolveError> {
        self.check_state(start, "start")?;
        for &goal in goals {
            self.check_state(goal, "goal")?;
        }
        let goals: BTreeSet<State> = goals.iter().copied().collect();

        let (mut value, mut policy) = self.initial_tables(&goals);
        let mut iterations = 0;
        let mut sweeps = 0;

        loop {
            iterations += 1;

            let evaluation = self.evaluate(&policy, &mut value, &goals)?;
            sweeps += evaluation.sweeps;

            let improved = self.improve(&value, &goals)?;

            if log_enabled!(Level::Debug) {
                let changed = improved
                    .iter()
                    .filter(|(s, a)| policy.get(*s) != Some(*a))
                    .count();
                debug!(
                    "iteration {}: {} sweeps, final delta {:.6}, {} actions changed",
                    iterations,
                    evaluation.sweeps,
                    evaluation.deltas.last().copied().unwrap_or(0.0),
                    changed
                );
            }

            let stable = improved == policy;
            policy = improved;
            if stable {
                break;
            }
        }

        info!("starting state: {}", start);
        info!(
            "goal states: {}",
            goals.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(", ")
        );
        info!("condition for convergence: {}", self.params.epsilon);
        info!("discount factor: {}", self.params.discount);
        info!("iteration times: {} ({} evaluation sweeps)", iterations, sweeps);

        Ok(Solution {
            value,
            policy,
            iterations,
            sweeps,
        })
    }

    /// Value 0 for every admissible state; the first action for every non-goal state
    pub fn initial_tables(&self, goals: &BTreeSet<State>) -> (ValueFunction, Policy) {
        let mut value = ValueFunction::new();
        let mut policy = Policy::new();

        if let Some(first) = self.actions.first() {
            for state in self.grid.states() {
                value.insert(state, 0.0);
                if !goals.contains(&state) {
                    policy.insert(state, first);
                }
            }
        }

        (value, policy)
    }

    /// Evaluate `policy` in place on `value` until a sweep changes no
    /// non-goal value by more than epsilon.
    pub fn evaluate(
        &self,
        policy: &Policy,
        value: &mut ValueFunction,
        goals: &BTreeSet<State>,
    ) -> Result<Evaluation, SolveError> {
        let states: Vec<State> = value
            .keys()
            .filter(|s| !goals.contains(*s))
            .copied()
            .collect();

        let mut deltas = Vec::new();
        loop {
            let mut delta: f64 = 0.0;

            for &state in &states {
                let action = *policy
                    .get(&state)
                    .ok_or(SolveError::MissingAction { state })?;
                let q = self.q_value(state, action, value, goals)?;

                if let Some(v) = value.get_mut(&state) {
                    let diff = (*v - q).abs();
                    *v = q;
                    if diff > 0.0 {
                        delta = delta.max(diff);
                    }
                }
            }

            deltas.push(delta);
            if delta <= self.params.epsilon {
                break;
            }
            if let Some(max) = self.params.max_sweeps {
                if deltas.len() >= max {
                    return Err(SolveError::NonConvergence {
                        sweeps: deltas.len(),
                        delta,
                    });
                }
            }
        }

        Ok(Evaluation {
            sweeps: deltas.len(),
            deltas,
        })
    }

    /// Build a new greedy policy from a fixed value function.
    /// Ties go to the earliest action in the action set.
    pub fn improve(
        &self,
        value: &ValueFunction,
        goals: &BTreeSet<State>,
    ) -> Result<Policy, SolveError> {
        let mut policy = Policy::new();

        for &state in value.keys() {
            if goals.contains(&state) {
                continue;
            }

            let mut best: Option<(Action, f64)> = None;
            for &action in self.actions.iter() {
                let q = self.q_value(state, action, value, goals)?;
                let better = match best {
                    None => true,
                    Some((_, best_q)) => q > best_q,
                };
                if better {
                    best = Some((action, q));
                }
            }

            if let Some((action, _)) = best {
                policy.insert(state, action);
            }
        }

        Ok(policy)
    }

    /// Expected discounted return of taking `action` in `state` and then
    /// collecting `value`: Σ p_i (r_i + γ v(s_i)).
    pub fn q_value(
        &self,
        state: State,
        action: Action,
        value: &ValueFunction,
        goals: &BTreeSet<State>,
    ) -> Result<f64, SolveError> {
        let outcome = self.transition.transition(state, action, &self.grid);
        outcome.validate(state, action)?;

        let rewards = self.reward.reward(&outcome.successors, goals, &self.lose);
        if rewards.len() != outcome.successors.len() {
            return Err(SolveError::MalformedRewards {
                expected: outcome.successors.len(),
                got: rewards.len(),
            });
        }
        // NaN would slip past the delta and argmax comparisons
        if let Some((&successor, &reward)) = outcome
            .successors
            .iter()
            .zip(&rewards)
            .find(|(_, r)| !r.is_finite())
        {
            return Err(SolveError::NonFiniteReward { successor, reward });
        }

        let mut q = 0.0;
        for ((next, p), r) in outcome
            .successors
            .iter()
            .zip(&outcome.probabilities)
            .zip(&rewards)
        {
            let v = value.get(next).ok_or_else(|| {
                SolveError::malformed(
                    state,
                    action,
                    format!("successor {} is not an admissible state", next),
                )
            })?;
            q += p * (r + self.params.discount * v);
        }

        Ok(q)
    }

    fn check_state(&self, state: State, role: &str) -> Result<(), SolveError> {
        if !self.grid.in_bounds(state.x, state.y) {
            return Err(SolveError::invalid_state(
                state,
                format!("{} lies outside the {}x{} grid", role, self.grid.cols, self.grid.rows),
            ));
        }
        if self.grid.is_blocked(state) {
            return Err(SolveError::invalid_state(
                state,
                format!("{} lies on an obstacle", role),
            ));
        }
        Ok(())
    }
}

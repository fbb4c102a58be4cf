pub mod action;
pub mod config;
pub mod error;
pub mod grid;
pub mod motion;
pub mod policy_iteration;
pub mod reward;
pub mod simulation;
pub mod solution;
pub mod state;

pub use action::{Action, ActionSet};
pub use error::{LoadError, SolveError};
pub use grid::{Cell, Grid, Layout};
pub use motion::{DeterministicMotion, DriftMotion, Outcome, TransitionModel};
pub use policy_iteration::{Policy, PolicyIteration, Solution, SolverParams, ValueFunction};
pub use reward::{RewardModel, TerminalReward};
pub use simulation::{format_path, simulate, Rollout};
pub use state::State;

#![allow(dead_code)]

use gridpolicy::{
    ActionSet, DeterministicMotion, DriftMotion, Grid, PolicyIteration, Solution, SolverParams,
    State, TerminalReward,
};
use std::collections::BTreeSet;

/// Deterministic moves, -1 per step, 0 for entering a goal
pub fn unit_step_solver(grid: Grid) -> PolicyIteration<DeterministicMotion, TerminalReward> {
    PolicyIteration::new(
        grid,
        ActionSet::four_connected(),
        DeterministicMotion,
        TerminalReward::unit_step(),
        SolverParams::default(),
    )
    .expect("valid solver")
}

/// Drifting moves (0.2) with the same unit-step rewards
pub fn drift_solver(grid: Grid) -> PolicyIteration<DriftMotion, TerminalReward> {
    PolicyIteration::new(
        grid,
        ActionSet::four_connected(),
        DriftMotion::default(),
        TerminalReward::unit_step(),
        SolverParams::default(),
    )
    .expect("valid solver")
}

/// The 51x31 reference world with drift and goal/lose rewards of +-10
pub fn reference_solver() -> PolicyIteration<DriftMotion, TerminalReward> {
    PolicyIteration::new(
        Grid::reference_map(),
        ActionSet::four_connected(),
        DriftMotion::default(),
        TerminalReward::default(),
        SolverParams::default(),
    )
    .expect("valid solver")
}

pub fn reference_goals() -> Vec<State> {
    vec![State::new(49, 5), State::new(49, 25)]
}

pub fn goal_set(goals: &[State]) -> BTreeSet<State> {
    goals.iter().copied().collect()
}

/// Render the policy as arrows: ■ obstacle, G goal, x lose
pub fn visualize_policy(grid: &Grid, solution: &Solution, goals: &[State]) -> String {
    let mut result = String::new();
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let s = State::new(x, y);
            let symbol = if goals.contains(&s) {
                'G'
            } else if grid.is_blocked(s) {
                '■'
            } else if grid.is_lose(s) {
                'x'
            } else if let Some(a) = solution.action(s) {
                a.arrow()
            } else {
                '?'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

use crate::State;
use std::collections::BTreeSet;

/// Assigns a reward to each successor of a transition.
///
/// The returned vector is aligned with `successors`. Rewards must be bounded
/// for policy evaluation to converge.
pub trait RewardModel {
    fn reward(
        &self,
        successors: &[State],
        goals: &BTreeSet<State>,
        lose: &BTreeSet<State>,
    ) -> Vec<f64>;
}

/// Reward depends only on the kind of cell entered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalReward {
    pub goal: f64,
    pub lose: f64,
    pub step: f64,
}

impl TerminalReward {
    pub fn new(goal: f64, lose: f64, step: f64) -> Self {
        TerminalReward { goal, lose, step }
    }

    /// -1 per move, nothing for reaching the goal
    pub fn unit_step() -> Self {
        Self::new(0.0, -10.0, -1.0)
    }
}

impl Default for TerminalReward {
    fn default() -> Self {
        Self::new(10.0, -10.0, 0.0)
    }
}

impl RewardModel for TerminalReward {
    fn reward(
        &self,
        successors: &[State],
        goals: &BTreeSet<State>,
        lose: &BTreeSet<State>,
    ) -> Vec<f64> {
        successors
            .iter()
            .map(|s| {
                if goals.contains(s) {
                    self.goal
                } else if lose.contains(s) {
                    self.lose
                } else {
                    self.step
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_takes_precedence_over_lose() {
        let goal = State::new(1, 0);
        let goals = BTreeSet::from([goal]);
        let lose = BTreeSet::from([goal, State::new(2, 0)]);

        let rewards = TerminalReward::default().reward(
            &[State::new(0, 0), goal, State::new(2, 0)],
            &goals,
            &lose,
        );
        assert_eq!(rewards, vec![0.0, 10.0, -10.0]);
    }
}

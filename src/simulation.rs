use crate::policy_iteration::Policy;
use crate::{Grid, State};
use log::warn;
use std::collections::BTreeSet;

/// Default bound on steps for a single rollout
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Trace of following a policy from a start state
#[derive(Debug, Clone, PartialEq)]
pub struct Rollout {
    /// Cells visited, excluding the start and the goal reached
    pub path: Vec<State>,
    /// Attempted moves into obstacles
    pub collisions: usize,
    pub reached_goal: bool,
}

/// Follow `policy` from `start` using each action's intended displacement.
///
/// A move into an obstacle is a collision: it is logged and counted and the
/// position is unchanged. The rollout ends at a goal, at a state the policy
/// has no action for, or after `max_steps` moves.
pub fn simulate(
    grid: &Grid,
    policy: &Policy,
    start: State,
    goals: &BTreeSet<State>,
    max_steps: usize,
) -> Rollout {
    let mut rollout = Rollout {
        path: Vec::new(),
        collisions: 0,
        reached_goal: goals.contains(&start),
    };

    let mut current = start;
    let mut steps = 0;
    while !rollout.reached_goal && steps < max_steps {
        steps += 1;

        let Some(action) = policy.get(&current) else {
            warn!("No action for {}, stopping rollout", current);
            break;
        };

        let next = current.offset(action.dx, action.dy);
        if grid.is_blocked(next) {
            warn!("Collision! {} -> {} blocked", current, next);
            rollout.collisions += 1;
            continue;
        }

        current = next;
        if goals.contains(&current) {
            rollout.reached_goal = true;
        } else {
            rollout.path.push(current);
        }
    }

    rollout
}

/// Format a path as "(x,y) -> (x,y) -> ..."
pub fn format_path(path: &[State]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[test]
    fn test_rollout_reaches_goal() {
        let grid = Grid::new(3, 1);
        let policy = Policy::from([
            (State::new(0, 0), Action::RIGHT),
            (State::new(1, 0), Action::RIGHT),
        ]);
        let goals = BTreeSet::from([State::new(2, 0)]);

        let rollout = simulate(&grid, &policy, State::new(0, 0), &goals, 10);
        assert!(rollout.reached_goal);
        assert_eq!(rollout.path, vec![State::new(1, 0)]);
        assert_eq!(rollout.collisions, 0);
    }

    #[test]
    fn test_collision_does_not_abort() {
        let grid = Grid::with_obstacles(3, 1, &[State::new(1, 0)]);
        let policy = Policy::from([(State::new(0, 0), Action::RIGHT)]);
        let goals = BTreeSet::from([State::new(2, 0)]);

        let rollout = simulate(&grid, &policy, State::new(0, 0), &goals, 5);
        assert!(!rollout.reached_goal);
        assert_eq!(rollout.collisions, 5);
        assert!(rollout.path.is_empty());
    }

    #[test]
    fn test_start_on_goal() {
        let grid = Grid::new(2, 1);
        let goals = BTreeSet::from([State::new(0, 0)]);
        let rollout = simulate(&grid, &Policy::new(), State::new(0, 0), &goals, 5);
        assert!(rollout.reached_goal);
        assert!(rollout.path.is_empty());
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "No path");
        assert_eq!(
            format_path(&[State::new(1, 2), State::new(1, 3)]),
            "(1,2) -> (1,3)"
        );
    }
}

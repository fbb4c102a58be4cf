use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell of the grid world, used as an MDP state.
///
/// Ordering is x-major then y. Value and policy tables iterate in this order,
/// which fixes the sweep order of policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub x: i32,
    pub y: i32,
}

impl State {
    pub fn new(x: i32, y: i32) -> Self {
        State { x, y }
    }

    /// Manhattan distance to another state
    pub fn manhattan(&self, other: &State) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The state reached by applying a displacement, ignoring obstacles
    pub fn offset(&self, dx: i32, dy: i32) -> State {
        State::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for State {
    fn from((x, y): (i32, i32)) -> Self {
        State::new(x, y)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_order_is_x_major() {
        let mut states = vec![State::new(1, 0), State::new(0, 2), State::new(0, 1), State::new(1, -1)];
        states.sort();
        assert_eq!(
            states,
            vec![State::new(0, 1), State::new(0, 2), State::new(1, -1), State::new(1, 0)]
        );
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(State::new(0, 0).manhattan(&State::new(2, 2)), 4);
        assert_eq!(State::new(3, 1).manhattan(&State::new(1, 4)), 5);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A motion primitive: the displacement the agent intends to make
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub dx: i32,
    pub dy: i32,
}

impl Action {
    pub const RIGHT: Action = Action { dx: 1, dy: 0 };
    pub const LEFT: Action = Action { dx: -1, dy: 0 };
    pub const DOWN: Action = Action { dx: 0, dy: 1 };
    pub const UP: Action = Action { dx: 0, dy: -1 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Action { dx, dy }
    }

    /// The two directions perpendicular to this one, as used by drift.
    ///
    /// For (dx, dy) these are (-dy, dx) and (dy, -dx).
    pub fn perpendicular(&self) -> [Action; 2] {
        [Action::new(-self.dy, self.dx), Action::new(self.dy, -self.dx)]
    }

    /// Single-character arrow for console output
    pub fn arrow(&self) -> char {
        match (self.dx.signum(), self.dy.signum()) {
            (1, 0) => '→',
            (-1, 0) => '←',
            (0, 1) => '↓',
            (0, -1) => '↑',
            (0, 0) => '·',
            _ => '*',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.dx, self.dy)
    }
}

/// Ordered set of actions shared by every state.
///
/// The order matters: the initial policy uses the first action and ties in
/// policy improvement go to the earliest action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSet {
    actions: Vec<Action>,
}

impl ActionSet {
    pub fn new(actions: Vec<Action>) -> Self {
        ActionSet { actions }
    }

    /// Right, Left, Down, Up
    pub fn four_connected() -> Self {
        Self::new(vec![Action::RIGHT, Action::LEFT, Action::DOWN, Action::UP])
    }

    pub fn first(&self) -> Option<Action> {
        self.actions.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::four_connected()
    }
}

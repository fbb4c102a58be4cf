use crate::error::LoadError;
use crate::policy_iteration::{Policy, Solution, SolverParams, ValueFunction};
use crate::{Action, State};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Saved solution: the parameters it was solved with plus the value and
/// policy tables as flat entry lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub start: State,
    pub goals: Vec<State>,
    pub epsilon: f64,
    pub discount: f64,
    pub iterations: usize,
    pub sweeps: usize,
    pub values: Vec<ValueEntry>,
    pub policy: Vec<PolicyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    pub x: i32,
    pub y: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
}

impl SolutionRecord {
    /// Create a record from a converged solution
    pub fn from_solution(
        solution: &Solution,
        start: State,
        goals: &[State],
        params: &SolverParams,
    ) -> Self {
        let values = solution
            .value
            .iter()
            .map(|(s, &value)| ValueEntry {
                x: s.x,
                y: s.y,
                value,
            })
            .collect();

        let policy = solution
            .policy
            .iter()
            .map(|(s, a)| PolicyEntry {
                x: s.x,
                y: s.y,
                dx: a.dx,
                dy: a.dy,
            })
            .collect();

        SolutionRecord {
            start,
            goals: goals.to_vec(),
            epsilon: params.epsilon,
            discount: params.discount,
            iterations: solution.iterations,
            sweeps: solution.sweeps,
            values,
            policy,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn value_function(&self) -> ValueFunction {
        self.values
            .iter()
            .map(|e| (State::new(e.x, e.y), e.value))
            .collect()
    }

    pub fn policy(&self) -> Policy {
        self.policy
            .iter()
            .map(|e| (State::new(e.x, e.y), Action::new(e.dx, e.dy)))
            .collect()
    }

    /// Rebuild the in-memory solution
    pub fn to_solution(&self) -> Solution {
        Solution {
            value: self.value_function(),
            policy: self.policy(),
            iterations: self.iterations,
            sweeps: self.sweeps,
        }
    }

    /// Smallest and largest stored value
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.values.iter().map(|e| e.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

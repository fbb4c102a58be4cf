use crate::error::LoadError;
use crate::policy_iteration::SolverParams;
use crate::reward::TerminalReward;
use crate::simulation::DEFAULT_MAX_STEPS;
use crate::State;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub reward: RewardConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_discount")]
    pub discount: f64,
    /// Sweeps allowed per policy evaluation; absent means unbounded
    #[serde(default)]
    pub max_sweeps: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Text layout file; empty selects the built-in reference map
    #[serde(default)]
    pub layout_path: String,
}

#[derive(Debug, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_drift")]
    pub drift: f64,
}

#[derive(Debug, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_goal_reward")]
    pub goal: f64,
    #[serde(default = "default_lose_reward")]
    pub lose: f64,
    #[serde(default)]
    pub step: f64,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_start")]
    pub start: (i32, i32),
    #[serde(default = "default_goals")]
    pub goals: Vec<(i32, i32)>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_save_solution")]
    pub save_solution: bool,
    #[serde(default = "default_solution_path")]
    pub solution_path: String,
}

// Default values
fn default_epsilon() -> f64 { SolverParams::DEFAULT_EPSILON }
fn default_discount() -> f64 { SolverParams::DEFAULT_DISCOUNT }
fn default_drift() -> f64 { 0.2 }
fn default_goal_reward() -> f64 { 10.0 }
fn default_lose_reward() -> f64 { -10.0 }
fn default_start() -> (i32, i32) { (5, 5) }
fn default_goals() -> Vec<(i32, i32)> { vec![(49, 5), (49, 25)] }
fn default_max_steps() -> usize { DEFAULT_MAX_STEPS }
fn default_save_solution() -> bool { true }
fn default_solution_path() -> String { "solution.json".to_string() }

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            discount: default_discount(),
            max_sweeps: None,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            layout_path: String::new(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drift: default_drift(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            goal: default_goal_reward(),
            lose: default_lose_reward(),
            step: 0.0,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            goals: default_goals(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            save_solution: default_save_solution(),
            solution_path: default_solution_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            grid: GridConfig::default(),
            motion: MotionConfig::default(),
            reward: RewardConfig::default(),
            scenario: ScenarioConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or use defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default configuration", path.display());
            return Config::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    /// Strict variant of [`Config::load`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            epsilon: self.solver.epsilon,
            discount: self.solver.discount,
            max_sweeps: self.solver.max_sweeps,
        }
    }

    pub fn reward_model(&self) -> TerminalReward {
        TerminalReward::new(self.reward.goal, self.reward.lose, self.reward.step)
    }

    pub fn start(&self) -> State {
        self.scenario.start.into()
    }

    pub fn goals(&self) -> Vec<State> {
        self.scenario.goals.iter().map(|&g| g.into()).collect()
    }
}

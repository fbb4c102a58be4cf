use gridpolicy::config::{Config, DEFAULT_CONFIG_PATH};
use gridpolicy::solution::SolutionRecord;
use gridpolicy::{
    format_path, simulate, ActionSet, DeterministicMotion, DriftMotion, Grid, Layout,
    PolicyIteration, State, TransitionModel,
};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: gridpolicy [config.toml]
    let args: Vec<String> = std::env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);
    let config = Config::load(config_path);

    let layout = if config.grid.layout_path.is_empty() {
        Layout {
            grid: Grid::reference_map(),
            start: None,
            goals: Vec::new(),
        }
    } else {
        info!("Loading layout from {}", config.grid.layout_path);
        Grid::load_layout(&config.grid.layout_path)?
    };

    info!(
        "Grid {}x{}: {} obstacles, {} lose cells",
        layout.grid.cols,
        layout.grid.rows,
        layout.grid.obstacles().len(),
        layout.grid.lose_states().len()
    );

    let start = layout.start.unwrap_or_else(|| config.start());
    let goals = if layout.goals.is_empty() {
        config.goals()
    } else {
        layout.goals.clone()
    };

    let transition: Box<dyn TransitionModel> = if config.motion.drift > 0.0 {
        Box::new(DriftMotion::new(config.motion.drift))
    } else {
        Box::new(DeterministicMotion)
    };

    let params = config.solver_params();
    let solver = PolicyIteration::new(
        layout.grid,
        ActionSet::four_connected(),
        transition,
        config.reward_model(),
        params,
    )?;

    let solution = solver.solve(start, &goals)?;

    let goal_set: BTreeSet<State> = goals.iter().copied().collect();
    let rollout = simulate(
        solver.grid(),
        &solution.policy,
        start,
        &goal_set,
        config.simulation.max_steps,
    );

    if rollout.reached_goal {
        info!(
            "Reached a goal in {} moves ({} collisions)",
            rollout.path.len() + 1,
            rollout.collisions
        );
    } else {
        warn!(
            "No goal reached within {} steps ({} collisions)",
            config.simulation.max_steps, rollout.collisions
        );
    }
    println!("Path: {}", format_path(&rollout.path));

    if config.logging.save_solution {
        let record = SolutionRecord::from_solution(&solution, start, &goals, &params);
        record.save_to_file(&config.logging.solution_path)?;
        info!("Saved solution to {}", config.logging.solution_path);
    }

    Ok(())
}

mod common;

use common::{goal_set, reference_goals, reference_solver, unit_step_solver, visualize_policy};
use gridpolicy::solution::SolutionRecord;
use gridpolicy::{
    format_path, simulate, Action, ActionSet, DeterministicMotion, Grid, PolicyIteration,
    SolverParams, State, TerminalReward,
};

#[test]
fn test_reference_map_reaches_lower_goal() {
    let solver = reference_solver();
    let start = State::new(5, 5);
    let goals = reference_goals();

    let solution = solver.solve(start, &goals).unwrap();
    println!("{}", visualize_policy(solver.grid(), &solution, &goals));

    assert_eq!(solution.iterations, 16);
    assert_eq!(solution.sweeps, 185);

    let rollout = simulate(solver.grid(), &solution.policy, start, &goal_set(&goals), 1000);
    println!("Path: {}", format_path(&rollout.path));

    assert!(rollout.reached_goal);
    assert_eq!(rollout.collisions, 0);
    assert_eq!(rollout.path.len(), 73);
    assert_eq!(rollout.path[0], State::new(5, 6));

    let last = *rollout.path.last().unwrap();
    assert_eq!(last.manhattan(&State::new(49, 25)), 1);

    let lose = solver.grid().lose_states();
    assert!(rollout.path.iter().all(|s| !lose.contains(s)));
}

#[test]
fn test_reference_map_solution_shape() {
    let solver = reference_solver();
    let goals = reference_goals();
    let solution = solver.solve(State::new(5, 5), &goals).unwrap();

    let admissible = solver.grid().states();
    assert_eq!(solution.value.len(), admissible.len());
    assert_eq!(solution.policy.len(), admissible.len() - goals.len());
    assert!(solution
        .value
        .keys()
        .all(|s| !solver.grid().is_blocked(*s)));

    // Next to a goal the policy steps straight in
    assert_eq!(solution.action(State::new(48, 5)), Some(Action::RIGHT));
    assert!(solution.value_of(State::new(48, 5)).unwrap() > solution.value_of(State::new(5, 5)).unwrap());
}

#[test]
fn test_layout_avoids_lose_cells() {
    let layout = Grid::parse_layout(
        "□□□□□\n\
         sxxxg\n\
         □□□□□\n",
    )
    .unwrap();
    let start = layout.start.unwrap();
    let goals = layout.goals.clone();

    let solver = PolicyIteration::new(
        layout.grid.clone(),
        ActionSet::four_connected(),
        DeterministicMotion,
        TerminalReward::default(),
        SolverParams::default(),
    )
    .unwrap();
    let solution = solver.solve(start, &goals).unwrap();

    assert_eq!(solution.iterations, 2);
    assert_eq!(solution.sweeps, 12);
    assert_eq!(solution.action(start), Some(Action::DOWN));

    let rollout = simulate(&layout.grid, &solution.policy, start, &goal_set(&goals), 50);
    assert!(rollout.reached_goal);
    assert_eq!(
        rollout.path,
        vec![
            State::new(0, 2),
            State::new(1, 2),
            State::new(2, 2),
            State::new(3, 2),
            State::new(4, 2),
        ]
    );
}

#[test]
fn test_walled_off_region_converges() {
    // The right column cannot reach the goal
    let layout = Grid::parse_layout(
        "s□■□\n\
         □□■□\n\
         □g■□\n",
    )
    .unwrap();
    let solver = unit_step_solver(layout.grid.clone());

    let solution = solver
        .solve(layout.start.unwrap(), &layout.goals)
        .unwrap();

    // Endless -1 steps converge towards -10
    let stranded = solution.value_of(State::new(3, 1)).unwrap();
    assert!(stranded < -9.9 && stranded > -10.0);
    assert_eq!(solution.action(State::new(1, 1)), Some(Action::DOWN));
}

#[test]
fn test_saved_solution_restores() {
    let grid = Grid::new(3, 3);
    let goals = [State::new(2, 2)];
    let solver = unit_step_solver(grid);
    let solution = solver.solve(State::new(0, 0), &goals).unwrap();

    let record = SolutionRecord::from_solution(&solution, State::new(0, 0), &goals, solver.params());
    let path = std::env::temp_dir().join(format!("gridpolicy_scenario_{}.json", std::process::id()));
    record.save_to_file(&path).unwrap();
    let loaded = SolutionRecord::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.iterations, 4);
    assert_eq!(loaded.policy(), solution.policy);
    assert_eq!(loaded.goals, goals.to_vec());
}

//! Prints a summary of a saved solution file
//!
//! Usage: show_solution <solution.json> [x y]...
//! Each (x, y) pair is looked up in the value and policy tables.

use gridpolicy::solution::SolutionRecord;
use gridpolicy::State;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() % 2 != 0 {
        eprintln!("Usage: {} <solution.json> [x y]...", args[0]);
        eprintln!("Prints solver parameters and looks up value/action for each (x, y)");
        process::exit(1);
    }

    let record = match SolutionRecord::load_from_file(&args[1]) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args[1], e);
            process::exit(1);
        }
    };

    println!("=== Solution: {} ===", args[1]);
    println!("starting state: {}", record.start);
    println!(
        "goal states: {}",
        record
            .goals
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("condition for convergence: {}", record.epsilon);
    println!("discount factor: {}", record.discount);
    println!("iteration times: {} ({} sweeps)", record.iterations, record.sweeps);
    println!("states: {}, with actions: {}", record.values.len(), record.policy.len());
    if let Some((lo, hi)) = record.value_range() {
        println!("value range: [{:.4}, {:.4}]", lo, hi);
    }

    let solution = record.to_solution();
    for pair in args[2..].chunks(2) {
        let (x, y) = match (pair[0].parse::<i32>(), pair[1].parse::<i32>()) {
            (Ok(x), Ok(y)) => (x, y),
            _ => {
                eprintln!("Invalid coordinates: {} {}", pair[0], pair[1]);
                continue;
            }
        };

        let state = State::new(x, y);
        match (solution.value_of(state), solution.action(state)) {
            (Some(v), Some(a)) => println!("{}: value {:.4}, action {} {}", state, v, a, a.arrow()),
            (Some(v), None) => println!("{}: value {:.4}, goal", state, v),
            _ => println!("{}: not an admissible state", state),
        }
    }
}

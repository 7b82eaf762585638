//! `minpress solve`

use super::util::{flag_value, read_input, resolve_settings};
use minpress::*;

pub fn cmd_solve(args: &[String]) -> Result<()> {
    let input_path = args
        .first()
        .filter(|arg| !arg.starts_with("--"))
        .ok_or("Usage: minpress solve <input|-> [--mode counters|indicators] [--config <file>] [--window <n>] [--budget <n>] [--json]")?;

    let json_output = args.contains(&"--json".to_string());
    let mode = match flag_value(args, "--mode") {
        Some(raw) => raw.parse::<Mode>()?,
        None => Mode::default(),
    };

    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    let settings = resolve_settings(args, &current_dir)?;
    init_tracing(&settings.logging)?;

    let input = read_input(input_path)?;
    let machines = parse_machines(&input)?;
    tracing::info!(
        target: "minpress::cli",
        machines = machines.len(),
        mode = ?mode,
        "input_parsed"
    );

    let observer = TracingObserver::new(settings.solver.progress_interval);
    let report = solve_batch(&machines, mode, &settings.solver, observer)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
    }
    Ok(())
}

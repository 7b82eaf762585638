//! minpress CLI - Command-line interface
//!
//! Commands:
//!   solve    - Fewest presses for every machine of an input
//!   config   - Print effective settings
//!   schema   - Print JSON schema for settings and reports

mod cli;

use minpress::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "solve" => cli::cmd_solve(&args[2..]),
        "config" => cli::cmd_config(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("minpress {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
minpress - Minimum total presses

USAGE:
    minpress <COMMAND> [OPTIONS]

COMMANDS:
    solve <input|->                  Solve every machine, print per-machine presses and the total
    config                           Print effective settings as YAML
    schema [settings|machine|report] Print JSON schema
    version                          Print version

OPTIONS:
    --mode <counters|indicators>     Which targets to reach (default: counters)
    --config, -c <file>              Settings file (default: ./minpress.yaml if present)
    --window <n>                     Fix the free-parameter window to [-n, n]
    --budget <n>                     Stop after n search expansions
    --json                           JSON output (solve, config)

ENVIRONMENT:
    RUST_LOG                         Overrides logging.filter

EXAMPLES:
    minpress solve machines.txt
    minpress solve machines.txt --mode indicators
    minpress solve - --budget 1000000 --json < machines.txt
    RUST_LOG=minpress::search=debug minpress solve machines.txt
"#
    );
}

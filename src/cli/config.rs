//! Config and schema CLI commands

use super::util::resolve_settings;
use minpress::*;

pub fn cmd_config(args: &[String]) -> Result<()> {
    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    let settings = resolve_settings(args, &current_dir)?;

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        print!("{}", settings.to_yaml()?);
    }
    Ok(())
}

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("settings");

    match schema_name {
        "list" => {
            println!("Available schemas: settings, machine, report");
            Ok(())
        }
        "settings" | "config" => print_schema::<Settings>(),
        "machine" => print_schema::<Machine>(),
        "report" => print_schema::<BatchReport>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

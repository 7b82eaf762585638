//! CLI utility helpers

use minpress::{Error, Result, Settings, WindowPolicy};
use std::path::{Path, PathBuf};

/// Value following `flag`, if the flag is present
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// Numeric value following `flag`
pub fn parse_u64_flag(args: &[String], flag: &str) -> Result<Option<u64>> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("{} expects a non-negative integer, got '{}'", flag, raw).into()),
        None if args.iter().any(|arg| arg == flag) => {
            Err(format!("{} expects a value", flag).into())
        }
        None => Ok(None),
    }
}

/// Parse --config argument to determine the settings file
pub fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    flag_value(args, "--config")
        .or_else(|| flag_value(args, "-c"))
        .map(PathBuf::from)
}

/// Settings from `--config`, else `minpress.yaml` in `dir`, else defaults,
/// with `--window` and `--budget` applied on top
pub fn resolve_settings(args: &[String], dir: &Path) -> Result<Settings> {
    let mut settings = match parse_config_arg(args) {
        Some(path) => Settings::load(&path)?,
        None => Settings::load_from_dir(dir)?.unwrap_or_default(),
    };

    if let Some(bound) = parse_u64_flag(args, "--window")? {
        settings.solver.window = WindowPolicy::Fixed { bound };
    }
    if let Some(budget) = parse_u64_flag(args, "--budget")? {
        settings.solver.max_expansions = Some(budget);
    }

    settings.validate()?;
    Ok(settings)
}

/// Read an input file, or stdin for `-`
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        std::io::read_to_string(std::io::stdin()).map_err(Error::Io)
    } else {
        std::fs::read_to_string(path).map_err(Error::Io)
    }
}

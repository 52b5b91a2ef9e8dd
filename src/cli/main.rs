//! Command-line interface entry point for `CheckMyGrade`

mod args;
mod commands;

use args::{Cli, Command};
use check_my_grade::config::Config;
use check_my_grade::core::storage::DataStore;
use check_my_grade::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use check_my_grade::{error, info, verbose, Registry};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Some(Command::Config { subcommand }) => {
            report(
                "Config command failed",
                commands::config::run(subcommand, &mut config, &defaults),
            );
        }
        Some(Command::Generate { count }) => {
            let mut registry = open_registry(&config);
            report(
                "Sample generation failed",
                commands::generate::run(&mut registry, count),
            );
        }
        Some(Command::Menu) | None => {
            let mut registry = open_registry(&config);
            report("Terminal I/O failed", commands::menu::run(&mut registry));
        }
    }
}

/// Print a failed command's error; failures never change the exit status
fn report<E: fmt::Display>(context: &str, result: Result<(), E>) -> Option<String> {
    let e = result.err()?;
    error!("{context}: {e}");
    let message = format!("✗ {e}");
    eprintln!("{message}");
    Some(message)
}

fn open_registry(config: &Config) -> Registry {
    let dir = PathBuf::from(&config.paths.data_dir);
    verbose!("Data directory: {}", dir.display());
    Registry::load(DataStore::new(dir))
}

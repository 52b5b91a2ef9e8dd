//! Config command handler

use crate::args::ConfigSubcommand;
use check_my_grade::config::Config;
use check_my_grade::info;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands and print their output
///
/// # Errors
/// Returns the message for an invalid key or value, or a config file that cannot be written
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    let message = match subcommand {
        None => Ok(show(config, None)),
        Some(ConfigSubcommand::Get { key }) => Ok(show(config, key.as_deref())),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }?;
    print!("{message}");
    Ok(())
}

/// Render one value, or the whole config when `key` is `None`
fn show(config: &Config, key: Option<&str>) -> String {
    match key {
        Some(k) => config
            .get(k)
            .map_or_else(|| format!("Unknown config key: '{k}'\n"), |v| format!("{v}\n")),
        None => format!("\n=== Configuration ===\n\n{config}"),
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<String, String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key {key} set");
    Ok(format!("✓ Set {key} = {value}\n"))
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<String, String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    Ok(format!("✓ Reset {key} to default\n"))
}

/// Remove the user config file after a y/yes confirmation read from `input`
fn reset(input: &mut impl BufRead) -> Result<String, String> {
    if !Config::get_config_file_path().exists() {
        return Ok("✓ Config is already at defaults\n".to_string());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if confirmed(&response) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        Ok("✓ Config reset to defaults\n".to_string())
    } else {
        Ok("✗ Reset cancelled\n".to_string())
    }
}

fn confirmed(response: &str) -> bool {
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

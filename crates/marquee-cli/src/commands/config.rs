use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{self, Config};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration and where it came from
    Show,
    /// Print one setting, or the whole config file when no key is given
    Get {
        /// Setting name (database_path, log_level)
        key: Option<String>,
    },
    /// Change a setting in the config file
    Set {
        /// Setting name (database_path, log_level)
        key: String,
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Write the example config file if none exists
    Init,
}

pub fn run(command: ConfigCommand, config: &Config) -> Result<()> {
    match command {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Get { key } => get_config(config, key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => {
            println!("{}", config::config_file_path().display());
            Ok(())
        }
        ConfigCommand::Example => {
            print!("{}", config::example_config());
            Ok(())
        }
        ConfigCommand::Init => init_config(),
    }
}

fn show_config(config: &Config) -> Result<()> {
    let config_path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  log_level: {}", config.log_level);

    println!("\nPriority: CLI args > ENV vars (MARQUEE_*) > Config file > Defaults");

    Ok(())
}

fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        println!("{}", config.get(&key)?);
        return Ok(());
    }

    let config_path = config::config_file_path();
    if config_path.exists() {
        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        print!("{}", contents);
    } else {
        println!("Config file does not exist: {}", config_path.display());
        println!("\nRun 'marquee config init' to create it.");
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = config::set_value(&contents, key, value)?;
    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("Created config file: {}", config_path.display());
        println!("\nEdit this file to configure marquee.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

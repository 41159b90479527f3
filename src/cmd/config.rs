//! Configuration view and validation commands — `plantdesk config`.

use anyhow::{Context, Result, bail};

use plantdesk::config::PlantdeskConfig;

use super::super::ConfigCommands;

pub fn cmd_config(
    config_path: &std::path::Path,
    config: &PlantdeskConfig,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            if config_path.exists() {
                println!("# Config file: {}", config_path.display());
            } else {
                println!("# No config file at {}, using defaults", config_path.display());
            }
            let rendered =
                toml::to_string_pretty(config).context("Failed to serialize configuration")?;
            print!("{}", rendered);
        }
        Some(ConfigCommands::Validate) => {
            let problems = config.validate();
            if !problems.is_empty() {
                for problem in &problems {
                    println!("  - {}", problem);
                }
                bail!("Configuration has {} problem(s)", problems.len());
            }
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

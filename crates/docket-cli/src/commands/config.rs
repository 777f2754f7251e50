//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::{Path, PathBuf};

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let written = init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote {}", written.display()))
            );
        }
    }
    Ok(())
}

/// Write the default configuration, refusing to clobber unless forced.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = Config::resolve_path(path)?;
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(&path)?;
    Ok(path)
}

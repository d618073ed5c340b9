//! Conf command implementation.
//!
//! The only command that works without an existing config, since it is
//! how the username gets set in the first place.

use crate::cli::ConfArgs;
use crate::config::Config;
use crate::error::{IshuError, Result};

/// Execute the conf command.
///
/// # Errors
///
/// Returns an error for unknown settings, invalid values, or when a
/// get/list is attempted with no config present.
pub fn execute(args: &ConfArgs, config: Option<Config>) -> Result<()> {
    if let Some(pair) = &args.set {
        return set(config, &pair[0], &pair[1]);
    }
    if let Some(key) = &args.get {
        let config = config.ok_or(IshuError::NoConfig)?;
        let value = config.get(key).ok_or_else(|| {
            IshuError::validation("setting", format!("no such setting: {key}"))
        })?;
        println!("{key} = {value}");
        return Ok(());
    }
    // Default: list settings.
    let config = config.ok_or(IshuError::NoConfig)?;
    println!("Settings:");
    for key in Config::settings() {
        let value = config.get(key).unwrap_or_default();
        println!("  {key} = {value}");
    }
    Ok(())
}

fn set(config: Option<Config>, key: &str, value: &str) -> Result<()> {
    let mut config = match config {
        Some(config) => config,
        None => {
            if key != "user" {
                return Err(IshuError::NoConfig);
            }
            Config::new(value)?
        }
    };
    config.set(key, value)?;
    config.save()?;
    println!("{key} -> {value}");
    println!("Config saved");
    Ok(())
}

//! Alias command implementation.
//!
//! Aliases live in the config file and are expanded before argument
//! parsing, so `ishu bugs` can stand for `ishu list -t bug`.

use crate::cli::AliasArgs;
use crate::config::Config;
use crate::error::{IshuError, Result};

/// Execute the alias command.
///
/// # Errors
///
/// Returns an error when no config exists yet or the save fails.
pub fn execute(args: &AliasArgs, config: Option<Config>) -> Result<()> {
    let mut config = config.ok_or(IshuError::NoConfig)?;

    if let Some(pair) = &args.set {
        let (name, expansion) = (&pair[0], &pair[1]);
        config
            .aliases
            .insert(name.clone(), expansion.clone());
        config.save()?;
        println!("{name} -> {expansion}");
        return Ok(());
    }

    if let Some(name) = &args.unset {
        if config.aliases.remove(name).is_none() {
            return Err(IshuError::validation(
                "alias",
                format!("no such alias: {name}"),
            ));
        }
        config.save()?;
        println!("Alias '{name}' removed");
        return Ok(());
    }

    // Default: list aliases.
    if config.aliases.is_empty() {
        println!("No aliases defined");
    } else {
        println!("Aliases:");
        for (name, expansion) in &config.aliases {
            println!("  {name} = {expansion}");
        }
    }
    Ok(())
}

//! Configuration management for `ishu`.
//!
//! A single config file at `~/.config/ishu.conf` holds the acting
//! username and command aliases. The issue tree root is resolved per
//! invocation: `ISHU_DIR` may point at an existing directory whose
//! `.ishu` subdirectory is used instead of the current working
//! directory's.

use crate::error::{IshuError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the tree root.
pub const ROOT_ENV_VAR: &str = "ISHU_DIR";

/// Config filename under `~/.config`.
const CONFIG_FILENAME: &str = "ishu.conf";

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid regex"));

/// Per-installation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Acting username; letters only.
    pub user: String,
    /// Shortcut command names mapped to their expansions.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Create a config for a validated username.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the username isn't letters only.
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        validate_username(&user)?;
        Ok(Self {
            user,
            aliases: BTreeMap::new(),
        })
    }

    /// Path of the config file (`$HOME/.config/ishu.conf`).
    ///
    /// # Errors
    ///
    /// Returns `Config` when `HOME` is unset.
    pub fn path() -> Result<PathBuf> {
        let home = env::var("HOME")
            .map_err(|_| IshuError::Config("HOME environment variable not set".to_string()))?;
        Ok(Path::new(&home).join(".config").join(CONFIG_FILENAME))
    }

    /// Load the config file; `None` when it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the file exists but cannot be parsed or
    /// holds an invalid username.
    pub fn load() -> Result<Option<Self>> {
        let path = Self::path()?;
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| IshuError::Config(format!("unreadable config file: {e}")))?;
        validate_username(&config.user)?;
        Ok(Some(config))
    }

    /// Persist the config, creating `~/.config` as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Settings keys understood by `conf --get`/`--set`.
    #[must_use]
    pub const fn settings() -> &'static [&'static str] {
        &["user"]
    }

    /// Get a setting value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "user" => Some(&self.user),
            _ => None,
        }
    }

    /// Set a setting value by key.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for unknown keys or invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "user" => {
                validate_username(value)?;
                self.user = value.to_string();
                Ok(())
            }
            other => Err(IshuError::validation(
                "setting",
                format!("no such setting: {other}"),
            )),
        }
    }
}

/// Validate the `[a-zA-Z]+` username rule.
///
/// # Errors
///
/// Returns `Validation` when the name is empty or has non-letters.
pub fn validate_username(user: &str) -> Result<()> {
    if USERNAME_RE.is_match(user) {
        Ok(())
    } else {
        Err(IshuError::validation(
            "user",
            "username can only consist of a-z and A-Z",
        ))
    }
}

/// Resolve the tree root for this invocation.
///
/// `ISHU_DIR` wins when it names an existing directory; otherwise the
/// current working directory is used. The `.ishu` tree lives directly
/// below the root.
#[must_use]
pub fn discover_root() -> PathBuf {
    if let Ok(value) = env::var(ROOT_ENV_VAR) {
        let path = PathBuf::from(value);
        if path.is_dir() {
            return path;
        }
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// The `.ishu` directory under a root.
#[must_use]
pub fn ishu_dir(root: &Path) -> PathBuf {
    root.join(".ishu")
}

/// Expand a user-defined alias in the raw argument vector.
///
/// When the first argument after the binary name matches an alias, it
/// is replaced by the whitespace-split words of its expansion. Builtin
/// command names and their short forms are handled by clap and never
/// reach this map.
#[must_use]
pub fn expand_alias(config: &Config, args: Vec<String>) -> Vec<String> {
    let Some(first) = args.get(1) else {
        return args;
    };
    let Some(expansion) = config.aliases.get(first) else {
        return args;
    };
    let mut expanded = Vec::with_capacity(args.len());
    expanded.push(args[0].clone());
    expanded.extend(expansion.split_whitespace().map(str::to_string));
    expanded.extend(args.into_iter().skip(2));
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("ALICE").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al1ce").is_err());
        assert!(validate_username("a lice").is_err());
        assert!(validate_username("sören").is_err());
    }

    #[test]
    fn test_new_rejects_bad_username() {
        assert!(Config::new("bob").is_ok());
        assert!(Config::new("b0b").is_err());
    }

    #[test]
    fn test_settings_get_set() {
        let mut config = Config::new("alice").unwrap();
        assert_eq!(config.get("user"), Some("alice"));
        assert!(config.get("ghost").is_none());
        config.set("user", "bob").unwrap();
        assert_eq!(config.user, "bob");
        assert!(config.set("user", "b0b").is_err());
        assert!(config.set("ghost", "x").is_err());
    }

    #[test]
    fn test_config_json_shape() {
        let mut config = Config::new("alice").unwrap();
        config
            .aliases
            .insert("bugs".to_string(), "list -t bug".to_string());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["user"], "alice");
        assert_eq!(json["aliases"]["bugs"], "list -t bug");

        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_aliases_default_to_empty() {
        let config: Config = serde_json::from_str(r#"{"user": "alice"}"#).unwrap();
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_expand_alias() {
        let mut config = Config::new("alice").unwrap();
        config
            .aliases
            .insert("bugs".to_string(), "list -t bug".to_string());

        let args = |words: &[&str]| -> Vec<String> {
            words.iter().map(|s| (*s).to_string()).collect()
        };

        assert_eq!(
            expand_alias(&config, args(&["ishu", "bugs", "-B"])),
            args(&["ishu", "list", "-t", "bug", "-B"])
        );
        // Unknown first token passes through untouched.
        assert_eq!(
            expand_alias(&config, args(&["ishu", "list"])),
            args(&["ishu", "list"])
        );
        assert_eq!(expand_alias(&config, args(&["ishu"])), args(&["ishu"]));
    }
}

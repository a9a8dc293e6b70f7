/// Configuration for tree duplication
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to every duplicated title
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";

/// Environment variable selecting the duplication mode
pub const MODE_ENV_VAR: &str = "PAGETREE_MODE";

/// Environment variable overriding the copy suffix
pub const COPY_SUFFIX_ENV_VAR: &str = "PAGETREE_COPY_SUFFIX";

/// How failures below the root are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicationMode {
    /// Skip the failed node's subtree and keep going
    #[default]
    Lenient,
    /// Stop at the first failure and return it with what was created
    Strict,
}

impl fmt::Display for DuplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicationMode::Lenient => f.write_str("lenient"),
            DuplicationMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for DuplicationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(DuplicationMode::Lenient),
            "strict" => Ok(DuplicationMode::Strict),
            other => Err(format!(
                "Unknown duplication mode '{}' (expected 'lenient' or 'strict')",
                other
            )),
        }
    }
}

/// Configuration for `TreeDuplicator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatorConfig {
    /// Skip policy for failed nodes below the root
    #[serde(default)]
    pub mode: DuplicationMode,

    /// Marker appended to each duplicated title
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,

    /// Track visited source nodes so a cyclic parent chain is walked once
    #[serde(default = "default_guard_cycles")]
    pub guard_cycles: bool,
}

fn default_copy_suffix() -> String {
    DEFAULT_COPY_SUFFIX.to_string()
}

fn default_guard_cycles() -> bool {
    true
}

impl Default for DuplicatorConfig {
    fn default() -> Self {
        Self {
            mode: DuplicationMode::default(),
            copy_suffix: default_copy_suffix(),
            guard_cycles: default_guard_cycles(),
        }
    }
}

impl DuplicatorConfig {
    /// Strict-mode config with all other settings at their defaults
    pub fn strict() -> Self {
        Self {
            mode: DuplicationMode::Strict,
            ..Self::default()
        }
    }

    /// Build a config from `PAGETREE_MODE` and `PAGETREE_COPY_SUFFIX`,
    /// falling back to defaults for unset variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a caller-supplied variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(MODE_ENV_VAR) {
            config.mode = mode.parse()?;
        }

        if let Some(suffix) = lookup(COPY_SUFFIX_ENV_VAR) {
            config.copy_suffix = suffix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.copy_suffix.trim().is_empty() {
            return Err("copy_suffix cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DuplicatorConfig::default();
        assert_eq!(config.mode, DuplicationMode::Lenient);
        assert_eq!(config.copy_suffix, " (Copy)");
        assert!(config.guard_cycles);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DuplicatorConfig::default();

        config.copy_suffix = String::new();
        assert!(config.validate().is_err());

        config.copy_suffix = "   ".to_string();
        assert!(config.validate().is_err());

        config.copy_suffix = " - copy".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(MODE_ENV_VAR, "Strict"), (COPY_SUFFIX_ENV_VAR, " [dup]")]);
        let config = DuplicatorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.mode, DuplicationMode::Strict);
        assert_eq!(config.copy_suffix, " [dup]");

        let defaults = DuplicatorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(defaults, DuplicatorConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(DuplicatorConfig::from_lookup(|k| {
            (k == MODE_ENV_VAR).then(|| "careful".to_string())
        })
        .is_err());

        assert!(DuplicatorConfig::from_lookup(|k| {
            (k == COPY_SUFFIX_ENV_VAR).then(String::new)
        })
        .is_err());
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: DuplicatorConfig = serde_json::from_str(r#"{"mode":"strict"}"#).unwrap();
        assert_eq!(config.mode, DuplicationMode::Strict);
        assert_eq!(config.copy_suffix, DEFAULT_COPY_SUFFIX);
        assert!(config.guard_cycles);
    }
}

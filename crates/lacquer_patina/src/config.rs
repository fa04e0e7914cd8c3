//! Configuration file loading for lacquer.
//!
//! Reads `lacquer.config.json` from a project directory:
//!
//! ```json
//! {
//!   "rules": {
//!     "angular/banana-in-box": "warn"
//!   }
//! }
//! ```

use crate::diagnostic::Severity;
use crate::error::{LintError, LintResultOf};
use lacquer_carton::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "lacquer.config.json";

/// Per-rule level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl RuleLevel {
    /// Severity reported for this level, `None` when the rule is off
    #[inline]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Top-level lacquer configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LintConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Rule name to level overrides. Rules not listed keep their default.
    #[serde(default)]
    pub rules: FxHashMap<String, RuleLevel>,
}

impl LintConfig {
    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load `lacquer.config.json` from the given directory (or CWD if None).
    ///
    /// A missing file yields the default config.
    pub fn load(dir: Option<&Path>) -> LintResultOf<Self> {
        let base = match dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|source| LintError::Io {
                path: ".".into(),
                source,
            })?,
        };
        let config_path = base.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            tracing::debug!("no {} in {}", CONFIG_FILE_NAME, base.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| LintError::Io {
            path: config_path.clone(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| LintError::Config {
            path: config_path.clone(),
            source,
        })?;

        tracing::debug!(
            "loaded {} with {} rule override(s)",
            config_path.display(),
            config.rules.len()
        );
        Ok(config)
    }

    /// Configured level for a rule, if any
    #[inline]
    pub fn level(&self, rule_name: &str) -> Option<RuleLevel> {
        self.rules.get(rule_name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_levels() {
        let config = LintConfig::from_json(
            r#"{
                "$schema": "./node_modules/lacquer/schema.json",
                "rules": {
                    "angular/banana-in-box": "warn",
                    "angular/other": "off"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.level("angular/banana-in-box"), Some(RuleLevel::Warn));
        assert_eq!(config.level("angular/other"), Some(RuleLevel::Off));
        assert_eq!(config.level("angular/missing"), None);
        assert!(config.schema.is_some());
    }

    #[test]
    fn test_warning_alias() {
        let config =
            LintConfig::from_json(r#"{ "rules": { "angular/banana-in-box": "warning" } }"#)
                .unwrap();
        assert_eq!(config.level("angular/banana-in-box"), Some(RuleLevel::Warn));
    }

    #[test]
    fn test_invalid_level() {
        assert!(LintConfig::from_json(r#"{ "rules": { "a": "loud" } }"#).is_err());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = LintConfig::from_json("{}").unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_level_severity() {
        assert_eq!(RuleLevel::Off.severity(), None);
        assert_eq!(RuleLevel::Warn.severity(), Some(Severity::Warning));
        assert_eq!(RuleLevel::Error.severity(), Some(Severity::Error));
    }
}

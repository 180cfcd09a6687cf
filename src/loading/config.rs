use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;

use crate::errors::LoadError;


/// Environment variable holding the path of a campus JSON file
pub const DATA_PATH_VAR: &str = "CAMPUS_NAV_DATA";
/// Environment variable toggling strict loading (`0`, `false`, `no` or `off` disable it)
pub const STRICT_VAR: &str = "CAMPUS_NAV_STRICT";


/// Where the campus map comes from and how forgiving the load is
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Campus JSON file, the bundled campus when unset
    pub data_path: Option<PathBuf>,
    /// Fail the load on bad connections instead of skipping them
    pub strict: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            strict: true,
        }
    }
}

impl NavigatorConfig {

    pub fn from_env() -> Self {
        Self::from_vars(env::var(DATA_PATH_VAR).ok(), env::var(STRICT_VAR).ok())
    }

    fn from_vars(data_path: Option<String>, strict: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_path: data_path.filter(|p| !p.trim().is_empty()).map(PathBuf::from),
            strict: strict.map_or(defaults.strict, |value| {
                !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
            }),
        }
    }

    /// Read a JSON configuration file, missing fields take their defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if let Some(path) = &self.data_path {
            if !path.is_file() {
                return Err(LoadError::InvalidConfig(format!(
                    "campus data file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigatorConfig::default();
        assert_eq!(config.data_path, None);
        assert!(config.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars() {
        let config = NavigatorConfig::from_vars(Some("/srv/campus.json".into()), Some("false".into()));
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/campus.json")));
        assert!(!config.strict);

        let config = NavigatorConfig::from_vars(Some("  ".into()), Some("1".into()));
        assert_eq!(config.data_path, None);
        assert!(config.strict);

        assert!(!NavigatorConfig::from_vars(None, Some(" OFF ".into())).strict);
        assert!(NavigatorConfig::from_vars(None, None).strict);
    }

    #[test]
    fn test_partial_json_config() {
        let config: NavigatorConfig = serde_json::from_str(r#"{"strict": false}"#).unwrap();
        assert_eq!(config, NavigatorConfig { data_path: None, strict: false });
    }

    #[test]
    fn test_validate_missing_data_file() {
        let config = NavigatorConfig {
            data_path: Some(PathBuf::from("/definitely/not/a/campus.json")),
            ..NavigatorConfig::default()
        };
        assert!(matches!(config.validate(), Err(LoadError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("campus_navigate_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"data_path": "/srv/campus.json"}"#).unwrap();

        let config = NavigatorConfig::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/campus.json")));
        assert!(config.strict);
    }
}

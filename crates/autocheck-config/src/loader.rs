//! Reading `autocheck.toml`.
//!
//! A file is read, `${VAR}` references are substituted from the
//! environment, the TOML is parsed, and [`ConfigValidator`] runs last.

use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::Config;
use crate::validator::{ConfigValidator, ValidationWarning};

/// Loads [`Config`] from TOML files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse the file at `path`. A missing file is [`ConfigError::NotFound`].
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Self::load_str(&std::fs::read_to_string(path)?)
    }

    /// Like [`ConfigLoader::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load with defaults for a missing file, then validate.
    ///
    /// The first validation error is returned as [`ConfigError::InvalidValue`];
    /// warnings come back alongside the config.
    pub fn load_validated(path: &Path) -> Result<(Config, Vec<ValidationWarning>), ConfigError> {
        let config = Self::load_or_default(path)?;
        let warnings = ConfigValidator::validate(&config)?.into_result()?;
        Ok((config, warnings))
    }

    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(&Self::expand_env_vars(content)?)?)
    }

    /// Replace every `${VAR}` with the variable's value; the first unset
    /// variable is an error.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let pattern = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut missing = None;
        let expanded = pattern.replace_all(content, |caps: &Captures| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(ConfigError::EnvVarNotSet(name)),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_scan_section() {
        let content = r#"
            [scan]
            max_nearby_elements = 30
            max_text_length = 200
            descendant_tags = ["span", "label"]
            dispatch_events = false
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.scan.max_nearby_elements, 30);
        assert_eq!(config.scan.max_text_length, 200);
        assert_eq!(config.scan.max_descendants_per_sibling, 10);
        assert_eq!(config.scan.descendant_tags, ["span", "label"]);
        assert!(!config.scan.dispatch_events);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]").unwrap();
        writeln!(file, "path = \"/tmp/keywords.json\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.store.path, "/tmp/keywords.json");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/autocheck.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/path/autocheck.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_keeps_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_wrong_value_type() {
        let result = ConfigLoader::load_str("[scan]\nmax_text_length = \"long\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable name is unique to this test.
        unsafe {
            std::env::set_var("AUTOCHECK_TEST_STORE_DIR", "/var/lib/autocheck");
        }
        let content = "[store]\npath = \"${AUTOCHECK_TEST_STORE_DIR}/store.json\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.store.path, "/var/lib/autocheck/store.json");
        unsafe {
            std::env::remove_var("AUTOCHECK_TEST_STORE_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_AUTOCHECK_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_AUTOCHECK_VAR_12345"));
    }

    #[test]
    fn test_text_without_references_is_unchanged() {
        let content = "level = \"debug\" # $HOME is not a reference";
        assert_eq!(ConfigLoader::expand_env_vars(content).unwrap(), content);
    }

    #[test]
    fn test_expand_path_keeps_absolute_paths() {
        let path = "/srv/autocheck/store.json";
        assert_eq!(ConfigLoader::expand_path(path), PathBuf::from(path));
    }

    #[test]
    fn test_expand_path_resolves_home() {
        let expanded = ConfigLoader::expand_path("~/.autocheck/logs");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with(".autocheck/logs"));
    }

    #[test]
    fn test_load_validated_defaults() {
        let (config, warnings) =
            ConfigLoader::load_validated(Path::new("/nonexistent/path/autocheck.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_validated_returns_warnings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nmax_nearby_elements = 500").unwrap();

        let (config, warnings) = ConfigLoader::load_validated(file.path()).unwrap();
        assert_eq!(config.scan.max_nearby_elements, 500);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "scan.max_nearby_elements");
    }

    #[test]
    fn test_load_validated_rejects_zero_limit() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nmax_text_length = 0").unwrap();

        let result = ConfigLoader::load_validated(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == "scan.max_text_length"));
    }
}

//! Semantic checks that TOML parsing cannot express.

use std::fmt;

use crate::error::ConfigError;
use crate::schema::Config;

/// One finding, addressed by its dotted config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub type ValidationError = ValidationIssue;
pub type ValidationWarning = ValidationIssue;

/// Errors make the config unusable; warnings are only logged.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(path, message));
    }

    fn warn(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }

    /// First error as a [`ConfigError`], if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// Neighbor caps above this make scans of large pages slow.
const NEARBY_WARNING_THRESHOLD: usize = 200;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();
        Self::check_scan(config, &mut result);
        Self::check_store(config, &mut result);
        Self::check_logging(config, &mut result);
        Ok(result)
    }

    fn check_scan(config: &Config, result: &mut ValidationResult) {
        let scan = &config.scan;

        for (path, value) in [
            ("scan.max_nearby_elements", scan.max_nearby_elements),
            ("scan.max_text_length", scan.max_text_length),
            ("scan.max_descendants_per_sibling", scan.max_descendants_per_sibling),
        ] {
            if value == 0 {
                result.error(path, "must be greater than 0");
            }
        }

        if scan.max_nearby_elements > NEARBY_WARNING_THRESHOLD {
            result.warn(
                "scan.max_nearby_elements",
                format!(
                    "max_nearby_elements is very high (>{}), scans of large pages may be slow",
                    NEARBY_WARNING_THRESHOLD
                ),
            );
        }

        if scan.descendant_tags.is_empty() {
            result.error("scan.descendant_tags", "At least one descendant tag is required");
        }
        for tag in scan.descendant_tags.iter().filter(|tag| !is_tag_name(tag)) {
            result.error("scan.descendant_tags", format!("Invalid tag name '{}'", tag));
        }
    }

    fn check_store(config: &Config, result: &mut ValidationResult) {
        if config.store.path.trim().is_empty() {
            result.error("store.path", "Store path cannot be empty");
        }
    }

    fn check_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.error("logging.level", "Log level cannot be empty");
        }
        if config.logging.file && config.logging.directory.trim().is_empty() {
            result.error(
                "logging.directory",
                "Log directory cannot be empty when file logging is enabled",
            );
        }
    }
}

fn is_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

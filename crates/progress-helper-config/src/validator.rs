//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Delays above this are almost certainly a unit mistake (seconds vs ms).
const LONG_DELAY_MS: u64 = 10_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a `ConfigError`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_ticker(config, &mut result);
        Self::validate_selectors(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if config.browser.call_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.call_timeout_secs",
                "call_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_ticker(config: &Config, result: &mut ValidationResult) {
        let ticker = &config.ticker;

        if ticker.heading_label.trim().is_empty() {
            result.add_error(ValidationError::new(
                "ticker.heading_label",
                "heading_label cannot be empty",
            ));
        }

        for (path, delay) in [
            ("ticker.default_delay_ms", ticker.default_delay_ms),
            ("ticker.command_delay_ms", ticker.command_delay_ms),
        ] {
            if delay > LONG_DELAY_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("delay of {}ms is very long, values are in milliseconds", delay),
                ));
            }
        }

        if progress_helper_spec::parse(&ticker.mark_all_spec).is_empty() {
            result.add_warning(ValidationWarning::new(
                "ticker.mark_all_spec",
                format!("'{}' selects no sections", ticker.mark_all_spec),
            ));
        }
    }

    fn validate_selectors(config: &Config, result: &mut ValidationResult) {
        let selectors = &config.selectors;
        for (path, group) in [
            ("selectors.panel", &selectors.panel),
            ("selectors.heading", &selectors.heading),
            ("selectors.control", &selectors.control),
        ] {
            if group.iter().all(|s| s.trim().is_empty()) {
                result.add_error(ValidationError::new(path, "at least one selector is required"));
            }
        }

        if selectors.clickable.iter().any(|s| s.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "selectors.clickable",
                "selectors cannot be empty strings",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

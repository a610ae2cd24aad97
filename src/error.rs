//! Error types and handling for Statecraft
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Validation failures are structured data: tests and callers assert on
//! error kind and fields, never on message substrings.

use miette::Diagnostic;
use thiserror::Error;

/// A string parameter value failed its full-match pattern check
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Parameter '{param}' value '{value}' does not match '{pattern}'")]
#[diagnostic(
    code(statecraft::validate::pattern_mismatch),
    help("The whole value must match the pattern, not just a substring")
)]
pub struct ValidationError {
    /// Name of the offending parameter
    pub param: String,
    /// The value that was rejected
    pub value: String,
    /// The required pattern (or allowed-value set for enum parameters)
    pub pattern: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        param: impl Into<String>,
        value: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            value: value.into(),
            pattern: pattern.into(),
        }
    }
}

/// Main error type for Statecraft operations
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("Required parameter '{param}' is missing")]
    #[diagnostic(
        code(statecraft::resolve::missing_required),
        help("Supply the parameter or declare a default in the module schema")
    )]
    MissingRequired { param: String },

    #[error("Unknown parameter: {param}")]
    #[diagnostic(
        code(statecraft::resolve::unknown_param),
        help("Check the parameter name against the module schema")
    )]
    UnknownParam { param: String },

    #[error("Parameter '{param}' expects a {expected} value, got {actual}")]
    #[diagnostic(code(statecraft::resolve::type_mismatch))]
    TypeMismatch {
        param: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("OS family '{os_family}' has no default for parameter '{param}'")]
    #[diagnostic(
        code(statecraft::resolve::unsupported_platform),
        help("Supported OS families: Debian, RedHat")
    )]
    UnsupportedPlatform { os_family: String, param: String },

    #[error("Invalid validation pattern '{pattern}': {reason}")]
    #[diagnostic(code(statecraft::validate::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error("Duplicate resource '{key}' when merging graphs")]
    #[diagnostic(
        code(statecraft::graph::duplicate_resource),
        help("Each resource identity key may be declared only once per graph")
    )]
    DuplicateResource { key: String },

    #[error("Failed to serialize resource graph: {reason}")]
    #[diagnostic(code(statecraft::graph::serialize_failed))]
    SerializeFailed { reason: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::SerializeFailed {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializeFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("keystone_auth_admin_prefix", "keystone/", "^/[^/]+$");
        assert_eq!(
            err.to_string(),
            "Parameter 'keystone_auth_admin_prefix' value 'keystone/' does not match '^/[^/]+$'"
        );
    }

    #[test]
    fn test_validation_error_fields() {
        let err = ValidationError::new("prefix", "bad", "^/.*$");
        assert_eq!(err.param, "prefix");
        assert_eq!(err.value, "bad");
        assert_eq!(err.pattern, "^/.*$");
    }

    #[test]
    fn test_validation_error_code() {
        let err = ValidationError::new("p", "v", "pat");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("statecraft::validate::pattern_mismatch".to_string())
        );
    }

    #[test]
    fn test_validation_error_transparent_in_config_error() {
        let err: ConfigError = ValidationError::new("p", "v", "pat").into();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("statecraft::validate::pattern_mismatch".to_string())
        );
    }

    #[test]
    fn test_missing_required_display() {
        let err = ConfigError::MissingRequired {
            param: "keystone_password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Required parameter 'keystone_password' is missing"
        );
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("statecraft::resolve::missing_required".to_string())
        );
    }

    #[test]
    fn test_unknown_param_display() {
        let err = ConfigError::UnknownParam {
            param: "nonexistent".to_string(),
        };
        assert!(err.to_string().contains("Unknown parameter"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ConfigError::TypeMismatch {
            param: "enabled".to_string(),
            expected: "bool",
            actual: "string",
        };
        assert!(err.to_string().contains("expects a bool value"));
    }

    #[test]
    fn test_unsupported_platform_display() {
        let err = ConfigError::UnsupportedPlatform {
            os_family: "Solaris".to_string(),
            param: "client_package_name".to_string(),
        };
        assert!(err.to_string().contains("Solaris"));
        assert!(err.to_string().contains("client_package_name"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: yaml: content: [unclosed";
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str(yaml_str);
        let yaml_err = parse_result.unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::SerializeFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "not json";
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str(json_str);
        let json_err = parse_result.unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::SerializeFailed { .. }));
    }
}

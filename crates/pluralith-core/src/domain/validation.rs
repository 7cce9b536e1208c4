use std::path::Path;

use crate::domain::error::DomainError;

/// Centralized validation of everything that ends up inside a flag token.
///
/// Tokens go straight into argv without a shell, so nothing is escaped.
/// Anything that would make `key=value` or `"key=value"` ambiguous to the
/// receiving tool is rejected instead:
///
/// | input | rejected when it contains |
/// |-------|---------------------------|
/// | key   | nothing, `=`, `"`, control characters |
/// | value | `"`, control characters |
/// | path  | nothing, control characters, invalid UTF-8 |
///
/// `=` is allowed inside values because both tools split on the first `=`.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_key(flag: &'static str, key: &str) -> Result<(), DomainError> {
        let reason = if key.trim().is_empty() {
            Some("key is empty")
        } else if key.contains('=') {
            Some("key contains '='")
        } else if key.contains('"') {
            Some("key contains a double quote")
        } else if key.chars().any(char::is_control) {
            Some("key contains a control character")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(unsafe_value(flag, key, reason)),
            None => Ok(()),
        }
    }

    pub fn validate_value(flag: &'static str, value: &str) -> Result<(), DomainError> {
        if value.contains('"') {
            return Err(unsafe_value(flag, value, "value contains a double quote"));
        }
        if value.chars().any(char::is_control) {
            return Err(unsafe_value(flag, value, "value contains a control character"));
        }
        Ok(())
    }

    /// Validate a file path and return it as a token-ready string.
    pub fn validate_path<'a>(flag: &'static str, path: &'a Path) -> Result<&'a str, DomainError> {
        let Some(s) = path.to_str() else {
            return Err(unsafe_value(
                flag,
                &path.to_string_lossy(),
                "path is not valid UTF-8",
            ));
        };
        if s.trim().is_empty() {
            return Err(unsafe_value(flag, s, "path is empty"));
        }
        if s.chars().any(char::is_control) {
            return Err(unsafe_value(flag, s, "path contains a control character"));
        }
        Ok(s)
    }
}

fn unsafe_value(flag: &'static str, value: &str, reason: &'static str) -> DomainError {
    DomainError::UnsafeFlagValue {
        flag,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_and_value_pass() {
        assert!(DomainValidator::validate_key("--var", "region").is_ok());
        assert!(DomainValidator::validate_value("--var", "us-east-1").is_ok());
    }

    #[test]
    fn equals_allowed_in_value_but_not_key() {
        assert!(DomainValidator::validate_value("--var", "a=b").is_ok());
        assert!(matches!(
            DomainValidator::validate_key("--var", "a=b"),
            Err(DomainError::UnsafeFlagValue { reason: "key contains '='", .. })
        ));
    }

    #[test]
    fn quotes_rejected_everywhere() {
        assert!(DomainValidator::validate_key("--var", "re\"gion").is_err());
        assert!(DomainValidator::validate_value("--var", "say \"hi\"").is_err());
    }

    #[test]
    fn control_characters_rejected() {
        assert!(DomainValidator::validate_value("--var", "line\nbreak").is_err());
        assert!(DomainValidator::validate_key("--var", "tab\tkey").is_err());
    }

    #[test]
    fn empty_key_rejected() {
        assert!(DomainValidator::validate_key("--backend-config", "  ").is_err());
    }

    #[test]
    fn path_validation() {
        assert_eq!(
            DomainValidator::validate_path("--var-file", Path::new("vars.tfvars")).unwrap(),
            "vars.tfvars"
        );
        assert!(DomainValidator::validate_path("--var-file", Path::new("")).is_err());
    }
}

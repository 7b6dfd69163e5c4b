// src/auth/validators.rs

use crate::common::validation::{is_email_like, ValidationResult, Validator};

use super::models::{LoginRequest, RegisterRequest};

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "must not be blank");
        } else if !is_email_like(&data.email) {
            result.add_error("email", "must be a valid email address");
        }

        if data.password.trim().is_empty() {
            result.add_error("password", "must not be blank");
        }

        result
    }
}

pub struct LoginValidator;

impl Validator<LoginRequest> for LoginValidator {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "must not be blank");
        }
        if data.password.trim().is_empty() {
            result.add_error("password", "must not be blank");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validator_rejects_blank_and_malformed() {
        let validator = RegisterValidator;

        let ok = validator.validate(&RegisterRequest {
            name: Some("Alice".to_string()),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        });
        assert!(ok.is_valid);

        let blank = validator.validate(&RegisterRequest {
            name: None,
            email: "  ".to_string(),
            password: "".to_string(),
        });
        assert!(!blank.is_valid);
        assert_eq!(blank.errors.len(), 2);

        let malformed = validator.validate(&RegisterRequest {
            name: None,
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        });
        assert!(!malformed.is_valid);
    }
}

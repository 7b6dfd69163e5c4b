// Common validation types and traits

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

/// Very loose email shape check: one '@' with something on both sides.
pub fn is_email_like(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email_like() {
        assert!(is_email_like("alice@example.com"));
        assert!(!is_email_like("alice"));
        assert!(!is_email_like("@example.com"));
        assert!(!is_email_like("alice@.com"));
    }

    #[test]
    fn test_validation_result_merge() {
        let mut a = ValidationResult::new();
        let mut b = ValidationResult::new();
        b.add_error("email", "must not be blank");
        assert!(a.is_valid);
        a.merge(b);
        assert!(!a.is_valid);
        assert_eq!(a.errors.len(), 1);
    }
}

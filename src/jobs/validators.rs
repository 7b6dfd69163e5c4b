// src/jobs/validators.rs

use crate::common::validation::{ValidationResult, Validator};

use super::models::CreateJobRequest;

pub struct JobValidator;

impl Validator<CreateJobRequest> for JobValidator {
    fn validate(&self, data: &CreateJobRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "must not be blank");
        }

        if let (Some(start), Some(end)) = (&data.start_date, &data.end_date) {
            // Dates travel as ISO-8601 strings, so lexicographic order works.
            if start > end {
                result.add_error("end_date", "must not be before start_date");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, start: Option<&str>, end: Option<&str>) -> CreateJobRequest {
        CreateJobRequest {
            name: name.to_string(),
            location: None,
            salary: None,
            education_level: None,
            job_type: None,
            description: None,
            requirements: None,
            benefits: None,
            work_address: None,
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            active: None,
        }
    }

    #[test]
    fn test_job_validator_requires_name() {
        let validator = JobValidator;
        assert!(validator.validate(&request("Backend Engineer", None, None)).is_valid);
        assert!(!validator.validate(&request("   ", None, None)).is_valid);
    }

    #[test]
    fn test_job_validator_checks_date_order() {
        let validator = JobValidator;
        assert!(validator
            .validate(&request("x", Some("2026-01-01"), Some("2026-02-01")))
            .is_valid);
        assert!(!validator
            .validate(&request("x", Some("2026-02-01"), Some("2026-01-01")))
            .is_valid);
    }
}

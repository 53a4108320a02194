//! Task submission validation.
//!
//! Shoppers earn wallet credit by logging completed tasks. Submissions
//! are validated here before they are stored for staff review.

use thiserror::Error;

/// Maximum task description length.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum number of supervising staff names per submission.
const MAX_SUPERVISORS: usize = 10;

/// Errors produced when a task submission fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    #[error("task description must not be empty")]
    EmptyDescription,
    #[error("task description must be at most {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,
    #[error("at least one supervising staff member is required")]
    NoSupervisors,
    #[error("too many supervisors listed (max {MAX_SUPERVISORS})")]
    TooManySupervisors,
    #[error("supervisor names must not be empty")]
    EmptySupervisor,
}

/// A validated task submission.
#[derive(Debug, Clone)]
pub struct TaskSubmission {
    pub description: String,
    pub supervisors: Vec<String>,
}

impl TaskSubmission {
    /// Validate raw submission input.
    ///
    /// Whitespace is trimmed from the description and every supervisor
    /// name before the checks run.
    ///
    /// # Errors
    ///
    /// Returns `TaskValidationError` describing the first failed check.
    pub fn parse(description: &str, supervisors: &[String]) -> Result<Self, TaskValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        if description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(TaskValidationError::DescriptionTooLong);
        }

        if supervisors.is_empty() {
            return Err(TaskValidationError::NoSupervisors);
        }
        if supervisors.len() > MAX_SUPERVISORS {
            return Err(TaskValidationError::TooManySupervisors);
        }

        let mut trimmed = Vec::with_capacity(supervisors.len());
        for name in supervisors {
            let name = name.trim();
            if name.is_empty() {
                return Err(TaskValidationError::EmptySupervisor);
            }
            trimmed.push(name.to_string());
        }

        Ok(Self {
            description: description.to_string(),
            supervisors: trimmed,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_fields() {
        let submission =
            TaskSubmission::parse("  swept the stockroom  ", &["  Rania ".to_string()]).unwrap();
        assert_eq!(submission.description, "swept the stockroom");
        assert_eq!(submission.supervisors, vec!["Rania".to_string()]);
    }

    #[test]
    fn test_parse_rejects_empty_description() {
        let result = TaskSubmission::parse("   ", &["Rania".to_string()]);
        assert_eq!(result.unwrap_err(), TaskValidationError::EmptyDescription);
    }

    #[test]
    fn test_parse_rejects_long_description() {
        let result = TaskSubmission::parse(&"x".repeat(501), &["Rania".to_string()]);
        assert_eq!(result.unwrap_err(), TaskValidationError::DescriptionTooLong);
    }

    #[test]
    fn test_parse_requires_supervisors() {
        let result = TaskSubmission::parse("stocked shelves", &[]);
        assert_eq!(result.unwrap_err(), TaskValidationError::NoSupervisors);

        let result = TaskSubmission::parse("stocked shelves", &["  ".to_string()]);
        assert_eq!(result.unwrap_err(), TaskValidationError::EmptySupervisor);
    }
}

//! Error types for scheduling, history persistence, and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the fallible scheduling entry points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// The input failed validation. Carries every detected problem.
    #[error("invalid schedule input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Too many tasks for the exhaustive search.
    #[error("backtracking accepts at most {limit} tasks, got {count}")]
    TooManyTasks { count: usize, limit: usize },

    /// A method name that is neither `greedy` nor `backtracking`.
    #[error("unknown scheduling method '{0}'")]
    UnknownMethod(String),
}

impl ScheduleError {
    /// Returns true if the caller's input (tasks or budget) was rejected.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ScheduleError::InvalidInput(_))
    }

    /// Validation problems, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::InvalidInput(errors)
    }
}

/// Errors from a history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Deletion index outside the stored records.
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reading, writing, or locking the history file failed.
    #[error("history I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file is not valid JSON for the record format.
    #[error("malformed history file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors loading planner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_lists_problems() {
        let err = ScheduleError::from(vec![
            ValidationError::new(ValidationErrorKind::InvalidBudget, "budget is -1"),
            ValidationError::new(ValidationErrorKind::EmptyName, "task #0 has an empty name"),
        ]);

        assert!(err.is_input_error());
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid schedule input: budget is -1; task #0 has an empty name"
        );
    }

    #[test]
    fn test_too_many_tasks_message() {
        let err = ScheduleError::TooManyTasks {
            count: 40,
            limit: 25,
        };
        assert!(!err.is_input_error());
        assert!(err.validation_errors().is_empty());
        assert_eq!(err.to_string(), "backtracking accepts at most 25 tasks, got 40");
    }

    #[test]
    fn test_history_index_message() {
        let err = HistoryError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "history index 3 out of range (len 2)");
    }
}

//! Input validation for selection requests.
//!
//! Checks the budget and every task before a strategy runs. Detects:
//! - Negative budgets
//! - Empty (or whitespace-only) task names
//! - Negative priority scores
//! - Priority totals that do not fit in an `i64` score
//!
//! All problems are collected, not just the first. Negative deadlines are
//! accepted: a deadline is only an ordering key.

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The budget is negative.
    InvalidBudget,
    /// A task has an empty name, so tie-breaks would not be reproducible.
    EmptyName,
    /// A task has a negative priority score.
    NegativePriority,
    /// The priorities sum past `i64::MAX`, so a score could overflow.
    ScoreOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task list and budget.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], budget: i64) -> ValidationResult {
    let mut errors = Vec::new();
    // Every selection sums a subset of the non-negative priorities, so a
    // total that fits bounds every score either strategy can compute.
    let mut total: Option<i64> = Some(0);

    if budget < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBudget,
            format!("budget must be non-negative, got {budget}"),
        ));
    }

    for (index, task) in tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("task #{index} has an empty name"),
            ));
        }
        if task.priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!(
                    "task #{index} ('{}') has negative priority {}",
                    task.name, task.priority
                ),
            ));
        } else {
            total = total.and_then(|sum| sum.checked_add(task.priority));
        }
    }

    if total.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ScoreOverflow,
            format!("sum of task priorities exceeds {}", i64::MAX),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates and converts a caller budget to a slot count.
pub(crate) fn checked_budget(tasks: &[Task], budget: i64) -> Result<usize, Vec<ValidationError>> {
    validate_input(tasks, budget)?;
    // Budgets beyond the address space cap at "select everything"
    Ok(usize::try_from(budget).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("A", 1, 5),
            Task::new("B", 2, 3).with_difficulty(2),
            Task::new("C", -1, 0),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_tasks(), 2).is_ok());
        assert!(validate_input(&sample_tasks(), 0).is_ok());
        assert!(validate_input(&[], 0).is_ok());
    }

    #[test]
    fn test_negative_budget() {
        let errors = validate_input(&sample_tasks(), -1).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidBudget);
    }

    #[test]
    fn test_empty_name() {
        let tasks = vec![Task::new("", 1, 1), Task::new("   ", 1, 1)];
        let errors = validate_input(&tasks, 1).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyName));
        assert!(errors[1].message.contains("#1"));
    }

    #[test]
    fn test_negative_priority() {
        let tasks = vec![Task::new("bad", 1, -4)];
        let errors = validate_input(&tasks, 1).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativePriority);
        assert!(errors[0].message.contains("'bad'"));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![Task::new("", 1, -1), Task::new("ok", 1, 1)];
        let errors = validate_input(&tasks, -5).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_priority_sum_overflow() {
        let tasks = vec![Task::new("a", 1, i64::MAX), Task::new("b", 1, 1)];
        let errors = validate_input(&tasks, 2).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ScoreOverflow);
    }

    #[test]
    fn test_priority_sum_at_limit() {
        let tasks = vec![
            Task::new("a", 1, i64::MAX - 1),
            Task::new("b", 1, 1),
            Task::new("c", 1, 0),
        ];
        assert!(validate_input(&tasks, 3).is_ok());
    }

    #[test]
    fn test_negative_priority_not_counted_in_sum() {
        // The rejected priority must not mask or trigger an overflow error
        let tasks = vec![Task::new("a", 1, i64::MAX), Task::new("b", 1, i64::MIN)];
        let errors = validate_input(&tasks, 2).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativePriority);
    }

    #[test]
    fn test_checked_budget() {
        assert_eq!(checked_budget(&sample_tasks(), 2), Ok(2));
        assert!(checked_budget(&sample_tasks(), -2).is_err());
    }
}

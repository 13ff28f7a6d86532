//! Greedy sort-and-fill selection.
//!
//! # Algorithm
//!
//! 1. Sort a copy of the tasks by `(deadline, -priority, name)`.
//! 2. Accept tasks in sorted order while fewer than `budget` are accepted.
//!
//! # Complexity
//! O(n log n). Not optimal: an early-deadline, low-priority task is taken
//! ahead of a later, more valuable one.

use super::SelectionStrategy;
use crate::models::{ScheduleResult, Task};
use crate::ordering;

/// Earliest-deadline-first fill.
///
/// The output order equals the sort order. Because the sort key is total,
/// the result is identical for any permutation of the same input.
///
/// # Example
///
/// ```
/// use u_taskpick::models::Task;
/// use u_taskpick::scheduler::{Greedy, SelectionStrategy};
///
/// let tasks = vec![Task::new("B", 2, 3), Task::new("A", 1, 5), Task::new("C", 1, 4)];
/// let result = Greedy.select(&tasks, 2);
/// assert_eq!(result.names(), vec!["A", "C"]);
/// assert_eq!(result.score, 9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl SelectionStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(&self, tasks: &[Task], budget: usize) -> ScheduleResult {
        let mut sorted = tasks.to_vec();
        sorted.sort_by(ordering::greedy_order);

        let mut selected = Vec::with_capacity(budget.min(sorted.len()));
        let mut used = 0usize;
        let mut score = 0i64;

        for task in sorted {
            if used >= budget {
                break;
            }
            used += 1;
            score += task.priority;
            selected.push(task);
        }

        ScheduleResult { selected, score }
    }
}

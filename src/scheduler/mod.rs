//! Selection strategies.
//!
//! Both strategies take `(tasks, budget)` and return a [`ScheduleResult`].
//! They are pure: no shared state, no I/O, input never modified. Any number
//! of callers may run them concurrently.
//!
//! | Strategy | Order | Optimal | Cost |
//! |----------|-------|---------|------|
//! | [`Greedy`] | deadline-first fill | no | O(n log n) |
//! | [`Backtracking`] | include/exclude DFS | yes | O(2^n) |
//!
//! The infallible [`SelectionStrategy::select`] takes a slot count. The
//! boundary operations [`schedule_greedy`] and [`schedule_backtracking`]
//! take the caller's raw budget and reject invalid input instead of
//! coercing it.

mod backtracking;
mod greedy;

pub use backtracking::Backtracking;
pub use greedy::Greedy;

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{ScheduleResult, Task};
use crate::validation::checked_budget;

/// Largest task count [`schedule_backtracking`] accepts.
///
/// 25 tasks is ~33M leaves in the worst case.
pub const DEFAULT_BACKTRACKING_LIMIT: usize = 25;

/// A task selection strategy.
///
/// # Contract
/// For every call, `result.len() <= budget` and `result.score` equals the
/// sum of `priority` over `result.selected`.
pub trait SelectionStrategy: Send + Sync + Debug {
    /// Strategy name (e.g., "greedy").
    fn name(&self) -> &'static str;

    /// Selects at most `budget` tasks.
    fn select(&self, tasks: &[Task], budget: usize) -> ScheduleResult;
}

/// Which strategy a request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMethod {
    /// Deterministic sort-and-fill.
    #[default]
    Greedy,
    /// Exhaustive optimal search.
    Backtracking,
}

impl ScheduleMethod {
    /// The strategy implementing this method.
    pub fn strategy(self) -> &'static dyn SelectionStrategy {
        match self {
            ScheduleMethod::Greedy => &Greedy,
            ScheduleMethod::Backtracking => &Backtracking,
        }
    }

    /// Lowercase method name.
    pub fn as_str(self) -> &'static str {
        self.strategy().name()
    }
}

impl fmt::Display for ScheduleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleMethod {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(ScheduleMethod::Greedy),
            "backtracking" => Ok(ScheduleMethod::Backtracking),
            other => Err(ScheduleError::UnknownMethod(other.to_string())),
        }
    }
}

/// Validates input and runs the greedy strategy.
///
/// # Errors
/// [`ScheduleError::InvalidInput`] for a negative budget, an empty task
/// name, a negative priority, or priorities whose sum overflows `i64`.
///
/// # Example
///
/// ```
/// use u_taskpick::models::Task;
/// use u_taskpick::scheduler::schedule_greedy;
///
/// let tasks = vec![Task::new("P", 1, 1), Task::new("Q", 1, 100)];
/// let result = schedule_greedy(&tasks, 1).unwrap();
/// assert_eq!(result.names(), vec!["Q"]);
/// assert!(schedule_greedy(&tasks, -1).is_err());
/// ```
pub fn schedule_greedy(tasks: &[Task], budget: i64) -> Result<ScheduleResult, ScheduleError> {
    let slots = checked_budget(tasks, budget)?;
    Ok(Greedy.select(tasks, slots))
}

/// Validates input and runs the backtracking strategy.
///
/// The result is in input order; call
/// [`ScheduleResult::sorted_for_display`] for presentation.
///
/// # Errors
/// [`ScheduleError::InvalidInput`] as for [`schedule_greedy`], and
/// [`ScheduleError::TooManyTasks`] above [`DEFAULT_BACKTRACKING_LIMIT`].
pub fn schedule_backtracking(
    tasks: &[Task],
    budget: i64,
) -> Result<ScheduleResult, ScheduleError> {
    let slots = checked_budget(tasks, budget)?;
    if tasks.len() > DEFAULT_BACKTRACKING_LIMIT {
        return Err(ScheduleError::TooManyTasks {
            count: tasks.len(),
            limit: DEFAULT_BACKTRACKING_LIMIT,
        });
    }
    Ok(Backtracking.select(tasks, slots))
}

//! Exhaustive include/exclude search.
//!
//! # Algorithm
//!
//! Depth-first over the binary decision "include task i" / "exclude task i"
//! for i in input order (no pre-sorting). The include branch is always
//! explored first. A branch is abandoned as soon as more than `budget`
//! units are used; no other pruning is applied.
//!
//! At each leaf the running score replaces the best so far only when it is
//! strictly greater, so among equal-score subsets the first one found is
//! kept. Include-first exploration makes that the subset favoring earlier
//! input positions. The best starts as `(empty, 0)`, so a selection scoring
//! zero is never reported.
//!
//! # Complexity
//! Time O(2^n); space O(n) for the recursion plus O(k) for the best
//! snapshot. Intended for small task counts only, see
//! [`DEFAULT_BACKTRACKING_LIMIT`](super::DEFAULT_BACKTRACKING_LIMIT).

use super::SelectionStrategy;
use crate::models::{ScheduleResult, Task};

/// Optimal subset search.
///
/// Returns a maximum-score subset with at most `budget` tasks, in input
/// order. Presentation sorting is left to the consumer
/// ([`ScheduleResult::sorted_for_display`]).
///
/// # Example
///
/// ```
/// use u_taskpick::models::Task;
/// use u_taskpick::scheduler::{Backtracking, SelectionStrategy};
///
/// let tasks = vec![Task::new("urgent", 1, 1), Task::new("valuable", 2, 50)];
/// let result = Backtracking.select(&tasks, 1);
/// assert_eq!(result.names(), vec!["valuable"]);
/// assert_eq!(result.score, 50);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl SelectionStrategy for Backtracking {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn select(&self, tasks: &[Task], budget: usize) -> ScheduleResult {
        let mut state = SearchState::new(tasks, budget);
        state.search(0, 0, 0);

        let selected = state.best.iter().map(|&i| tasks[i].clone()).collect();
        ScheduleResult {
            selected,
            score: state.best_score,
        }
    }
}

/// Accumulator threaded through the recursion.
///
/// `current` holds indices of the partial subset on the current path;
/// `best` is a snapshot of the best complete subset found so far.
struct SearchState<'a> {
    tasks: &'a [Task],
    budget: usize,
    current: Vec<usize>,
    best: Vec<usize>,
    best_score: i64,
}

impl<'a> SearchState<'a> {
    fn new(tasks: &'a [Task], budget: usize) -> Self {
        Self {
            tasks,
            budget,
            current: Vec::with_capacity(tasks.len()),
            best: Vec::new(),
            best_score: 0,
        }
    }

    fn search(&mut self, index: usize, used: usize, score: i64) {
        if used > self.budget {
            return;
        }

        if index == self.tasks.len() {
            if score > self.best_score {
                self.best_score = score;
                self.best.clear();
                self.best.extend_from_slice(&self.current);
            }
            return;
        }

        // Include
        self.current.push(index);
        self.search(index + 1, used + 1, score + self.tasks[index].priority);
        self.current.pop();

        // Exclude
        self.search(index + 1, used, score);
    }
}

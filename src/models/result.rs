//! Selection result model.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::ordering;

/// The output of one scheduling run: the selected tasks and their total score.
///
/// # Invariants
/// - `score == selected.iter().map(|t| t.priority).sum()`
/// - `selected.len() <= budget` for the budget the run was given
///
/// Results built through [`ScheduleResult::from_selection`] satisfy the
/// first invariant by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Selected tasks, in the order defined by the producing strategy.
    pub selected: Vec<Task>,
    /// Sum of `priority` over `selected`.
    pub score: i64,
}

impl ScheduleResult {
    /// Creates an empty result (no tasks, score 0).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a result from selected tasks, computing the score.
    pub fn from_selection(selected: Vec<Task>) -> Self {
        let score = selected.iter().map(|t| t.priority).sum();
        Self { selected, score }
    }

    /// Number of selected tasks (time units consumed).
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of difficulty over the selected tasks.
    pub fn total_difficulty(&self) -> i64 {
        self.selected.iter().map(|t| t.difficulty).sum()
    }

    /// Names of the selected tasks, in result order.
    pub fn names(&self) -> Vec<&str> {
        self.selected.iter().map(|t| t.name.as_str()).collect()
    }

    /// Re-sorts the selection by `(deadline, -priority)` for presentation.
    ///
    /// The sort is stable, so tasks tied on both keys keep the order the
    /// strategy produced. Score is unchanged.
    pub fn sorted_for_display(mut self) -> Self {
        self.selected.sort_by(ordering::display_order);
        self
    }
}

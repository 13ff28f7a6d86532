//! Task model.
//!
//! A task is one schedulable item. Selecting it consumes exactly one
//! indivisible unit of the time budget.

use serde::{Deserialize, Serialize};

/// A task submitted for selection.
///
/// Tasks are immutable values: the schedulers copy them into their results
/// and never modify them. Two tasks with equal fields are interchangeable.
///
/// # Field Semantics
/// - `deadline`: smaller = more urgent. Unit-agnostic.
/// - `priority`: higher = more valuable. Summed into the result score.
/// - `difficulty`: informational only, carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Identifier used for display and the final tie-break. Not unique.
    pub name: String,
    /// Relative urgency.
    pub deadline: i64,
    /// Priority score contributed when selected.
    pub priority: i64,
    /// Informational difficulty rating.
    #[serde(default)]
    pub difficulty: i64,
}

impl Task {
    /// Creates a task with zero difficulty.
    pub fn new(name: impl Into<String>, deadline: i64, priority: i64) -> Self {
        Self {
            name: name.into(),
            deadline,
            priority,
            difficulty: 0,
        }
    }

    /// Sets the difficulty rating.
    pub fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = difficulty;
        self
    }
}

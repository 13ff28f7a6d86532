//! Budget-constrained task selection.
//!
//! Given a list of tasks and a time budget (each task costs one unit),
//! select the subset that fits while maximizing total priority score.
//!
//! # Modules
//!
//! - **`models`**: `Task` and `ScheduleResult`
//! - **`ordering`**: Shared comparators (selection order, display order)
//! - **`scheduler`**: `Greedy` and `Backtracking` strategies and the
//!   validated entry points `schedule_greedy` / `schedule_backtracking`
//! - **`validation`**: Input checks (negative budget, empty names, negative priorities)
//! - **`planner`**: Request handling: defaults, size policy, display sorting, history
//! - **`history`**: Newest-first run history (in-memory or JSON file)
//! - **`config`**: Planner settings loaded from TOML
//!
//! # Strategies
//!
//! The greedy strategy sorts by `(deadline, -priority, name)` and fills the
//! budget in that order: fast and deterministic, not optimal. The
//! backtracking strategy searches every include/exclude decision and returns
//! a maximum-score subset; it is exponential and capped at a small task count.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4 (Greedy Algorithms)
//! - Skiena (2008), "The Algorithm Design Manual", Ch. 7 (Combinatorial Search)

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod ordering;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::{ConfigError, HistoryError, ScheduleError};
pub use models::{ScheduleResult, Task};
pub use scheduler::{schedule_backtracking, schedule_greedy, ScheduleMethod};

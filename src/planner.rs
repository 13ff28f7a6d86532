//! Request-facing orchestration.
//!
//! A [`Planner`] turns a [`PlanRequest`] into a [`PlanOutcome`]:
//!
//! 1. Validate tasks and budget (all problems reported at once).
//! 2. Resolve the method; apply the backtracking size policy.
//! 3. Run the strategy.
//! 4. Backtracking results are re-sorted for display here, after the
//!    search, so the search itself stays order-agnostic.
//! 5. Optionally record the run in a [`HistoryStore`].

use serde::{Deserialize, Serialize};

use crate::config::{OversizePolicy, PlannerConfig};
use crate::error::{ConfigError, HistoryError, ScheduleError};
use crate::history::{HistoryRecord, HistoryStore};
use crate::models::{ScheduleResult, Task};
use crate::scheduler::ScheduleMethod;
use crate::validation::checked_budget;

/// Requester name used when none (or a blank one) is given.
pub const ANONYMOUS: &str = "-";

/// A scheduling request as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Tasks to choose from.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Requested strategy. `None` = configured default.
    #[serde(default)]
    pub method: Option<ScheduleMethod>,
    /// Time budget. `None` = one unit per submitted task.
    #[serde(default)]
    pub budget: Option<i64>,
    /// Requester identity.
    #[serde(default)]
    pub student_name: Option<String>,
}

impl PlanRequest {
    /// Creates a request for the given tasks.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Default::default()
        }
    }

    /// Sets the strategy.
    pub fn with_method(mut self, method: ScheduleMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the time budget.
    pub fn with_budget(mut self, budget: i64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets the requester name.
    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }

    /// Budget after applying the default (task count).
    pub fn effective_budget(&self) -> i64 {
        self.budget
            .unwrap_or_else(|| i64::try_from(self.tasks.len()).unwrap_or(i64::MAX))
    }

    /// Trimmed requester name, or [`ANONYMOUS`].
    pub fn requester(&self) -> String {
        self.student_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string()
    }
}

/// The answer to a [`PlanRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Strategy that actually ran (differs from the request on fallback).
    pub method: ScheduleMethod,
    /// Selected tasks in presentation order.
    pub scheduled: Vec<Task>,
    /// Total priority score.
    pub total_score: i64,
    /// Normalized requester name.
    pub student_name: String,
}

impl PlanOutcome {
    /// The selection as a [`ScheduleResult`].
    pub fn result(&self) -> ScheduleResult {
        ScheduleResult {
            selected: self.scheduled.clone(),
            score: self.total_score,
        }
    }
}

/// Errors from [`Planner::plan_and_record`].
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Validates requests, picks a strategy, and formats results.
///
/// # Example
///
/// ```
/// use u_taskpick::models::Task;
/// use u_taskpick::planner::{PlanRequest, Planner};
/// use u_taskpick::scheduler::ScheduleMethod;
///
/// let request = PlanRequest::new(vec![
///     Task::new("B", 2, 3),
///     Task::new("C", 1, 4),
///     Task::new("A", 1, 5),
/// ])
/// .with_method(ScheduleMethod::Backtracking)
/// .with_budget(2);
///
/// let outcome = Planner::default().plan(&request).unwrap();
/// assert_eq!(outcome.total_score, 9);
/// assert_eq!(outcome.scheduled[0].name, "A");
/// assert_eq!(outcome.student_name, "-");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with the given configuration.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if the configuration fails
    /// [`PlannerConfig::validate`], e.g. a backtracking limit above
    /// [`MAX_BACKTRACKING_LIMIT`](crate::config::MAX_BACKTRACKING_LIMIT).
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs a request.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidInput`] if tasks or budget are invalid.
    /// - [`ScheduleError::TooManyTasks`] if backtracking is requested above
    ///   the configured limit under [`OversizePolicy::Reject`].
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome, ScheduleError> {
        let budget = checked_budget(&request.tasks, request.effective_budget())?;
        let requested = request.method.unwrap_or(self.config.default_method);
        let method = self.resolve_method(requested, request.tasks.len())?;

        let strategy = method.strategy();
        let mut result = strategy.select(&request.tasks, budget);
        if method == ScheduleMethod::Backtracking {
            result = result.sorted_for_display();
        }

        tracing::debug!(
            method = strategy.name(),
            tasks = request.tasks.len(),
            budget,
            selected = result.len(),
            score = result.score,
            "plan computed"
        );

        Ok(PlanOutcome {
            method,
            scheduled: result.selected,
            total_score: result.score,
            student_name: request.requester(),
        })
    }

    /// Runs a request and prepends the outcome to `store`.
    ///
    /// Nothing is recorded if planning fails.
    pub fn plan_and_record<S: HistoryStore + ?Sized>(
        &self,
        request: &PlanRequest,
        store: &mut S,
    ) -> Result<PlanOutcome, PlanError> {
        let outcome = self.plan(request)?;
        let record = HistoryRecord::new(outcome.method, &outcome.result(), &outcome.student_name);
        store.prepend(record)?;
        tracing::info!(
            method = %outcome.method,
            score = outcome.total_score,
            student = %outcome.student_name,
            "plan recorded"
        );
        Ok(outcome)
    }

    fn resolve_method(
        &self,
        requested: ScheduleMethod,
        task_count: usize,
    ) -> Result<ScheduleMethod, ScheduleError> {
        let limit = self.config.backtracking_limit;
        if requested != ScheduleMethod::Backtracking || task_count <= limit {
            return Ok(requested);
        }

        match self.config.oversize_policy {
            OversizePolicy::Reject => Err(ScheduleError::TooManyTasks {
                count: task_count,
                limit,
            }),
            OversizePolicy::FallbackGreedy => {
                tracing::warn!(
                    tasks = task_count,
                    limit,
                    "too many tasks for backtracking, falling back to greedy"
                );
                Ok(ScheduleMethod::Greedy)
            }
        }
    }
}

//! Planner configuration.
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! default_method = "greedy"
//! backtracking_limit = 25
//! oversize_policy = "fallback_greedy"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheduler::{ScheduleMethod, DEFAULT_BACKTRACKING_LIMIT};

/// Hard upper bound for `backtracking_limit`, enforced by
/// [`PlannerConfig::validate`] on load and in
/// [`Planner::new`](crate::planner::Planner::new). Beyond this the search
/// does not finish in any practical time.
pub const MAX_BACKTRACKING_LIMIT: usize = 30;

/// What to do when a backtracking request exceeds the task limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Fail with `ScheduleError::TooManyTasks`.
    #[default]
    Reject,
    /// Run the greedy strategy instead and log a warning.
    FallbackGreedy,
}

/// Configuration for [`Planner`](crate::planner::Planner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Method used when a request names none.
    pub default_method: ScheduleMethod,
    /// Largest task count sent to the backtracking search.
    pub backtracking_limit: usize,
    /// Behavior above `backtracking_limit`.
    pub oversize_policy: OversizePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_method: ScheduleMethod::Greedy,
            backtracking_limit: DEFAULT_BACKTRACKING_LIMIT,
            oversize_policy: OversizePolicy::Reject,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default method.
    pub fn with_default_method(mut self, method: ScheduleMethod) -> Self {
        self.default_method = method;
        self
    }

    /// Sets the backtracking task limit. Checked by [`Self::validate`].
    pub fn with_backtracking_limit(mut self, limit: usize) -> Self {
        self.backtracking_limit = limit;
        self
    }

    /// Sets the oversize policy.
    pub fn with_oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = policy;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtracking_limit > MAX_BACKTRACKING_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "backtracking_limit {} exceeds maximum {MAX_BACKTRACKING_LIMIT}",
                self.backtracking_limit
            )));
        }
        Ok(())
    }
}

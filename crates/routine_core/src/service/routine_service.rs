//! Routine use-case service.
//!
//! # Responsibility
//! - Pair the in-memory `RoutineState` with a persistence repository.
//! - Persist each documented mutation right after it is decided.
//!
//! # Invariants
//! - Storage is written before in-memory state; a failed write leaves the
//!   state unchanged.
//! - Toggles write the target state, not a flip, so a replayed write cannot
//!   invert a completion.
//! - Log events carry IDs and counts only, never titles or descriptions.

use crate::config::{ConfigError, EngineConfig};
use crate::model::task::{NewTask, RecurringTask, TaskId, TaskValidationError};
use crate::repo::routine_repo::{RepoError, RoutineRepository};
use crate::state::RoutineState;
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RoutineServiceResult<T> = Result<T, RoutineServiceError>;

/// Service error for routine use-cases.
#[derive(Debug)]
pub enum RoutineServiceError {
    Validation(TaskValidationError),
    Config(ConfigError),
    Repo(RepoError),
}

impl Display for RoutineServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid engine config: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RoutineServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RoutineServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConfigError> for RoutineServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for RoutineServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Persisted routine session.
pub struct RoutineService<R: RoutineRepository> {
    repo: R,
    state: RoutineState,
}

impl<R: RoutineRepository> RoutineService<R> {
    /// Loads tasks and completion history from `repo`.
    pub fn load(repo: R, config: EngineConfig) -> RoutineServiceResult<Self> {
        config.validate()?;
        let tasks = repo.load_tasks()?;
        let ledger = repo.load_ledger()?;
        info!(
            "event=routine_load module=service status=ok task_count={} has_history={}",
            tasks.len(),
            ledger.has_history()
        );
        Ok(Self {
            repo,
            state: RoutineState::from_parts(config, tasks, ledger),
        })
    }

    /// Read access for agenda, classification and streak queries.
    pub fn state(&self) -> &RoutineState {
        &self.state
    }

    pub fn add_task(&mut self, definition: &NewTask) -> RoutineServiceResult<TaskId> {
        let task = RecurringTask::create(definition).inspect_err(|err| {
            warn!("event=task_add module=service status=rejected reason={err}");
        })?;
        self.repo.insert_task(&task)?;
        let id = task.id;
        self.state.insert_task(task)?;
        info!("event=task_add module=service status=ok task_id={id}");
        Ok(id)
    }

    /// Deletes the definition; completion history for `task_id` is kept.
    pub fn delete_task(&mut self, task_id: TaskId) -> RoutineServiceResult<bool> {
        let removed_row = self.repo.delete_task(task_id)?;
        let removed = self.state.delete_task(task_id) || removed_row;
        let status = if removed { "ok" } else { "noop" };
        info!("event=task_delete module=service status={status} task_id={task_id}");
        Ok(removed)
    }

    /// Flips completion for `task_id` on `day`; returns the new state.
    pub fn toggle_completion(
        &mut self,
        task_id: TaskId,
        day: NaiveDate,
    ) -> RoutineServiceResult<bool> {
        let completed = !self.state.is_completed(task_id, day);
        self.repo.set_completion(task_id, day, completed)?;
        self.state.set_completed(task_id, day, completed);
        info!(
            "event=completion_toggle module=service status=ok task_id={task_id} day={} completed={completed} known_task={}",
            day.format("%Y-%m-%d"),
            self.state.task(task_id).is_some()
        );
        Ok(completed)
    }
}

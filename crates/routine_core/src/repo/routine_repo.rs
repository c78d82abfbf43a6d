//! Routine repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist task definitions and completion entries.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate tasks before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Tasks load in creation order (`created_seq ASC`).
//! - Deleting a task leaves its completion rows untouched.

use crate::calendar::DayKey;
use crate::db::DbError;
use crate::ledger::CompletionLedger;
use crate::model::task::{
    DaysOfWeek, Priority, RecurringTask, TaskId, TaskValidationError, TimeOfDay,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for routine persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted routine data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "routine database is missing table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for routine state.
pub trait RoutineRepository {
    fn insert_task(&self, task: &RecurringTask) -> RepoResult<()>;
    /// Returns whether a row was removed.
    fn delete_task(&self, id: TaskId) -> RepoResult<bool>;
    fn load_tasks(&self) -> RepoResult<Vec<RecurringTask>>;
    /// Writes the already-decided completion state for one `(day, task)`.
    fn set_completion(&self, task_id: TaskId, day: NaiveDate, completed: bool) -> RepoResult<()>;
    fn load_ledger(&self) -> RepoResult<CompletionLedger>;
}

/// SQLite-backed routine repository.
pub struct SqliteRoutineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoutineRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::MissingRequiredTable` when the schema is not in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["routine_tasks", "task_completions"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl RoutineRepository for SqliteRoutineRepository<'_> {
    fn insert_task(&self, task: &RecurringTask) -> RepoResult<()> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO routine_tasks (
                id,
                title,
                description,
                time_of_day,
                duration_minutes,
                priority,
                days_mask
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                task.time_of_day.to_string(),
                i64::from(task.duration_minutes),
                task.priority.as_str(),
                i64::from(task.days_of_week.bits()),
            ],
        )?;
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM routine_tasks WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn load_tasks(&self) -> RepoResult<Vec<RecurringTask>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, time_of_day, duration_minutes, priority, days_mask
             FROM routine_tasks
             ORDER BY created_seq ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn set_completion(&self, task_id: TaskId, day: NaiveDate, completed: bool) -> RepoResult<()> {
        let day_key = DayKey::from_date(day).to_string();
        let sql = if completed {
            "INSERT OR IGNORE INTO task_completions (day_key, task_id) VALUES (?1, ?2);"
        } else {
            "DELETE FROM task_completions WHERE day_key = ?1 AND task_id = ?2;"
        };
        self.conn
            .execute(sql, params![day_key, task_id.to_string()])?;
        Ok(())
    }

    fn load_ledger(&self) -> RepoResult<CompletionLedger> {
        let mut stmt = self.conn.prepare(
            "SELECT day_key, task_id
             FROM task_completions
             ORDER BY day_key ASC, task_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut ledger = CompletionLedger::new();
        while let Some(row) = rows.next()? {
            let day_text: String = row.get("day_key")?;
            let day_key: DayKey = day_text.parse().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid day key `{day_text}` in task_completions.day_key"
                ))
            })?;
            let task_id = parse_uuid(&row.get::<_, String>("task_id")?, "task_completions.task_id")?;
            ledger.set_completed(task_id, day_key.date(), true);
        }
        Ok(ledger)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<RecurringTask> {
    let id = parse_uuid(&row.get::<_, String>("id")?, "routine_tasks.id")?;

    let time_text: String = row.get("time_of_day")?;
    let time_of_day: TimeOfDay = time_text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid time `{time_text}` in routine_tasks.time_of_day"
        ))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in routine_tasks.priority"
        ))
    })?;

    let duration: i64 = row.get("duration_minutes")?;
    let duration_minutes = u32::try_from(duration).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid duration `{duration}` in routine_tasks.duration_minutes"
        ))
    })?;

    let mask: i64 = row.get("days_mask")?;
    let days_of_week = u8::try_from(mask)
        .ok()
        .and_then(|bits| DaysOfWeek::from_bits(bits).ok())
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid mask `{mask}` in routine_tasks.days_mask"))
        })?;

    let task = RecurringTask {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        time_of_day,
        duration_minutes,
        priority,
        days_of_week,
    };
    task.validate()?;
    Ok(task)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

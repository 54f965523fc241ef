//! Ephemeral background task list shown in the status bar.
//!
//! Tasks run, reach a terminal status, and are dropped from the list after a
//! grace period. Removal deadlines are owned by the tracker and resolved by
//! [`BackgroundTaskTracker::sweep`], so nothing outlives the tracker itself.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Default time a finished task stays visible
pub const DEFAULT_COMPLETION_GRACE: Duration = Duration::from_millis(3000);

/// Opaque task identifier (time-ordered UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Running)
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    /// Percentage, expected in 0..=100 (not clamped)
    pub progress: u8,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct BackgroundTaskTracker {
    tasks: Vec<BackgroundTask>,
    current: Option<TaskId>,
    grace: Duration,
    /// Pending removals for finished tasks
    removals: Vec<(TaskId, Instant)>,
}

impl Default for BackgroundTaskTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLETION_GRACE)
    }
}

impl BackgroundTaskTracker {
    pub fn new(grace: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            current: None,
            grace,
            removals: Vec::new(),
        }
    }

    /// Start a running task at 0% and make it current
    pub fn start(&mut self, name: impl Into<String>, details: Option<String>) -> TaskId {
        let id = TaskId::generate();
        let name = name.into();
        tracing::info!(task_id = %id, task = %name, "Background task started");
        self.tasks.push(BackgroundTask {
            id,
            name,
            status: TaskStatus::Running,
            progress: 0,
            started_at: Utc::now(),
            ended_at: None,
            details,
        });
        self.current = Some(id);
        id
    }

    /// Update progress (and optionally details). Returns false for unknown ids.
    pub fn update_progress(&mut self, id: TaskId, progress: u8, details: Option<String>) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        task.progress = progress;
        if details.is_some() {
            task.details = details;
        }
        true
    }

    /// Finish a task using the wall clock for the removal deadline
    pub fn complete(&mut self, id: TaskId, status: TaskStatus) -> bool {
        self.complete_at(id, status, Instant::now())
    }

    /// Finish a task: forces 100%, stamps the end time and schedules removal
    /// `grace` after `now`.
    pub fn complete_at(&mut self, id: TaskId, status: TaskStatus, now: Instant) -> bool {
        let grace = self.grace;
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        task.status = status;
        task.progress = 100;
        task.ended_at = Some(Utc::now());
        tracing::info!(task_id = %id, task = %task.name, status = ?status, "Background task finished");

        if self.current == Some(id) {
            self.current = None;
        }
        self.removals.retain(|(pending, _)| *pending != id);
        self.removals.push((id, now + grace));
        true
    }

    /// Remove immediately
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.removals.retain(|(pending, _)| *pending != id);
        if self.current == Some(id) {
            self.current = None;
        }
        self.tasks.len() != before
    }

    /// Drop finished tasks whose grace period has elapsed; returns their ids
    pub fn sweep(&mut self, now: Instant) -> Vec<TaskId> {
        let (expired, pending): (Vec<_>, Vec<_>) = self
            .removals
            .drain(..)
            .partition(|(_, deadline)| *deadline <= now);
        self.removals = pending;

        let expired: Vec<TaskId> = expired.into_iter().map(|(id, _)| id).collect();
        if !expired.is_empty() {
            self.tasks.retain(|task| !expired.contains(&task.id));
        }
        expired
    }

    pub fn get(&self, id: TaskId) -> Option<&BackgroundTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut BackgroundTask> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    pub fn current(&self) -> Option<&BackgroundTask> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<TaskId> {
        self.current
    }

    pub fn tasks(&self) -> &[BackgroundTask] {
        &self.tasks
    }

    pub fn active_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Running)
            .count()
    }

    pub fn has_active_tasks(&self) -> bool {
        self.active_count() > 0
    }
}

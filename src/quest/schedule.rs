//! Deferred Task Scheduling
//!
//! All timing runs on the host's single logical thread: callers schedule
//! tasks with an absolute due time in milliseconds, and the host drains due
//! tasks from its main tick via `QuestEngine::tick`. Tasks carry only plain
//! ids; liveness is re-checked when a task fires, never captured.

use super::definition::QuestId;
use super::state::PlayerId;

/// What to do when a scheduled task comes due
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Deliver rewards for the quest the player completed
    DeliverReward { player: PlayerId, quest_id: QuestId },
    /// Replace the active-quest panel with the completion panel
    SwapCompletePanel { player: PlayerId, quest_id: QuestId },
    /// Show the first-login quest intro message
    IntroMessage { player: PlayerId },
}

#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub due_at: u64,
    pub kind: TaskKind,
}

/// Pending deferred tasks, drained in due order by the host tick.
#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at: u64, kind: TaskKind) {
        self.tasks.push(ScheduledTask { due_at, kind });
    }

    /// Remove and return every task due at `now`, preserving due order
    /// (schedule order for equal due times).
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledTask> {
        let mut due: Vec<ScheduledTask> = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.due_at <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;
        due.sort_by_key(|t| t.due_at);
        due
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

//! Transient status messages with independent per-entry timers.
//!
//! Each entry carries its own age. `advance` ages every entry by the same
//! elapsed time, so entries created at different moments reach their
//! deadlines independently and a new entry never resets an older one.
//! An entry still entering stops at the start of its visible stage, however
//! large the step, so every entry is seen visible by at least one tick.

use std::time::Duration;

use crate::view_model::NotificationView;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Where an entry is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStage {
    /// Queued but not shown yet; lets the front end play an enter transition.
    Entering,
    Visible,
    /// Hidden, waiting for the exit transition before removal.
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    pub enter_delay: Duration,
    /// How long an entry stays visible once shown.
    pub display: Duration,
    pub exit: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(10),
            display: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

impl NotificationTimings {
    /// Total time from creation to removal.
    pub fn lifetime(&self) -> Duration {
        self.enter_delay + self.display + self.exit
    }

    /// Stage for an entry of the given age, or `None` once it should be removed.
    pub fn stage_at(&self, age: Duration) -> Option<NotificationStage> {
        if age < self.enter_delay {
            Some(NotificationStage::Entering)
        } else if age < self.enter_delay + self.display {
            Some(NotificationStage::Visible)
        } else if age < self.lifetime() {
            Some(NotificationStage::Exiting)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveNotification {
    id: NotificationId,
    notification: Notification,
    age: Duration,
}

/// Ordered queue of active notifications; insertion order is display order.
/// No capacity limit and no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationCenter {
    timings: NotificationTimings,
    entries: Vec<ActiveNotification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new(timings: NotificationTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Enqueues a notification. Never fails.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ActiveNotification {
            id,
            notification: Notification::new(message, severity),
            age: Duration::ZERO,
        });
        id
    }

    /// Ages every entry by `elapsed` and drops the expired ones.
    /// Returns true when any entry changed stage or was removed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let timings = self.timings;
        let mut changed = false;
        self.entries.retain_mut(|entry| {
            let before = timings.stage_at(entry.age);
            entry.age = entry.age.saturating_add(elapsed);
            if before == Some(NotificationStage::Entering) {
                entry.age = entry.age.min(timings.enter_delay);
            }
            let after = timings.stage_at(entry.age);
            changed |= before != after;
            after.is_some()
        });
        changed
    }

    pub fn stage_of(&self, id: NotificationId) -> Option<NotificationStage> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .and_then(|entry| self.timings.stage_at(entry.age))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn views(&self) -> Vec<NotificationView> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let stage = self.timings.stage_at(entry.age)?;
                Some(NotificationView {
                    id: entry.id,
                    message: entry.notification.message().to_string(),
                    severity: entry.notification.severity(),
                    stage,
                })
            })
            .collect()
    }
}

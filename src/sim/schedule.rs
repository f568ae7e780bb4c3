//! Cancellable deferred tasks driven by simulation time
//!
//! Cosmetic pauses (e.g. the beat between the boss's fatal attack and the
//! game-over screen) are scheduled here instead of on ambient host timers,
//! so resetting or disposing a game drops them with it.

use serde::{Deserialize, Serialize};

/// Handle returned by [`Scheduler::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u32);

/// Work a task performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Finish the run after the fatal boss attack lands
    EndGame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Task {
    handle: TaskHandle,
    remaining: f32,
    action: DeferredAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` seconds of [`Scheduler::advance`] time
    pub fn schedule(&mut self, delay: f32, action: DeferredAction) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            handle,
            remaining: delay,
            action,
        });
        handle
    }

    /// Returns false if the task already fired or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("Cancelling {} pending task(s)", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance time and return due actions in scheduling order
    pub fn advance(&mut self, dt: f32) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.tasks.retain_mut(|t| {
            t.remaining -= dt;
            if t.remaining <= 0.0 {
                due.push(t.action);
                false
            } else {
                true
            }
        });
        due
    }
}

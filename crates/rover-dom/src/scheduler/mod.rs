mod timer;

use crate::platform::Platform;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

pub use timer::TimerQueue;

/// Deferred work; receives whichever platform is driving the loop
pub type Task = Box<dyn FnOnce(&mut dyn Platform)>;

/// Runs deferred callbacks (the ready hook after attach) on a timer queue
pub struct Scheduler {
    timers: TimerQueue,
    pending: HashMap<usize, Task>,
    next_id: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            timers: TimerQueue::new(),
            pending: HashMap::new(),
            next_id: 1,
        }
    }

    /// Schedule `task` to run after `delay_ms`; returns an id for `cancel`
    pub fn schedule_delay(&mut self, task: Task, delay_ms: u64) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let wake_time = Instant::now() + Duration::from_millis(delay_ms);
        self.timers.schedule(id, wake_time);
        self.pending.insert(id, task);
        debug!(id, delay_ms, "scheduled task");
        id
    }

    /// Returns false when the task already ran or was never scheduled
    pub fn cancel(&mut self, id: usize) -> bool {
        self.timers.remove(id);
        self.pending.remove(&id).is_some()
    }

    /// IDs of tasks whose wake time has passed, removed from the queue
    pub fn tick(&mut self, now: Instant) -> Vec<usize> {
        self.timers.pop_ready(now)
    }

    /// Run every task due at `now`; returns how many ran
    pub fn run_ready(&mut self, platform: &mut dyn Platform, now: Instant) -> usize {
        let mut ran = 0;
        for id in self.tick(now) {
            if let Some(task) = self.pending.remove(&id) {
                task(platform);
                ran += 1;
            }
        }
        ran
    }

    /// Keep running tasks, including ones scheduled by other tasks, until
    /// nothing is left. Future wake times are treated as already due.
    pub fn run_until_idle(&mut self, platform: &mut dyn Platform) -> usize {
        let mut ran = 0;
        while let Some(wake_time) = self.next_wake_time() {
            ran += self.run_ready(platform, wake_time.max(Instant::now()));
        }
        ran
    }

    pub fn next_wake_time(&self) -> Option<Instant> {
        self.timers.peek_wake_time()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("timers", &self.timers)
            .field("pending", &self.pending.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

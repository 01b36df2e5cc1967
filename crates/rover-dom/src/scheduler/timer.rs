use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Wake time for one scheduled task
#[derive(Debug, Clone)]
pub struct Timer {
    pub wake_time: Instant,
    pub task_id: usize,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.wake_time == other.wake_time && self.task_id == other.task_id
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal wake times pop in scheduling order
        other
            .wake_time
            .cmp(&self.wake_time)
            .then_with(|| other.task_id.cmp(&self.task_id))
    }
}

/// Earliest-first queue of task wake times
#[derive(Debug)]
pub struct TimerQueue {
    heap: BinaryHeap<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn schedule(&mut self, task_id: usize, wake_time: Instant) {
        self.heap.push(Timer { wake_time, task_id });
    }

    pub fn peek_wake_time(&self) -> Option<Instant> {
        self.heap.peek().map(|timer| timer.wake_time)
    }

    /// Pop every timer with `wake_time <= now`, earliest first
    pub fn pop_ready(&mut self, now: Instant) -> Vec<usize> {
        let mut ready = Vec::new();
        while self.heap.peek().is_some_and(|timer| timer.wake_time <= now) {
            if let Some(timer) = self.heap.pop() {
                ready.push(timer.task_id);
            }
        }
        ready
    }

    /// Drop the timer for `task_id`, if queued
    pub fn remove(&mut self, task_id: usize) {
        self.heap.retain(|timer| timer.task_id != task_id);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

//! Session event queue
//!
//! Timers are plain entries keyed by due time. The host drains them by
//! calling `pop_due(now)`; nothing here sleeps or spawns.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Timed session events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionEvent {
    /// 10 Hz hold validation
    ScoringTick,
    /// 1 Hz duration update
    DurationTick,
    /// Delayed cursor advance after a completed pose
    Advance,
}

/// Min-queue of pending events, FIFO among equal due times
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<(Instant, u64, SessionEvent)>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, event: SessionEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, event)));
    }

    /// Pop the earliest event due at or before `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, SessionEvent)> {
        match self.queue.peek() {
            Some(Reverse((due, _, _))) if *due <= now => {}
            _ => return None,
        }
        self.queue.pop().map(|Reverse((due, _, event))| (due, event))
    }

    /// Drop every pending instance of `event`
    pub fn cancel(&mut self, event: SessionEvent) {
        self.queue.retain(|Reverse((_, _, e))| *e != event);
    }

    pub fn is_pending(&self, event: SessionEvent) -> bool {
        self.queue.iter().any(|Reverse((_, _, e))| *e == event)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.peek().map(|Reverse((due, _, _))| *due)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

//! Cooperative timers.
//!
//! The session never sleeps. When it needs a delayed callback it queues a
//! `TimerRequest`; the host waits `delay` however it likes and hands the
//! ticket back through `GameSession::fire_timer`. Tickets carry the session
//! generation they were issued for, so a ticket that outlives a restart is
//! rejected instead of mutating the new game.
//!
//! `TimerQueue` is a virtual-time host for tests and simple game loops:
//!
//! ```
//! use std::time::Duration;
//! use memory_match::session::{TimerKind, TimerQueue, TimerRequest, TimerTicket};
//!
//! let mut queue = TimerQueue::new();
//! queue.schedule(TimerRequest {
//!     ticket: TimerTicket { generation: 1, kind: TimerKind::Resolve },
//!     delay: Duration::from_millis(1000),
//! });
//!
//! assert!(queue.advance(Duration::from_millis(999)).is_empty());
//! assert_eq!(queue.advance(Duration::from_millis(1)).len(), 1);
//! assert!(queue.is_empty());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the reveal window.
    Reveal,
    /// Reconcile a two-card attempt.
    Resolve,
}

/// Identifies a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerTicket {
    /// Session generation the timer belongs to.
    pub generation: u64,
    /// Callback to run.
    pub kind: TimerKind,
}

/// Request to run `ticket` after `delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub ticket: TimerTicket,
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    ticket: TimerTicket,
}

/// Virtual-time timer queue.
///
/// Fires each ticket at most once, in due order; ties fire in scheduling
/// order.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    /// Create an empty queue at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a request relative to the current virtual time.
    pub fn schedule(&mut self, request: TimerRequest) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due: self.now + request.delay,
            seq,
            ticket: request.ticket,
        });
    }

    /// Schedule several requests.
    pub fn schedule_all(&mut self, requests: impl IntoIterator<Item = TimerRequest>) {
        for request in requests {
            self.schedule(request);
        }
    }

    /// Advance virtual time and return every ticket that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTicket> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.ticket).collect()
    }

    /// Time until the next ticket is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|entry| entry.due.saturating_sub(self.now))
            .min()
    }

    /// Drop every pending ticket.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drop tickets issued for generations other than `generation`.
    pub fn retain_generation(&mut self, generation: u64) {
        self.pending.retain(|entry| entry.ticket.generation == generation);
    }

    /// Number of pending tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Virtual time elapsed since the queue was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now
    }
}

//! Deadline-driven timers polled from the tick loop
//!
//! Nothing here spawns threads or sleeps. Every operation takes `now`
//! explicitly, so callers (and tests) control the clock.

use std::time::{Duration, Instant};

/// Handle to a scheduled timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<E> {
    handle: TimerHandle,
    deadline: Instant,
    event: E,
}

/// A queue of cancellable one-shot timers carrying an event payload
#[derive(Debug)]
pub struct TimerQueue<E> {
    next_id: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `deadline`
    pub fn schedule(&mut self, deadline: Instant, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            deadline,
            event,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every event whose deadline has passed, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.deadline <= now);
        self.pending = rest;
        due.sort_by_key(|t| (t.deadline, t.handle.0));
        due.into_iter().map(|t| t.event).collect()
    }
}

/// Fires once after `wait` has elapsed without a new trigger
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Re-arm the debouncer, pushing the deadline out
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Returns true exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Admits at most one call per `limit` window
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    window_start: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            window_start: None,
        }
    }

    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.limit => false,
            _ => {
                self.window_start = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    mod timer_queue {
        use super::*;

        #[test]
        fn test_poll_returns_only_due_events_in_order() {
            let t0 = Instant::now();
            let mut queue = TimerQueue::new();
            queue.schedule(t0 + ms(300), "late");
            queue.schedule(t0 + ms(100), "early");
            queue.schedule(t0 + ms(200), "middle");

            assert_eq!(queue.poll(t0 + ms(250)), vec!["early", "middle"]);
            assert_eq!(queue.len(), 1);
            assert_eq!(queue.poll(t0 + ms(300)), vec!["late"]);
            assert!(queue.is_empty());
        }

        #[test]
        fn test_cancelled_timer_never_fires() {
            let t0 = Instant::now();
            let mut queue = TimerQueue::new();
            let handle = queue.schedule(t0 + ms(10), 1);
            queue.schedule(t0 + ms(10), 2);

            assert!(queue.cancel(handle));
            assert!(!queue.is_pending(handle));
            assert_eq!(queue.poll(t0 + ms(20)), vec![2]);
        }

        #[test]
        fn test_cancel_twice_reports_false() {
            let t0 = Instant::now();
            let mut queue = TimerQueue::new();
            let handle = queue.schedule(t0, ());
            assert!(queue.cancel(handle));
            assert!(!queue.cancel(handle));
        }

        #[test]
        fn test_handles_are_unique() {
            let t0 = Instant::now();
            let mut queue = TimerQueue::new();
            let a = queue.schedule(t0, ());
            let b = queue.schedule(t0, ());
            assert_ne!(a, b);
        }
    }

    mod debouncer {
        use super::*;

        #[test]
        fn test_fires_once_after_quiet_period() {
            let t0 = Instant::now();
            let mut debounce = Debouncer::new(ms(10));
            debounce.trigger(t0);

            assert!(!debounce.poll(t0 + ms(5)));
            assert!(debounce.poll(t0 + ms(10)));
            assert!(!debounce.poll(t0 + ms(20)));
        }

        #[test]
        fn test_retrigger_pushes_deadline() {
            let t0 = Instant::now();
            let mut debounce = Debouncer::new(ms(10));
            debounce.trigger(t0);
            debounce.trigger(t0 + ms(8));

            assert!(!debounce.poll(t0 + ms(12)));
            assert!(debounce.poll(t0 + ms(18)));
        }

        #[test]
        fn test_unarmed_never_fires() {
            let mut debounce = Debouncer::new(ms(10));
            assert!(!debounce.is_armed());
            assert!(!debounce.poll(Instant::now() + ms(100)));
        }
    }

    mod throttle {
        use super::*;

        #[test]
        fn test_rejects_calls_inside_window() {
            let t0 = Instant::now();
            let mut throttle = Throttle::new(ms(16));

            assert!(throttle.try_acquire(t0));
            assert!(!throttle.try_acquire(t0 + ms(5)));
            assert!(!throttle.try_acquire(t0 + ms(15)));
            assert!(throttle.try_acquire(t0 + ms(16)));
        }
    }
}

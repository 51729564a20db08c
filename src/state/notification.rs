//! Toast notifications
//!
//! At most one toast is visible. Showing a new one evicts the current toast
//! and cancels its pending transition, so no dismissal ever acts on a toast
//! that has been replaced.

use super::timer::{TimerHandle, TimerQueue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Animation phase of the visible toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Sliding in
    Entering,
    /// Fully shown
    Holding,
    /// Sliding out
    Leaving,
}

/// The toast currently on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub phase: ToastPhase,
    /// When the current phase started
    pub phase_started: Instant,
}

impl Toast {
    /// Fraction of the toast that is on screen (0.0 to 1.0), for slide animations
    pub fn slide_progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.phase_started);
        match self.phase {
            ToastPhase::Entering => {
                simple_easing::cubic_out(ratio(elapsed, NotificationService::ENTER_DURATION))
            }
            ToastPhase::Holding => 1.0,
            ToastPhase::Leaving => {
                1.0 - simple_easing::cubic_in(ratio(elapsed, NotificationService::LEAVE_DURATION))
            }
        }
    }
}

fn ratio(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Scheduled phase change for a specific toast
#[derive(Debug, Clone, Copy)]
struct Transition {
    toast_id: Uuid,
    at: Instant,
    next: Option<ToastPhase>,
}

/// Owns the single notification slot and its timers
#[derive(Debug, Default)]
pub struct NotificationService {
    current: Option<Toast>,
    timers: TimerQueue<Transition>,
    pending: Option<TimerHandle>,
}

impl NotificationService {
    /// Slide-in duration
    pub const ENTER_DURATION: Duration = Duration::from_millis(100);
    /// Time fully shown
    pub const HOLD_DURATION: Duration = Duration::from_millis(4600);
    /// Slide-out duration
    pub const LEAVE_DURATION: Duration = Duration::from_millis(300);

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any visible toast with a new one and schedule its lifecycle
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> Uuid {
        self.cancel_pending();

        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = notification.id;
        tracing::debug!(%id, ?severity, "showing notification");

        self.current = Some(Toast {
            notification,
            phase: ToastPhase::Entering,
            phase_started: now,
        });
        let at = now + Self::ENTER_DURATION;
        self.pending = Some(self.timers.schedule(
            at,
            Transition {
                toast_id: id,
                at,
                next: Some(ToastPhase::Holding),
            },
        ));
        id
    }

    /// Close the visible toast right away. Returns false if nothing was shown.
    pub fn dismiss(&mut self) -> bool {
        self.cancel_pending();
        match self.current.take() {
            Some(toast) => {
                tracing::debug!(id = %toast.notification.id, "notification dismissed");
                true
            }
            None => false,
        }
    }

    /// Advance toast phases whose deadlines have passed
    pub fn tick(&mut self, now: Instant) {
        for transition in self.timers.poll(now) {
            let Some(toast) = self.current.as_mut() else {
                continue;
            };
            if toast.notification.id != transition.toast_id {
                tracing::debug!(
                    id = %transition.toast_id,
                    "ignoring transition for replaced toast"
                );
                continue;
            }

            self.pending = None;
            match transition.next {
                Some(phase) => {
                    toast.phase = phase;
                    toast.phase_started = transition.at;
                    let (wait, after) = match phase {
                        ToastPhase::Entering => (Self::ENTER_DURATION, Some(ToastPhase::Holding)),
                        ToastPhase::Holding => (Self::HOLD_DURATION, Some(ToastPhase::Leaving)),
                        ToastPhase::Leaving => (Self::LEAVE_DURATION, None),
                    };
                    let at = transition.at + wait;
                    self.pending = Some(self.timers.schedule(
                        at,
                        Transition {
                            toast_id: transition.toast_id,
                            at,
                            next: after,
                        },
                    ));
                }
                None => {
                    tracing::debug!(id = %transition.toast_id, "notification expired");
                    self.current = None;
                }
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Number of toasts on screen (never more than one)
    #[cfg(test)]
    pub fn visible_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Number of scheduled transitions
    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }
}

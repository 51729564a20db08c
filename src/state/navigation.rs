//! Smooth scrolling, scroll-spy and the navigation menu

use super::document::DocumentLayout;
use std::time::{Duration, Instant};

/// Rows left above a section when jumping to it
pub const SCROLL_MARGIN_ROWS: u16 = 1;
/// How far ahead of a section scroll-spy switches to it
pub const SPY_MARGIN_ROWS: u16 = 2;

/// Eased scroll from one offset to another
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    pub from: u16,
    pub to: u16,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub const DURATION: Duration = Duration::from_millis(300);

    pub fn new(from: u16, to: u16, now: Instant) -> Self {
        Self {
            from,
            to,
            started_at: now,
            duration: Self::DURATION,
        }
    }

    pub fn offset_at(&self, now: Instant) -> u16 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        let eased = simple_easing::cubic_out(progress);
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        (from + (to - from) * eased).round() as u16
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Offset to scroll to for a section, clamped to the scrollable range
pub fn section_scroll_target(
    layout: &DocumentLayout,
    id: &str,
    viewport_height: u16,
) -> Option<u16> {
    let region = layout.find(id)?;
    Some(
        region
            .top
            .saturating_sub(SCROLL_MARGIN_ROWS)
            .min(layout.max_scroll(viewport_height)),
    )
}

/// Id of the section whose spy window contains `offset`
pub fn active_section(layout: &DocumentLayout, offset: u16) -> Option<&str> {
    let offset = u32::from(offset);
    let mut current = None;
    for region in &layout.regions {
        let top = u32::from(region.top.saturating_sub(SPY_MARGIN_ROWS));
        if offset >= top && offset < top + u32::from(region.height) {
            current = Some(region.id.as_str());
        }
    }
    current
}

/// Navigation menu overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMenu {
    pub open: bool,
    pub selected: usize,
}

impl NavMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self, count: usize) {
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }
}

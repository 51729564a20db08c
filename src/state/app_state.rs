//! Application state definitions

use super::document::DocumentLayout;
use super::effects::Effects;
use super::filter::ProjectFilter;
use super::forms::ContactForm;
use super::navigation::{active_section, section_scroll_target, NavMenu, ScrollAnimation};
use super::resume::Resume;
use super::visibility::Viewport;
use std::time::Instant;

/// Rows at the bottom of the document view that do not count as visible
pub const VIEWPORT_BOTTOM_MARGIN: u16 = 1;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The scrollable résumé
    #[default]
    Document,
    /// The contact form
    Contact,
}

/// Everything the UI renders
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub resume: Resume,
    pub filter: ProjectFilter,
    pub layout: DocumentLayout,
    pub scroll_offset: u16,
    /// Rows of document visible in the view
    pub viewport_height: u16,
    pub scroll_animation: Option<ScrollAnimation>,
    pub nav_menu: NavMenu,
    pub effects: Effects,
    pub contact_form: ContactForm,
    /// Section highlighted in the navigation bar
    pub active_section: Option<String>,
}

impl AppState {
    pub fn new(resume: Resume) -> Self {
        let filter = ProjectFilter::All;
        let layout = DocumentLayout::build(&resume, &filter, 80);
        let mut effects = Effects::new(&resume);
        effects.register(&layout);
        let active = active_section(&layout, 0).map(str::to_string);

        Self {
            current_view: View::Document,
            resume,
            filter,
            layout,
            scroll_offset: 0,
            viewport_height: 20,
            scroll_animation: None,
            nav_menu: NavMenu::default(),
            effects,
            contact_form: ContactForm::new(),
            active_section: active,
        }
    }

    /// Adapt to a new document area. Returns true when the layout was rebuilt.
    pub fn resize(&mut self, width: u16, viewport_height: u16) -> bool {
        self.viewport_height = viewport_height;
        let rebuilt = width != self.layout.width;
        if rebuilt {
            self.rebuild_layout(width);
        }
        self.clamp_scroll();
        rebuilt
    }

    fn rebuild_layout(&mut self, width: u16) {
        self.layout = DocumentLayout::build(&self.resume, &self.filter, width);
        self.effects.register(&self.layout);
        tracing::debug!(width, rows = self.layout.total_height(), "document layout rebuilt");
    }

    /// Switch the project filter and lay the document out again
    pub fn set_filter(&mut self, filter: ProjectFilter) {
        if filter == self.filter {
            return;
        }
        tracing::info!(filter = filter.label(), "project filter changed");
        self.filter = filter;
        self.rebuild_layout(self.layout.width);
        self.clamp_scroll();
    }

    pub fn next_filter(&mut self) {
        let next = self.filter.next(&self.resume.categories());
        self.set_filter(next);
    }

    pub fn prev_filter(&mut self) {
        let prev = self.filter.prev(&self.resume.categories());
        self.set_filter(prev);
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.viewport_height)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll_offset,
            self.viewport_height,
            VIEWPORT_BOTTOM_MARGIN,
        )
    }

    /// Move the view by `delta` rows. Cancels any running scroll animation.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_animation = None;
        let target = (i32::from(self.scroll_offset) + delta).clamp(0, i32::from(self.max_scroll()));
        self.set_scroll(target as u16);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_animation = None;
        self.set_scroll(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_animation = None;
        self.set_scroll(self.max_scroll());
    }

    /// Start a smooth scroll to a section and close the menu. Returns false
    /// when no section has that id.
    pub fn scroll_to_section(&mut self, id: &str, now: Instant) -> bool {
        let Some(target) = section_scroll_target(&self.layout, id, self.viewport_height) else {
            tracing::debug!(id, "no section to scroll to");
            return false;
        };
        self.nav_menu.close();
        self.scroll_animation = Some(ScrollAnimation::new(self.scroll_offset, target, now));
        tracing::info!(id, target, "scrolling to section");
        true
    }

    /// Advance a running scroll animation. Returns true if the offset moved.
    pub fn advance_scroll(&mut self, now: Instant) -> bool {
        let Some(animation) = &self.scroll_animation else {
            return false;
        };
        let offset = animation.offset_at(now);
        if animation.is_finished(now) {
            self.scroll_animation = None;
        }
        let moved = offset != self.scroll_offset;
        self.set_scroll(offset);
        moved
    }

    fn set_scroll(&mut self, offset: u16) {
        self.scroll_offset = offset.min(self.max_scroll());
        self.update_active_section();
    }

    fn clamp_scroll(&mut self) {
        self.set_scroll(self.scroll_offset);
    }

    /// Recompute the scroll-spy highlight
    pub fn update_active_section(&mut self) {
        let active = active_section(&self.layout, self.scroll_offset).map(str::to_string);
        if active != self.active_section {
            tracing::debug!(?active, "active section changed");
            self.active_section = active;
        }
    }

    /// Section ids and titles in document order
    pub fn section_titles(&self) -> Vec<(&str, &str)> {
        self.resume
            .sections
            .iter()
            .map(|s| (s.id.as_str(), s.title.as_str()))
            .collect()
    }
}

//! Application state and core logic

use crate::config::{CvConfig, TransportKind};
use crate::state::{
    AppState, ContactForm, Debouncer, Form, FormController, NotificationService, Resume, RowKind,
    Severity, Throttle, ToastPhase, View,
};
use crate::transport::{OutboxTransport, SimulatedTransport, SubmissionTransport, TransportError};
use crate::ui::layout::{hit, nav_target_at, NavTarget, ScreenLayout};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Quiet period after scrolling before visibility effects are checked
pub const SCROLL_SETTLE: Duration = Duration::from_millis(10);
/// Minimum gap between handled mouse wheel events
pub const WHEEL_THROTTLE: Duration = Duration::from_millis(16);
/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;
pub const DOWNLOAD_CV_MESSAGE: &str = "CV download coming soon.";

type SubmissionResult = Result<(), TransportError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Toast notifications
    pub notifications: NotificationService,
    controller: FormController,
    /// Results of spawned submissions, drained on tick
    submissions_tx: mpsc::UnboundedSender<SubmissionResult>,
    submissions_rx: mpsc::UnboundedReceiver<SubmissionResult>,
    scroll_settle: Debouncer,
    wheel_throttle: Throttle,
    /// Use unicode glyphs for icons
    pub unicode_icons: bool,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create the app from user configuration
    pub fn new(config: &CvConfig) -> Result<Self> {
        let resume = match config.resume_path() {
            Some(path) => Resume::load(&path)
                .with_context(|| format!("loading résumé from {}", path.display()))?,
            None => Resume::builtin().context("loading built-in résumé")?,
        };

        let transport: Arc<dyn SubmissionTransport> = match config.transport() {
            TransportKind::Simulated => Arc::new(SimulatedTransport::new(
                config.submit_delay(),
                config.submit_success_rate(),
            )),
            TransportKind::Outbox => Arc::new(OutboxTransport::new(config.outbox_path())),
        };
        tracing::info!(
            transport = transport.name(),
            sections = resume.sections.len(),
            "starting"
        );

        Ok(Self::with_transport(resume, transport, config.unicode_icons()))
    }

    pub fn with_transport(
        resume: Resume,
        transport: Arc<dyn SubmissionTransport>,
        unicode_icons: bool,
    ) -> Self {
        let (submissions_tx, submissions_rx) = mpsc::unbounded_channel();
        let mut scroll_settle = Debouncer::new(SCROLL_SETTLE);
        // Reveal whatever is on the first screen
        scroll_settle.trigger(Instant::now());

        Self {
            state: AppState::new(resume),
            notifications: NotificationService::new(),
            controller: FormController::new(transport),
            submissions_tx,
            submissions_rx,
            scroll_settle,
            wheel_throttle: Throttle::new(WHEEL_THROTTLE),
            unicode_icons,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn transport_name(&self) -> &'static str {
        self.controller.transport().name()
    }

    /// Screen geometry for the current terminal size and view
    fn screen(&self) -> ScreenLayout {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        ScreenLayout::new(Rect::new(0, 0, width, height), self.state.current_view)
    }

    /// Record the terminal size and fit the document to it
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.terminal_size == Some((height, width)) {
            return;
        }
        self.terminal_size = Some((height, width));
        let document = ScreenLayout::new(Rect::new(0, 0, width, height), View::Document).document();
        self.state.resize(document.width, document.height);
        self.scroll_settle.trigger(Instant::now());
    }

    /// Advance animations, timers and finished submissions
    pub fn tick(&mut self, now: Instant) {
        if self.state.advance_scroll(now) {
            self.scroll_settle.trigger(now);
        }
        if self.scroll_settle.poll(now) {
            let viewport = self.state.viewport();
            self.state.effects.poll(&viewport, now);
        }
        self.notifications.tick(now);
        self.drain_submissions(now);
    }

    /// Whether something on screen is moving and needs fast redraws
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.scroll_animation.is_some()
            || self.scroll_settle.is_armed()
            || self.state.effects.is_animating(now)
            || self.state.contact_form.submit_button.busy
            || self
                .notifications
                .current()
                .is_some_and(|t| t.phase != ToastPhase::Holding)
    }

    // Exposed operations

    pub fn show_notification(&mut self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.notifications.show(message, severity, Instant::now())
    }

    pub fn show_success(&mut self, message: impl Into<String>) -> Uuid {
        self.show_notification(message, Severity::Success)
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> Uuid {
        self.show_notification(message, Severity::Error)
    }

    /// Smooth-scroll to a section. Unknown ids are ignored.
    pub fn scroll_to_section(&mut self, id: &str) -> bool {
        self.state.current_view = View::Document;
        self.state.scroll_to_section(id, Instant::now())
    }

    pub fn download_cv(&mut self) {
        tracing::info!("cv download requested");
        self.show_success(DOWNLOAD_CV_MESSAGE);
    }

    pub fn copy_contact_email(&mut self) {
        let email = self.state.resume.email.clone();
        match self.copy_to_clipboard(&email) {
            Ok(()) => {
                tracing::info!("contact email copied");
                self.show_success(format!("Copied {email} to the clipboard."));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to copy contact email");
                self.show_error(format!("Could not copy. Write to {email}."));
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    // Keyboard

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.state.current_view {
            View::Document if self.state.nav_menu.open => self.handle_menu_key(key),
            View::Document => self.handle_document_key(key),
            View::Contact => self.handle_contact_key(key),
        }
    }

    fn handle_document_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        let page = i32::from(self.state.viewport_height.saturating_sub(1).max(1));

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => {
                self.notifications.dismiss();
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, now),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, now),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page, now),
            KeyCode::PageUp => self.scroll_by(-page, now),
            KeyCode::Home | KeyCode::Char('g') => {
                self.state.scroll_to_top();
                self.scroll_settle.trigger(now);
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.state.scroll_to_bottom();
                self.scroll_settle.trigger(now);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.jump_to_section_index(index, now);
            }
            KeyCode::Char('m') => self.toggle_menu(),
            KeyCode::Char(']') | KeyCode::Char('f') => {
                self.state.next_filter();
                self.scroll_settle.trigger(now);
            }
            KeyCode::Char('[') | KeyCode::Char('F') => {
                self.state.prev_filter();
                self.scroll_settle.trigger(now);
            }
            KeyCode::Char('c') => self.open_contact_form(),
            KeyCode::Char('d') => self.download_cv(),
            KeyCode::Char('y') => self.copy_contact_email(),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let count = self.state.resume.sections.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.nav_menu.select_next(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.nav_menu.select_prev(count),
            KeyCode::Enter => {
                let index = self.state.nav_menu.selected;
                self.jump_to_section_index(index, Instant::now());
            }
            KeyCode::Esc | KeyCode::Char('m') => self.state.nav_menu.close(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        if crate::platform::is_submit_shortcut(key.code, key.modifiers) {
            self.submit_contact_form();
            return;
        }

        let form = &mut self.state.contact_form;
        let on_submit_row = form.is_submit_row_active();
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Document,
            KeyCode::Tab => {
                FormController::blur_active(form);
                form.next_field();
            }
            KeyCode::BackTab => {
                FormController::blur_active(form);
                form.prev_field();
            }
            KeyCode::Enter if on_submit_row => self.submit_contact_form(),
            KeyCode::Enter => {
                let multiline = form.get_active_field_mut().is_some_and(|f| f.is_multiline());
                if multiline {
                    if let Some(field) = form.get_active_field_mut() {
                        field.push_char('\n');
                    }
                } else {
                    FormController::blur_active(form);
                    form.next_field();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: i32, now: Instant) {
        self.state.scroll_by(delta);
        self.scroll_settle.trigger(now);
    }

    fn jump_to_section_index(&mut self, index: usize, now: Instant) {
        let Some(id) = self.state.resume.sections.get(index).map(|s| s.id.clone()) else {
            return;
        };
        self.state.current_view = View::Document;
        self.state.scroll_to_section(&id, now);
    }

    fn toggle_menu(&mut self) {
        if !self.state.nav_menu.open {
            let active = self.state.active_section.as_deref();
            self.state.nav_menu.selected = active
                .and_then(|id| self.state.resume.section_index(id))
                .unwrap_or(0);
        }
        self.state.nav_menu.toggle();
    }

    fn open_contact_form(&mut self) {
        self.state.nav_menu.close();
        self.state.current_view = View::Contact;
        tracing::debug!("contact form opened");
    }

    /// Move focus to a form row, validating the field being left
    fn focus_form_row(&mut self, index: usize) {
        let form = &mut self.state.contact_form;
        if form.active_field() != index {
            FormController::blur_active(form);
            form.set_active_field(index);
        }
    }

    // Submission

    /// Validate and, if valid, deliver the form on a background task
    fn submit_contact_form(&mut self) {
        let form = &mut self.state.contact_form;
        let Some(data) = self.controller.begin_submit(form) else {
            if let Some(first_error) = form.fields().iter().position(|f| f.state.is_error()) {
                form.set_active_field(first_error);
            }
            return;
        };

        let transport = self.controller.transport();
        let tx = self.submissions_tx.clone();
        let task = tokio::spawn(async move { transport.send(data).await });
        tokio::spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "submission task failed");
                    Err(TransportError::Interrupted(e.to_string()))
                }
            };
            if tx.send(result).is_err() {
                tracing::debug!("app closed before submission finished");
            }
        });
    }

    fn drain_submissions(&mut self, now: Instant) {
        while let Ok(result) = self.submissions_rx.try_recv() {
            let outcome = self.controller.complete_submit(
                &mut self.state.contact_form,
                result,
                &mut self.notifications,
                now,
            );
            tracing::info!(success = outcome.is_success(), "contact form submission finished");
        }
    }

    // Mouse

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse_at(mouse, Instant::now());
    }

    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
                if self.state.current_view == View::Document =>
            {
                if !self.wheel_throttle.try_acquire(now) {
                    return;
                }
                let delta = if mouse.kind == MouseEventKind::ScrollDown {
                    WHEEL_ROWS
                } else {
                    -WHEEL_ROWS
                };
                self.scroll_by(delta, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row, now);
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        let screen = self.screen();

        // Toast sits above everything else
        if let Some(toast) = self.notifications.current() {
            if hit(screen.toast(toast.slide_progress(now)), column, row) {
                self.notifications.dismiss();
                return;
            }
        }

        let menu_was_open = self.state.nav_menu.open;
        if menu_was_open {
            let count = self.state.resume.sections.len();
            let area = screen.menu(count);
            if hit(area, column, row) {
                if let Some(index) = crate::ui::menu_item_at(area, count, row) {
                    self.state.nav_menu.selected = index;
                    self.jump_to_section_index(index, now);
                }
                return;
            }
            self.state.nav_menu.close();
        }

        let target = {
            let titles = self.state.section_titles();
            nav_target_at(screen.nav_bar, &titles, self.unicode_icons, column, row)
        };
        match target {
            Some(NavTarget::Menu) => {
                self.state.current_view = View::Document;
                if !menu_was_open {
                    self.toggle_menu();
                }
                return;
            }
            Some(NavTarget::Section(index)) => {
                self.jump_to_section_index(index, now);
                return;
            }
            None => {}
        }

        match self.state.current_view {
            View::Document => self.handle_document_click(&screen, column, row, now),
            View::Contact => {
                if let Some(index) = crate::ui::form_target_at(screen.body, column, row) {
                    self.focus_form_row(index);
                    if index == ContactForm::SUBMIT_ROW {
                        self.submit_contact_form();
                    }
                }
            }
        }
    }

    fn handle_document_click(
        &mut self,
        screen: &ScreenLayout,
        column: u16,
        row: u16,
        now: Instant,
    ) {
        let document = screen.document();
        if !hit(document, column, row) {
            return;
        }
        let index = usize::from(self.state.scroll_offset) + usize::from(row - document.y);
        let Some(kind) = self.state.layout.rows.get(index).map(|r| r.kind.clone()) else {
            return;
        };

        match kind {
            RowKind::FilterBar => {
                let categories = self.state.resume.categories();
                if let Some(filter) = crate::ui::filter_at(&categories, column - document.x) {
                    self.state.set_filter(filter);
                    self.scroll_settle.trigger(now);
                }
            }
            RowKind::Email => self.copy_contact_email(),
            RowKind::ContactHint => self.open_contact_form(),
            _ => {}
        }
    }
}

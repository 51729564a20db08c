//! Contact form rendering

use super::field_renderer::{draw_field, draw_field_error, draw_help_text};
use crate::app::App;
use crate::state::{ContactForm, SubmissionStatus};
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use crate::ui::icons::Icon;
use crate::ui::layout::hit;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FORM_WIDTH: u16 = 72;
const FIELD_HEIGHT: u16 = 3;
const MESSAGE_HEIGHT: u16 = 6;
const SUBMIT_BUTTON_WIDTH: u16 = 24;

/// Areas of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub header: Rect,
    /// Name, email, subject, message
    pub fields: [Rect; 4],
    /// Inline error row under each field
    pub errors: [Rect; 4],
    pub button: Rect,
    pub help: Rect,
}

/// Lay the form out in a centered column of the body area
pub fn form_layout(body: Rect) -> FormLayout {
    let width = FORM_WIDTH.min(body.width.saturating_sub(4));
    let column = Rect {
        x: body.x + body.width.saturating_sub(width) / 2,
        width,
        ..body
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(MESSAGE_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1), // Help
            Constraint::Min(0),
        ])
        .split(column);

    let button = Rect {
        width: SUBMIT_BUTTON_WIDTH.min(chunks[9].width),
        ..chunks[9]
    };

    FormLayout {
        header: chunks[0],
        fields: [chunks[1], chunks[3], chunks[5], chunks[7]],
        errors: [chunks[2], chunks[4], chunks[6], chunks[8]],
        button,
        help: chunks[10],
    }
}

/// Form row under a mouse position: 0-3 for fields, `SUBMIT_ROW` for the button
pub fn form_target_at(body: Rect, column: u16, row: u16) -> Option<usize> {
    let layout = form_layout(body);
    if hit(layout.button, column, row) {
        return Some(ContactForm::SUBMIT_ROW);
    }
    layout
        .fields
        .iter()
        .position(|area| hit(*area, column, row))
}

/// Draw the contact form view
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.contact_form;
    let unicode = app.unicode_icons;
    let layout = form_layout(area);

    let header = vec![
        Line::from(Span::styled(
            "Get in touch",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        status_line(form),
    ];
    frame.render_widget(Paragraph::new(header), layout.header);

    for (index, field) in form.fields().into_iter().enumerate() {
        let is_active = form.active_field_index == index;
        draw_field(frame, layout.fields[index], field, is_active, unicode);
        draw_field_error(frame, layout.errors[index], field, unicode);
    }

    render_submit_button(
        frame,
        layout.button,
        &form.submit_button,
        form.is_submit_row_active(),
        Icon::Mail.glyph(unicode),
    );

    draw_help_text(
        frame,
        layout.help,
        &format!(
            "* required  |  {} sends  |  Enter on the button sends",
            crate::platform::SUBMIT_SHORTCUT
        ),
    );
}

fn status_line(form: &ContactForm) -> Line<'static> {
    let errors = form.error_count();
    if form.submit_button.busy {
        return Line::styled(
            form.submit_button.label.clone(),
            Style::default().fg(Color::Yellow),
        );
    }
    if errors > 0 {
        let noun = if errors == 1 { "field needs" } else { "fields need" };
        return Line::styled(
            format!("{errors} {noun} attention"),
            Style::default().fg(Color::Red),
        );
    }
    match form.last_outcome.as_ref().map(|o| o.status) {
        Some(SubmissionStatus::Success) => {
            Line::styled("Last message sent.", Style::default().fg(Color::Green))
        }
        Some(SubmissionStatus::Failure) => {
            Line::styled("Last attempt failed.", Style::default().fg(Color::Red))
        }
        None => Line::styled(
            "I usually answer within a couple of days.",
            Style::default().fg(Color::DarkGray),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldState, SubmissionOutcome};

    fn body() -> Rect {
        Rect::new(0, 3, 80, 40)
    }

    #[test]
    fn test_form_layout_is_centered_and_stacked() {
        let layout = form_layout(body());
        assert_eq!(layout.fields[0], Rect::new(4, 5, 72, FIELD_HEIGHT));
        assert_eq!(layout.errors[0], Rect::new(4, 8, 72, 1));
        assert_eq!(layout.fields[1].y, 9);
        assert_eq!(layout.fields[3].height, MESSAGE_HEIGHT);
        assert_eq!(layout.button.width, SUBMIT_BUTTON_WIDTH);
        assert_eq!(layout.button.y, layout.errors[3].bottom());
    }

    #[test]
    fn test_form_target_at() {
        let layout = form_layout(body());
        let email = layout.fields[1];
        assert_eq!(form_target_at(body(), email.x + 1, email.y + 1), Some(1));
        assert_eq!(
            form_target_at(body(), layout.button.x, layout.button.y),
            Some(ContactForm::SUBMIT_ROW)
        );
        assert_eq!(form_target_at(body(), 0, 0), None);
        assert_eq!(form_target_at(body(), email.x, layout.errors[1].y), None);
    }

    #[test]
    fn test_status_line_reports_errors() {
        let mut form = ContactForm::new();
        form.email.state = FieldState::Error("invalid email.".to_string());
        assert_eq!(status_line(&form).to_string(), "1 field needs attention");
        form.name.state = FieldState::Error("field required.".to_string());
        assert_eq!(status_line(&form).to_string(), "2 fields need attention");
    }

    #[test]
    fn test_status_line_while_busy_and_after_failure() {
        let mut form = ContactForm::new();
        form.submit_button.begin_busy();
        assert_eq!(status_line(&form).to_string(), "Sending...");

        form.submit_button.restore();
        form.last_outcome = Some(SubmissionOutcome {
            status: SubmissionStatus::Failure,
            reason: None,
        });
        assert_eq!(status_line(&form).to_string(), "Last attempt failed.");
    }
}

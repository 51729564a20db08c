//! Field rendering utilities for forms

use crate::state::{FieldState, FormField};
use crate::ui::icons::Icon;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Border color for a field's validation state
pub fn state_color(state: &FieldState, is_active: bool) -> Color {
    match state {
        FieldState::Error(_) => Color::Red,
        FieldState::Success => Color::Green,
        FieldState::Neutral if is_active => Color::Cyan,
        FieldState::Neutral => Color::DarkGray,
    }
}

/// Draw a form field, bordered in its validation color
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    unicode: bool,
) {
    let border_style = Style::default().fg(state_color(&field.state, is_active));
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor_style = Style::default().fg(Color::Cyan);
    let cursor = if is_active { "▌" } else { "" };

    let value = field.as_text();
    let content = if value.is_empty() && !is_active {
        Paragraph::new(Line::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))
    } else if field.is_multiline() {
        let mut lines: Vec<Line> = value
            .split('\n')
            .map(|l| Line::styled(l.to_string(), text_style))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(value, text_style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let mut title = vec![Span::raw(format!(" {} ", field.display_label()))];
    if field.state == FieldState::Success {
        title.push(Span::styled(
            format!("{} ", Icon::CheckCircle.glyph(unicode)),
            Style::default().fg(Color::Green),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw the inline error message below a field, if it has one
pub fn draw_field_error(frame: &mut Frame, area: Rect, field: &FormField, unicode: bool) {
    let Some(message) = field.state.error_message() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", Icon::AlertCircle.glyph(unicode)),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

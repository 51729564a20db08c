//! Toast notification overlay

use crate::state::{wrap_text, Severity, Toast};
use crate::ui::icons::Icon;
use crate::ui::layout::{ScreenLayout, TOAST_HEIGHT, TOAST_WIDTH};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Info => Color::Blue,
    }
}

/// Draw the toast sliding in from (or out to) the right edge
pub fn render_toast(
    frame: &mut Frame,
    screen: &ScreenLayout,
    toast: &Toast,
    unicode: bool,
    now: Instant,
) {
    let area = screen.toast(toast.slide_progress(now));
    if area.width < 3 || area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let color = severity_color(toast.notification.severity);
    let icon = Icon::for_severity(toast.notification.severity).glyph(unicode);
    // borders, icon and padding
    let text_width = usize::from(TOAST_WIDTH.saturating_sub(6));
    let message_rows = usize::from(TOAST_HEIGHT.saturating_sub(2));

    let lines: Vec<Line> = wrap_text(&toast.notification.message, text_width)
        .into_iter()
        .take(message_rows)
        .enumerate()
        .map(|(i, text)| {
            let prefix = if i == 0 {
                Span::styled(
                    format!("{icon} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            Line::from(vec![prefix, Span::styled(text, Style::default().fg(Color::White))])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title_top(Line::from(Icon::Close.glyph(unicode)).right_aligned());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

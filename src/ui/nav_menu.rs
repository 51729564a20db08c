//! Navigation menu overlay

use super::layout::ScreenLayout;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the open menu below the nav bar
pub fn draw(frame: &mut Frame, screen: &ScreenLayout, app: &App) {
    let titles = app.state.section_titles();
    let area = screen.menu(titles.len());
    if area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let active = app.state.active_section.as_deref();
    let lines: Vec<Line> = titles
        .iter()
        .enumerate()
        .map(|(i, (id, title))| {
            let selected = i == app.state.nav_menu.selected;
            let marker = if Some(*id) == active { "●" } else { " " };
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} {title}", i + 1), style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Sections ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Menu entry under a mouse row
pub fn item_at(area: Rect, items: usize, row: u16) -> Option<usize> {
    let first = area.y + 1;
    let last = area.bottom().saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    let index = usize::from(row - first);
    (index < items).then_some(index)
}

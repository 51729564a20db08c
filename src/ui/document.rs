//! Résumé document view

use super::icons::Icon;
use crate::app::App;
use crate::state::{DocRow, LazyImage, ProjectFilter, RowKind, SectionBody};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Column width of skill names
const SKILL_LABEL_WIDTH: usize = 14;
/// Widest a skill bar gets
const MAX_BAR_WIDTH: usize = 40;

/// Draw the rows of the document that fall inside the viewport
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    let state = &app.state;
    let lines: Vec<Line> = state
        .layout
        .rows
        .iter()
        .skip(usize::from(state.scroll_offset))
        .take(usize::from(area.height))
        .map(|row| {
            let line = row_line(row, app, area.width, now);
            if state.effects.is_revealed(row.section) {
                line
            } else {
                dim(line)
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Unrevealed sections render greyed out until they first scroll into view
fn dim(line: Line<'_>) -> Line<'_> {
    let style = Style::default().fg(Color::DarkGray);
    Line::from(
        line.spans
            .into_iter()
            .map(|span| Span::styled(span.content, style))
            .collect::<Vec<_>>(),
    )
}

fn row_line<'a>(row: &'a DocRow, app: &'a App, width: u16, now: Instant) -> Line<'a> {
    let state = &app.state;
    let Some(section) = state.resume.sections.get(row.section) else {
        return Line::default();
    };
    let unicode = app.unicode_icons;

    match (&row.kind, &section.body) {
        (RowKind::Title, _) => Line::from(vec![
            Span::styled(
                format!("{} ", row.section + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                section.title.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        ]),
        (RowKind::Blank, _) => Line::default(),
        (RowKind::Text { text, indent }, _) => Line::from(vec![
            Span::raw(" ".repeat(usize::from(*indent))),
            Span::raw(text.as_str()),
        ]),
        (RowKind::EntryHeader { entry }, SectionBody::Experience { entries }) => {
            let Some(entry) = entries.get(*entry) else {
                return Line::default();
            };
            Line::from(vec![
                Span::styled(
                    entry.role.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" @ {}", entry.organization),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(
                    format!("  {}", entry.period),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        (RowKind::Bullet { text, first }, _) => {
            let marker = if *first {
                format!("  {} ", Icon::Bullet.glyph(unicode))
            } else {
                "    ".to_string()
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::raw(text.as_str()),
            ])
        }
        (RowKind::FilterBar, _) => filter_bar_line(&state.resume.categories(), &state.filter),
        (RowKind::ProjectName { item }, SectionBody::Projects { items }) => {
            let Some(item) = items.get(*item) else {
                return Line::default();
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", Icon::Project.glyph(unicode)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    item.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", item.category),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        (RowKind::NoProjects, _) => Line::styled(
            "No projects in this category.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        (RowKind::Skill { skill: index }, SectionBody::Skills { skills }) => {
            let Some(skill) = skills.get(*index) else {
                return Line::default();
            };
            let percent = state.effects.bar_width(row.section, *index, now);
            skill_line(&skill.name, percent, width)
        }
        (RowKind::Stats, SectionBody::Stats { stats }) => {
            let mut spans = Vec::new();
            for (i, stat) in stats.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("   ·   ", Style::default().fg(Color::DarkGray)));
                }
                spans.push(Span::styled(
                    state.effects.counter_value(row.section, i, now).to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(format!(" {}", stat.label)));
            }
            Line::from(spans)
        }
        (RowKind::Portrait { line }, _) => match state.effects.portrait(row.section) {
            Some(LazyImage::Loaded(_)) => {
                let text = state
                    .effects
                    .portrait(row.section)
                    .and_then(|image| image.line(*line))
                    .unwrap_or_default();
                Line::styled(text, Style::default().fg(Color::Gray))
            }
            Some(LazyImage::Failed) if *line == 0 => Line::styled(
                "[portrait unavailable]",
                Style::default().fg(Color::DarkGray),
            ),
            _ => Line::default(),
        },
        (RowKind::Email, _) => Line::from(vec![
            Span::styled(
                format!("{} ", Icon::Mail.glyph(unicode)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                state.resume.email.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (y to copy)", Style::default().fg(Color::DarkGray)),
        ]),
        (RowKind::ContactHint, _) => Line::from(vec![
            Span::styled(
                " Write me a message ",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled("  press c", Style::default().fg(Color::DarkGray)),
        ]),
        _ => Line::default(),
    }
}

fn skill_line(name: &str, percent: f32, width: u16) -> Line<'static> {
    // label, space, bar, space, "100%"
    let bar_width = usize::from(width)
        .saturating_sub(SKILL_LABEL_WIDTH + 6)
        .min(MAX_BAR_WIDTH);
    let filled = ((percent / 100.0) * bar_width as f32).round() as usize;
    let filled = filled.min(bar_width);

    Line::from(vec![
        Span::raw(format!("{name:<SKILL_LABEL_WIDTH$} ")),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {:>3}%", percent.round() as u32),
            Style::default().fg(Color::Gray),
        ),
    ])
}

/// Filter buttons in display order with their labels
pub fn filter_buttons(categories: &[String]) -> Vec<(String, ProjectFilter)> {
    std::iter::once(ProjectFilter::All)
        .chain(categories.iter().cloned().map(ProjectFilter::Category))
        .map(|filter| (format!("[ {} ]", filter.label()), filter))
        .collect()
}

fn filter_bar_line(categories: &[String], active: &ProjectFilter) -> Line<'static> {
    let mut spans = Vec::new();
    for (label, filter) in filter_buttons(categories) {
        let style = if &filter == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Filter button under a column, relative to the left of the document area
pub fn filter_at(categories: &[String], column: u16) -> Option<ProjectFilter> {
    let column = usize::from(column);
    let mut x = 0;
    for (label, filter) in filter_buttons(categories) {
        let width = Span::raw(label.as_str()).width();
        if column >= x && column < x + width {
            return Some(filter);
        }
        x += width + 1;
    }
    None
}

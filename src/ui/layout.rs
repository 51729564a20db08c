//! Layout components (nav bar, hero, status bar)
//!
//! Screen geometry lives here so rendering and mouse hit-testing agree.
//!
//! ```text
//! Row 0-2:  Nav bar (3 rows with borders)
//! Row 3-8:  Hero banner (document view only)
//! Row 9+:   Document or contact form
//! Bottom:   Status bar (1 row)
//! ```

use super::icons::Icon;
use crate::app::App;
use crate::state::{parallax_offset, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the nav bar (top border + content + bottom border)
pub const NAV_BAR_HEIGHT: u16 = 3;
/// Height of the hero: banner rows plus name and headline
pub const HERO_HEIGHT: u16 = 6;
/// Columns of padding either side of the document text
pub const DOC_PADDING: u16 = 2;
pub const MENU_WIDTH: u16 = 28;
pub const TOAST_WIDTH: u16 = 46;
/// Two message lines plus borders
pub const TOAST_HEIGHT: u16 = 4;

/// Screen areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub nav_bar: Rect,
    pub hero: Rect,
    pub body: Rect,
    pub status_bar: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, view: View) -> Self {
        let hero_height = match view {
            View::Document => HERO_HEIGHT,
            View::Contact => 0,
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(NAV_BAR_HEIGHT),
                Constraint::Length(hero_height),
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            area,
            nav_bar: chunks[0],
            hero: chunks[1],
            body: chunks[2],
            status_bar: chunks[3],
        }
    }

    /// Area the document text is drawn in
    pub fn document(&self) -> Rect {
        self.body.inner(Margin {
            horizontal: DOC_PADDING,
            vertical: 0,
        })
    }

    /// Dropdown below the nav bar listing `items` sections
    pub fn menu(&self, items: usize) -> Rect {
        let y = self.nav_bar.bottom();
        let max_height = self.area.bottom().saturating_sub(y);
        let height = u16::try_from(items)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(max_height);
        Rect {
            x: self.nav_bar.x + 1,
            y,
            width: MENU_WIDTH.min(self.area.width.saturating_sub(1)),
            height,
        }
    }

    /// Toast in the top-right corner. `progress` is how far it has slid in.
    pub fn toast(&self, progress: f32) -> Rect {
        let full = TOAST_WIDTH.min(self.area.width);
        let visible = (f32::from(full) * progress.clamp(0.0, 1.0)).round() as u16;
        let y = self.nav_bar.bottom();
        Rect {
            x: self.area.right().saturating_sub(visible),
            y,
            width: visible,
            height: TOAST_HEIGHT.min(self.area.bottom().saturating_sub(y)),
        }
    }
}

/// What a nav bar entry does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Menu,
    Section(usize),
}

/// A nav bar entry and its horizontal extent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub x: u16,
    pub width: u16,
    pub target: NavTarget,
}

/// Entries that fit in the nav bar, left to right
pub fn nav_items(nav_bar: Rect, titles: &[(&str, &str)], unicode: bool) -> Vec<NavItem> {
    let inner_right = nav_bar.right().saturating_sub(1);
    let labels = std::iter::once((
        format!(" {} Menu ", Icon::Menu.glyph(unicode)),
        NavTarget::Menu,
    ))
    .chain(
        titles
            .iter()
            .enumerate()
            .map(|(i, (_, title))| (format!(" {title} "), NavTarget::Section(i))),
    );

    let mut items = Vec::new();
    let mut x = nav_bar.x + 1;
    for (label, target) in labels {
        let width = u16::try_from(Span::raw(label.as_str()).width()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > inner_right {
            break;
        }
        items.push(NavItem {
            label,
            x,
            width,
            target,
        });
        x += width + 1;
    }
    items
}

/// Nav bar entry under a mouse position
pub fn nav_target_at(
    nav_bar: Rect,
    titles: &[(&str, &str)],
    unicode: bool,
    column: u16,
    row: u16,
) -> Option<NavTarget> {
    if row != nav_bar.y + 1 {
        return None;
    }
    nav_items(nav_bar, titles, unicode)
        .into_iter()
        .find(|item| column >= item.x && column < item.x + item.width)
        .map(|item| item.target)
}

/// Whether a mouse position falls inside an area
pub fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

/// Draw the nav bar with the scroll-spy section highlighted
pub fn draw_nav_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles = app.state.section_titles();
    let active = app.state.active_section.as_deref();
    let in_document = app.state.current_view == View::Document;

    let mut spans = Vec::new();
    for item in nav_items(area, &titles, app.unicode_icons) {
        let style = match item.target {
            NavTarget::Menu if app.state.nav_menu.open => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
            NavTarget::Menu => Style::default().fg(Color::Cyan),
            NavTarget::Section(i) => {
                let is_active =
                    in_document && titles.get(i).map(|(id, _)| *id) == active;
                if is_active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::Gray)
                }
            }
        };
        spans.push(Span::styled(item.label, style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", app.state.resume.name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the hero banner, shifted by the parallax offset
pub fn draw_hero(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let resume = &app.state.resume;
    let banner_rows = usize::from(area.height.saturating_sub(2));
    let offset = usize::from(parallax_offset(app.state.scroll_offset, resume.hero.speed));

    let mut lines: Vec<Line> = resume
        .hero
        .banner
        .iter()
        .skip(offset)
        .take(banner_rows)
        .map(|l| Line::styled(l.as_str(), Style::default().fg(Color::Blue)))
        .collect();
    lines.resize(banner_rows, Line::default());

    lines.push(Line::styled(
        resume.name.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    let subtitle = match &resume.location {
        Some(location) => format!("{} · {location}", resume.headline),
        None => resume.headline.clone(),
    };
    lines.push(Line::styled(subtitle, Style::default().fg(Color::Gray)));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" ● {} ", app.transport_name()),
        Style::default().fg(Color::Green),
    )];

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if app.state.current_view == View::Document {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("filter: {}", app.state.filter.label()),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " q:quit ";
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: area.height.min(1),
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Document if app.state.nav_menu.open => "j/k:select  Enter:go  Esc:close".to_string(),
        View::Document => {
            "j/k:scroll  1-9:jump  m:menu  [/]:filter  c:contact  d:cv  y:copy email".to_string()
        }
        View::Contact => format!(
            "Tab:next  Enter:newline/send  {}:send  Esc:back",
            crate::platform::SUBMIT_SHORTCUT
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: &[(&str, &str)] = &[("about", "About"), ("skills", "Skills")];

    mod screen_layout {
        use super::*;

        #[test]
        fn test_document_view_areas() {
            let screen = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Document);
            assert_eq!(screen.nav_bar, Rect::new(0, 0, 80, 3));
            assert_eq!(screen.hero, Rect::new(0, 3, 80, HERO_HEIGHT));
            assert_eq!(screen.body, Rect::new(0, 9, 80, 14));
            assert_eq!(screen.status_bar, Rect::new(0, 23, 80, 1));
            assert_eq!(screen.document(), Rect::new(2, 9, 76, 14));
        }

        #[test]
        fn test_contact_view_has_no_hero() {
            let screen = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Contact);
            assert_eq!(screen.hero.height, 0);
            assert_eq!(screen.body, Rect::new(0, 3, 80, 20));
        }

        #[test]
        fn test_menu_sits_below_nav_bar() {
            let screen = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Document);
            assert_eq!(screen.menu(6), Rect::new(1, 3, MENU_WIDTH, 8));
        }

        #[test]
        fn test_menu_is_clamped_to_screen() {
            let screen = ScreenLayout::new(Rect::new(0, 0, 20, 6), View::Document);
            let menu = screen.menu(50);
            assert!(menu.bottom() <= 6);
            assert!(menu.right() <= 20);
        }

        #[test]
        fn test_toast_slides_in_from_right() {
            let screen = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Document);
            assert_eq!(screen.toast(0.0).width, 0);
            assert_eq!(
                screen.toast(1.0),
                Rect::new(80 - TOAST_WIDTH, 3, TOAST_WIDTH, TOAST_HEIGHT)
            );
            let half = screen.toast(0.5);
            assert_eq!(half.right(), 80);
            assert_eq!(half.width, TOAST_WIDTH / 2);
        }
    }

    mod nav_bar {
        use super::*;

        #[test]
        fn test_items_are_laid_out_left_to_right() {
            let items = nav_items(Rect::new(0, 0, 80, 3), TITLES, false);
            assert_eq!(items.len(), 3);
            assert_eq!(items[0].target, NavTarget::Menu);
            assert_eq!(items[0].label, " = Menu ");
            assert_eq!(items[0].x, 1);
            assert_eq!(items[1].x, items[0].x + items[0].width + 1);
            assert_eq!(items[2].target, NavTarget::Section(1));
        }

        #[test]
        fn test_items_that_do_not_fit_are_dropped() {
            let items = nav_items(Rect::new(0, 0, 17, 3), TITLES, false);
            assert_eq!(items.len(), 1);
        }

        #[test]
        fn test_target_at_position() {
            let bar = Rect::new(0, 0, 80, 3);
            let items = nav_items(bar, TITLES, true);
            let about = &items[1];

            assert_eq!(nav_target_at(bar, TITLES, true, 2, 1), Some(NavTarget::Menu));
            assert_eq!(
                nav_target_at(bar, TITLES, true, about.x, 1),
                Some(NavTarget::Section(0))
            );
            assert_eq!(nav_target_at(bar, TITLES, true, about.x, 0), None);
            assert_eq!(nav_target_at(bar, TITLES, true, 79, 1), None);
        }
    }
}

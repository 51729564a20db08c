//! UI module for rendering the TUI

mod components;
mod document;
mod forms;
mod icons;
pub mod layout;
mod nav_menu;

pub use document::filter_at;
pub use forms::form_target_at;
pub use nav_menu::item_at as menu_item_at;

use crate::app::App;
use crate::state::View;
use layout::ScreenLayout;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = ScreenLayout::new(frame.area(), app.state.current_view);

    layout::draw_nav_bar(frame, screen.nav_bar, app);

    match app.state.current_view {
        View::Document => {
            layout::draw_hero(frame, screen.hero, app);
            document::draw(frame, screen.document(), app);
        }
        View::Contact => forms::draw_contact_form(frame, screen.body, app),
    }

    layout::draw_status_bar(frame, screen.status_bar, app);

    // Overlays
    if app.state.current_view == View::Document && app.state.nav_menu.open {
        nav_menu::draw(frame, &screen, app);
    }
    if let Some(toast) = app.notifications.current() {
        components::render_toast(frame, &screen, toast, app.unicode_icons, Instant::now());
    }
}

//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
pub mod views;

use crate::app::App;
use ratatui::Frame;

pub use layout::{header_tab_at, SidebarRegions};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let (panel_area, status_area) = layout::create_layout(frame.area());
    let regions = SidebarRegions::split(panel_area);

    layout::draw_header(frame, regions.header, app);
    app.draw_view(frame, regions);
    layout::draw_status_bar(frame, status_area, app);
}

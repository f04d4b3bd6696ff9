//! Layout regions (header, body, footer, status bar)
//!
//! ```text
//! +------------------------------+
//! | ◆ site │ Content  Dummy      |  header  (HEADER_HEIGHT)
//! +------------------------------+
//! | body                         |  area - header - footer
//! |                              |
//! +------------------------------+
//! |            Save              |  footer  (FOOTER_HEIGHT)
//! +------------------------------+
//!  status bar (1 row, outside the panel)
//! ```

use super::components::BUTTON_HEIGHT;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the header band (with borders: top + content + bottom)
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the footer band, sized to hold one button
pub const FOOTER_HEIGHT: u16 = BUTTON_HEIGHT;

/// The three cooperating regions of the sidebar panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarRegions {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl SidebarRegions {
    /// Split a panel so the body gets whatever the fixed bands leave over
    pub fn split(area: Rect) -> Self {
        let header_height = HEADER_HEIGHT.min(area.height);
        let footer_height = FOOTER_HEIGHT.min(area.height - header_height);
        let body_height = area.height - header_height - footer_height;

        Self {
            header: Rect {
                height: header_height,
                ..area
            },
            body: Rect {
                y: area.y + header_height,
                height: body_height,
                ..area
            },
            footer: Rect {
                y: area.y + header_height + body_height,
                height: footer_height,
                ..area
            },
        }
    }
}

/// Split the terminal into the panel and the status bar row
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header band: logo, site name and one tab per registered view
pub fn draw_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
    let logo = Span::styled(
        " ◆ ",
        Style::default()
            .fg(Color::Rgb(0, 133, 255))
            .add_modifier(Modifier::BOLD),
    );
    let site_name = Span::styled(
        app.config.site_name().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    );

    // Starting column is: area.x + 1 (left border)
    let mut current_col = area.x + 1 + logo.width() as u16 + site_name.width() as u16;
    let mut spans = vec![logo, site_name, separator.clone()];
    current_col += separator.width() as u16;

    let active = app.active_view();
    let mut segments = Vec::new();
    for (index, name) in app.cms.views.names().into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
            current_col += 2;
        }

        let style = if index == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let tab = Span::styled(name.to_string(), style);
        let start_col = current_col;
        current_col += tab.width() as u16;
        spans.push(tab);
        segments.push((start_col, current_col, index));
    }

    // Store segments for mouse handling
    app.header_segments = segments;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Find the view tab under a header click
pub fn header_tab_at(segments: &[(u16, u16, usize)], column: u16) -> Option<usize> {
    segments
        .iter()
        .find(|(start, end, _)| column >= *start && column < *end)
        .map(|(_, _, index)| *index)
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    spans.push(Span::styled(
        app.view_hints(),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    if let Some(path) = app.content_path() {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("📄 {file_name}"),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_hint = " ^T:view  ^R:reload  ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

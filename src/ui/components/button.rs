//! Button component for TUI

use crate::state::ButtonPress;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Accent color of the save button
const SAVE_COLOR: (u8, u8, u8) = (0, 133, 255);

/// Scale an RGB color towards black by `opacity`
fn dim((r, g, b): (u8, u8, u8), opacity: f32) -> Color {
    let scale = |c: u8| (c as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Render the full-width save button, faded while a press is recent
pub fn render_save_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_focused: bool,
    press: Option<&ButtonPress>,
) {
    let opacity = press.map(ButtonPress::opacity).unwrap_or(1.0);
    let background = dim(SAVE_COLOR, opacity);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan).bg(background)
    } else {
        Style::default().fg(background).bg(background)
    };

    let paragraph = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(paragraph, area);
}

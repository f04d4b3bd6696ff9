//! Reusable UI components

mod button;

pub use button::{render_save_button, BUTTON_HEIGHT};

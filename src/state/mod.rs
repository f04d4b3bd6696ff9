//! State management for the TUI

mod button_press;
mod selection;

pub use button_press::ButtonPress;
pub use selection::{initial_selection, reconcile, PanelFocus};

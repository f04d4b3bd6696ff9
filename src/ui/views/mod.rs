//! Built-in sidebar views

mod content;
mod dummy;
mod placeholders;

pub use content::ContentPlugin;
pub use dummy::DummyPlugin;

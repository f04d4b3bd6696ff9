//! Form editing widgets

mod field_renderer;
mod fields_builder;

pub use fields_builder::FieldsBuilder;

//! Fixed messages shown when there is nothing to edit

use ratatui::{
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};

pub const NO_FORMS_MESSAGE: &str = "There is nothing to edit on this page";

pub const NO_FIELDS_MESSAGE: &str = "There are no fields registered with this form";

fn message(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
}

pub fn no_forms() -> Paragraph<'static> {
    message(NO_FORMS_MESSAGE)
}

pub fn no_fields() -> Paragraph<'static> {
    message(NO_FIELDS_MESSAGE)
}

//! Auto-generated editor for the fields of one form
//!
//! The builder owns the editing cursor. Edits are written straight into the
//! form's values, so a later submit sees them.

use super::field_renderer::{draw_field, field_height};
use crate::cms::Form;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Editing state bound to a single form by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsBuilder {
    form: String,
    active_field: usize,
}

impl FieldsBuilder {
    pub fn new(form: &Form) -> Self {
        Self {
            form: form.name().to_string(),
            active_field: 0,
        }
    }

    /// Name of the form this builder edits
    pub fn form_name(&self) -> &str {
        &self.form
    }

    /// Pull the cursor back onto the form's last field if it ran past the end
    pub fn clamp(&mut self, form: &Form) {
        let last = form.fields().len().saturating_sub(1);
        if self.active_field > last {
            tracing::debug!(
                form = %self.form,
                from = self.active_field,
                to = last,
                "Field cursor clamped"
            );
            self.active_field = last;
        }
    }

    pub fn next_field(&mut self, form: &Form) {
        let count = form.fields().len();
        if count > 0 {
            self.active_field = (self.active_field + 1) % count;
        }
    }

    pub fn prev_field(&mut self, form: &Form) {
        let count = form.fields().len();
        if count == 0 {
            return;
        }
        self.active_field = if self.active_field == 0 {
            count - 1
        } else {
            (self.active_field - 1).min(count - 1)
        };
    }

    /// Apply a key to the active field; returns false if the key was not used
    pub fn handle_key(&mut self, key: KeyEvent, form: &Form) -> bool {
        self.clamp(form);
        let Some(field) = form.fields().get(self.active_field) else {
            return false;
        };

        match key.code {
            KeyCode::Up => self.prev_field(form),
            KeyCode::Down => self.next_field(form),
            KeyCode::Enter if field.is_multiline() => form.push_char(&field.name, '\n'),
            KeyCode::Enter => self.next_field(form),
            KeyCode::Backspace => form.pop_char(&field.name),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                form.push_char(&field.name, c)
            }
            _ => return false,
        }
        true
    }

    /// Index of the first field to draw so the active one stays visible
    fn first_visible(&self, form: &Form, height: u16) -> usize {
        let fields = form.fields();
        let active = self.active_field.min(fields.len().saturating_sub(1));
        let mut first = 0;
        while first < active {
            let used: u16 = fields[first..=active].iter().map(field_height).sum();
            if used <= height {
                break;
            }
            first += 1;
        }
        first
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, form: &Form, is_focused: bool) {
        let first = self.first_visible(form, area.height);
        let visible = &form.fields()[first..];

        let mut constraints: Vec<Constraint> = visible
            .iter()
            .map(|field| Constraint::Length(field_height(field)))
            .collect();
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (offset, field) in visible.iter().enumerate() {
            let is_active = is_focused && first + offset == self.active_field;
            draw_field(frame, chunks[offset], field, &form.value(&field.name), is_active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Field, MockFormSubmitter};
    use std::rc::Rc;

    fn form() -> Form {
        Form::new(
            "Page",
            vec![
                Field::text("title", "Title"),
                Field::textarea("body", "Body"),
                Field::text("slug", "Slug"),
            ],
            Rc::new(MockFormSubmitter::new()),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_edits_active_field() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        assert!(builder.handle_key(key(KeyCode::Char('H')), &form));
        assert!(builder.handle_key(key(KeyCode::Char('i')), &form));
        assert!(builder.handle_key(key(KeyCode::Backspace), &form));
        assert_eq!(form.value("title"), "H");
        assert_eq!(form.value("body"), "");
    }

    #[test]
    fn test_enter_moves_from_single_line_field() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        builder.handle_key(key(KeyCode::Enter), &form);
        assert_eq!(builder.active_field, 1);
    }

    #[test]
    fn test_enter_inserts_newline_in_textarea() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        builder.next_field(&form);
        builder.handle_key(key(KeyCode::Char('a')), &form);
        builder.handle_key(key(KeyCode::Enter), &form);
        builder.handle_key(key(KeyCode::Char('b')), &form);
        assert_eq!(form.value("body"), "a\nb");
        assert_eq!(builder.active_field, 1);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        builder.prev_field(&form);
        assert_eq!(builder.active_field, 2);
        builder.next_field(&form);
        assert_eq!(builder.active_field, 0);
    }

    #[test]
    fn test_control_chords_are_not_typed() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!builder.handle_key(save, &form));
        assert_eq!(form.value("title"), "");
    }

    #[test]
    fn test_form_without_fields_ignores_keys() {
        let empty = Form::new("Empty", vec![], Rc::new(MockFormSubmitter::new()));
        let mut builder = FieldsBuilder::new(&empty);
        assert!(!builder.handle_key(key(KeyCode::Char('x')), &empty));
        builder.next_field(&empty);
        assert_eq!(builder.active_field, 0);
    }

    #[test]
    fn test_cursor_clamps_when_form_loses_fields() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        builder.active_field = 2;

        let shorter = Form::new(
            "Page",
            vec![Field::text("title", "Title")],
            Rc::new(MockFormSubmitter::new()),
        );
        assert!(builder.handle_key(key(KeyCode::Char('x')), &shorter));
        assert_eq!(builder.active_field, 0);
        assert_eq!(shorter.value("title"), "x");
    }

    #[test]
    fn test_first_visible_keeps_active_field_on_screen() {
        let form = form();
        let mut builder = FieldsBuilder::new(&form);
        // title(3) + body(6) + slug(3) = 12 rows
        assert_eq!(builder.first_visible(&form, 12), 0);

        builder.active_field = 2;
        assert_eq!(builder.first_visible(&form, 12), 0);
        assert_eq!(builder.first_visible(&form, 9), 1);
        assert_eq!(builder.first_visible(&form, 3), 2);
    }
}

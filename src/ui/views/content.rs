//! Content view: pick a registered form and edit its fields
//!
//! Layout inside the body region:
//! ```text
//!  Page            <- one row per form, selection underlined
//!  Settings
//!
//!  Editing form Page
//!  +- Title ------------------+
//!  | ...                      |  <- fields builder
//! ```
//! The selector shrinks and scrolls with the cursor so the heading and the
//! first field row stay on screen. The footer holds the Save button while a
//! form is selected.

use super::placeholders;
use crate::cms::{Cms, Form, FormRegistry, MountedView, Subscription, ViewEvent, ViewPlugin};
use crate::platform::{is_save_key, SAVE_SHORTCUT};
use crate::state::{initial_selection, reconcile, ButtonPress, PanelFocus};
use crate::ui::components::render_save_button;
use crate::ui::forms::FieldsBuilder;
use crate::ui::SidebarRegions;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Rows kept for the editor below the selector
const MIN_EDITOR_HEIGHT: u16 = 3;

pub struct ContentPlugin;

impl ViewPlugin for ContentPlugin {
    fn name(&self) -> &str {
        "Content"
    }

    fn mount(&self, cms: &Cms) -> Box<dyn MountedView> {
        Box::new(ContentView::mount(&cms.forms))
    }
}

/// One row of the form selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    pub name: String,
    pub selected: bool,
}

/// What the editor area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorModel {
    Hidden,
    NoFields,
    Fields { form: String },
}

/// Description of what the panel renders for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelModel {
    NoForms,
    Forms {
        entries: Vec<FormEntry>,
        heading: String,
        editor: EditorModel,
        save_visible: bool,
    },
}

pub struct ContentView {
    registry: Rc<FormRegistry>,
    editing: Rc<RefCell<Option<String>>>,
    focus: PanelFocus,
    cursor: usize,
    builder: Option<FieldsBuilder>,
    press: Option<ButtonPress>,
    list_state: ListState,
    list_area: Rect,
    save_area: Option<Rect>,
    _subscription: Subscription,
}

impl ContentView {
    /// Select the first form and start following registry changes
    pub fn mount(registry: &Rc<FormRegistry>) -> Self {
        let editing = Rc::new(RefCell::new(initial_selection(&registry.all())));

        let weak_registry = Rc::downgrade(registry);
        let selection = Rc::clone(&editing);
        let subscription = registry.subscribe(move || {
            let Some(registry) = weak_registry.upgrade() else {
                return;
            };
            let forms = registry.all();
            let mut editing = selection.borrow_mut();
            let next = reconcile(editing.as_deref(), &forms);
            if *editing != next {
                tracing::debug!(from = ?*editing, to = ?next, "Selection reconciled");
                *editing = next;
            }
        });

        tracing::debug!(selected = ?*editing.borrow(), "Content view mounted");

        Self {
            registry: Rc::clone(registry),
            editing,
            focus: PanelFocus::default(),
            cursor: 0,
            builder: None,
            press: None,
            list_state: ListState::default(),
            list_area: Rect::default(),
            save_area: None,
            _subscription: subscription,
        }
    }

    /// Name of the selected form, as stored
    #[cfg(test)]
    pub fn selected_name(&self) -> Option<String> {
        self.editing.borrow().clone()
    }

    /// The selected form, resolved against the current registry
    pub fn selected_form(&self) -> Option<Rc<Form>> {
        let editing = self.editing.borrow();
        let name = editing.as_deref()?;
        self.registry.find(name)
    }

    /// Make `name` the selection, whatever was selected before
    pub fn select(&mut self, name: &str) {
        tracing::debug!(form = name, "Form selected");
        *self.editing.borrow_mut() = Some(name.to_string());
        if let Some(index) = self.registry.all().iter().position(|f| f.name() == name) {
            self.cursor = index;
        }
    }

    fn select_at(&mut self, index: usize) -> bool {
        let forms = self.registry.all();
        match forms.get(index) {
            Some(form) => {
                self.select(form.name());
                true
            }
            None => false,
        }
    }

    /// Submit the selected form
    pub fn save(&mut self) -> Result<ViewEvent> {
        let Some(form) = self.selected_form() else {
            return Ok(ViewEvent::Ignored);
        };
        self.press = Some(ButtonPress::new());
        form.submit()?;
        Ok(ViewEvent::Saved(form.name().to_string()))
    }

    pub fn model(&self) -> PanelModel {
        if self.registry.is_empty() {
            return PanelModel::NoForms;
        }
        let forms = self.registry.all();

        let editing = self.editing.borrow();
        let entries = forms
            .iter()
            .map(|form| FormEntry {
                name: form.name().to_string(),
                selected: editing.as_deref() == Some(form.name()),
            })
            .collect();

        let selected = self.selected_form();
        let heading = format!(
            "Editing form {}",
            selected.as_ref().map(|f| f.name()).unwrap_or_default()
        );
        let editor = match &selected {
            None => EditorModel::Hidden,
            Some(form) if form.fields().is_empty() => EditorModel::NoFields,
            Some(form) => EditorModel::Fields {
                form: form.name().to_string(),
            },
        };

        PanelModel::Forms {
            entries,
            heading,
            editor,
            save_visible: selected.is_some(),
        }
    }

    /// Rebuild the field editor when the selected form changes
    ///
    /// A form replaced under the same name keeps its builder, with the
    /// cursor clamped to the new field list.
    fn sync_builder(&mut self) {
        let selected = self.selected_form();
        let stale = match (&self.builder, &selected) {
            (Some(builder), Some(form)) => builder.form_name() != form.name(),
            (None, None) => false,
            _ => true,
        };
        if stale {
            self.builder = selected.as_deref().map(FieldsBuilder::new);
        } else if let (Some(builder), Some(form)) = (&mut self.builder, &selected) {
            builder.clamp(form);
        }

        let has_fields = selected.as_ref().is_some_and(|f| !f.fields().is_empty());
        let corrected = match self.focus {
            PanelFocus::Fields if !has_fields => PanelFocus::List,
            PanelFocus::Save if selected.is_none() => PanelFocus::List,
            focus => focus,
        };
        self.focus = corrected;

        let count = self.registry.len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }

        if self.press.is_some_and(|press| press.is_expired()) {
            self.press = None;
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewEvent {
        let count = self.registry.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down if count > 0 => {
                self.cursor = (self.cursor + 1).min(count - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !self.select_at(self.cursor) {
                    return ViewEvent::Ignored;
                }
            }
            _ => return ViewEvent::Ignored,
        }
        ViewEvent::Handled
    }

    fn draw_selector(&mut self, frame: &mut Frame, area: Rect, entries: &[FormEntry]) {
        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut style = Style::default();
                if entry.selected {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                let marker = if self.focus == PanelFocus::List && index == self.cursor {
                    style = style.fg(Color::Cyan);
                    "› "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(entry.name.clone(), style),
                ]))
            })
            .collect();

        // The offset follows the cursor and persists between frames
        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), area, &mut self.list_state);
        self.list_area = area;
    }
}

impl MountedView for ContentView {
    fn draw(&mut self, frame: &mut Frame, regions: SidebarRegions) {
        self.sync_builder();
        self.save_area = None;
        self.list_area = Rect::default();

        let body = regions.body.inner(Margin::new(1, 1));
        let PanelModel::Forms {
            entries,
            heading,
            editor,
            save_visible,
        } = self.model()
        else {
            frame.render_widget(placeholders::no_forms(), body);
            return;
        };

        let room = body.height.saturating_sub(2 + MIN_EDITOR_HEIGHT).max(1);
        let list_height = (entries.len() as u16).min(room);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(list_height), // Form selector
                Constraint::Length(1),           // Spacing
                Constraint::Length(1),           // Heading
                Constraint::Min(0),              // Editor
            ])
            .split(body);

        self.draw_selector(frame, chunks[0], &entries);
        frame.render_widget(
            Paragraph::new(heading).style(Style::default().add_modifier(Modifier::BOLD)),
            chunks[2],
        );

        match editor {
            EditorModel::Hidden => {}
            EditorModel::NoFields => frame.render_widget(placeholders::no_fields(), chunks[3]),
            EditorModel::Fields { form } => {
                if let (Some(builder), Some(form)) = (&self.builder, self.registry.find(&form)) {
                    builder.draw(frame, chunks[3], &form, self.focus == PanelFocus::Fields);
                }
            }
        }

        if save_visible {
            render_save_button(
                frame,
                regions.footer,
                "Save",
                self.focus == PanelFocus::Save,
                self.press.as_ref(),
            );
            self.save_area = Some(regions.footer);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<ViewEvent> {
        self.sync_builder();

        if is_save_key(&key) {
            return self.save();
        }

        let selected = self.selected_form();
        let has_fields = selected.as_ref().is_some_and(|f| !f.fields().is_empty());

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next(has_fields, selected.is_some());
                return Ok(ViewEvent::Handled);
            }
            KeyCode::Esc if self.focus != PanelFocus::List => {
                self.focus = PanelFocus::List;
                return Ok(ViewEvent::Handled);
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::List => Ok(self.handle_list_key(key)),
            PanelFocus::Fields => {
                let handled = match (&mut self.builder, &selected) {
                    (Some(builder), Some(form)) => builder.handle_key(key, form),
                    _ => false,
                };
                Ok(if handled {
                    ViewEvent::Handled
                } else {
                    ViewEvent::Ignored
                })
            }
            PanelFocus::Save => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.save(),
                _ => Ok(ViewEvent::Ignored),
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<ViewEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(ViewEvent::Ignored);
        }

        let position = Position::new(mouse.column, mouse.row);
        if self.list_area.contains(position) {
            let index = self.list_state.offset() + (mouse.row - self.list_area.y) as usize;
            if self.select_at(index) {
                self.focus = PanelFocus::List;
                return Ok(ViewEvent::Handled);
            }
        }

        if self.save_area.is_some_and(|area| area.contains(position)) {
            return self.save();
        }

        Ok(ViewEvent::Ignored)
    }

    fn hints(&self) -> String {
        let focused = match self.focus {
            PanelFocus::List => "j/k:nav  Enter:select",
            PanelFocus::Fields => "↑/↓:field  Esc:list",
            PanelFocus::Save => "Enter:save  Esc:list",
        };
        format!("{focused}  Tab:focus  {SAVE_SHORTCUT}:save")
    }
}

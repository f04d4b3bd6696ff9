//! Application state and core logic

use crate::cms::{Cms, MountedView, ViewEvent};
use crate::config::TuiConfig;
use crate::content;
use crate::ui::views::{ContentPlugin, DummyPlugin};
use crate::ui::{header_tab_at, SidebarRegions};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Position, Frame};
use std::path::{Path, PathBuf};

/// Main application struct
pub struct App {
    /// Host CMS: form registry and view plugins
    pub cms: Cms,
    /// User configuration
    pub config: TuiConfig,
    /// Content file backing the form registry
    content_path: Option<PathBuf>,
    /// Index of the mounted view plugin
    active_view: usize,
    /// The single mounted view instance
    mounted: Option<Box<dyn MountedView>>,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Header tab bounds for click detection (start_col, end_col, view index)
    pub header_segments: Vec<(u16, u16, usize)>,
    /// Regions used by the last draw
    regions: SidebarRegions,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App with the built-in views and the configured content
    pub fn new(config: TuiConfig, content_path: Option<PathBuf>) -> Result<Self> {
        let mut cms = Cms::new();
        cms.views.add(Box::new(ContentPlugin));
        cms.views.add(Box::new(DummyPlugin));

        if let Some(path) = &content_path {
            cms.forms.replace_all(content::load_forms(path)?);
        }

        Ok(Self::with_cms(cms, config, content_path))
    }

    /// Create an App around an existing CMS and mount the default view
    pub fn with_cms(cms: Cms, config: TuiConfig, content_path: Option<PathBuf>) -> Self {
        let initial = config
            .default_view
            .as_deref()
            .and_then(|name| cms.views.position(name))
            .unwrap_or(0);

        let mut app = Self {
            cms,
            config,
            content_path,
            active_view: initial,
            mounted: None,
            status_message: None,
            header_segments: Vec::new(),
            regions: SidebarRegions::default(),
            quit: false,
        };
        app.mount_view(initial);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn active_view(&self) -> usize {
        self.active_view
    }

    pub fn active_view_name(&self) -> Option<&str> {
        self.cms.views.get(self.active_view).map(|view| view.name())
    }

    pub fn content_path(&self) -> Option<&Path> {
        self.content_path.as_deref()
    }

    /// Keyboard hints of the mounted view
    pub fn view_hints(&self) -> String {
        self.mounted
            .as_ref()
            .map(|view| view.hints())
            .unwrap_or_default()
    }

    /// Unmount the current view and mount the view at `index`
    pub fn mount_view(&mut self, index: usize) {
        // Release the previous instance before mounting the next one
        self.mounted = None;

        let Some(plugin) = self.cms.views.get(index) else {
            tracing::warn!(index, "No view registered at index");
            return;
        };
        tracing::info!(view = plugin.name(), "Mounting view");
        let view = plugin.mount(&self.cms);
        self.mounted = Some(view);
        self.active_view = index;
    }

    /// Mount the next registered view, wrapping around
    pub fn next_view(&mut self) {
        if self.cms.views.is_empty() {
            return;
        }
        self.mount_view((self.active_view + 1) % self.cms.views.len());
    }

    /// Re-read the content file into the registry
    pub fn reload_content(&mut self) -> Result<()> {
        let Some(path) = &self.content_path else {
            self.status_message = Some("No content file to reload".to_string());
            return Ok(());
        };
        let forms = content::load_forms(path)?;
        let count = forms.len();
        self.cms.forms.replace_all(forms);
        self.status_message = Some(format!("Reloaded {count} form(s)"));
        Ok(())
    }

    /// Show an error in the status bar
    pub fn report_error(&mut self, err: anyhow::Error) {
        tracing::warn!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    /// Draw the mounted view into the panel regions
    pub fn draw_view(&mut self, frame: &mut Frame, regions: SidebarRegions) {
        self.regions = regions;
        if let Some(view) = self.mounted.as_mut() {
            view.draw(frame, regions);
        }
    }

    fn on_view_event(&mut self, event: Result<ViewEvent>) {
        match event {
            Ok(ViewEvent::Saved(form)) => {
                self.status_message = Some(format!("Saved {form}"));
            }
            Ok(ViewEvent::Handled | ViewEvent::Ignored) => {}
            Err(err) => self.report_error(err),
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.quit = true;
                    return Ok(());
                }
                KeyCode::Char('t') => {
                    self.next_view();
                    return Ok(());
                }
                KeyCode::Char('r') => {
                    if let Err(err) = self.reload_content() {
                        self.report_error(err);
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        // Clear any status messages on key press
        self.status_message = None;

        if let Some(view) = self.mounted.as_mut() {
            let event = view.handle_key(key);
            self.on_view_event(event);
        }
        Ok(())
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let is_click = mouse.kind == MouseEventKind::Down(MouseButton::Left);
        if is_click
            && self
                .regions
                .header
                .contains(Position::new(mouse.column, mouse.row))
        {
            if let Some(index) = header_tab_at(&self.header_segments, mouse.column) {
                if index != self.active_view {
                    self.mount_view(index);
                }
            }
            return Ok(());
        }

        if let Some(view) = self.mounted.as_mut() {
            let event = view.handle_mouse(mouse);
            self.on_view_event(event);
        }
        Ok(())
    }

    /// Remember the mounted view for the next start
    pub fn shutdown(&mut self) -> Result<()> {
        let active = self.active_view_name().map(str::to_string);
        if active.is_some() && active != self.config.default_view {
            self.config.default_view = active;
            self.config.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Form, MockFormSubmitter, SubmitError};
    use crate::ui;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::io::Write;
    use std::rc::Rc;

    fn cms_with(names: &[&str]) -> Cms {
        let mut cms = Cms::new();
        cms.views.add(Box::new(ContentPlugin));
        cms.views.add(Box::new(DummyPlugin));
        cms.forms.replace_all(
            names
                .iter()
                .map(|name| Rc::new(Form::new(*name, vec![], Rc::new(MockFormSubmitter::new()))))
                .collect(),
        );
        cms
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| ui::draw(frame, app)).unwrap();
        ui::test_support::buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn test_mounts_first_view_by_default() {
        let app = App::with_cms(cms_with(&["A"]), TuiConfig::default(), None);
        assert_eq!(app.active_view_name(), Some("Content"));
        assert_eq!(app.cms.forms.subscriber_count(), 1);
    }

    #[test]
    fn test_mounts_configured_default_view() {
        let config = TuiConfig {
            default_view: Some("Dummy".to_string()),
            ..Default::default()
        };
        let app = App::with_cms(cms_with(&["A"]), config, None);
        assert_eq!(app.active_view_name(), Some("Dummy"));
        assert_eq!(app.cms.forms.subscriber_count(), 0);
    }

    #[test]
    fn test_switching_views_unmounts_previous() {
        let mut app = App::with_cms(cms_with(&["A"]), TuiConfig::default(), None);
        app.handle_key(ctrl('t')).unwrap();
        assert_eq!(app.active_view_name(), Some("Dummy"));
        assert_eq!(app.cms.forms.subscriber_count(), 0);

        app.handle_key(ctrl('t')).unwrap();
        assert_eq!(app.active_view_name(), Some("Content"));
        assert_eq!(app.cms.forms.subscriber_count(), 1);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::with_cms(cms_with(&[]), TuiConfig::default(), None);
        assert!(!app.should_quit());
        app.handle_key(ctrl('c')).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_draw_shows_header_tabs_and_content() {
        let mut app = App::with_cms(cms_with(&["Page"]), TuiConfig::default(), None);
        let lines = draw(&mut app);

        assert!(lines[1].contains(crate::config::DEFAULT_SITE_NAME));
        assert!(lines[1].contains("Content"));
        assert!(lines[1].contains("Dummy"));
        assert!(lines.iter().any(|l| l.contains("Editing form Page")));
        assert_eq!(app.header_segments.len(), 2);
    }

    #[test]
    fn test_header_click_mounts_view() {
        let mut app = App::with_cms(cms_with(&["Page"]), TuiConfig::default(), None);
        draw(&mut app);

        let (start, _, index) = app.header_segments[1];
        assert_eq!(index, 1);
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: start,
            row: 1,
            modifiers: KeyModifiers::NONE,
        })
        .unwrap();
        assert_eq!(app.active_view_name(), Some("Dummy"));

        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Hello World")));
    }

    #[test]
    fn test_save_reports_status() {
        let mut submitter = MockFormSubmitter::new();
        submitter.expect_submit().times(1).returning(|_, _| Ok(()));
        let mut cms = cms_with(&[]);
        cms.forms
            .add(Rc::new(Form::new("Page", vec![], Rc::new(submitter))));

        let mut app = App::with_cms(cms, TuiConfig::default(), None);
        app.handle_key(ctrl('s')).unwrap();
        assert_eq!(app.status_message.as_deref(), Some("Saved Page"));
    }

    #[test]
    fn test_submit_failure_is_reported_not_fatal() {
        let mut submitter = MockFormSubmitter::new();
        submitter.expect_submit().times(1).returning(|form, _| {
            Err(SubmitError::Persist {
                form: form.to_string(),
                source: "permission denied".into(),
            })
        });
        let mut cms = cms_with(&[]);
        cms.forms
            .add(Rc::new(Form::new("Page", vec![], Rc::new(submitter))));

        let mut app = App::with_cms(cms, TuiConfig::default(), None);
        assert!(app.handle_key(ctrl('s')).is_ok());
        let message = app.status_message.clone().unwrap();
        assert!(message.starts_with("Error:"));
        assert!(message.contains("permission denied"));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_reload_without_content_file() {
        let mut app = App::with_cms(cms_with(&["A"]), TuiConfig::default(), None);
        app.handle_key(ctrl('r')).unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("No content file to reload")
        );
        assert_eq!(app.cms.forms.len(), 1);
    }

    #[test]
    fn test_reload_replaces_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"forms": [{"name": "A"}, {"name": "B"}]}"#)
            .unwrap();

        let mut app = App::new(TuiConfig::default(), Some(file.path().to_path_buf())).unwrap();
        assert_eq!(app.cms.forms.len(), 2);

        std::fs::write(file.path(), r#"{"forms": [{"name": "B"}]}"#).unwrap();
        app.handle_key(ctrl('r')).unwrap();
        assert_eq!(app.cms.forms.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Reloaded 1 form(s)"));

        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Editing form B")));
    }

    #[test]
    fn test_new_fails_for_missing_content_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = App::new(TuiConfig::default(), Some(dir.path().join("missing.json")));
        assert!(result.is_err());
    }
}

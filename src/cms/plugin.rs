//! Pluggable sidebar views

use super::Cms;
use crate::ui::SidebarRegions;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;

/// Kind tag carried by every plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    View,
}

/// Outcome of routing an input event to a mounted view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The view did not use the event
    Ignored,
    /// The view consumed the event
    Handled,
    /// The named form was submitted
    Saved(String),
}

/// A live instance of a view, owned by the host while mounted
///
/// Dropping the instance unmounts it and releases anything it acquired.
pub trait MountedView {
    fn draw(&mut self, frame: &mut Frame, regions: SidebarRegions);

    fn handle_key(&mut self, _key: KeyEvent) -> Result<ViewEvent> {
        Ok(ViewEvent::Ignored)
    }

    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Result<ViewEvent> {
        Ok(ViewEvent::Ignored)
    }

    /// Keyboard hints for the status bar
    fn hints(&self) -> String {
        String::new()
    }
}

/// A view extension registered into the host panel
pub trait ViewPlugin {
    fn name(&self) -> &str;

    fn plugin_type(&self) -> PluginType {
        PluginType::View
    }

    fn mount(&self, cms: &Cms) -> Box<dyn MountedView>;
}

/// Registered view plugins, in registration order
#[derive(Default)]
pub struct ViewRegistry {
    plugins: Vec<Box<dyn ViewPlugin>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view; a later plugin with the same name replaces the earlier one
    ///
    /// Plugins of any other kind are skipped.
    pub fn add(&mut self, plugin: Box<dyn ViewPlugin>) {
        let kind = plugin.plugin_type();
        if kind != PluginType::View {
            tracing::warn!(plugin = plugin.name(), ?kind, "Skipping non-view plugin");
            return;
        }
        tracing::debug!(plugin = plugin.name(), "View registered");
        match self.position(plugin.name()) {
            Some(index) => self.plugins[index] = plugin,
            None => self.plugins.push(plugin),
        }
    }

    pub fn get(&self, index: usize) -> Option<&dyn ViewPlugin> {
        self.plugins.get(index).map(|p| p.as_ref())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

//! Static demo view

use crate::cms::{Cms, MountedView, ViewPlugin};
use crate::ui::SidebarRegions;
use ratatui::{
    layout::Margin,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub struct DummyPlugin;

impl ViewPlugin for DummyPlugin {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn mount(&self, _cms: &Cms) -> Box<dyn MountedView> {
        Box::new(DummyView)
    }
}

pub struct DummyView;

impl MountedView for DummyView {
    fn draw(&mut self, frame: &mut Frame, regions: SidebarRegions) {
        let body = regions.body.inner(Margin::new(1, 1));
        let greeting = Paragraph::new("Hello World").style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(greeting, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::render_lines;

    #[test]
    fn test_renders_greeting_in_body() {
        let mut view = DummyView;
        let lines = render_lines(30, 12, |frame, regions| view.draw(frame, regions));
        let row = lines
            .iter()
            .position(|line| line.contains("Hello World"))
            .unwrap();
        // Below the header band plus padding
        assert_eq!(row, 4);
    }

    #[test]
    fn test_plugin_name() {
        assert_eq!(DummyPlugin.name(), "Dummy");
    }
}

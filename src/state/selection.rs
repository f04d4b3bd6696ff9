//! Form selection rules for the content panel

use crate::cms::Form;
use std::rc::Rc;

/// Selection at mount time: the first registered form, if any
pub fn initial_selection(forms: &[Rc<Form>]) -> Option<String> {
    forms.first().map(|f| f.name().to_string())
}

/// Selection after the registry reports a change
///
/// A sole remaining form is always selected, even over a manual pick.
/// Otherwise a selection whose form disappeared is cleared, and any other
/// selection is kept.
pub fn reconcile(current: Option<&str>, forms: &[Rc<Form>]) -> Option<String> {
    if let [only] = forms {
        return Some(only.name().to_string());
    }

    match current {
        Some(name) if forms.iter().any(|f| f.name() == name) => Some(name.to_string()),
        _ => None,
    }
}

/// Which part of the content panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    List,
    Fields,
    Save,
}

impl PanelFocus {
    /// Next focus target, skipping targets that are not shown
    pub fn next(self, has_fields: bool, has_save: bool) -> Self {
        let order = [PanelFocus::List, PanelFocus::Fields, PanelFocus::Save];
        let available = |focus: &PanelFocus| match focus {
            PanelFocus::List => true,
            PanelFocus::Fields => has_fields,
            PanelFocus::Save => has_save,
        };
        let start = order.iter().position(|f| *f == self).unwrap_or(0);
        (1..=order.len())
            .map(|step| order[(start + step) % order.len()])
            .find(|f| available(f))
            .unwrap_or(PanelFocus::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MockFormSubmitter;
    use pretty_assertions::assert_eq;

    fn forms(names: &[&str]) -> Vec<Rc<Form>> {
        names
            .iter()
            .map(|name| Rc::new(Form::new(*name, vec![], Rc::new(MockFormSubmitter::new()))))
            .collect()
    }

    #[test]
    fn test_initial_selection_picks_first() {
        assert_eq!(initial_selection(&forms(&["A", "B"])), Some("A".to_string()));
        assert_eq!(initial_selection(&forms(&[])), None);
    }

    #[test]
    fn test_unchanged_forms_keep_selection() {
        assert_eq!(
            reconcile(Some("A"), &forms(&["A", "B"])),
            Some("A".to_string())
        );
    }

    #[test]
    fn test_sole_form_is_force_selected() {
        assert_eq!(reconcile(Some("B"), &forms(&["C"])), Some("C".to_string()));
        assert_eq!(reconcile(None, &forms(&["C"])), Some("C".to_string()));
    }

    #[test]
    fn test_removed_selection_leaving_one_form() {
        assert_eq!(reconcile(Some("A"), &forms(&["B"])), Some("B".to_string()));
    }

    #[test]
    fn test_removed_selection_is_cleared() {
        assert_eq!(reconcile(Some("A"), &forms(&["B", "C"])), None);
        assert_eq!(reconcile(Some("A"), &forms(&[])), None);
    }

    #[test]
    fn test_absent_selection_stays_absent() {
        assert_eq!(reconcile(None, &forms(&["A", "B"])), None);
    }

    #[test]
    fn test_focus_cycles_through_available_targets() {
        assert_eq!(PanelFocus::List.next(true, true), PanelFocus::Fields);
        assert_eq!(PanelFocus::Fields.next(true, true), PanelFocus::Save);
        assert_eq!(PanelFocus::Save.next(true, true), PanelFocus::List);
    }

    #[test]
    fn test_focus_skips_hidden_targets() {
        assert_eq!(PanelFocus::List.next(false, true), PanelFocus::Save);
        assert_eq!(PanelFocus::List.next(false, false), PanelFocus::List);
        assert_eq!(PanelFocus::Fields.next(false, false), PanelFocus::List);
    }
}

//! Multi-select edit mode of the issue list.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Normal,
    Editing { selected: usize },
}

impl EditMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Normal enters Editing with nothing selected; Editing goes back to Normal.
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Normal => Self::Editing { selected: 0 },
            Self::Editing { .. } => Self::Normal,
        };
    }

    pub fn selected(&self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Editing { selected } => *selected,
        }
    }

    /// Ignored outside Editing.
    pub fn set_selected(&mut self, count: usize) {
        if let Self::Editing { selected } = self {
            *selected = count;
        }
    }

    /// Called once every selected issue has been closed.
    pub fn finish_close(&mut self) {
        *self = Self::Normal;
    }

    pub fn close_enabled(&self) -> bool {
        self.selected() > 0
    }

    pub fn header_text(&self) -> String {
        match self {
            Self::Normal => "Issue".to_string(),
            Self::Editing { selected } => format!("{} Selected", selected),
        }
    }

    /// Label of the bulk selection action, empty in Normal mode.
    pub fn select_action_label(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Editing { selected: 0 } => "Select All",
            Self::Editing { .. } => "Deselect All",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut mode = EditMode::default();
        assert_eq!(mode.header_text(), "Issue");

        mode.toggle();
        assert_eq!(mode, EditMode::Editing { selected: 0 });
        assert_eq!(mode.header_text(), "0 Selected");
        assert!(!mode.close_enabled());
        assert_eq!(mode.select_action_label(), "Select All");

        mode.toggle();
        assert_eq!(mode, EditMode::Normal);
    }

    #[test]
    fn test_selection_count_drives_labels() {
        let mut mode = EditMode::Editing { selected: 0 };
        mode.set_selected(3);
        assert_eq!(mode.header_text(), "3 Selected");
        assert!(mode.close_enabled());
        assert_eq!(mode.select_action_label(), "Deselect All");

        mode.finish_close();
        assert!(!mode.is_editing());
    }

    #[test]
    fn test_set_selected_ignored_in_normal() {
        let mut mode = EditMode::Normal;
        mode.set_selected(4);
        assert_eq!(mode.selected(), 0);
        assert_eq!(mode.select_action_label(), "");
    }
}

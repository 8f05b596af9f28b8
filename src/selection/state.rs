/// The currently selected feature name.
///
/// An empty name means nothing is selected. The selection is kept even when
/// the name has no known center, so the highlight still follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection; an empty name clears it
    pub fn select(&mut self, name: &str) {
        self.selected.clear();
        self.selected.push_str(name);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(&self.selected)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        !self.selected.is_empty() && self.selected == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let mut state = SelectionState::new();
        assert_eq!(state.selected(), None);

        state.select("Chile");
        assert_eq!(state.selected(), Some("Chile"));
        assert!(state.is_highlighted("Chile"));
        assert!(!state.is_highlighted("chile"));

        state.select("");
        assert!(state.is_empty());
        assert!(!state.is_highlighted(""));
    }

    #[test]
    fn test_empty_name_never_highlighted() {
        let mut state = SelectionState::new();
        assert!(!state.is_highlighted(""));
        state.select("Peru");
        state.clear();
        assert!(!state.is_highlighted("Peru"));
    }
}

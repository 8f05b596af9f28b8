use crate::selection::controller::SelectionController;
use egui::{ComboBox, Ui};

/// Placeholder entry of the feature picker; choosing it clears the selection
pub const PLACEHOLDER: &str = "Select a country…";

/// A control the user activated this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Picked from the list; empty when the placeholder was picked
    Select(String),
    Shortcut,
    Reset,
}

/// Toolbar with the feature picker, the shortcut button and the reset button.
///
/// The controls only report what was clicked; the caller decides how to run
/// the resulting request.
pub struct ViewerControls<'a> {
    controller: &'a SelectionController,
    shortcut_label: String,
}

impl<'a> ViewerControls<'a> {
    pub fn new(controller: &'a SelectionController) -> Self {
        Self {
            controller,
            shortcut_label: shortcut_label(&controller.options().shortcut),
        }
    }

    pub fn shortcut_label(mut self, label: impl Into<String>) -> Self {
        self.shortcut_label = label.into();
        self
    }

    pub fn show(self, ui: &mut Ui) -> Option<ControlAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            let selected = self.controller.selected();
            let current = selected.as_deref().unwrap_or(PLACEHOLDER);

            ComboBox::from_id_source("worldview_feature_picker")
                .selected_text(current)
                .width(220.0)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selected.is_none(), PLACEHOLDER).clicked() {
                        action = Some(ControlAction::Select(String::new()));
                    }
                    for name in self.controller.names() {
                        let is_current = selected.as_deref() == Some(name.as_str());
                        if ui.selectable_label(is_current, name.as_str()).clicked() {
                            action = Some(ControlAction::Select(name.clone()));
                        }
                    }
                });

            if ui.button(self.shortcut_label.as_str()).clicked() {
                action = Some(ControlAction::Shortcut);
            }

            let reset = ui.add_enabled(self.controller.is_mounted(), egui::Button::new("Reset Zoom"));
            if reset.clicked() {
                action = Some(ControlAction::Reset);
            }
        });

        action
    }
}

/// Button label for a shortcut feature
pub fn shortcut_label(name: &str) -> String {
    match name {
        "United Kingdom" => "🇬🇧 UK".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_label() {
        assert_eq!(shortcut_label("United Kingdom"), "🇬🇧 UK");
        assert_eq!(shortcut_label("Chile"), "Chile");
    }
}

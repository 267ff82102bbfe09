use serde::{Deserialize, Serialize};

/// Knobs for the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractiveOptions {
    /// The element that gets the selection outline.
    pub selected_id: Option<String>,
    /// Draw a marker where the print output will start a new page.
    pub show_page_breaks: bool,
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            selected_id: None,
            show_page_breaks: true,
        }
    }
}

impl InteractiveOptions {
    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected_id = Some(id.into());
        self
    }

    pub fn with_page_breaks(mut self, show: bool) -> Self {
        self.show_page_breaks = show;
        self
    }
}

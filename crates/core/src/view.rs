//! View model owned by the search controller.
//!
//! Front ends render this state; they never mutate it directly.

use crate::collaborators::Tile;
use crate::types::{MediaType, SearchResult, NO_RESULTS};

/// The two search inputs the controller keeps in sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Search bar in the gallery header.
    Header,
    /// Search box at the top of the results panel.
    Panel,
}

/// A text input and its clear button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub value: String,
    pub clear_visible: bool,
}

impl InputState {
    /// Set the text; the clear button is visible iff the text is non-empty.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.clear_visible = !value.is_empty();
    }

    pub fn clear(&mut self) {
        self.set("");
    }
}

/// Suggestions dropdown under the header input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dropdown {
    pub visible: bool,
    pub suggestions: Vec<String>,
    pub highlighted: Option<usize>,
}

impl Dropdown {
    /// Replace the list; the dropdown shows only when there is something in it.
    pub fn show(&mut self, suggestions: Vec<String>) {
        self.visible = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.suggestions.clear();
        self.highlighted = None;
    }

    pub fn highlight_next(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    pub fn highlighted_text(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }
}

/// Contents of the results panel body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultsBody {
    #[default]
    Blank,
    /// "No results found" message echoing the query.
    Empty { message: String },
    /// Tiles produced by the gallery renderer.
    Tiles(Vec<Tile>),
    /// The infinite-scroll helper owns the panel contents.
    Delegated,
}

impl ResultsBody {
    pub fn empty_for(query: &str) -> Self {
        ResultsBody::Empty {
            message: format!("{NO_RESULTS} for \"{query}\""),
        }
    }

    /// Plain-text rendering of the body, for terminals and assertions.
    pub fn text(&self) -> String {
        match self {
            ResultsBody::Blank | ResultsBody::Delegated => String::new(),
            ResultsBody::Empty { message } => message.clone(),
            ResultsBody::Tiles(tiles) => tiles
                .iter()
                .map(|t| t.label.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchView {
    pub header: InputState,
    pub panel: InputState,
    pub focused: Option<InputField>,
    pub panel_open: bool,
    pub dropdown: Dropdown,
    pub body: ResultsBody,
    pub count_text: String,
    pub type_filter: Option<MediaType>,
}

impl SearchView {
    pub fn input(&self, field: InputField) -> &InputState {
        match field {
            InputField::Header => &self.header,
            InputField::Panel => &self.panel,
        }
    }

    pub fn input_mut(&mut self, field: InputField) -> &mut InputState {
        match field {
            InputField::Header => &mut self.header,
            InputField::Panel => &mut self.panel,
        }
    }

    /// Write the same text into both inputs.
    pub fn sync_inputs(&mut self, value: &str) {
        self.header.set(value);
        self.panel.set(value);
    }
}

/// Results counter text, e.g. `Showing 1 of 42 results`.
pub fn count_text(result: &SearchResult) -> String {
    if result.items.is_empty() && result.total_items == 0 {
        return "No results".to_string();
    }
    let total = result.total_items.max(result.items.len() as u64);
    let noun = if total == 1 { "result" } else { "results" };
    format!("Showing {} of {total} {noun}", result.items.len())
}

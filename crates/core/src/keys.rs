//! Global keyboard shortcut routing.
//!
//! [`route`] is pure: it maps a key event plus a snapshot of what is open to a
//! [`KeyAction`]. The controller performs the action.

use crate::view::InputField;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    Other,
}

/// Where the key event originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTarget {
    /// Page body or any non-editable element.
    Body,
    /// One of the controller's own search inputs.
    SearchInput(InputField),
    /// Some other `input` or `textarea`.
    Editable,
}

impl KeyTarget {
    pub fn is_editable(self) -> bool {
        !matches!(self, KeyTarget::Body)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub target: KeyTarget,
}

impl KeyEvent {
    pub fn new(key: Key, target: KeyTarget) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            target,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    fn is_focus_shortcut(&self) -> bool {
        match self.key {
            Key::Char(c) if c.eq_ignore_ascii_case(&'k') => self.ctrl || self.meta,
            Key::Char('/') => !self.ctrl && !self.meta,
            _ => false,
        }
    }
}

/// What the controller has open when the key arrives.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub panel_open: bool,
    pub dropdown_open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    FocusSearch,
    HideSuggestions,
    CloseResults,
    Submit(InputField),
    HighlightNext,
    HighlightPrevious,
    Ignore,
}

pub fn route(event: &KeyEvent, cx: KeyContext) -> KeyAction {
    if event.is_focus_shortcut() {
        // Typing "/" or ctrl+k into a field must not steal focus
        return if event.target.is_editable() {
            KeyAction::Ignore
        } else {
            KeyAction::FocusSearch
        };
    }

    match (&event.key, event.target) {
        (Key::Escape, KeyTarget::SearchInput(InputField::Header)) if cx.dropdown_open => {
            KeyAction::HideSuggestions
        }
        (Key::Escape, _) if cx.panel_open => KeyAction::CloseResults,
        (Key::Enter, KeyTarget::SearchInput(field)) => KeyAction::Submit(field),
        (Key::ArrowDown, KeyTarget::SearchInput(InputField::Header)) if cx.dropdown_open => {
            KeyAction::HighlightNext
        }
        (Key::ArrowUp, KeyTarget::SearchInput(InputField::Header)) if cx.dropdown_open => {
            KeyAction::HighlightPrevious
        }
        _ => KeyAction::Ignore,
    }
}

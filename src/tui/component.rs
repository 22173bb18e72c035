//! Component trait pattern for popup components.
//!
//! Popups are self-contained UI elements that manage their own selection
//! state, handle keyboard input, and emit events for the parent state to
//! act on.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A component that can be rendered and handle input.
pub trait Component {
    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to
    /// the parent, `None` if input was handled internally.
    fn handle_input(&mut self, key: KeyEvent) -> Option<ComponentEvent>;

    /// Render the component within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Events emitted by popup components, processed by `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentEvent {
    /// User selected a layout by document key
    LayoutSelected(String),

    /// User selected a primary language
    LanguageSelected(String),

    /// User cancelled without making changes
    Cancelled,
}

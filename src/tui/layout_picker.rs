//! Layout selection popup.
//!
//! Lists every loaded layout by its resolved display name; selecting an
//! entry asks the session to switch layouts. This is the layout-selection
//! control of the compiled tree: its entries come straight from
//! `CompiledKeyboard::choices`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::models::LayoutChoice;
use crate::tui::component::{Component, ComponentEvent};
use crate::tui::{centered_rect, Theme};

/// Popup state for layout selection.
#[derive(Debug, Clone, Default)]
pub struct LayoutPicker {
    choices: Vec<LayoutChoice>,
    selected: usize,
}

impl LayoutPicker {
    /// Creates a picker over the compiled tree's layout choices, with the
    /// active layout preselected.
    #[must_use]
    pub fn new(choices: Vec<LayoutChoice>, active_key: &str) -> Self {
        let selected = choices
            .iter()
            .position(|choice| choice.key == active_key)
            .unwrap_or(0);
        Self { choices, selected }
    }

    fn select_previous(&mut self) {
        if !self.choices.is_empty() {
            self.selected = if self.selected == 0 {
                self.choices.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn select_next(&mut self) {
        if !self.choices.is_empty() {
            self.selected = (self.selected + 1) % self.choices.len();
        }
    }
}

impl Component for LayoutPicker {
    fn handle_input(&mut self, key: KeyEvent) -> Option<ComponentEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter => self
                .choices
                .get(self.selected)
                .map(|choice| ComponentEvent::LayoutSelected(choice.key.clone())),
            KeyCode::Esc => Some(ComponentEvent::Cancelled),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(40, 50, area);
        f.render_widget(Clear, popup);

        let items: Vec<ListItem> = self
            .choices
            .iter()
            .map(|choice| ListItem::new(Line::from(choice.title.clone())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Layouts ({}) ", self.choices.len()))
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.surface).fg(theme.text)),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.choices.len().saturating_sub(1))));
        f.render_stateful_widget(list, popup, &mut state);
    }
}

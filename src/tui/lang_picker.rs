//! Language selection popup.
//!
//! Lists the configured language set; selecting an entry makes it the
//! primary language (the fallback stays unchanged, mirroring the page-level
//! language selector of the original data source).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::tui::component::{Component, ComponentEvent};
use crate::tui::{centered_rect, Theme};

/// Popup state for language selection.
#[derive(Debug, Clone, Default)]
pub struct LangPicker {
    languages: Vec<String>,
    selected: usize,
}

impl LangPicker {
    /// Creates a picker over the configured language set with the current
    /// primary preselected.
    #[must_use]
    pub fn new(languages: Vec<String>, primary: &str) -> Self {
        let selected = languages
            .iter()
            .position(|lang| lang == primary)
            .unwrap_or(0);
        Self {
            languages,
            selected,
        }
    }

    fn select_previous(&mut self) {
        if !self.languages.is_empty() {
            self.selected = if self.selected == 0 {
                self.languages.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn select_next(&mut self) {
        if !self.languages.is_empty() {
            self.selected = (self.selected + 1) % self.languages.len();
        }
    }
}

impl Component for LangPicker {
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
                .languages
                .get(self.selected)
                .map(|lang| ComponentEvent::LanguageSelected(lang.clone())),
            KeyCode::Esc => Some(ComponentEvent::Cancelled),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(30, 40, area);
        f.render_widget(Clear, popup);

        let items: Vec<ListItem> = self
            .languages
            .iter()
            .map(|lang| ListItem::new(Line::from(lang.clone())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Language ")
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
        state.select(Some(
            self.selected.min(self.languages.len().saturating_sub(1)),
        ));
        f.render_stateful_widget(list, popup, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn langs() -> Vec<String> {
        vec!["de_DE".to_string(), "en_US".to_string()]
    }

    #[test]
    fn test_primary_is_preselected() {
        let picker = LangPicker::new(langs(), "en_US");
        assert_eq!(picker.selected, 1);
    }

    #[test]
    fn test_enter_emits_language() {
        let mut picker = LangPicker::new(langs(), "de_DE");
        picker.handle_input(press(KeyCode::Down));
        assert_eq!(
            picker.handle_input(press(KeyCode::Enter)),
            Some(ComponentEvent::LanguageSelected("en_US".to_string()))
        );
    }
}

//! Status bar widget: key hints plus transient status messages.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Status bar at the bottom of the screen.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let hints = "Ctrl+L layouts | Ctrl+G language | PgUp/PgDn scroll docs | Ctrl+C quit";

        let message_line = if let Some(message) = &state.status_message {
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(theme.accent),
            ))
        } else if !state.keyboard_enhanced {
            Line::from(Span::styled(
                "Terminal does not report key releases; highlights decay on a timer.",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::default()
        };

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(hints, Style::default().fg(theme.text_muted))),
            message_line,
        ])
        .block(
            Block::default()
                .borders(Borders::TOP)
                .style(Style::default().fg(theme.primary).bg(theme.background)),
        );
        f.render_widget(paragraph, area);
    }
}

//! Documentation panel with animated scroll-to-block.
//!
//! Renders the compiled tree's documentation blocks as a scrollable list.
//! When the router reports a release on a documented key, the panel is
//! asked to bring that key's block into view; instead of jumping, the
//! scroll offset moves a few lines per tick until it reaches the block.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::DOCS_SCROLL_STEP;
use crate::models::CompiledKeyboard;

use super::Theme;

/// Scroll state of the documentation panel.
#[derive(Debug, Clone, Default)]
pub struct DocsPanelState {
    /// First line of each block within the rendered text.
    block_offsets: Vec<u16>,
    /// Total rendered lines.
    total_lines: u16,
    /// Current scroll offset.
    scroll: u16,
    /// Offset the panel is animating toward.
    target: Option<u16>,
}

impl DocsPanelState {
    /// Recomputes block offsets for a freshly compiled tree and resets the
    /// scroll position.
    pub fn rebuild(&mut self, compiled: &CompiledKeyboard) {
        self.block_offsets.clear();
        let mut offset = 0u16;
        for block in &compiled.docs {
            self.block_offsets.push(offset);
            // heading + (scope, description, tags) per section + blank line
            offset += 1 + block.sections.len() as u16 * 3 + 1;
        }
        self.total_lines = offset;
        self.scroll = 0;
        self.target = None;
    }

    /// Requests a smooth scroll to a documentation block.
    pub fn scroll_to_block(&mut self, index: usize) {
        if let Some(&offset) = self.block_offsets.get(index) {
            self.target = Some(offset);
        }
    }

    /// Manual scroll; cancels any running animation.
    pub fn scroll_by(&mut self, delta: i32) {
        self.target = None;
        let max = self.total_lines.saturating_sub(1);
        let next = i64::from(self.scroll) + i64::from(delta);
        self.scroll = next.clamp(0, i64::from(max)) as u16;
    }

    /// Advances the animation by one tick.
    pub fn tick(&mut self) {
        let Some(target) = self.target else { return };
        if self.scroll == target {
            self.target = None;
        } else if self.scroll < target {
            self.scroll = (self.scroll + DOCS_SCROLL_STEP).min(target);
        } else {
            self.scroll = self.scroll.saturating_sub(DOCS_SCROLL_STEP).max(target);
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Whether an animation is in progress.
    #[must_use]
    pub fn animating(&self) -> bool {
        self.target.is_some()
    }
}

/// Documentation panel widget.
pub struct DocsPanel;

impl DocsPanel {
    /// Render the panel with the state's current scroll offset.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        compiled: &CompiledKeyboard,
        state: &DocsPanelState,
        theme: &Theme,
    ) {
        let mut lines: Vec<Line> = Vec::with_capacity(state.total_lines as usize);
        for block in &compiled.docs {
            lines.push(Line::from(Span::styled(
                block.heading.clone(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for section in &block.sections {
                lines.push(Line::from(Span::styled(
                    format!("  {}", section.scope),
                    Style::default().fg(theme.accent),
                )));
                lines.push(Line::from(Span::styled(
                    format!("    {}", section.description),
                    Style::default().fg(theme.text),
                )));
                lines.push(Line::from(Span::styled(
                    format!("    [{}]", section.tags.join("] [")),
                    Style::default().fg(theme.text_muted),
                )));
            }
            lines.push(Line::default());
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No key assignments documented for this layout.",
                Style::default().fg(theme.text_muted),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Assignments ")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            )
            .scroll((state.scroll, 0));
        f.render_widget(paragraph, area);
    }
}

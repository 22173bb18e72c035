//! Keyboard widget for rendering the compiled visual tree.
//!
//! Each compiled region renders row by row; key geometry in pixels is
//! scaled to terminal cells. Keys currently held down render in the accent
//! color, keys with documentation in the documented color.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::{BASE_CELL_H, BASE_CELL_W, CHARS_PER_CELL, LINES_PER_CELL};
use crate::models::{CompiledKeyboard, KeyElement};
use crate::services::KeyEventRouter;

use super::Theme;

/// Keyboard widget renders the compiled layout.
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Render the keyboard widget.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        compiled: &CompiledKeyboard,
        router: &KeyEventRouter,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(format!(" {} ", compiled.title))
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.primary).bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let row_step = LINES_PER_CELL as u16;
        let gap = Self::margin_lines(compiled.part_margin_px);
        let mut y = inner.y;

        let populated: Vec<_> = compiled
            .regions
            .iter()
            .filter(|region| region.rows.iter().any(|row| !row.is_empty()))
            .collect();

        for (idx, region) in populated.iter().enumerate() {
            for row in &region.rows {
                if y >= inner.bottom() {
                    return;
                }
                let line = Self::row_line(row, router, theme);
                f.render_widget(
                    Paragraph::new(line),
                    Rect::new(inner.x, y, inner.width, 1),
                );
                y += row_step;
            }
            if idx + 1 < populated.len() {
                y += gap;
            }
        }
    }

    /// Terminal lines this compiled tree needs, including borders.
    #[must_use]
    pub fn desired_height(compiled: &CompiledKeyboard) -> u16 {
        let populated: Vec<usize> = compiled
            .regions
            .iter()
            .map(|region| region.rows.iter().filter(|row| !row.is_empty()).count())
            .filter(|count| *count > 0)
            .collect();
        let rows: usize = populated.iter().sum();
        let gaps = populated.len().saturating_sub(1) as u16;

        rows as u16 * LINES_PER_CELL as u16 + gaps * Self::margin_lines(compiled.part_margin_px)
            + 2
    }

    /// One rendered row: leading offsets as spaces, keys as padded spans.
    fn row_line<'a>(row: &[KeyElement], router: &KeyEventRouter, theme: &Theme) -> Line<'a> {
        let mut spans = Vec::with_capacity(row.len() * 3);
        for element in row {
            let offset = Self::px_to_chars(element.offset_px);
            if offset > 0 {
                spans.push(Span::raw(" ".repeat(offset)));
            }

            let width = Self::px_to_chars(element.width_px).max(3);
            let label: String = element.label.chars().take(width).collect();
            let text = format!("{label:^width$}");

            let style = if router.is_active(element.code) {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if element.documented {
                Style::default().fg(theme.documented).bg(theme.surface)
            } else {
                Style::default().fg(theme.text).bg(theme.surface)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn px_to_chars(px: f32) -> usize {
        (px / BASE_CELL_W * CHARS_PER_CELL).round() as usize
    }

    fn margin_lines(part_margin_px: f32) -> u16 {
        (part_margin_px / BASE_CELL_H * LINES_PER_CELL).round().max(1.0) as u16
    }
}

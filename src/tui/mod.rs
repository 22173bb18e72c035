//! Terminal user interface: state management, event loop, and widgets.
//!
//! The TUI owns a [`KeyboardSession`] and translates terminal events into
//! its operations: physical key press/release signals go to the router,
//! picker selections become layout/language switches. A failed switch never
//! tears anything down; the error renders as an overlay while the previous
//! layout stays live.

pub mod component;
pub mod docs_panel;
pub mod keyboard;
pub mod lang_picker;
pub mod layout_picker;
pub mod status_bar;
pub mod theme;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    event::{
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::services::physical_key_code;
use crate::session::KeyboardSession;

pub use component::{Component, ComponentEvent};
pub use docs_panel::{DocsPanel, DocsPanelState};
pub use keyboard::KeyboardWidget;
pub use lang_picker::LangPicker;
pub use layout_picker::LayoutPicker;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// How long a highlight survives without further events on terminals that
/// never send key releases.
const ACTIVE_DECAY: Duration = Duration::from_millis(150);

/// The popup currently on screen, if any.
#[derive(Debug)]
pub enum ActivePopup {
    /// Layout selection list
    Layout(LayoutPicker),
    /// Language selection list
    Lang(LangPicker),
}

/// Top-level TUI state.
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// The session owning all switchable keyboard state
    pub session: KeyboardSession,
    /// Active color theme
    pub theme: Theme,
    /// Documentation panel scroll state
    pub docs: DocsPanelState,
    /// Popup currently on screen
    pub popup: Option<ActivePopup>,
    /// Error shown in the overlay until dismissed
    pub error_message: Option<String>,
    /// Transient status line
    pub status_message: Option<String>,
    /// Set when the user asked to quit
    pub should_quit: bool,
    /// Whether the terminal reports key release events
    pub keyboard_enhanced: bool,
    /// Last physical key event, for the release-fallback timer
    last_key_time: Option<Instant>,
}

impl AppState {
    /// Creates the TUI state around a constructed session.
    #[must_use]
    pub fn new(session: KeyboardSession, config: Config, keyboard_enhanced: bool) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let mut docs = DocsPanelState::default();
        docs.rebuild(session.compiled());

        Self {
            config,
            session,
            theme,
            docs,
            popup: None,
            error_message: None,
            status_message: None,
            should_quit: false,
            keyboard_enhanced,
            last_key_time: None,
        }
    }

    /// Opens the layout selection popup over the compiled choices.
    pub fn open_layout_picker(&mut self) {
        let compiled = self.session.compiled();
        self.popup = Some(ActivePopup::Layout(LayoutPicker::new(
            compiled.choices.clone(),
            &compiled.layout_key,
        )));
    }

    /// Opens the language selection popup.
    pub fn open_lang_picker(&mut self) {
        self.popup = Some(ActivePopup::Lang(LangPicker::new(
            self.session.languages().to_vec(),
            self.session.primary(),
        )));
    }

    /// Closes the active popup.
    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    fn apply_event(&mut self, event: ComponentEvent) {
        self.close_popup();
        match event {
            ComponentEvent::LayoutSelected(key) => match self.session.set_layout(&key) {
                Ok(()) => {
                    self.docs.rebuild(self.session.compiled());
                    self.status_message =
                        Some(format!("Layout: {}", self.session.compiled().title));
                }
                Err(err) => self.error_message = Some(err.to_string()),
            },
            ComponentEvent::LanguageSelected(lang) => {
                match self.session.set_language(&lang, None) {
                    Ok(()) => {
                        self.docs.rebuild(self.session.compiled());
                        self.status_message = Some(format!(
                            "Language: {} (fallback {})",
                            self.session.primary(),
                            self.session.fallback()
                        ));
                    }
                    Err(err) => self.error_message = Some(err.to_string()),
                }
            }
            ComponentEvent::Cancelled => {}
        }
    }

    /// Routes a physical key event to the session's router.
    fn route_physical_key(&mut self, key: &KeyEvent) {
        let Some(code) = physical_key_code(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                self.session.router_mut().key_down(code);
                self.last_key_time = Some(Instant::now());
            }
            KeyEventKind::Repeat => {
                // Held key: keep the highlight alive, no re-trigger.
                self.last_key_time = Some(Instant::now());
            }
            KeyEventKind::Release => {
                if let Some(block) = self.session.router_mut().key_up(code) {
                    self.docs.scroll_to_block(block);
                }
            }
        }
    }

    /// Clears stale highlights on terminals without release events.
    fn decay_active_keys(&mut self) {
        if self.keyboard_enhanced {
            return;
        }
        if let Some(last) = self.last_key_time {
            if last.elapsed() > ACTIVE_DECAY {
                self.session.router_mut().clear_active();
                self.last_key_time = None;
            }
        }
    }
}

/// Initialize terminal for TUI.
///
/// Requests kitty keyboard protocol release/repeat reporting; the returned
/// flag is `false` on terminals that do not support it, in which case
/// active-key highlights decay on a timer instead.
pub fn setup_terminal() -> Result<(Terminal<CrosstermBackend<io::Stdout>>, bool)> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok((terminal, keyboard_enhanced))
}

/// Restore terminal to normal state.
pub fn restore_terminal(
    mut terminal: Terminal<CrosstermBackend<io::Stdout>>,
    keyboard_enhanced: bool,
) -> Result<()> {
    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop.
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.theme = Theme::from_mode(state.config.ui.theme_mode);
        state.docs.tick();
        state.decay_active_keys();

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => handle_key_event(state, key),
                Event::Resize(_, _) => {
                    // Terminal resized, will re-render on next loop
                }
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatches one key event.
fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    // Quit chords always work, even with an overlay or popup up.
    if key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        state.should_quit = true;
        return;
    }

    // An error overlay is modal: Enter or Esc dismisses it.
    if state.error_message.is_some() {
        if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.error_message = None;
        }
        return;
    }

    // A popup consumes input until it emits an event.
    if let Some(popup) = &mut state.popup {
        let event = match popup {
            ActivePopup::Layout(picker) => picker.handle_input(key),
            ActivePopup::Lang(picker) => picker.handle_input(key),
        };
        if let Some(event) = event {
            debug!(?event, "popup event");
            state.apply_event(event);
        }
        return;
    }

    if key.kind == KeyEventKind::Press && key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('l') => {
                state.open_layout_picker();
                return;
            }
            KeyCode::Char('g') => {
                state.open_lang_picker();
                return;
            }
            _ => {}
        }
    }

    // Manual documentation scrolling; the key still routes below, exactly
    // like any other physical key.
    if key.kind == KeyEventKind::Press {
        match key.code {
            KeyCode::PageUp => state.docs.scroll_by(-5),
            KeyCode::PageDown => state.docs.scroll_by(5),
            _ => {}
        }
        state.status_message = None;
    }

    state.route_physical_key(&key);
}

/// Render the UI from current state.
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let keyboard_height = KeyboardWidget::desired_height(state.session.compiled());
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // Title bar
            Constraint::Length(keyboard_height),     // Keyboard diagram
            Constraint::Min(4),                      // Documentation panel
            Constraint::Length(3),                   // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    KeyboardWidget::render(
        f,
        chunks[1],
        state.session.compiled(),
        state.session.router(),
        &state.theme,
    );
    DocsPanel::render(
        f,
        chunks[2],
        state.session.compiled(),
        &state.docs,
        &state.theme,
    );
    StatusBar::render(f, chunks[3], state, &state.theme);

    if let Some(popup) = &state.popup {
        match popup {
            ActivePopup::Layout(picker) => picker.render(f, f.area(), &state.theme),
            ActivePopup::Lang(picker) => picker.render(f, f.area(), &state.theme),
        }
    }

    if let Some(error) = &state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Title bar with app name and the active language pair.
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default().fg(state.theme.background).bg(state.theme.primary),
        ),
        Span::styled(
            format!(
                " {} (fallback {})",
                state.session.primary(),
                state.session.fallback()
            ),
            Style::default().fg(state.theme.text_muted),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

/// Render error overlay on top of everything.
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(error.to_string(), Style::default().fg(theme.text))),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(theme.text_muted),
        )),
    ])
    .block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.error).bg(theme.surface)),
    );
    f.render_widget(paragraph, area);
}

/// Helper to create a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

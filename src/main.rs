//! keyatlas - Interactive terminal explorer for keyboard layouts
//!
//! Renders a visual diagram of a keyboard from declarative layout data,
//! overlays per-key documentation, and highlights keys as they are pressed.

// Module declarations
mod config;
mod constants;
mod error;
mod i18n;
mod logging;
mod models;
mod parser;
mod services;
mod session;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use config::Config;
use constants::{APP_BINARY_NAME, APP_NAME};
use models::Assignments;
use session::KeyboardSession;

/// keyatlas - Interactive terminal explorer for keyboard layouts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layout document files, first one becomes the active layout
    #[arg(value_name = "LAYOUT")]
    layouts: Vec<PathBuf>,

    /// Assignments document file
    #[arg(short, long, value_name = "FILE")]
    assignments: Option<PathBuf>,

    /// Supported languages, comma separated (e.g. "de_DE,en_US")
    #[arg(long, value_name = "LANGS", value_delimiter = ',')]
    langs: Vec<String>,

    /// Primary language (defaults to the first supported language)
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Fallback language (defaults to the second supported language)
    #[arg(long, value_name = "LANG")]
    fallback_lang: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines flush on exit.
    let _log_guard = logging::init();

    // Load or create default config; CLI flags override its values.
    let config = Config::load().unwrap_or_else(|_| Config::default());

    let layout_paths = if cli.layouts.is_empty() {
        config.paths.layouts.clone()
    } else {
        cli.layouts.clone()
    };
    if layout_paths.is_empty() {
        eprintln!("{APP_NAME}: no layout files given.");
        eprintln!();
        eprintln!("Usage examples:");
        eprintln!("  {APP_BINARY_NAME} sample/layout-us-ansi.json sample/layout-de-iso.json \\");
        eprintln!("      --assignments sample/assignments.json --langs en_US,de_DE");
        eprintln!();
        eprintln!("Layout paths can also be set in the config file.");
        std::process::exit(1);
    }

    // The language set comes from --langs or the config; the active pair
    // defaults to the set's first two entries when --langs is explicit,
    // and to the configured pair otherwise.
    let langs_from_cli = !cli.langs.is_empty();
    let languages = if langs_from_cli {
        cli.langs.clone()
    } else {
        config.languages.supported.clone()
    };
    let primary = cli.lang.clone().unwrap_or_else(|| {
        if langs_from_cli {
            languages[0].clone()
        } else {
            config.languages.primary.clone()
        }
    });
    let fallback = cli.fallback_lang.clone().unwrap_or_else(|| {
        languages
            .iter()
            .find(|lang| **lang != primary)
            .cloned()
            .unwrap_or_else(|| config.languages.fallback.clone())
    });

    // Load all documents up front; the core never compiles without valid
    // assets, so any retrieval failure aborts here with context.
    let mut layouts = Vec::with_capacity(layout_paths.len());
    for path in &layout_paths {
        let doc = parser::load_layout_file(path)?;
        layouts.push((parser::layout_key_for_path(path), doc));
    }

    let assignments_path = cli.assignments.clone().or(config.paths.assignments.clone());
    let assignments = match assignments_path {
        Some(path) => parser::load_assignments_file(&path)?,
        None => Assignments::default(),
    };

    let session = KeyboardSession::new(layouts, assignments, languages, &primary, &fallback)
        .with_context(|| "Failed to build keyboard session from the loaded documents")?;

    // Initialize TUI
    let (mut terminal, keyboard_enhanced) = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(session, config, keyboard_enhanced);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal before reporting any error
    tui::restore_terminal(terminal, keyboard_enhanced)?;

    result
}

//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "keyatlas";

/// The binary name of the application (used in command examples and error messages).
pub const APP_BINARY_NAME: &str = "keyatlas";

/// Base cell width in abstract pixels (the width of one 1u key).
///
/// Layout documents express key widths and spacer margins as multiples of
/// this cell. Compiled geometry is in pixels; the TUI scales to terminal
/// cells at render time.
pub const BASE_CELL_W: f32 = 40.0;

/// Base cell height in abstract pixels.
pub const BASE_CELL_H: f32 = 40.0;

/// Terminal characters per base cell when rendering the keyboard diagram.
pub const CHARS_PER_CELL: f32 = 7.0;

/// Terminal lines per base cell when rendering the keyboard diagram.
pub const LINES_PER_CELL: f32 = 2.0;

/// Lines the documentation panel moves per tick while animating toward a
/// requested block.
pub const DOCS_SCROLL_STEP: u16 = 3;

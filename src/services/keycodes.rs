//! Adaptation of terminal key events to physical key codes.
//!
//! Layout documents identify keys by the host key code convention of the
//! original data source (DOM `keyCode` values: 65 = A, 112 = F1, 13 =
//! Enter). This module maps crossterm key events onto those codes. The
//! mapping is total over the keys a layout can reasonably contain; events
//! for anything else yield `None` and are ignored by the router.

use crossterm::event::{KeyCode, KeyEvent, ModifierKeyCode};

/// Returns the physical key code for a terminal key event, if one exists.
#[must_use]
pub fn physical_key_code(event: &KeyEvent) -> Option<u16> {
    match event.code {
        KeyCode::Char(ch) => char_code(ch),
        KeyCode::F(n) if (1..=24).contains(&n) => Some(111 + u16::from(n)),
        KeyCode::Backspace => Some(8),
        KeyCode::Tab | KeyCode::BackTab => Some(9),
        KeyCode::Enter => Some(13),
        KeyCode::Pause => Some(19),
        KeyCode::CapsLock => Some(20),
        KeyCode::Esc => Some(27),
        KeyCode::PageUp => Some(33),
        KeyCode::PageDown => Some(34),
        KeyCode::End => Some(35),
        KeyCode::Home => Some(36),
        KeyCode::Left => Some(37),
        KeyCode::Up => Some(38),
        KeyCode::Right => Some(39),
        KeyCode::Down => Some(40),
        KeyCode::Insert => Some(45),
        KeyCode::Delete => Some(46),
        KeyCode::Menu => Some(93),
        KeyCode::NumLock => Some(144),
        KeyCode::ScrollLock => Some(145),
        KeyCode::Modifier(m) => modifier_code(m),
        _ => None,
    }
}

fn char_code(ch: char) -> Option<u16> {
    match ch {
        ' ' => Some(32),
        '0'..='9' => Some(ch as u16),
        'a'..='z' | 'A'..='Z' => Some(ch.to_ascii_uppercase() as u16),
        ';' => Some(186),
        '=' => Some(187),
        ',' => Some(188),
        '-' => Some(189),
        '.' => Some(190),
        '/' => Some(191),
        '`' => Some(192),
        '[' => Some(219),
        '\\' => Some(220),
        ']' => Some(221),
        '\'' => Some(222),
        _ => None,
    }
}

fn modifier_code(m: ModifierKeyCode) -> Option<u16> {
    match m {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(16),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(17),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(18),
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => Some(91),
        _ => None,
    }
}

//! Physical key-event routing.
//!
//! The router owns exactly one binding set at a time, copied from the
//! compiled tree's code→element table when a layout is installed and torn
//! down before any rebuild, so a stale binding can never reference a
//! discarded tree. Per key code the router is a two-state machine:
//! idle → key-down on press, key-down → idle on release. A signal for a key
//! code with no rendered element is a no-op; layouts do not have to contain
//! every physical key.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::models::{CompiledKeyboard, ElementRef};

/// Routes press/release signals to the active compiled tree.
#[derive(Debug, Default)]
pub struct KeyEventRouter {
    /// code → element position in the installed tree.
    bindings: HashMap<u16, ElementRef>,
    /// code → documentation block index, for scroll-on-release.
    doc_targets: HashMap<u16, usize>,
    /// Codes currently held down.
    active: HashSet<u16>,
}

impl KeyEventRouter {
    /// Creates a router with no installed bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the binding table for a freshly compiled tree.
    ///
    /// Any previous bindings and active state are discarded first.
    pub fn install(&mut self, tree: &CompiledKeyboard) {
        self.teardown();
        self.bindings = tree.bindings().clone();
        self.doc_targets = self
            .bindings
            .keys()
            .filter_map(|code| tree.doc_block(*code).map(|block| (*code, block)))
            .collect();
    }

    /// Discards all bindings and active state.
    pub fn teardown(&mut self) {
        self.bindings.clear();
        self.doc_targets.clear();
        self.active.clear();
    }

    /// Handles a physical key-press signal.
    ///
    /// Marks the bound element active; returns `true` if the code is bound.
    pub fn key_down(&mut self, code: u16) -> bool {
        if self.bindings.contains_key(&code) {
            self.active.insert(code);
            true
        } else {
            trace!(code, "press for unbound key code ignored");
            false
        }
    }

    /// Handles a physical key-release signal.
    ///
    /// Clears the active mark and returns the index of the key's
    /// documentation block if it has one, so the caller can scroll it into
    /// view. Release of an unbound code is an explicit no-op.
    pub fn key_up(&mut self, code: u16) -> Option<usize> {
        if !self.bindings.contains_key(&code) {
            return None;
        }
        self.active.remove(&code);
        self.doc_targets.get(&code).copied()
    }

    /// Whether the element bound to `code` is currently held down.
    #[must_use]
    pub fn is_active(&self, code: u16) -> bool {
        self.active.contains(&code)
    }

    /// Clears all active marks without touching the bindings.
    ///
    /// Used by the fallback timer on terminals that never deliver release
    /// events.
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Number of codes currently held down.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether a binding table is installed.
    #[must_use]
    pub fn has_bindings(&self) -> bool {
        !self.bindings.is_empty()
    }
}

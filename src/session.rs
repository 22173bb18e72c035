//! Session context: the one owner of all switchable keyboard state.
//!
//! A `KeyboardSession` holds the language set, the loaded layouts, the
//! assignments, the active compiled tree, and the router binding table.
//! There are no ambient globals; the TUI layer owns a session and calls its
//! switch operations.
//!
//! Switches are atomic: the replacement tree is fully built before the old
//! tree and its bindings are discarded, so any validation or compilation
//! error leaves the previous layout and language pair rendered and
//! functional.

use tracing::{info, warn};

use crate::error::SessionError;
use crate::models::{Assignments, CompiledKeyboard, LayoutDocument};
use crate::services::{compiler, validator, KeyEventRouter};

/// Owns the active layout, language pair, compiled tree, and router.
#[derive(Debug)]
pub struct KeyboardSession {
    languages: Vec<String>,
    primary: String,
    fallback: String,
    layouts: Vec<(String, LayoutDocument)>,
    assignments: Assignments,
    active: usize,
    compiled: CompiledKeyboard,
    router: KeyEventRouter,
}

impl KeyboardSession {
    /// Builds a session with the first layout active.
    ///
    /// Fails with `UnsupportedLanguage` if the language set is empty, either
    /// requested language is not a member, or the pair is not two distinct
    /// languages; fails with a `ConfigurationError` if the first layout does
    /// not validate or compile.
    pub fn new(
        layouts: Vec<(String, LayoutDocument)>,
        assignments: Assignments,
        languages: Vec<String>,
        primary: &str,
        fallback: &str,
    ) -> Result<Self, SessionError> {
        check_language_pair(&languages, primary, fallback)?;
        assert!(!layouts.is_empty(), "at least one layout must be loaded");

        let (key, doc) = &layouts[0];
        validator::validate(doc)?;
        let compiled = compiler::compile(key, doc, &assignments, &layouts, primary, fallback)?;

        let mut router = KeyEventRouter::new();
        router.install(&compiled);

        info!(layout = key.as_str(), primary, fallback, "session started");
        Ok(Self {
            languages,
            primary: primary.to_string(),
            fallback: fallback.to_string(),
            layouts,
            assignments,
            active: 0,
            compiled,
            router,
        })
    }

    /// Switches the active layout by document key.
    ///
    /// The target layout is validated and compiled before anything is
    /// swapped; on error the current tree stays active.
    pub fn set_layout(&mut self, key: &str) -> Result<(), SessionError> {
        let index = self
            .layouts
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| SessionError::UnknownLayout {
                key: key.to_string(),
            })?;

        let (key, doc) = &self.layouts[index];
        if let Err(err) = validator::validate(doc) {
            warn!(layout = key.as_str(), %err, "layout rejected by validation");
            return Err(err.into());
        }
        let compiled = compiler::compile(
            key,
            doc,
            &self.assignments,
            &self.layouts,
            &self.primary,
            &self.fallback,
        )?;

        self.install(compiled);
        self.active = index;
        info!(layout = self.compiled.layout_key.as_str(), "layout switched");
        Ok(())
    }

    /// Switches the language pair and recompiles the active layout.
    ///
    /// `fallback` of `None` keeps the current fallback language, except when
    /// the new primary IS the current fallback: then the pair swaps, so the
    /// previous primary becomes the fallback. Rejected with
    /// `UnsupportedLanguage` (previous state unchanged) if either language
    /// is not in the configured set or the explicit pair is degenerate.
    pub fn set_language(
        &mut self,
        primary: &str,
        fallback: Option<&str>,
    ) -> Result<(), SessionError> {
        let fallback = match fallback {
            Some(lang) => lang.to_string(),
            None if primary == self.fallback => self.primary.clone(),
            None => self.fallback.clone(),
        };
        check_language_pair(&self.languages, primary, &fallback)?;

        let (key, doc) = &self.layouts[self.active];
        let compiled =
            compiler::compile(key, doc, &self.assignments, &self.layouts, primary, &fallback)?;

        self.install(compiled);
        self.primary = primary.to_string();
        self.fallback = fallback;
        info!(primary = self.primary.as_str(), fallback = self.fallback.as_str(), "language switched");
        Ok(())
    }

    /// Swaps in a new compiled tree: the old bindings are torn down before
    /// the new ones are installed, and the old tree is dropped.
    fn install(&mut self, compiled: CompiledKeyboard) {
        self.router.teardown();
        self.compiled = compiled;
        self.router.install(&self.compiled);
    }

    /// The active compiled tree.
    #[must_use]
    pub fn compiled(&self) -> &CompiledKeyboard {
        &self.compiled
    }

    /// The event router bound to the active tree.
    #[must_use]
    pub fn router(&self) -> &KeyEventRouter {
        &self.router
    }

    /// Mutable access to the router for signal dispatch.
    pub fn router_mut(&mut self) -> &mut KeyEventRouter {
        &mut self.router
    }

    /// The configured language set, in order.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The active primary language.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The active fallback language.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Checks that both languages are distinct members of the configured set.
fn check_language_pair(
    languages: &[String],
    primary: &str,
    fallback: &str,
) -> Result<(), SessionError> {
    let member = |lang: &str| languages.iter().any(|l| l == lang);
    if languages.is_empty() || !member(primary) {
        return Err(SessionError::UnsupportedLanguage {
            lang: primary.to_string(),
        });
    }
    if !member(fallback) || primary == fallback {
        return Err(SessionError::UnsupportedLanguage {
            lang: fallback.to_string(),
        });
    }
    Ok(())
}

//! Language-fallback label resolution.
//!
//! All localized text goes through the same two-language chain: the primary
//! language, then the fallback language, then a caller-supplied default.
//! Resolution is pure and idempotent; malformed label values are reported,
//! never silently defaulted.

use thiserror::Error;

use crate::models::{LangMap, LangText};

/// A label value had a shape that is neither a string nor a language map.
///
/// Callers that know which key the label belongs to convert this into
/// [`crate::error::ConfigurationError::InvalidLabelShape`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("label value is neither a string nor a language map")]
pub struct LabelShapeError;

/// Resolves a label value for a primary/fallback language pair.
///
/// - absent → `default`
/// - plain string → the string, unchanged (no language indirection)
/// - language map → `map[primary]`, else `map[fallback]`, else `default`
/// - any other shape → [`LabelShapeError`]
pub fn resolve(
    text: Option<&LangText>,
    primary: &str,
    fallback: &str,
    default: &str,
) -> Result<String, LabelShapeError> {
    match text {
        None => Ok(default.to_string()),
        Some(LangText::Plain(s)) => Ok(s.clone()),
        Some(LangText::Localized(map)) => {
            Ok(resolve_map(map, primary, fallback).unwrap_or(default).to_string())
        }
        Some(LangText::Unrecognized(_)) => Err(LabelShapeError),
    }
}

/// Resolves a plain language map: `map[primary]`, else `map[fallback]`.
#[must_use]
pub fn resolve_map<'a>(map: &'a LangMap, primary: &str, fallback: &str) -> Option<&'a str> {
    map.get(primary)
        .or_else(|| map.get(fallback))
        .map(String::as_str)
}

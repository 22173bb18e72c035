//! Per-key documentation ("assignments") data structures.
//!
//! The assignments document maps key codes to documentation entries grouped
//! by scope. Scope order in the JSON object is the defined presentation
//! order, so entries deserialize into a vector of pairs rather than a hash
//! map.

use std::collections::HashMap;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Documentation for one scope of a key: a description and ordered tags.
///
/// The JSON form is a 2-element array: `["description", ["tag", …]]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Vec<String>)")]
pub struct ScopeDoc {
    /// Human-readable description of what the key does in this scope.
    pub description: String,
    /// Ordered tag strings.
    pub tags: Vec<String>,
}

impl From<(String, Vec<String>)> for ScopeDoc {
    fn from((description, tags): (String, Vec<String>)) -> Self {
        Self { description, tags }
    }
}

/// All documented scopes for one key, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentEntry {
    /// (scope name, documentation) pairs in the order they were authored.
    pub scopes: Vec<(String, ScopeDoc)>,
}

impl AssignmentEntry {
    /// Creates an entry from scope pairs.
    #[must_use]
    pub fn new(scopes: Vec<(String, ScopeDoc)>) -> Self {
        Self { scopes }
    }
}

impl<'de> Deserialize<'de> for AssignmentEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = AssignmentEntry;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from scope name to [description, tags]")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scopes = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((scope, doc)) = access.next_entry::<String, ScopeDoc>()? {
                    scopes.push((scope, doc));
                }
                Ok(AssignmentEntry { scopes })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// The full assignments document: key code → documented scopes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Assignments {
    entries: HashMap<u16, AssignmentEntry>,
}

impl Assignments {
    /// Creates an assignments table from entries.
    #[must_use]
    pub fn new(entries: HashMap<u16, AssignmentEntry>) -> Self {
        Self { entries }
    }

    /// Returns the documentation entry for a key code, if any.
    ///
    /// Absence is not an error: undocumented keys simply render without a
    /// documentation block.
    #[must_use]
    pub fn get(&self, code: u16) -> Option<&AssignmentEntry> {
        self.entries.get(&code)
    }

    /// Returns `true` if the key code has documentation.
    #[must_use]
    pub fn contains(&self, code: u16) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of documented keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is documented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_doc_from_array() {
        let doc: ScopeDoc =
            serde_json::from_str(r#"["closes the window", ["window", "exit"]]"#).unwrap();
        assert_eq!(doc.description, "closes the window");
        assert_eq!(doc.tags, vec!["window", "exit"]);
    }

    #[test]
    fn test_scope_doc_rejects_bad_shapes() {
        assert!(serde_json::from_str::<ScopeDoc>(r#"["desc"]"#).is_err());
        assert!(serde_json::from_str::<ScopeDoc>(r#"{"description": "x"}"#).is_err());
    }

    #[test]
    fn test_assignment_entry_preserves_scope_order() {
        let entry: AssignmentEntry = serde_json::from_str(
            r#"{
                "editor": ["save", ["file"]],
                "browser": ["bookmark", ["web"]],
                "shell": ["interrupt", ["signal"]]
            }"#,
        )
        .unwrap();

        let order: Vec<&str> = entry.scopes.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["editor", "browser", "shell"]);
    }

    #[test]
    fn test_assignments_lookup() {
        let assignments: Assignments = serde_json::from_str(
            r#"{
                "65": {"scope1": ["desc", ["tag1"]]},
                "27": {"global": ["cancel", []]}
            }"#,
        )
        .unwrap();

        assert_eq!(assignments.len(), 2);
        assert!(assignments.contains(65));
        assert!(!assignments.contains(66));
        let entry = assignments.get(65).unwrap();
        assert_eq!(entry.scopes[0].0, "scope1");
        assert_eq!(entry.scopes[0].1.description, "desc");
    }
}

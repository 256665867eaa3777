//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the Assessment Stack. These
//! prevent accidental identifier confusion — you cannot pass an
//! `EvidenceId` where a `RunId` is expected, and a question token is
//! never just a bare `String`.
//!
//! `RunId` and `EvidenceId` are machine-generated UUIDs. `QuestionId`
//! and `TemplateId` are human-authored tokens defined by the template
//! author, so they wrap `String`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

/// Unique identifier for an uploaded evidence file.
///
/// `Ord` is derived so evidence links can live in ordered sets with
/// deterministic iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvidenceId(pub Uuid);

/// Question token, unique within a template (e.g. `"q-data-retention"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier of a question catalog version (template id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl RunId {
    /// Generate a new random run identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl EvidenceId {
    /// Generate a new random evidence identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EvidenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionId {
    /// Wrap a question token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TemplateId {
    /// Wrap a template identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run:{}", self.0)
    }
}

impl std::fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evidence:{}", self.0)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_question_id_display_is_bare_token() {
        let q = QuestionId::new("q-001");
        assert_eq!(q.to_string(), "q-001");
        assert_eq!(q.as_str(), "q-001");
    }

    #[test]
    fn test_run_id_display_has_namespace_prefix() {
        let id = RunId::new();
        assert!(id.to_string().starts_with("run:"));
    }

    #[test]
    fn test_evidence_id_ordering_is_stable() {
        let mut ids = vec![EvidenceId::new(), EvidenceId::new(), EvidenceId::new()];
        ids.sort();
        let resorted = {
            let mut v = ids.clone();
            v.sort();
            v
        };
        assert_eq!(ids, resorted);
    }

    #[test]
    fn test_serde_roundtrip() {
        let q = QuestionId::new("q-42");
        let json = serde_json::to_string(&q).unwrap();
        let parsed: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(q, parsed);
    }
}

//! # Evidence Registry
//!
//! Descriptors of uploaded evidence files for one run. The registry does
//! not store file contents — upload and storage belong to an external
//! collaborator; the engine only tracks which files exist and which
//! question, if any, each one is linked to.
//!
//! An evidence requirement for question Q is satisfied by either link
//! direction: an evidence record carrying Q as its `linked_question_id`,
//! or Q's answer carrying the evidence id in its `evidence_file_ids`.

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::identity::{EvidenceId, QuestionId};
use crate::temporal::Timestamp;

/// Descriptor of one uploaded evidence file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique evidence identifier.
    pub id: EvidenceId,
    /// Original file name, for display.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the file was uploaded.
    pub uploaded_at: Timestamp,
    /// The question this file was uploaded against, if any.
    pub linked_question_id: Option<QuestionId>,
}

impl Evidence {
    /// Describe a freshly uploaded file, not linked to any question.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: EvidenceId::new(),
            name: name.into(),
            size_bytes,
            uploaded_at: Timestamp::now(),
            linked_question_id: None,
        }
    }

    /// Describe a freshly uploaded file linked to a question.
    pub fn for_question(
        name: impl Into<String>,
        size_bytes: u64,
        question: QuestionId,
    ) -> Self {
        let mut ev = Self::new(name, size_bytes);
        ev.linked_question_id = Some(question);
        ev
    }
}

/// The per-run list of uploaded evidence descriptors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceRegistry {
    items: Vec<Evidence>,
}

impl EvidenceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evidence descriptor. Re-registering an id replaces the
    /// previous descriptor (last write wins, single-writer policy).
    pub fn add(&mut self, evidence: Evidence) {
        if let Some(existing) = self.items.iter_mut().find(|e| e.id == evidence.id) {
            *existing = evidence;
        } else {
            self.items.push(evidence);
        }
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.items.iter().find(|e| &e.id == id)
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &EvidenceId) -> bool {
        self.get(id).is_some()
    }

    /// Evidence records whose own link points at a question.
    pub fn linked_to<'a>(
        &'a self,
        question: &'a QuestionId,
    ) -> impl Iterator<Item = &'a Evidence> + 'a {
        self.items
            .iter()
            .filter(move |e| e.linked_question_id.as_ref() == Some(question))
    }

    /// Whether a question's evidence requirement is satisfied, given its
    /// answer record (if any): a registry-side link, or a registered file
    /// referenced from the answer's explicit links.
    pub fn satisfies(&self, question: &QuestionId, answer: Option<&Answer>) -> bool {
        if self.linked_to(question).next().is_some() {
            return true;
        }
        answer.is_some_and(|a| {
            a.evidence_file_ids.iter().any(|id| self.contains(id))
        })
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All descriptors in upload order.
    pub fn iter(&self) -> impl Iterator<Item = &Evidence> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(token: &str) -> QuestionId {
        QuestionId::new(token)
    }

    #[test]
    fn test_registry_side_link_satisfies() {
        let mut reg = EvidenceRegistry::new();
        reg.add(Evidence::for_question("policy.pdf", 1024, q("q1")));
        assert!(reg.satisfies(&q("q1"), None));
        assert!(!reg.satisfies(&q("q2"), None));
    }

    #[test]
    fn test_answer_side_link_satisfies() {
        let mut reg = EvidenceRegistry::new();
        let ev = Evidence::new("scan.png", 2048);
        let id = ev.id;
        reg.add(ev);

        let mut answer = Answer::default();
        answer.evidence_file_ids.insert(id);
        assert!(reg.satisfies(&q("q1"), Some(&answer)));
    }

    #[test]
    fn test_dangling_answer_link_does_not_satisfy() {
        let reg = EvidenceRegistry::new();
        let mut answer = Answer::default();
        answer.evidence_file_ids.insert(EvidenceId::new());
        assert!(!reg.satisfies(&q("q1"), Some(&answer)));
    }

    #[test]
    fn test_add_same_id_replaces() {
        let mut reg = EvidenceRegistry::new();
        let mut ev = Evidence::new("v1.pdf", 10);
        let id = ev.id;
        reg.add(ev.clone());

        ev.name = "v2.pdf".into();
        reg.add(ev);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&id).unwrap().name, "v2.pdf");
    }

    #[test]
    fn test_linked_to_filters_by_question() {
        let mut reg = EvidenceRegistry::new();
        reg.add(Evidence::for_question("a.pdf", 1, q("q1")));
        reg.add(Evidence::for_question("b.pdf", 2, q("q2")));
        reg.add(Evidence::new("c.pdf", 3));

        let q1 = q("q1");
        let names: Vec<_> = reg.linked_to(&q1).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut reg = EvidenceRegistry::new();
        reg.add(Evidence::for_question("a.pdf", 1, q("q1")));
        let json = serde_json::to_string(&reg).unwrap();
        let parsed: EvidenceRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.satisfies(&q("q1"), None));
    }
}

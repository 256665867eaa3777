//! # Answers — Typed Values and the Per-Run Answer Store
//!
//! Answer values are a tagged union keyed by question kind, so a value of
//! the wrong shape is a single-point runtime check at record time instead
//! of scattered casts. An `Answer` record exists from the first
//! interaction with a question (a comment or flag can arrive before a
//! value), so "unanswered" means an absent or blank value, not an absent
//! record.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::QuestionKind;
use crate::identity::{EvidenceId, QuestionId};

// ─── Answer Value ────────────────────────────────────────────────────

/// The four-level response to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNoAnswer {
    /// Requirement is met. Full weight.
    Yes,
    /// Requirement is not met. Zero.
    No,
    /// Requirement is partially met. Half weight.
    Partial,
    /// Requirement does not apply. Zero.
    NotApplicable,
}

impl std::fmt::Display for YesNoAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Partial => "PARTIAL",
            Self::NotApplicable => "NOT_APPLICABLE",
        };
        f.write_str(s)
    }
}

/// A typed answer value. The variant must match the question's declared
/// [`QuestionKind`]; the run controller enforces this at record time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerValue {
    /// Response to a [`QuestionKind::YesNo`] question.
    YesNo(YesNoAnswer),
    /// Selected option of a [`QuestionKind::MultipleChoice`] question.
    MultipleChoice(String),
    /// Text of a [`QuestionKind::FreeText`] question.
    FreeText(String),
    /// Rating of a [`QuestionKind::Scale`] question (1-10).
    Scale(u8),
}

impl AnswerValue {
    /// The question kind this value's shape corresponds to.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::YesNo(_) => QuestionKind::YesNo,
            Self::MultipleChoice(_) => QuestionKind::MultipleChoice,
            Self::FreeText(_) => QuestionKind::FreeText,
            Self::Scale(_) => QuestionKind::Scale,
        }
    }

    /// Whether the value is blank: empty selection or whitespace-only
    /// text. Blank values count as unanswered.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::MultipleChoice(s) | Self::FreeText(s) => s.trim().is_empty(),
            Self::YesNo(_) | Self::Scale(_) => false,
        }
    }
}

// ─── Answer ──────────────────────────────────────────────────────────

/// The per-question state of one run: value, comment, review flag, and
/// explicit evidence links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The typed value; `None` or blank means unanswered.
    pub value: Option<AnswerValue>,
    /// Free-text note from the assessor.
    pub comment: Option<String>,
    /// Marked for later review. No effect on scoring or submission.
    pub flagged: bool,
    /// Evidence files explicitly linked to this answer, in addition to
    /// evidence records that carry the question id themselves.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub evidence_file_ids: BTreeSet<EvidenceId>,
}

impl Answer {
    /// Whether the answer carries a usable value.
    pub fn is_answered(&self) -> bool {
        matches!(&self.value, Some(v) if !v.is_blank())
    }
}

// ─── Answer Store ────────────────────────────────────────────────────

/// Per-run mapping from question token to its [`Answer`] record.
///
/// Mutated only through the run lifecycle controller; scoring and
/// validation read it as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: HashMap<QuestionId, Answer>,
}

impl AnswerStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The answer record for a question, if it was ever touched.
    pub fn get(&self, id: &QuestionId) -> Option<&Answer> {
        self.answers.get(id)
    }

    /// The answer record for a question, created empty on first access.
    pub fn get_or_create(&mut self, id: &QuestionId) -> &mut Answer {
        self.answers.entry(id.clone()).or_default()
    }

    /// Whether a question carries a usable value.
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(Answer::is_answered)
    }

    /// Number of answer records (touched questions, answered or not).
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether any question was ever touched.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate over (question, answer) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_mapping() {
        assert_eq!(AnswerValue::YesNo(YesNoAnswer::Yes).kind(), QuestionKind::YesNo);
        assert_eq!(
            AnswerValue::MultipleChoice("a".into()).kind(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(AnswerValue::FreeText("x".into()).kind(), QuestionKind::FreeText);
        assert_eq!(AnswerValue::Scale(7).kind(), QuestionKind::Scale);
    }

    #[test]
    fn test_blank_values() {
        assert!(AnswerValue::FreeText("".into()).is_blank());
        assert!(AnswerValue::FreeText("   ".into()).is_blank());
        assert!(AnswerValue::MultipleChoice("".into()).is_blank());
        assert!(!AnswerValue::FreeText("noted".into()).is_blank());
        assert!(!AnswerValue::YesNo(YesNoAnswer::No).is_blank());
        assert!(!AnswerValue::Scale(1).is_blank());
    }

    #[test]
    fn test_answer_with_only_comment_is_unanswered() {
        let answer = Answer {
            comment: Some("waiting on the DPO".into()),
            ..Answer::default()
        };
        assert!(!answer.is_answered());
    }

    #[test]
    fn test_blank_value_is_unanswered() {
        let answer = Answer {
            value: Some(AnswerValue::FreeText("  ".into())),
            ..Answer::default()
        };
        assert!(!answer.is_answered());
    }

    #[test]
    fn test_store_creates_record_on_first_touch() {
        let mut store = AnswerStore::new();
        let q = QuestionId::new("q1");
        assert!(store.get(&q).is_none());

        store.get_or_create(&q).flagged = true;
        assert!(store.get(&q).is_some());
        assert!(!store.is_answered(&q));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_is_answered_requires_usable_value() {
        let mut store = AnswerStore::new();
        let q = QuestionId::new("q1");
        store.get_or_create(&q).value = Some(AnswerValue::Scale(5));
        assert!(store.is_answered(&q));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut store = AnswerStore::new();
        let q = QuestionId::new("q1");
        let record = store.get_or_create(&q);
        record.value = Some(AnswerValue::YesNo(YesNoAnswer::Partial));
        record.evidence_file_ids.insert(EvidenceId::new());

        let json = serde_json::to_string(&store).unwrap();
        let parsed: AnswerStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(&q), store.get(&q));
    }
}

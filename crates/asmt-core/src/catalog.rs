//! # Question Catalog
//!
//! The immutable question definitions an assessment run is scored
//! against. A catalog is fixed per template version: runs reference it by
//! `TemplateId`, and template edits never retroactively alter an existing
//! run.
//!
//! Catalogs arrive from an external source (static template data today).
//! They are validated once at construction — duplicate question tokens,
//! non-positive weights, and option lists that disagree with the question
//! kind are rejected here so every downstream consumer can trust the
//! catalog shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{QuestionId, TemplateId};

/// Lower bound of a scale answer.
pub const SCALE_MIN: u8 = 1;
/// Upper bound of a scale answer.
pub const SCALE_MAX: u8 = 10;

// ─── Question Kind ───────────────────────────────────────────────────

/// The answer shape a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Yes / No / Partial / NotApplicable.
    YesNo,
    /// One selection from the question's option list.
    MultipleChoice,
    /// Free-form text.
    FreeText,
    /// Integer rating from 1 to 10.
    Scale,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::YesNo => "YES_NO",
            Self::MultipleChoice => "MULTIPLE_CHOICE",
            Self::FreeText => "FREE_TEXT",
            Self::Scale => "SCALE",
        };
        f.write_str(s)
    }
}

// ─── Question ────────────────────────────────────────────────────────

/// A single catalog-defined question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Token unique within the template.
    pub id: QuestionId,
    /// Grouping label. Non-unique; first-appearance order is significant
    /// for display, not for scoring.
    pub section: String,
    /// The answer shape this question expects.
    pub kind: QuestionKind,
    /// Maximum contribution to the section/overall score. Positive.
    pub weight: f64,
    /// Must be answered before submission.
    pub required: bool,
    /// Must have at least one linked evidence file before submission.
    pub evidence_required: bool,
    /// Ordered choice set; non-empty exactly when `kind` is `MultipleChoice`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    /// A yes/no question.
    pub fn yes_no(id: impl Into<String>, section: impl Into<String>, weight: f64) -> Self {
        Self::bare(id, section, QuestionKind::YesNo, weight)
    }

    /// A multiple-choice question with its option list.
    pub fn multiple_choice(
        id: impl Into<String>,
        section: impl Into<String>,
        weight: f64,
        options: Vec<String>,
    ) -> Self {
        let mut q = Self::bare(id, section, QuestionKind::MultipleChoice, weight);
        q.options = options;
        q
    }

    /// A free-text question.
    pub fn free_text(id: impl Into<String>, section: impl Into<String>, weight: f64) -> Self {
        Self::bare(id, section, QuestionKind::FreeText, weight)
    }

    /// A 1-10 scale question.
    pub fn scale(id: impl Into<String>, section: impl Into<String>, weight: f64) -> Self {
        Self::bare(id, section, QuestionKind::Scale, weight)
    }

    /// Mark the question as required for submission.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the question as needing linked evidence for submission.
    pub fn with_evidence_required(mut self) -> Self {
        self.evidence_required = true;
        self
    }

    fn bare(
        id: impl Into<String>,
        section: impl Into<String>,
        kind: QuestionKind,
        weight: f64,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            section: section.into(),
            kind,
            weight,
            required: false,
            evidence_required: false,
            options: Vec::new(),
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors rejecting a malformed catalog at construction.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two questions share the same token.
    #[error("duplicate question id in template {template}: {question}")]
    DuplicateQuestion {
        /// The template being built.
        template: TemplateId,
        /// The repeated token.
        question: QuestionId,
    },

    /// A weight is zero, negative, or not finite.
    #[error("question {question} has invalid weight {weight}; weights must be positive and finite")]
    InvalidWeight {
        /// The offending question.
        question: QuestionId,
        /// The rejected weight.
        weight: f64,
    },

    /// Option list disagrees with the question kind: multiple-choice
    /// without options, or options on any other kind.
    #[error("question {question} ({kind}) has a mismatched option list")]
    OptionsMismatch {
        /// The offending question.
        question: QuestionId,
        /// The declared kind.
        kind: QuestionKind,
    },
}

// ─── Catalog ─────────────────────────────────────────────────────────

/// An ordered, validated set of questions for one template version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct QuestionCatalog {
    /// The template this catalog belongs to.
    template_id: TemplateId,
    /// Questions in authored order.
    questions: Vec<Question>,
}

/// Unvalidated catalog shape used for deserialization.
#[derive(Deserialize)]
struct RawCatalog {
    template_id: TemplateId,
    questions: Vec<Question>,
}

impl TryFrom<RawCatalog> for QuestionCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, CatalogError> {
        Self::new(raw.template_id, raw.questions)
    }
}

impl QuestionCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// Rejects duplicate question tokens, non-positive or non-finite
    /// weights, and option lists that disagree with the question kind.
    pub fn new(
        template_id: TemplateId,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        let mut seen: std::collections::HashSet<&QuestionId> = std::collections::HashSet::new();
        for q in &questions {
            if !seen.insert(&q.id) {
                return Err(CatalogError::DuplicateQuestion {
                    template: template_id.clone(),
                    question: q.id.clone(),
                });
            }
            if !q.weight.is_finite() || q.weight <= 0.0 {
                return Err(CatalogError::InvalidWeight {
                    question: q.id.clone(),
                    weight: q.weight,
                });
            }
            let has_options = !q.options.is_empty();
            let wants_options = q.kind == QuestionKind::MultipleChoice;
            if has_options != wants_options {
                return Err(CatalogError::OptionsMismatch {
                    question: q.id.clone(),
                    kind: q.kind,
                });
            }
        }
        Ok(Self {
            template_id,
            questions,
        })
    }

    /// The template this catalog belongs to.
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    /// Look up a question by token.
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Questions in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Section labels in first-appearance order.
    pub fn sections(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !order.contains(&q.section.as_str()) {
                order.push(&q.section);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> TemplateId {
        TemplateId::new("iso27001-v3")
    }

    #[test]
    fn test_catalog_accepts_valid_questions() {
        let catalog = QuestionCatalog::new(
            template(),
            vec![
                Question::yes_no("q1", "Access Control", 10.0).required(),
                Question::scale("q2", "Access Control", 5.0),
                Question::multiple_choice(
                    "q3",
                    "Data Protection",
                    8.0,
                    vec!["AES-256".into(), "None".into()],
                ),
            ],
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.sections(), vec!["Access Control", "Data Protection"]);
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let result = QuestionCatalog::new(
            template(),
            vec![
                Question::yes_no("q1", "A", 1.0),
                Question::scale("q1", "B", 2.0),
            ],
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateQuestion { .. })
        ));
    }

    #[test]
    fn test_nonpositive_weight_rejected() {
        for bad in [0.0, -3.5, f64::NAN, f64::INFINITY] {
            let result =
                QuestionCatalog::new(template(), vec![Question::yes_no("q1", "A", bad)]);
            assert!(matches!(result, Err(CatalogError::InvalidWeight { .. })));
        }
    }

    #[test]
    fn test_multiple_choice_without_options_rejected() {
        let result = QuestionCatalog::new(
            template(),
            vec![Question::multiple_choice("q1", "A", 1.0, vec![])],
        );
        assert!(matches!(result, Err(CatalogError::OptionsMismatch { .. })));
    }

    #[test]
    fn test_options_on_yes_no_rejected() {
        let mut q = Question::yes_no("q1", "A", 1.0);
        q.options = vec!["Yes".into()];
        let result = QuestionCatalog::new(template(), vec![q]);
        assert!(matches!(result, Err(CatalogError::OptionsMismatch { .. })));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = QuestionCatalog::new(
            template(),
            vec![Question::free_text("q1", "A", 2.0).required()],
        )
        .unwrap();
        let q = catalog.get(&QuestionId::new("q1")).unwrap();
        assert!(q.required);
        assert!(catalog.get(&QuestionId::new("missing")).is_none());
    }

    #[test]
    fn test_sections_preserve_first_appearance_order() {
        let catalog = QuestionCatalog::new(
            template(),
            vec![
                Question::yes_no("q1", "B", 1.0),
                Question::yes_no("q2", "A", 1.0),
                Question::yes_no("q3", "B", 1.0),
            ],
        )
        .unwrap();
        assert_eq!(catalog.sections(), vec!["B", "A"]);
    }

    #[test]
    fn test_deserialization_validates() {
        let json = r#"{
            "template_id": "t1",
            "questions": [
                {"id": "q1", "section": "A", "kind": "YesNo", "weight": 0.0,
                 "required": false, "evidence_required": false}
            ]
        }"#;
        let result: Result<QuestionCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let catalog = QuestionCatalog::new(
            template(),
            vec![
                Question::yes_no("q1", "A", 10.0).required().with_evidence_required(),
                Question::multiple_choice("q2", "A", 5.0, vec!["a".into(), "b".into()]),
            ],
        )
        .unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: QuestionCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.template_id(), catalog.template_id());
    }
}

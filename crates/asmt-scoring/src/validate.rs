//! # Validation Gate
//!
//! Evaluates a run's answers and evidence against the catalog's
//! completeness rules and produces a structured issue list. Blocking
//! issues prevent submission; advisory issues are surfaced for the
//! assessor but never block.
//!
//! Issues are emitted in catalog order so banners and jump-to-question
//! navigation render deterministically.

use serde::{Deserialize, Serialize};

use asmt_core::{AnswerStore, EvidenceRegistry, QuestionCatalog, QuestionId};

use crate::score::scorable_value;

// ─── Issues ──────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issue {
    /// A required question has no usable answer. Blocking.
    MissingRequiredAnswer {
        /// The unanswered question.
        question: QuestionId,
    },

    /// An evidence-required question has no satisfied evidence link
    /// in either direction. Blocking.
    MissingRequiredEvidence {
        /// The question lacking evidence.
        question: QuestionId,
    },

    /// An answer is still flagged for review. Advisory.
    FlaggedForReview {
        /// The flagged question.
        question: QuestionId,
    },

    /// Optional questions left unanswered. Advisory, informational count.
    UnansweredOptional {
        /// How many optional questions have no usable answer.
        count: usize,
    },
}

impl Issue {
    /// The question this finding points at, when it points at one.
    pub fn question(&self) -> Option<&QuestionId> {
        match self {
            Self::MissingRequiredAnswer { question }
            | Self::MissingRequiredEvidence { question }
            | Self::FlaggedForReview { question } => Some(question),
            Self::UnansweredOptional { .. } => None,
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredAnswer { question } => {
                write!(f, "required question {question} is not answered")
            }
            Self::MissingRequiredEvidence { question } => {
                write!(f, "question {question} requires evidence but has none attached")
            }
            Self::FlaggedForReview { question } => {
                write!(f, "question {question} is flagged for review")
            }
            Self::UnansweredOptional { count } => {
                write!(f, "{count} optional question(s) not answered")
            }
        }
    }
}

// ─── Report ──────────────────────────────────────────────────────────

/// The validation outcome for one run, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings that must be resolved before submission.
    pub blocking: Vec<Issue>,
    /// Findings surfaced to the assessor that never block submission.
    pub advisory: Vec<Issue>,
}

impl ValidationReport {
    /// Whether submission is currently allowed.
    pub fn is_submittable(&self) -> bool {
        self.blocking.is_empty()
    }
}

/// Evaluate completeness rules for a run.
pub fn validate(
    catalog: &QuestionCatalog,
    answers: &AnswerStore,
    evidence: &EvidenceRegistry,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut unanswered_optional = 0;

    for question in catalog.iter() {
        let answered = scorable_value(question, answers).is_some();

        if !answered {
            if question.required {
                report.blocking.push(Issue::MissingRequiredAnswer {
                    question: question.id.clone(),
                });
            } else {
                unanswered_optional += 1;
            }
        }

        if question.evidence_required
            && !evidence.satisfies(&question.id, answers.get(&question.id))
        {
            report.blocking.push(Issue::MissingRequiredEvidence {
                question: question.id.clone(),
            });
        }

        if answers.get(&question.id).is_some_and(|a| a.flagged) {
            report.advisory.push(Issue::FlaggedForReview {
                question: question.id.clone(),
            });
        }
    }

    if unanswered_optional > 0 {
        report.advisory.push(Issue::UnansweredOptional {
            count: unanswered_optional,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmt_core::{
        AnswerValue, Evidence, Question, TemplateId, YesNoAnswer,
    };

    fn catalog(questions: Vec<Question>) -> QuestionCatalog {
        QuestionCatalog::new(TemplateId::new("t1"), questions).unwrap()
    }

    fn q(token: &str) -> QuestionId {
        QuestionId::new(token)
    }

    fn answer_yes(store: &mut AnswerStore, token: &str) {
        store.get_or_create(&q(token)).value = Some(AnswerValue::YesNo(YesNoAnswer::Yes));
    }

    #[test]
    fn test_clean_run_is_submittable() {
        let cat = catalog(vec![Question::yes_no("q1", "A", 1.0).required()]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert!(report.is_submittable());
        assert!(report.blocking.is_empty());
        assert!(report.advisory.is_empty());
    }

    #[test]
    fn test_one_blocking_issue_per_unanswered_required_question() {
        let cat = catalog(vec![
            Question::yes_no("q1", "A", 1.0).required(),
            Question::yes_no("q2", "A", 1.0).required(),
            Question::yes_no("q3", "A", 1.0).required(),
            Question::yes_no("q4", "A", 1.0),
        ]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q2");

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert_eq!(
            report.blocking,
            vec![
                Issue::MissingRequiredAnswer { question: q("q1") },
                Issue::MissingRequiredAnswer { question: q("q3") },
            ]
        );
        assert!(!report.is_submittable());
    }

    #[test]
    fn test_blocking_count_matches_required_minus_answered() {
        let cat = catalog(vec![
            Question::yes_no("q1", "A", 1.0).required(),
            Question::yes_no("q2", "A", 1.0).required(),
            Question::yes_no("q3", "A", 1.0).required(),
        ]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");

        let score = crate::score::score(&cat, &store);
        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert_eq!(
            report.blocking.len(),
            score.required_total - score.required_answered
        );
    }

    #[test]
    fn test_missing_evidence_blocks() {
        let cat =
            catalog(vec![Question::yes_no("q1", "A", 1.0).with_evidence_required()]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert_eq!(
            report.blocking,
            vec![Issue::MissingRequiredEvidence { question: q("q1") }]
        );
    }

    #[test]
    fn test_registry_side_link_clears_evidence_issue() {
        let cat =
            catalog(vec![Question::yes_no("q1", "A", 1.0).with_evidence_required()]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");

        let mut reg = EvidenceRegistry::new();
        reg.add(Evidence::for_question("policy.pdf", 100, q("q1")));
        assert!(validate(&cat, &store, &reg).is_submittable());
    }

    #[test]
    fn test_answer_side_link_clears_evidence_issue() {
        let cat =
            catalog(vec![Question::yes_no("q1", "A", 1.0).with_evidence_required()]);
        let mut reg = EvidenceRegistry::new();
        let ev = Evidence::new("scan.png", 100);
        let ev_id = ev.id;
        reg.add(ev);

        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");
        store.get_or_create(&q("q1")).evidence_file_ids.insert(ev_id);
        assert!(validate(&cat, &store, &reg).is_submittable());
    }

    #[test]
    fn test_flagged_answers_are_advisory_only() {
        let cat = catalog(vec![Question::yes_no("q1", "A", 1.0).required()]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q1");
        store.get_or_create(&q("q1")).flagged = true;

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert!(report.is_submittable());
        assert_eq!(
            report.advisory,
            vec![Issue::FlaggedForReview { question: q("q1") }]
        );
    }

    #[test]
    fn test_unanswered_optional_is_an_informational_count() {
        let cat = catalog(vec![
            Question::yes_no("q1", "A", 1.0),
            Question::yes_no("q2", "A", 1.0),
            Question::yes_no("q3", "A", 1.0).required(),
        ]);
        let mut store = AnswerStore::new();
        answer_yes(&mut store, "q3");

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert!(report.is_submittable());
        assert_eq!(
            report.advisory,
            vec![Issue::UnansweredOptional { count: 2 }]
        );
    }

    #[test]
    fn test_blank_answer_counts_as_missing() {
        let cat = catalog(vec![Question::free_text("q1", "A", 1.0).required()]);
        let mut store = AnswerStore::new();
        store.get_or_create(&q("q1")).value = Some(AnswerValue::FreeText("   ".into()));

        let report = validate(&cat, &store, &EvidenceRegistry::new());
        assert_eq!(report.blocking.len(), 1);
    }

    #[test]
    fn test_issues_follow_catalog_order() {
        let cat = catalog(vec![
            Question::yes_no("zz", "A", 1.0).required(),
            Question::yes_no("aa", "A", 1.0).required(),
        ]);
        let report = validate(&cat, &AnswerStore::new(), &EvidenceRegistry::new());
        let order: Vec<_> = report
            .blocking
            .iter()
            .filter_map(Issue::question)
            .map(QuestionId::as_str)
            .collect();
        assert_eq!(order, vec!["zz", "aa"]);
    }

    #[test]
    fn test_report_serde_roundtrip() {
        let cat = catalog(vec![
            Question::yes_no("q1", "A", 1.0).required(),
            Question::yes_no("q2", "A", 1.0),
        ]);
        let report = validate(&cat, &AnswerStore::new(), &EvidenceRegistry::new());

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(!parsed.is_submittable());
    }

    #[test]
    fn test_issue_display_names_the_question() {
        let issue = Issue::MissingRequiredAnswer { question: q("q12") };
        assert_eq!(issue.to_string(), "required question q12 is not answered");
    }
}

//! # Scoring Engine
//!
//! Turns a question catalog plus the current answer store into a running
//! compliance score: overall percentage, per-section percentages, and
//! completion counts. Pure function of its inputs — no side effects, no
//! stored score — so the presentation layer can recompute it on every
//! keystroke.
//!
//! ## Scoring Rules
//!
//! Only answered questions participate. An unanswered question is
//! excluded from both numerator and denominator, so an in-progress run is
//! not penalized for what it has not reached yet. The trade-off: the
//! score is a running preview, not comparable across runs with different
//! completion levels.
//!
//! Per answered question, `possible = weight` and:
//!
//! - YesNo: `Yes` earns the full weight, `Partial` half, `No` and
//!   `NotApplicable` zero.
//! - Scale: `value / 10 × weight`.
//! - MultipleChoice / FreeText: full weight for any non-blank answer.
//!   Known simplification: no per-option or per-text weighting is
//!   defined, so answering at all earns the question's weight.
//!
//! Scoring never fails. Empty catalogs, zero answered questions, and
//! stored values whose shape disagrees with the catalog all degrade to
//! zero contribution rather than erroring, because a running preview
//! score must always be renderable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use asmt_core::{AnswerStore, AnswerValue, Question, QuestionCatalog, YesNoAnswer, SCALE_MAX};

/// The derived scoring state of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Rounded overall percentage, 0-100. Zero when nothing is answered.
    pub overall: u8,
    /// Rounded percentage per section label. Every catalog section is
    /// present; sections with no answered questions report zero. Display
    /// order comes from `QuestionCatalog::sections()`.
    pub by_section: HashMap<String, u8>,
    /// Questions with a usable answer.
    pub answered: usize,
    /// Questions marked required in the catalog.
    pub required_total: usize,
    /// Required questions with a usable answer.
    pub required_answered: usize,
    /// Questions marked evidence-required in the catalog. Whether the
    /// evidence is actually attached is the validation gate's call — it
    /// needs the evidence registry.
    pub evidence_required_total: usize,
}

/// Compute the running score for a run.
pub fn score(catalog: &QuestionCatalog, answers: &AnswerStore) -> ScoreReport {
    let mut earned_total = 0.0_f64;
    let mut possible_total = 0.0_f64;
    let mut per_section: HashMap<&str, (f64, f64)> = HashMap::new();

    let mut answered = 0;
    let mut required_total = 0;
    let mut required_answered = 0;
    let mut evidence_required_total = 0;

    for question in catalog.iter() {
        if question.required {
            required_total += 1;
        }
        if question.evidence_required {
            evidence_required_total += 1;
        }
        // Every section appears in the report, answered or not.
        per_section.entry(&question.section).or_insert((0.0, 0.0));

        let Some(value) = scorable_value(question, answers) else {
            continue;
        };
        answered += 1;
        if question.required {
            required_answered += 1;
        }

        let earned = earned_points(question, value);
        earned_total += earned;
        possible_total += question.weight;
        if let Some(slot) = per_section.get_mut(question.section.as_str()) {
            slot.0 += earned;
            slot.1 += question.weight;
        }
    }

    let by_section = per_section
        .into_iter()
        .map(|(section, (earned, possible))| (section.to_string(), percentage(earned, possible)))
        .collect();

    ScoreReport {
        overall: percentage(earned_total, possible_total),
        by_section,
        answered,
        required_total,
        required_answered,
        evidence_required_total,
    }
}

/// The answer value for a question if it is usable for scoring: present,
/// non-blank, and of the shape the catalog declares. A mismatched shape
/// (possible only when the store was populated outside the run
/// controller) is treated as unanswered rather than an error.
pub(crate) fn scorable_value<'a>(
    question: &Question,
    answers: &'a AnswerStore,
) -> Option<&'a AnswerValue> {
    let answer = answers.get(&question.id)?;
    let value = answer.value.as_ref()?;
    if value.is_blank() || value.kind() != question.kind {
        return None;
    }
    Some(value)
}

/// Points earned by one answered question.
fn earned_points(question: &Question, value: &AnswerValue) -> f64 {
    match value {
        AnswerValue::YesNo(YesNoAnswer::Yes) => question.weight,
        AnswerValue::YesNo(YesNoAnswer::Partial) => question.weight * 0.5,
        AnswerValue::YesNo(YesNoAnswer::No | YesNoAnswer::NotApplicable) => 0.0,
        AnswerValue::Scale(v) => f64::from(*v) / f64::from(SCALE_MAX) * question.weight,
        // Full credit for any non-blank selection or text.
        AnswerValue::MultipleChoice(_) | AnswerValue::FreeText(_) => question.weight,
    }
}

/// `round(100 × earned / possible)`, zero-guarded for empty input.
fn percentage(earned: f64, possible: f64) -> u8 {
    if possible <= 0.0 {
        return 0;
    }
    (100.0 * earned / possible).round().clamp(0.0, 100.0) as u8
}

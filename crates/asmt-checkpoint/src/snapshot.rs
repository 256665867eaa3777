//! # Run Snapshots
//!
//! A point-in-time capture of a run's recoverable state: answers,
//! evidence, and status. Snapshots are what the checkpoint scheduler
//! hands to the sink; they carry no score or validation output since both
//! are derived and recomputed on reload.

use serde::{Deserialize, Serialize};

use asmt_core::{AnswerStore, EvidenceRegistry, RunId, TemplateId, Timestamp};
use asmt_run::{Run, RunStatus};

/// A durable-draft capture of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// The run this snapshot belongs to.
    pub run_id: RunId,
    /// The catalog version the run is scored against.
    pub template_id: TemplateId,
    /// Run status at capture time.
    pub status: RunStatus,
    /// The answer records at capture time.
    pub answers: AnswerStore,
    /// The evidence descriptors at capture time.
    pub evidence: EvidenceRegistry,
    /// When the snapshot was captured.
    pub taken_at: Timestamp,
}

impl RunSnapshot {
    /// Capture the current state of a run.
    pub fn of(run: &Run) -> Self {
        Self {
            run_id: run.id,
            template_id: run.template_id.clone(),
            status: run.status,
            answers: run.answers.clone(),
            evidence: run.evidence.clone(),
            taken_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmt_core::{AnswerValue, Question, QuestionCatalog, QuestionId, YesNoAnswer};

    #[test]
    fn test_snapshot_captures_answers_and_status() {
        let cat = QuestionCatalog::new(
            TemplateId::new("t1"),
            vec![Question::yes_no("q1", "A", 1.0)],
        )
        .unwrap();
        let mut run = Run::new(TemplateId::new("t1"));
        run.start().unwrap();
        run.record_answer(
            &cat,
            &QuestionId::new("q1"),
            AnswerValue::YesNo(YesNoAnswer::Yes),
        )
        .unwrap();

        let snap = RunSnapshot::of(&run);
        assert_eq!(snap.run_id, run.id);
        assert_eq!(snap.status, RunStatus::InProgress);
        assert!(snap.answers.is_answered(&QuestionId::new("q1")));
    }

    #[test]
    fn test_snapshot_is_independent_of_later_edits() {
        let cat = QuestionCatalog::new(
            TemplateId::new("t1"),
            vec![Question::yes_no("q1", "A", 1.0)],
        )
        .unwrap();
        let mut run = Run::new(TemplateId::new("t1"));
        run.start().unwrap();
        let snap = RunSnapshot::of(&run);

        run.record_answer(
            &cat,
            &QuestionId::new("q1"),
            AnswerValue::YesNo(YesNoAnswer::Yes),
        )
        .unwrap();
        assert!(!snap.answers.is_answered(&QuestionId::new("q1")));
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let run = Run::new(TemplateId::new("t1"));
        let snap = RunSnapshot::of(&run);
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: RunSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.run_id, snap.run_id);
        assert_eq!(parsed.status, snap.status);
    }
}

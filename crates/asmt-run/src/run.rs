//! # Run Lifecycle Controller
//!
//! The `Run` value and the state machine governing it. Every mutation of
//! a run's answers or evidence flows through the operations here, which
//! check the status gate first and reject with structured errors.
//!
//! ## States
//!
//! ```text
//! NotStarted ──▶ Draft (first interaction)
//!     │            │
//!     └────────────┴──▶ InProgress ◀──▶ Paused
//!                            │             │
//!                            └──── Submit ─┴──▶ Completed (terminal)
//!                                                   │
//!                                                   └──▶ Clone (new run)
//! ```
//!
//! `Submit` is guarded by the validation gate: any blocking issue refuses
//! the transition and leaves the status untouched. On success the overall
//! score is frozen from the scoring engine; after that the run is history
//! and only `Clone` can produce something editable again.
//!
//! ## Design Decision
//!
//! The status is an enum with validated transitions rather than typestate
//! types. The controller is handed runs deserialized from an external
//! store, where the status is data; lifting it into the type system would
//! force a dynamic dispatch wrapper at every boundary for five states.
//! Runtime-checked transitions returning `Result` carry the same
//! guarantees to callers that matter here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use asmt_core::{
    AnswerStore, AnswerValue, Evidence, EvidenceId, EvidenceRegistry, QuestionCatalog,
    QuestionId, QuestionKind, RunId, TemplateId, Timestamp, SCALE_MAX, SCALE_MIN,
};
use asmt_scoring::{score, validate, Issue, ScoreReport};

use crate::status::{RunStatus, RunTransitionRecord};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors rejecting a run operation.
#[derive(Error, Debug)]
pub enum RunError {
    /// Mutation attempted on a completed run.
    #[error("run is not mutable in status {status}")]
    RunNotMutable {
        /// The run's current status.
        status: RunStatus,
    },

    /// Delete attempted outside the pre-start states. Active and
    /// completed runs may only be archived.
    #[error("cannot delete a run in status {status}; archive it instead")]
    CannotDeleteActiveRun {
        /// The run's current status.
        status: RunStatus,
    },

    /// Attempted status transition is not valid from the current status.
    #[error("invalid run transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: RunStatus,
        /// Attempted target.
        to: String,
    },

    /// Submission refused because blocking issues remain.
    #[error("submission blocked by {} unresolved issue(s)", blocking.len())]
    ValidationFailed {
        /// Every blocking issue, so the caller can direct the user to
        /// each offending question.
        blocking: Vec<Issue>,
    },

    /// The answer value's shape does not match the question's declared
    /// kind. Indicates a caller bug, not a user-recoverable condition.
    #[error("type mismatch for question {question}: expected {expected}, got {got}")]
    TypeMismatch {
        /// The question being answered.
        question: QuestionId,
        /// The kind the catalog declares.
        expected: QuestionKind,
        /// The kind of the supplied value.
        got: QuestionKind,
    },

    /// The value has the right shape but an out-of-domain payload.
    #[error("invalid value for question {question}: {reason}")]
    InvalidValue {
        /// The question being answered.
        question: QuestionId,
        /// What was wrong with the payload.
        reason: String,
    },

    /// The question token is not in the run's catalog.
    #[error("question {question} is not in the catalog")]
    UnknownQuestion {
        /// The unknown token.
        question: QuestionId,
    },

    /// The evidence id is not registered on this run.
    #[error("evidence {evidence} is not registered on this run")]
    UnknownEvidence {
        /// The unknown id.
        evidence: EvidenceId,
    },
}

// ─── Run ─────────────────────────────────────────────────────────────

/// One assessment execution: answers, evidence, status, and timestamps.
///
/// The run value is owned by an external store; the controller computes
/// updated values and returns typed rejections, performing no durable
/// writes of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique run identifier.
    pub id: RunId,
    /// The catalog version this run is scored against, fixed at creation.
    pub template_id: TemplateId,
    /// Current lifecycle status.
    pub status: RunStatus,
    /// Per-question answer records.
    pub answers: AnswerStore,
    /// Uploaded evidence descriptors.
    pub evidence: EvidenceRegistry,
    /// When the run was created.
    pub created_at: Timestamp,
    /// When the run was started, if it was.
    pub started_at: Option<Timestamp>,
    /// When the run was submitted, if it was.
    pub completed_at: Option<Timestamp>,
    /// The frozen overall score. Set exactly once, at submission.
    pub overall_score: Option<u8>,
    /// Closing remarks recorded at submission.
    pub overall_comments: Option<String>,
    /// Ordered log of all status transitions.
    pub transitions: Vec<RunTransitionRecord>,
}

impl Run {
    /// Create a fresh run against a template.
    pub fn new(template_id: TemplateId) -> Self {
        Self {
            id: RunId::new(),
            template_id,
            status: RunStatus::NotStarted,
            answers: AnswerStore::new(),
            evidence: EvidenceRegistry::new(),
            created_at: Timestamp::now(),
            started_at: None,
            completed_at: None,
            overall_score: None,
            overall_comments: None,
            transitions: Vec::new(),
        }
    }

    // ── Lifecycle transitions ────────────────────────────────────────

    /// Start the run (DRAFT or NOT_STARTED → IN_PROGRESS). Sets `started_at`.
    pub fn start(&mut self) -> Result<(), RunError> {
        if !self.status.is_pre_start() {
            return Err(self.invalid_transition("IN_PROGRESS"));
        }
        self.started_at = Some(Timestamp::now());
        self.do_transition(RunStatus::InProgress, "run started");
        Ok(())
    }

    /// Pause an in-progress run (IN_PROGRESS → PAUSED).
    pub fn pause(&mut self) -> Result<(), RunError> {
        if self.status != RunStatus::InProgress {
            return Err(self.invalid_transition("PAUSED"));
        }
        self.do_transition(RunStatus::Paused, "run paused");
        Ok(())
    }

    /// Resume a paused run (PAUSED → IN_PROGRESS).
    pub fn resume(&mut self) -> Result<(), RunError> {
        if self.status != RunStatus::Paused {
            return Err(self.invalid_transition("IN_PROGRESS"));
        }
        self.do_transition(RunStatus::InProgress, "run resumed");
        Ok(())
    }

    /// Submit the run (IN_PROGRESS or PAUSED → COMPLETED), guarded by the
    /// validation gate.
    ///
    /// Any blocking issue refuses the transition with
    /// [`RunError::ValidationFailed`] and leaves the run untouched. On
    /// success the overall score is frozen from the scoring engine,
    /// `completed_at` is set, and the full report is returned.
    pub fn submit(&mut self, catalog: &QuestionCatalog) -> Result<ScoreReport, RunError> {
        if !matches!(self.status, RunStatus::InProgress | RunStatus::Paused) {
            return Err(self.invalid_transition("COMPLETED"));
        }

        let gate = validate(catalog, &self.answers, &self.evidence);
        if !gate.is_submittable() {
            tracing::info!(
                run = %self.id,
                blocking = gate.blocking.len(),
                "submission refused by validation gate"
            );
            return Err(RunError::ValidationFailed {
                blocking: gate.blocking,
            });
        }

        let report = score(catalog, &self.answers);
        self.overall_score = Some(report.overall);
        self.completed_at = Some(Timestamp::now());
        self.do_transition(RunStatus::Completed, "run submitted");
        tracing::info!(run = %self.id, score = report.overall, "run completed");
        Ok(report)
    }

    /// Check the deletion policy: only pre-start runs may be destroyed.
    ///
    /// Active and completed runs are archived, never deleted — enforced
    /// here, not by storage.
    pub fn ensure_deletable(&self) -> Result<(), RunError> {
        if self.status.is_pre_start() {
            Ok(())
        } else {
            Err(RunError::CannotDeleteActiveRun {
                status: self.status,
            })
        }
    }

    /// Produce a fresh run from a completed one, against the same
    /// template or an updated one. All answers and evidence are reset;
    /// the source run is never mutated.
    pub fn clone_for_rerun(&self, template_id: Option<TemplateId>) -> Result<Run, RunError> {
        if self.status != RunStatus::Completed {
            return Err(self.invalid_transition("clone"));
        }
        let run = Run::new(template_id.unwrap_or_else(|| self.template_id.clone()));
        tracing::info!(source = %self.id, clone = %run.id, "run cloned for rerun");
        Ok(run)
    }

    // ── Answer and evidence mutation ─────────────────────────────────

    /// Record (or overwrite) the answer value for a question.
    ///
    /// # Errors
    ///
    /// - [`RunError::RunNotMutable`] on a completed run.
    /// - [`RunError::UnknownQuestion`] if the token is not in the catalog.
    /// - [`RunError::TypeMismatch`] if the value's shape disagrees with
    ///   the question kind.
    /// - [`RunError::InvalidValue`] for an out-of-range scale rating or a
    ///   selection outside the option set.
    pub fn record_answer(
        &mut self,
        catalog: &QuestionCatalog,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<(), RunError> {
        self.ensure_editable()?;
        let question = catalog
            .get(question_id)
            .ok_or_else(|| RunError::UnknownQuestion {
                question: question_id.clone(),
            })?;

        if value.kind() != question.kind {
            return Err(RunError::TypeMismatch {
                question: question_id.clone(),
                expected: question.kind,
                got: value.kind(),
            });
        }
        match &value {
            AnswerValue::Scale(v) if !(SCALE_MIN..=SCALE_MAX).contains(v) => {
                return Err(RunError::InvalidValue {
                    question: question_id.clone(),
                    reason: format!("scale rating {v} outside {SCALE_MIN}..={SCALE_MAX}"),
                });
            }
            AnswerValue::MultipleChoice(choice)
                if !choice.trim().is_empty() && !question.options.contains(choice) =>
            {
                return Err(RunError::InvalidValue {
                    question: question_id.clone(),
                    reason: format!("{choice:?} is not one of the question's options"),
                });
            }
            _ => {}
        }

        self.touch();
        self.answers.get_or_create(question_id).value = Some(value);
        tracing::debug!(run = %self.id, question = %question_id, "answer recorded");
        Ok(())
    }

    /// Clear a question's value, leaving comment, flag, and evidence
    /// links in place. A no-op for questions never touched.
    pub fn clear_answer(&mut self, question_id: &QuestionId) -> Result<(), RunError> {
        self.ensure_editable()?;
        if self.answers.get(question_id).is_none() {
            return Ok(());
        }
        self.touch();
        self.answers.get_or_create(question_id).value = None;
        Ok(())
    }

    /// Set or clear the assessor comment on a question.
    pub fn set_comment(
        &mut self,
        question_id: &QuestionId,
        comment: Option<String>,
    ) -> Result<(), RunError> {
        self.ensure_editable()?;
        self.touch();
        self.answers.get_or_create(question_id).comment = comment;
        Ok(())
    }

    /// Flip the review flag on a question. Returns the new flag state.
    pub fn toggle_flag(&mut self, question_id: &QuestionId) -> Result<bool, RunError> {
        self.ensure_editable()?;
        self.touch();
        let answer = self.answers.get_or_create(question_id);
        answer.flagged = !answer.flagged;
        Ok(answer.flagged)
    }

    /// Register an uploaded evidence descriptor on the run.
    pub fn attach_evidence(&mut self, evidence: Evidence) -> Result<EvidenceId, RunError> {
        self.ensure_editable()?;
        self.touch();
        let id = evidence.id;
        tracing::debug!(run = %self.id, evidence = %id, name = %evidence.name, "evidence attached");
        self.evidence.add(evidence);
        Ok(id)
    }

    /// Link a registered evidence file to a question's answer.
    pub fn link_evidence(
        &mut self,
        catalog: &QuestionCatalog,
        question_id: &QuestionId,
        evidence_id: EvidenceId,
    ) -> Result<(), RunError> {
        self.ensure_editable()?;
        if catalog.get(question_id).is_none() {
            return Err(RunError::UnknownQuestion {
                question: question_id.clone(),
            });
        }
        if !self.evidence.contains(&evidence_id) {
            return Err(RunError::UnknownEvidence {
                evidence: evidence_id,
            });
        }
        self.touch();
        self.answers
            .get_or_create(question_id)
            .evidence_file_ids
            .insert(evidence_id);
        Ok(())
    }

    /// Record the closing remarks shown alongside the frozen score.
    pub fn set_overall_comments(&mut self, comments: Option<String>) -> Result<(), RunError> {
        self.ensure_editable()?;
        self.overall_comments = comments;
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Reject mutation on a completed run.
    fn ensure_editable(&self) -> Result<(), RunError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(RunError::RunNotMutable {
                status: self.status,
            })
        }
    }

    /// NOT_STARTED flips to DRAFT on the first recorded interaction; the
    /// two are otherwise equivalent pre-start states.
    fn touch(&mut self) {
        if self.status == RunStatus::NotStarted {
            self.do_transition(RunStatus::Draft, "first interaction");
        }
    }

    fn invalid_transition(&self, to: &str) -> RunError {
        RunError::InvalidTransition {
            from: self.status,
            to: to.to_string(),
        }
    }

    /// Record a status transition.
    fn do_transition(&mut self, to: RunStatus, reason: &str) {
        tracing::info!(run = %self.id, from = %self.status, to = %to, "run transition");
        self.transitions.push(RunTransitionRecord {
            from_status: self.status,
            to_status: to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.status = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

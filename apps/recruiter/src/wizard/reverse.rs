use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::backend::{fixtures, CompleteInterviewRequest};
use crate::errors::AppError;
use crate::models::application::{
    AnswerRecord, ApplicationId, ApplicationRecord, CandidateQuestionRecord,
};
use crate::models::chat::Transcript;
use crate::session::HandoffKey;
use crate::wizard::complete::{CompletionSummary, InterviewComplete};
use crate::wizard::validation::validate_question;
use crate::wizard::{Step, WizardContext};

pub const OPENING: &str = "Your turn! What would you like to ask the company? You can ask \
    about the team, the workflow, tools, culture or anything else you're curious about.";

pub const PENDING_REPLY: &str = "Looking into that...";

/// Step 4: the candidate interviews the company.
pub struct ReverseRecruitment {
    ctx: WizardContext,
    application_id: ApplicationId,
    answers: Vec<AnswerRecord>,
    candidate_questions: Vec<CandidateQuestionRecord>,
    transcript: Transcript,
    started_at: DateTime<Utc>,
    submitting: bool,
    completed: bool,
}

impl ReverseRecruitment {
    /// Direct entry: needs `applicationId` (else CV upload) and `interviewAnswers`
    /// (else the interview).
    pub fn enter(ctx: WizardContext) -> Result<Self, AppError> {
        let application_id: ApplicationId = ctx
            .session
            .require(HandoffKey::ApplicationId, Step::CvUpload)?;
        let answers: Vec<AnswerRecord> = ctx
            .session
            .require(HandoffKey::InterviewAnswers, Step::Interview)?;
        if answers.is_empty() {
            warn!("session: interviewAnswers is empty, redirecting to {}", Step::Interview);
            return Err(AppError::MissingState {
                key: HandoffKey::InterviewAnswers,
                redirect: Step::Interview,
            });
        }
        Ok(Self::start(ctx, application_id, answers, None))
    }

    /// Only reachable from a finished interview or from `enter`.
    pub(crate) fn start(
        ctx: WizardContext,
        application_id: ApplicationId,
        answers: Vec<AnswerRecord>,
        interview_started_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut transcript = Transcript::default();
        transcript.system(OPENING);

        Self {
            ctx,
            application_id,
            answers,
            candidate_questions: Vec::new(),
            transcript,
            started_at: interview_started_at.unwrap_or_else(Utc::now),
            submitting: false,
            completed: false,
        }
    }

    /// Prompts offered as one-click questions.
    pub fn suggested_questions() -> Vec<&'static str> {
        fixtures::CANNED_ANSWERS.iter().map(|(q, _)| *q).collect()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn candidate_questions(&self) -> &[CandidateQuestionRecord] {
        &self.candidate_questions
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True once `finish` has succeeded. Nothing further can be sent from this step.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.completed {
            return Err(AppError::Validation(
                "This interview has already been completed".to_string(),
            ));
        }
        Ok(())
    }

    /// Sends one question and appends the recruiter's answer to the transcript.
    pub async fn ask(&mut self, question: &str) -> Result<&CandidateQuestionRecord, AppError> {
        self.ensure_open()?;
        validate_question(question)?;

        self.transcript.candidate(question);
        self.transcript.system(PENDING_REPLY);

        self.submitting = true;
        let result = self
            .ctx
            .backend
            .submit_candidate_question(&self.application_id, question)
            .await;
        self.submitting = false;

        let answer = match result {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Candidate question for {} failed: {e}", self.application_id);
                self.transcript.pop();
                return Err(e);
            }
        };

        self.transcript.replace_last(answer.clone());
        self.candidate_questions.push(CandidateQuestionRecord {
            question: question.to_string(),
            answer,
        });
        Ok(&self.candidate_questions[self.candidate_questions.len() - 1])
    }

    /// Terminal call. On success every wizard key is dropped and the step is closed.
    pub async fn finish(&mut self) -> Result<InterviewComplete, AppError> {
        self.ensure_open()?;
        let request = CompleteInterviewRequest {
            answers: self.answers.clone(),
            candidate_questions: self.candidate_questions.clone(),
        };

        self.submitting = true;
        let result = self
            .ctx
            .backend
            .complete_interview(&self.application_id, &request)
            .await;
        self.submitting = false;
        let report = result?;
        self.completed = true;

        let match_percentage = self
            .ctx
            .session
            .get::<ApplicationRecord>(HandoffKey::ApplicationData)
            .ok()
            .flatten()
            .map(|record| record.match_percentage);
        self.ctx.session.clear_wizard();

        info!(
            "Interview for application {} completed ({} answers, {} candidate questions)",
            self.application_id,
            self.answers.len(),
            self.candidate_questions.len()
        );

        let completed_at = Utc::now();
        Ok(InterviewComplete::new(CompletionSummary {
            application_id: self.application_id.clone(),
            report_url: report.report_url,
            message: report.message,
            match_percentage,
            questions_answered: self.answers.len(),
            questions_asked: self.candidate_questions.len(),
            duration: completed_at - self.started_at,
            completed_at,
        }))
    }
}

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::backend::SubmitAnswerRequest;
use crate::errors::AppError;
use crate::models::application::{AnswerRecord, ApplicationId, InterviewQuestion};
use crate::models::chat::Transcript;
use crate::session::HandoffKey;
use crate::wizard::reverse::ReverseRecruitment;
use crate::wizard::validation::{answer_long_enough, validate_answer};
use crate::wizard::{Step, WizardContext};

pub const GREETING: &str = "Hi! I'm the Rocket Virtual Recruiter and I'll run your interview \
    today. I've prepared a few questions based on your CV and the role's requirements. \
    Let's begin!";

pub const CLOSING: &str = "Thank you for your answers! Next up is the part where you can ask \
    the company questions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The next question is now current.
    Next,
    /// That was the last question; `interviewAnswers` has been published.
    Finished,
}

/// Step 3: a scripted Q&A chat, one question at a time, strictly in order.
pub struct Interview {
    ctx: WizardContext,
    application_id: ApplicationId,
    questions: Vec<InterviewQuestion>,
    answers: Vec<AnswerRecord>,
    transcript: Transcript,
    started_at: DateTime<Utc>,
    submitting: bool,
}

impl Interview {
    /// Direct entry: needs `applicationId`, otherwise back to CV upload.
    pub async fn enter(ctx: WizardContext) -> Result<Self, AppError> {
        let application_id: ApplicationId = ctx
            .session
            .require(HandoffKey::ApplicationId, Step::CvUpload)?;
        Self::start(ctx, application_id).await
    }

    /// Fetches the question list and opens the chat with the first question.
    pub async fn start(
        ctx: WizardContext,
        application_id: ApplicationId,
    ) -> Result<Self, AppError> {
        let questions = ctx
            .backend
            .get_interview_questions(&application_id)
            .await?;

        let Some(first) = questions.first() else {
            return Err(AppError::Protocol(format!(
                "no interview questions returned for application {application_id}"
            )));
        };

        let mut transcript = Transcript::default();
        transcript.system(GREETING);
        transcript.system(first.question.clone());

        info!(
            "Interview started for application {application_id} ({} questions)",
            questions.len()
        );

        Ok(Self {
            ctx,
            application_id,
            questions,
            answers: Vec::new(),
            transcript,
            started_at: Utc::now(),
            submitting: false,
        })
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    pub fn questions(&self) -> &[InterviewQuestion] {
        &self.questions
    }

    /// `None` once every question is answered.
    pub fn current_question(&self) -> Option<&InterviewQuestion> {
        self.questions.get(self.answers.len())
    }

    /// (1-based index of the current question, total). Index stays at total when finished.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.answers.len() + 1).min(total), total)
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit action is enabled for this draft.
    pub fn can_submit(&self, draft: &str) -> bool {
        !self.submitting && !self.is_finished() && answer_long_enough(draft)
    }

    /// Answers the current question. Rejected drafts make no backend call.
    pub async fn submit_answer(&mut self, draft: &str) -> Result<AnswerOutcome, AppError> {
        validate_answer(draft)?;
        let question = self
            .current_question()
            .cloned()
            .ok_or_else(|| AppError::Validation("All questions have been answered".to_string()))?;

        let request = SubmitAnswerRequest {
            question_id: question.id.clone(),
            answer: draft.to_string(),
        };

        self.submitting = true;
        let result = self
            .ctx
            .backend
            .submit_answer(&self.application_id, &request)
            .await;
        self.submitting = false;
        result?;

        self.transcript.candidate(draft);
        self.answers.push(AnswerRecord {
            question_id: question.id,
            answer: draft.to_string(),
        });

        match self.current_question() {
            Some(next) => {
                debug!(
                    "Application {}: moving to question {}",
                    self.application_id, next.id
                );
                let text = next.question.clone();
                self.transcript.system(text);
                Ok(AnswerOutcome::Next)
            }
            None => {
                self.transcript.system(CLOSING);
                self.ctx
                    .session
                    .put(HandoffKey::InterviewAnswers, &self.answers)?;
                info!(
                    "Application {}: all {} questions answered",
                    self.application_id,
                    self.answers.len()
                );
                Ok(AnswerOutcome::Finished)
            }
        }
    }

    /// Hands the full answer set to the reverse-recruitment step.
    pub fn into_reverse(self) -> Result<ReverseRecruitment, AppError> {
        if !self.is_finished() {
            return Err(AppError::Validation(format!(
                "{} of {} questions answered",
                self.answers.len(),
                self.questions.len()
            )));
        }
        Ok(ReverseRecruitment::start(
            self.ctx,
            self.application_id,
            self.answers,
            Some(self.started_at),
        ))
    }
}

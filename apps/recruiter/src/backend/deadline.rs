//! Per-call timeout for any `RecruitingBackend`.
//!
//! A call that outlives the deadline resolves to `AppError::Timeout` and its future
//! is dropped, so a late reply is discarded instead of reaching the caller.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::backend::wire::{
    AnalyzeCvRequest, CompleteInterviewRequest, CompletionReport, RecommendationRequest,
    SubmitAnswerRequest,
};
use crate::backend::{Operation, RecruitingBackend};
use crate::errors::AppError;
use crate::models::application::{
    ApplicationId, ApplicationRecord, ApplicationSummary, InterviewQuestion,
};
use crate::models::job::{JobPosting, JobRecommendation};

pub struct Deadline<B> {
    inner: B,
    limit: Duration,
}

impl<B: RecruitingBackend> Deadline<B> {
    pub fn new(inner: B, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    async fn run<T, F>(&self, op: Operation, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{op} abandoned after {}ms", self.limit.as_millis());
                Err(AppError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl<B: RecruitingBackend> RecruitingBackend for Deadline<B> {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        self.run(Operation::ListJobs, self.inner.list_jobs()).await
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, AppError> {
        self.run(Operation::GetJob, self.inner.get_job(job_id)).await
    }

    async fn analyze_cv(&self, request: &AnalyzeCvRequest) -> Result<ApplicationRecord, AppError> {
        self.run(Operation::AnalyzeCv, self.inner.analyze_cv(request))
            .await
    }

    async fn get_interview_questions(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        self.run(
            Operation::GetInterviewQuestions,
            self.inner.get_interview_questions(application_id),
        )
        .await
    }

    async fn submit_answer(
        &self,
        application_id: &ApplicationId,
        request: &SubmitAnswerRequest,
    ) -> Result<(), AppError> {
        self.run(
            Operation::SubmitAnswer,
            self.inner.submit_answer(application_id, request),
        )
        .await
    }

    async fn submit_candidate_question(
        &self,
        application_id: &ApplicationId,
        question: &str,
    ) -> Result<String, AppError> {
        self.run(
            Operation::SubmitCandidateQuestion,
            self.inner.submit_candidate_question(application_id, question),
        )
        .await
    }

    async fn complete_interview(
        &self,
        application_id: &ApplicationId,
        request: &CompleteInterviewRequest,
    ) -> Result<CompletionReport, AppError> {
        self.run(
            Operation::CompleteInterview,
            self.inner.complete_interview(application_id, request),
        )
        .await
    }

    async fn get_recommended_jobs(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<JobRecommendation>, AppError> {
        self.run(
            Operation::GetRecommendedJobs,
            self.inner.get_recommended_jobs(request),
        )
        .await
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, AppError> {
        self.run(Operation::ListApplications, self.inner.list_applications())
            .await
    }
}

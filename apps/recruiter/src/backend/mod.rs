//! Recruiting Backend client: one async operation per backend capability.
//!
//! `RecruitingBackend` is the seam. `HttpBackend` talks to a real service,
//! `MockBackend` answers in-process with fixed, deterministic data, and `Deadline`
//! wraps either one with an explicit per-call timeout.
//!
//! Callers hold an `Arc<dyn RecruitingBackend>` and never know which one they got.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::application::{
    ApplicationId, ApplicationRecord, ApplicationSummary, InterviewQuestion,
};
use crate::models::job::{JobPosting, JobRecommendation};

pub mod deadline;
pub mod fixtures;
pub mod http;
pub mod mock;
pub mod recommend;
pub mod wire;

pub use deadline::Deadline;
pub use http::HttpBackend;
pub use mock::MockBackend;
pub use wire::{
    AnalyzeCvRequest, CompleteInterviewRequest, CompletionReport, RecommendationRequest,
    SubmitAnswerRequest,
};

/// Names every backend operation, for logging, call logs and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListJobs,
    GetJob,
    AnalyzeCv,
    GetInterviewQuestions,
    SubmitAnswer,
    SubmitCandidateQuestion,
    CompleteInterview,
    GetRecommendedJobs,
    ListApplications,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListJobs => "listJobs",
            Operation::GetJob => "getJob",
            Operation::AnalyzeCv => "analyzeCv",
            Operation::GetInterviewQuestions => "getInterviewQuestions",
            Operation::SubmitAnswer => "submitAnswer",
            Operation::SubmitCandidateQuestion => "submitCandidateQuestion",
            Operation::CompleteInterview => "completeInterview",
            Operation::GetRecommendedJobs => "getRecommendedJobs",
            Operation::ListApplications => "listApplications",
        };
        f.write_str(name)
    }
}

/// The Recruiting Backend contract. Implement this to swap transports without
/// touching the wizard steps or listing views.
#[async_trait]
pub trait RecruitingBackend: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError>;

    /// Fails with `NotFound` for an unknown id.
    async fn get_job(&self, job_id: &str) -> Result<JobPosting, AppError>;

    async fn analyze_cv(&self, request: &AnalyzeCvRequest) -> Result<ApplicationRecord, AppError>;

    /// Ordered, never empty.
    async fn get_interview_questions(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<InterviewQuestion>, AppError>;

    async fn submit_answer(
        &self,
        application_id: &ApplicationId,
        request: &SubmitAnswerRequest,
    ) -> Result<(), AppError>;

    /// Returns the recruiter's answer text.
    async fn submit_candidate_question(
        &self,
        application_id: &ApplicationId,
        question: &str,
    ) -> Result<String, AppError>;

    async fn complete_interview(
        &self,
        application_id: &ApplicationId,
        request: &CompleteInterviewRequest,
    ) -> Result<CompletionReport, AppError>;

    /// Excludes the current posting, sorted by descending match, at most 4 entries.
    async fn get_recommended_jobs(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<JobRecommendation>, AppError>;

    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, AppError>;
}

/// Builds the backend selected by config, always behind a `Deadline`.
pub fn from_config(config: &Config) -> Result<Arc<dyn RecruitingBackend>, AppError> {
    let backend: Arc<dyn RecruitingBackend> = match &config.backend_url {
        Some(url) => {
            info!("Using HTTP recruiting backend at {url}");
            Arc::new(Deadline::new(
                HttpBackend::new(url.clone(), config.request_timeout)?,
                config.request_timeout,
            ))
        }
        None => {
            info!(
                "Using simulated recruiting backend (latency: {})",
                config.mock_latency
            );
            let mock = if config.mock_latency {
                MockBackend::new()
            } else {
                MockBackend::instant()
            };
            Arc::new(Deadline::new(mock, config.request_timeout))
        }
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_operation_names_match_contract() {
        assert_eq!(Operation::AnalyzeCv.to_string(), "analyzeCv");
        assert_eq!(
            Operation::SubmitCandidateQuestion.to_string(),
            "submitCandidateQuestion"
        );
    }

    #[tokio::test]
    async fn test_from_config_defaults_to_mock() {
        let config = Config {
            backend_url: None,
            request_timeout: Duration::from_secs(5),
            mock_latency: false,
            port: 8080,
            rust_log: "info".to_string(),
        };
        let backend = from_config(&config).unwrap();
        let jobs = backend.list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 6);
    }
}

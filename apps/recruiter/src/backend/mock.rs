//! Deterministic in-process Recruiting Backend.
//!
//! Serves the canned payloads from `fixtures`, optionally sleeping for the latencies
//! the hosted service shows. Every call is appended to a call log, and individual
//! operations can be told to fail with a `NetworkError`; both exist so tests can
//! observe exactly which round trips a wizard step made.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::backend::wire::{
    AnalyzeCvRequest, CompleteInterviewRequest, CompletionReport, RecommendationRequest,
    SubmitAnswerRequest,
};
use crate::backend::{fixtures, recommend, Operation, RecruitingBackend};
use crate::errors::AppError;
use crate::models::application::{
    ApplicationId, ApplicationRecord, ApplicationSummary, InterviewQuestion,
};
use crate::models::job::{JobPosting, JobRecommendation};
use crate::wizard::validation::{validate_cv_text, validate_email};

/// How application ids are minted.
#[derive(Debug)]
enum IdStrategy {
    /// `app_` + 9 random characters.
    Random,
    /// `app_000000001`, `app_000000002`, …
    Sequential(AtomicU32),
}

pub struct MockBackend {
    latency: bool,
    ids: IdStrategy,
    calls: Mutex<Vec<Operation>>,
    failing: Mutex<HashSet<Operation>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Simulated latency, random application ids.
    pub fn new() -> Self {
        Self {
            latency: true,
            ids: IdStrategy::Random,
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// No latency, random application ids.
    pub fn instant() -> Self {
        Self {
            latency: false,
            ..Self::new()
        }
    }

    /// No latency and sequential application ids: fully reproducible.
    pub fn deterministic() -> Self {
        Self {
            latency: false,
            ids: IdStrategy::Sequential(AtomicU32::new(0)),
            ..Self::new()
        }
    }

    /// Makes every subsequent call of `op` fail with a `NetworkError`.
    pub fn fail_on(&self, op: Operation) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&op);
    }

    /// Operations received so far, in order.
    pub fn calls(&self) -> Vec<Operation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        self.calls().iter().filter(|c| **c == op).count()
    }

    fn next_application_id(&self) -> ApplicationId {
        match &self.ids {
            IdStrategy::Random => {
                let token = Uuid::new_v4().simple().to_string();
                ApplicationId::new(format!("app_{}", &token[..9]))
            }
            IdStrategy::Sequential(counter) => {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                ApplicationId::new(format!("app_{n:09}"))
            }
        }
    }

    /// Records the call, sleeps if latency is on, then applies failure injection.
    async fn enter(&self, op: Operation) -> Result<(), AppError> {
        debug!("mock backend: {op}");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);

        if self.latency {
            tokio::time::sleep(simulated_latency(op)).await;
        }

        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&op);
        if failing {
            return Err(AppError::Network(format!("{op} failed: connection reset")));
        }
        Ok(())
    }
}

fn simulated_latency(op: Operation) -> Duration {
    let millis = match op {
        Operation::ListJobs => 500,
        Operation::GetJob => 300,
        Operation::AnalyzeCv => 2000,
        Operation::GetInterviewQuestions => 500,
        Operation::SubmitAnswer => 500,
        Operation::SubmitCandidateQuestion => 1500,
        Operation::CompleteInterview => 1000,
        Operation::GetRecommendedJobs => 1000,
        Operation::ListApplications => 500,
    };
    Duration::from_millis(millis)
}

/// Canned recruiter answer for the first phrase contained in the question, or the fallback.
pub fn canned_answer(question: &str) -> &'static str {
    let question = question.to_lowercase();
    fixtures::CANNED_ANSWERS
        .iter()
        .find(|(phrase, _)| question.contains(&phrase.to_lowercase()))
        .map(|(_, answer)| *answer)
        .unwrap_or(fixtures::FALLBACK_ANSWER)
}

/// Which of the posting's skills the CV mentions, phrased for the match screen.
fn cv_highlights(job_id: &str, cv_text: &str) -> Option<Vec<String>> {
    let job = fixtures::posting(job_id)?;
    let cv_lower = cv_text.to_lowercase();
    let highlights: Vec<String> = job
        .skills
        .iter()
        .filter(|skill| cv_lower.contains(&skill.to_lowercase()))
        .map(|skill| format!("Your CV mentions {skill}, which this role requires"))
        .collect();
    (!highlights.is_empty()).then_some(highlights)
}

#[async_trait]
impl RecruitingBackend for MockBackend {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        self.enter(Operation::ListJobs).await?;
        Ok(fixtures::catalog())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, AppError> {
        self.enter(Operation::GetJob).await?;
        fixtures::posting(job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    async fn analyze_cv(&self, request: &AnalyzeCvRequest) -> Result<ApplicationRecord, AppError> {
        self.enter(Operation::AnalyzeCv).await?;
        validate_email(&request.email)?;
        validate_cv_text(&request.cv_text)?;

        Ok(ApplicationRecord {
            application_id: self.next_application_id(),
            match_percentage: fixtures::ANALYSIS_MATCH_PERCENTAGE,
            strengths: fixtures::ANALYSIS_STRENGTHS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            gaps: fixtures::ANALYSIS_GAPS.iter().map(|s| s.to_string()).collect(),
            summary: fixtures::ANALYSIS_SUMMARY.to_string(),
            cv_highlights: cv_highlights(&request.job_id, &request.cv_text),
        })
    }

    async fn get_interview_questions(
        &self,
        _application_id: &ApplicationId,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        self.enter(Operation::GetInterviewQuestions).await?;
        Ok(fixtures::interview_questions())
    }

    async fn submit_answer(
        &self,
        _application_id: &ApplicationId,
        _request: &SubmitAnswerRequest,
    ) -> Result<(), AppError> {
        self.enter(Operation::SubmitAnswer).await
    }

    async fn submit_candidate_question(
        &self,
        _application_id: &ApplicationId,
        question: &str,
    ) -> Result<String, AppError> {
        self.enter(Operation::SubmitCandidateQuestion).await?;
        Ok(canned_answer(question).to_string())
    }

    async fn complete_interview(
        &self,
        application_id: &ApplicationId,
        _request: &CompleteInterviewRequest,
    ) -> Result<CompletionReport, AppError> {
        self.enter(Operation::CompleteInterview).await?;
        Ok(CompletionReport {
            success: true,
            report_url: format!("/reports/report_{application_id}.pdf"),
            message: "Interview completed successfully".to_string(),
        })
    }

    async fn get_recommended_jobs(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<JobRecommendation>, AppError> {
        self.enter(Operation::GetRecommendedJobs).await?;
        Ok(recommend::recommend(&fixtures::catalog(), request))
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, AppError> {
        self.enter(Operation::ListApplications).await?;
        Ok(fixtures::applications())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(email: &str, cv_text: &str) -> AnalyzeCvRequest {
        AnalyzeCvRequest {
            job_id: "1".to_string(),
            cv_text: cv_text.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_analyze_cv_scenario() {
        let backend = MockBackend::instant();
        let record = backend
            .analyze_cv(&analyze("a@b.com", "5 years React and TypeScript"))
            .await
            .unwrap();

        assert_eq!(record.match_percentage, 82);
        assert!(!record.strengths.is_empty());
        assert!(record.application_id.as_str().starts_with("app_"));
        assert_eq!(record.application_id.as_str().len(), 13);
        assert_eq!(record.highlights().len(), 2);
    }

    #[tokio::test]
    async fn test_analyze_cv_repeat_gives_new_id_same_scoring() {
        let backend = MockBackend::deterministic();
        let input = analyze("a@b.com", "5 years React and TypeScript");
        let first = backend.analyze_cv(&input).await.unwrap();
        let second = backend.analyze_cv(&input).await.unwrap();

        assert_ne!(first.application_id, second.application_id);
        assert_eq!(first.application_id.as_str(), "app_000000001");
        assert_eq!(first.match_percentage, second.match_percentage);
        assert_eq!(first.strengths, second.strengths);
        assert_eq!(first.gaps, second.gaps);
    }

    #[tokio::test]
    async fn test_analyze_cv_rejects_bad_input() {
        let backend = MockBackend::instant();
        let err = backend
            .analyze_cv(&analyze("not-an-email", "React"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = backend.analyze_cv(&analyze("a@b.com", "   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_job_unknown_is_not_found() {
        let backend = MockBackend::instant();
        let err = backend.get_job("999").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let job = backend.get_job("2").await.unwrap();
        assert_eq!(job.company, "StartupXYZ");
    }

    #[test]
    fn test_canned_answer_matches_case_insensitive_substring() {
        let answer = canned_answer("Hi! what TOOLS do you use? Just curious.");
        assert!(answer.contains("Kubernetes"));
    }

    #[test]
    fn test_canned_answer_falls_back() {
        assert_eq!(canned_answer("Do you have a dog-friendly office?"), fixtures::FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_failure_injection_and_recovery() {
        let backend = MockBackend::instant();
        backend.fail_on(Operation::ListJobs);
        let err = backend.list_jobs().await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));

        backend.recover(Operation::ListJobs);
        assert!(backend.list_jobs().await.is_ok());
        assert_eq!(backend.call_count(Operation::ListJobs), 2);
    }

    #[tokio::test]
    async fn test_complete_interview_report_url() {
        let backend = MockBackend::instant();
        let report = backend
            .complete_interview(
                &ApplicationId::new("app_xyz"),
                &CompleteInterviewRequest {
                    answers: vec![],
                    candidate_questions: vec![],
                },
            )
            .await
            .unwrap();
        assert!(report.success);
        assert_eq!(report.report_url, "/reports/report_app_xyz.pdf");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_elapses() {
        let backend = MockBackend::new();
        let started = tokio::time::Instant::now();
        backend.get_job("1").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}

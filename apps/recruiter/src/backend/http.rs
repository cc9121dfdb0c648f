//! Recruiting Backend over HTTP/JSON.

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::backend::wire::{
    AckResponse, AnalyzeCvRequest, ApplicationsResponse, CandidateAnswerResponse,
    CandidateQuestionRequest, CompleteInterviewRequest, CompletionReport, ErrorEnvelope,
    JobResponse, JobsResponse, QuestionsResponse, RecommendationRequest,
    RecommendationsResponse, SubmitAnswerRequest,
};
use crate::backend::RecruitingBackend;
use crate::errors::AppError;
use crate::models::application::{
    ApplicationId, ApplicationRecord, ApplicationSummary, InterviewQuestion,
};
use crate::models::job::{JobPosting, JobRecommendation};

const JOBS_PATH: &[&str] = &["api", "jobs"];
const RECOMMENDATIONS_PATH: &[&str] = &["api", "jobs", "recommendations"];
const APPLICATIONS_PATH: &[&str] = &["api", "applications"];
const ANALYZE_CV_PATH: &[&str] = &["api", "applications", "analyze-cv"];

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("Invalid backend URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Backend URL '{base_url}' cannot carry a path").into());
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Appends `path` to the base URL. Each segment is percent-encoded on its own, so an
    /// id containing `/`, `?` or `#` stays a single segment.
    fn url(&self, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }

    /// `..` and `.` would be resolved by the URL parser rather than sent.
    fn id_segment<'a>(&self, id: &'a str, what: &str) -> Result<&'a str, AppError> {
        match id {
            "" | "." | ".." => Err(AppError::NotFound(format!("{what} '{id}' not found"))),
            _ => Ok(id),
        }
    }

    fn application_url(
        &self,
        application_id: &ApplicationId,
        suffix: &str,
    ) -> Result<Url, AppError> {
        let id = self.id_segment(application_id.as_str(), "Application")?;
        Ok(self.url(&["api", "applications", id, suffix]))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AppError> {
        debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(self.timeout)
        } else {
            AppError::from(e)
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, AppError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Recruiting backend returned {status}: {body}");
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => match envelope.error.code.as_str() {
                    "NOT_FOUND" => AppError::NotFound(envelope.error.message),
                    "VALIDATION_ERROR" => AppError::Validation(envelope.error.message),
                    _ => AppError::Network(envelope.error.message),
                },
                Err(_) => AppError::Network(format!("HTTP {status}")),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::Protocol(format!("could not decode response: {e}")))
    }
}

#[async_trait]
impl RecruitingBackend for HttpBackend {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let response: JobsResponse = self.get(self.url(JOBS_PATH)).await?;
        Ok(response.jobs)
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, AppError> {
        let id = self.id_segment(job_id, "Job")?;
        let response: JobResponse = self.get(self.url(&["api", "jobs", id])).await?;
        Ok(response.job)
    }

    async fn analyze_cv(&self, request: &AnalyzeCvRequest) -> Result<ApplicationRecord, AppError> {
        self.post(self.url(ANALYZE_CV_PATH), request).await
    }

    async fn get_interview_questions(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let response: QuestionsResponse = self
            .get(self.application_url(application_id, "questions")?)
            .await?;
        Ok(response.questions)
    }

    async fn submit_answer(
        &self,
        application_id: &ApplicationId,
        request: &SubmitAnswerRequest,
    ) -> Result<(), AppError> {
        let ack: AckResponse = self
            .post(self.application_url(application_id, "answers")?, request)
            .await?;
        if !ack.success {
            return Err(AppError::Network(ack.message));
        }
        Ok(())
    }

    async fn submit_candidate_question(
        &self,
        application_id: &ApplicationId,
        question: &str,
    ) -> Result<String, AppError> {
        let body = CandidateQuestionRequest {
            question: question.to_string(),
        };
        let response: CandidateAnswerResponse = self
            .post(
                self.application_url(application_id, "candidate-questions")?,
                &body,
            )
            .await?;
        if !response.success {
            return Err(AppError::Network("candidate question was not accepted".to_string()));
        }
        Ok(response.answer)
    }

    async fn complete_interview(
        &self,
        application_id: &ApplicationId,
        request: &CompleteInterviewRequest,
    ) -> Result<CompletionReport, AppError> {
        let report: CompletionReport = self
            .post(self.application_url(application_id, "complete")?, request)
            .await?;
        if !report.success {
            return Err(AppError::Network(report.message));
        }
        Ok(report)
    }

    async fn get_recommended_jobs(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<JobRecommendation>, AppError> {
        let response: RecommendationsResponse =
            self.post(self.url(RECOMMENDATIONS_PATH), request).await?;
        Ok(response.recommendations)
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, AppError> {
        let response: ApplicationsResponse = self.get(self.url(APPLICATIONS_PATH)).await?;
        Ok(response.applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::backend::MockBackend;
    use crate::server::{build_router, state::AppState};

    /// Serves the simulated backend on a loopback port and returns a client for it.
    async fn spawn_backend() -> HttpBackend {
        let state = AppState {
            backend: Arc::new(MockBackend::deterministic()),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        HttpBackend::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_application_url_layout() {
        let backend =
            HttpBackend::new("http://backend:9000/".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            backend
                .application_url(&ApplicationId::new("app_1"), "questions")
                .unwrap()
                .as_str(),
            "http://backend:9000/api/applications/app_1/questions"
        );
    }

    #[test]
    fn test_ids_stay_one_path_segment() {
        let backend =
            HttpBackend::new("http://backend:9000/v1".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            backend.url(&["api", "jobs", "2/../1?x#frag"]).as_str(),
            "http://backend:9000/v1/api/jobs/2%2F..%2F1%3Fx%23frag"
        );
        assert!(matches!(
            backend.application_url(&ApplicationId::new(".."), "complete"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(HttpBackend::new("not a url".to_string(), Duration::from_secs(1)).is_err());
        assert!(HttpBackend::new("mailto:a@b.com".to_string(), Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unknown_job_ids_with_url_syntax_are_not_found() {
        let backend = spawn_backend().await;
        for id in ["1?x", "1#frag", "2/../1", "..", ""] {
            let err = backend.get_job(id).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{id}: got {err:?}");
        }
        assert_eq!(backend.get_job("1").await.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_round_trip_against_served_mock() {
        let backend = spawn_backend().await;

        let jobs = backend.list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 6);

        let record = backend
            .analyze_cv(&AnalyzeCvRequest {
                job_id: "1".to_string(),
                cv_text: "5 years React and TypeScript".to_string(),
                email: "a@b.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(record.match_percentage, 82);
        assert_eq!(record.application_id.as_str(), "app_000000001");

        let questions = backend
            .get_interview_questions(&record.application_id)
            .await
            .unwrap();
        assert_eq!(questions.len(), 3);

        let answer = backend
            .submit_candidate_question(&record.application_id, "What tools do you use?")
            .await
            .unwrap();
        assert!(answer.contains("React"));

        let recs = backend
            .get_recommended_jobs(&RecommendationRequest {
                cv_text: "React".to_string(),
                current_job_id: "1".to_string(),
                match_percentage: 82,
            })
            .await
            .unwrap();
        assert!(recs.len() <= 4);
        assert!(recs.iter().all(|r| r.job.id != "1"));
    }

    #[tokio::test]
    async fn test_error_codes_survive_transport() {
        let backend = spawn_backend().await;

        let err = backend.get_job("404").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

        let err = backend
            .analyze_cv(&AnalyzeCvRequest {
                job_id: "1".to_string(),
                cv_text: "React".to_string(),
                email: "nobody".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            HttpBackend::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = backend.list_jobs().await.unwrap_err();
        assert!(err.is_retryable());
    }
}

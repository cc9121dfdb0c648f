// Request and response bodies exchanged with the Recruiting Backend.
// Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::models::application::{
    AnswerRecord, ApplicationSummary, CandidateQuestionRecord, InterviewQuestion,
};
use crate::models::job::{JobPosting, JobRecommendation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: JobPosting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCvRequest {
    pub job_id: String,
    pub cv_text: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateQuestionRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAnswerResponse {
    pub success: bool,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInterviewRequest {
    pub answers: Vec<AnswerRecord>,
    pub candidate_questions: Vec<CandidateQuestionRecord>,
}

/// Response of the terminal `completeInterview` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub success: bool,
    pub report_url: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub cv_text: String,
    pub current_job_id: String,
    pub match_percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<JobRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<ApplicationSummary>,
}

/// Error envelope produced by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

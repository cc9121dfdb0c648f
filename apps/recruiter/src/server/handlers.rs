//! Axum route handlers exposing a `RecruitingBackend` over HTTP/JSON.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::backend::wire::{
    AckResponse, AnalyzeCvRequest, ApplicationsResponse, CandidateAnswerResponse,
    CandidateQuestionRequest, CompleteInterviewRequest, CompletionReport, JobResponse,
    JobsResponse, QuestionsResponse, RecommendationRequest, RecommendationsResponse,
    SubmitAnswerRequest,
};
use crate::errors::AppError;
use crate::models::application::{ApplicationId, ApplicationRecord};
use crate::server::state::AppState;

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = state.backend.list_jobs().await?;
    Ok(Json(JobsResponse { jobs }))
}

/// GET /api/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, AppError> {
    let job = state.backend.get_job(&job_id).await?;
    Ok(Json(JobResponse { job }))
}

/// POST /api/jobs/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let recommendations = state.backend.get_recommended_jobs(&request).await?;
    Ok(Json(RecommendationsResponse { recommendations }))
}

/// POST /api/applications/analyze-cv
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeCvRequest>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let record = state.backend.analyze_cv(&request).await?;
    Ok(Json(record))
}

/// GET /api/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    let applications = state.backend.list_applications().await?;
    Ok(Json(ApplicationsResponse { applications }))
}

/// GET /api/applications/:application_id/questions
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions = state
        .backend
        .get_interview_questions(&ApplicationId::new(application_id))
        .await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/applications/:application_id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<AckResponse>, AppError> {
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    state
        .backend
        .submit_answer(&ApplicationId::new(application_id), &request)
        .await?;
    Ok(Json(AckResponse {
        success: true,
        message: "Answer submitted successfully".to_string(),
    }))
}

/// POST /api/applications/:application_id/candidate-questions
pub async fn handle_candidate_question(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    Json(request): Json<CandidateQuestionRequest>,
) -> Result<Json<CandidateAnswerResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let answer = state
        .backend
        .submit_candidate_question(&ApplicationId::new(application_id), &request.question)
        .await?;
    Ok(Json(CandidateAnswerResponse {
        success: true,
        answer,
    }))
}

/// POST /api/applications/:application_id/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    Json(request): Json<CompleteInterviewRequest>,
) -> Result<Json<CompletionReport>, AppError> {
    let report = state
        .backend
        .complete_interview(&ApplicationId::new(application_id), &request)
        .await?;
    Ok(Json(report))
}

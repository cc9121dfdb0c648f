//! Client-side input checks. Anything rejected here never reaches the backend.

use crate::errors::AppError;

pub const MIN_ANSWER_CHARS: usize = 20;
pub const MAX_CV_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_CV_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Please enter your email address".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Please enter a valid email address".to_string()));
    }
    Ok(())
}

pub fn validate_cv_text(cv_text: &str) -> Result<(), AppError> {
    if cv_text.trim().is_empty() {
        return Err(AppError::Validation("Please paste your CV content".to_string()));
    }
    Ok(())
}

pub fn validate_cv_file(size_bytes: u64, mime: &str) -> Result<(), AppError> {
    if size_bytes > MAX_CV_FILE_BYTES {
        return Err(AppError::Validation("Maximum file size is 5MB".to_string()));
    }
    if !ACCEPTED_CV_MIME_TYPES.contains(&mime) {
        return Err(AppError::Validation(
            "Please upload a PDF or Word document".to_string(),
        ));
    }
    Ok(())
}

/// Counted on the trimmed text, in characters rather than bytes.
pub fn answer_long_enough(answer: &str) -> bool {
    answer.trim().chars().count() >= MIN_ANSWER_CHARS
}

pub fn validate_answer(answer: &str) -> Result<(), AppError> {
    if !answer_long_enough(answer) {
        return Err(AppError::Validation(format!(
            "Please provide a more detailed answer (at least {MIN_ANSWER_CHARS} characters)"
        )));
    }
    Ok(())
}

pub fn validate_question(question: &str) -> Result<(), AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation("Please enter a question".to_string()));
    }
    Ok(())
}

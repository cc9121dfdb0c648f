use tracing::{info, warn};

use crate::backend::AnalyzeCvRequest;
use crate::errors::AppError;
use crate::session::HandoffKey;
use crate::wizard::match_analysis::MatchAnalysis;
use crate::wizard::validation::{validate_cv_file, validate_cv_text, validate_email};
use crate::wizard::WizardContext;

/// Reference to an uploaded CV document. Only its name is forwarded for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvSource {
    /// No file picked yet.
    NoFile,
    File(CvFile),
    Text(String),
}

impl CvSource {
    /// The text handed to `analyzeCv` and stored under `cvText`.
    pub fn cv_text(&self) -> Option<String> {
        match self {
            CvSource::NoFile => None,
            CvSource::File(file) => Some(format!("CV from file: {}", file.name)),
            CvSource::Text(text) => Some(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvForm {
    pub email: String,
    pub source: CvSource,
}

impl CvForm {
    /// Checks the form in the order the candidate sees the messages.
    pub fn validate(&self) -> Result<String, AppError> {
        validate_email(&self.email)?;
        match &self.source {
            CvSource::NoFile => {
                return Err(AppError::Validation("Please upload a CV file".to_string()))
            }
            CvSource::File(file) => validate_cv_file(file.size_bytes, &file.mime)?,
            CvSource::Text(text) => validate_cv_text(text)?,
        }
        self.source
            .cv_text()
            .ok_or_else(|| AppError::Validation("Please upload a CV file".to_string()))
    }
}

/// Step 1: collect email and CV, run the analysis.
pub struct CvUpload {
    ctx: WizardContext,
    submitting: bool,
}

impl CvUpload {
    /// Always available; re-entering starts fresh.
    pub fn new(ctx: WizardContext) -> Self {
        Self {
            ctx,
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates locally, calls `analyzeCv`, publishes `applicationData` and `cvText`.
    pub async fn submit(&mut self, form: &CvForm) -> Result<MatchAnalysis, AppError> {
        let cv_text = form.validate()?;

        let request = AnalyzeCvRequest {
            job_id: self.ctx.job_id.clone(),
            cv_text: cv_text.clone(),
            email: form.email.trim().to_string(),
        };

        self.submitting = true;
        let result = self.ctx.backend.analyze_cv(&request).await;
        self.submitting = false;

        let record = result.map_err(|e| {
            warn!("CV analysis for job {} failed: {e}", self.ctx.job_id);
            e
        })?;

        self.ctx.session.put(HandoffKey::ApplicationData, &record)?;
        self.ctx.session.put(HandoffKey::CvText, &cv_text)?;
        info!(
            "CV analyzed for job {}: application {} at {}%",
            self.ctx.job_id, record.application_id, record.match_percentage
        );

        Ok(MatchAnalysis::from_record(
            self.ctx.clone(),
            record,
            Some(cv_text),
        ))
    }
}

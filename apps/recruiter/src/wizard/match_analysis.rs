use tracing::{debug, info, warn};

use crate::backend::RecommendationRequest;
use crate::errors::AppError;
use crate::models::application::{ApplicationId, ApplicationRecord, MatchBand};
use crate::models::job::JobRecommendation;
use crate::session::HandoffKey;
use crate::wizard::{Step, WizardContext};

/// Step 2: show the score, strengths and gaps. The candidate either browses
/// alternatives (stays here) or continues to the interview.
pub struct MatchAnalysis {
    ctx: WizardContext,
    record: ApplicationRecord,
    cv_text: Option<String>,
    alternatives: Option<Vec<JobRecommendation>>,
    submitting: bool,
}

impl MatchAnalysis {
    pub fn from_record(
        ctx: WizardContext,
        record: ApplicationRecord,
        cv_text: Option<String>,
    ) -> Self {
        Self {
            ctx,
            record,
            cv_text,
            alternatives: None,
            submitting: false,
        }
    }

    /// Direct entry: needs `applicationData`, otherwise back to CV upload.
    pub fn enter(ctx: WizardContext) -> Result<Self, AppError> {
        let record: ApplicationRecord = ctx
            .session
            .require(HandoffKey::ApplicationData, Step::CvUpload)?;
        let cv_text = ctx
            .session
            .get::<String>(HandoffKey::CvText)
            .unwrap_or_else(|e| {
                warn!("session: cvText unreadable ({e}), recommendations will use no CV text");
                None
            });
        Ok(Self::from_record(ctx, record, cv_text))
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn band(&self) -> MatchBand {
        self.record.band()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Recommendations currently on screen, if the modal is open.
    pub fn alternatives(&self) -> Option<&[JobRecommendation]> {
        self.alternatives.as_deref()
    }

    /// Fetches alternative postings and opens them as a modal. Does not advance.
    pub async fn request_alternatives(&mut self) -> Result<&[JobRecommendation], AppError> {
        let request = RecommendationRequest {
            cv_text: self.cv_text.clone().unwrap_or_default(),
            current_job_id: self.ctx.job_id.clone(),
            match_percentage: self.record.match_percentage,
        };

        self.submitting = true;
        let result = self.ctx.backend.get_recommended_jobs(&request).await;
        self.submitting = false;

        let recommendations = result?;
        debug!(
            "{} alternatives for application {}",
            recommendations.len(),
            self.record.application_id
        );
        Ok(self.alternatives.insert(recommendations).as_slice())
    }

    pub fn close_alternatives(&mut self) {
        self.alternatives = None;
    }

    /// Publishes `applicationId` and returns it for `Interview::start`.
    pub fn proceed(&self) -> Result<ApplicationId, AppError> {
        let id = self.record.application_id.clone();
        self.ctx.session.put(HandoffKey::ApplicationId, &id)?;
        info!("Application {id} continues to interview");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::backend::{MockBackend, Operation};
    use crate::session::SessionStore;
    use crate::wizard::cv_upload::{CvForm, CvSource, CvUpload};

    fn context(job_id: &str) -> (Arc<MockBackend>, WizardContext) {
        let backend = Arc::new(MockBackend::deterministic());
        let ctx = WizardContext::new(backend.clone(), SessionStore::new(), job_id);
        (backend, ctx)
    }

    async fn analyzed(ctx: &WizardContext) -> MatchAnalysis {
        CvUpload::new(ctx.clone())
            .submit(&CvForm {
                email: "a@b.com".to_string(),
                source: CvSource::Text("Docker, Kubernetes, AWS, React".to_string()),
            })
            .await
            .unwrap()
    }

    #[test]
    fn test_enter_without_application_data_redirects() {
        let (backend, ctx) = context("1");
        let err = MatchAnalysis::enter(ctx).err().unwrap();
        assert_eq!(err.redirect(), Some(Step::CvUpload));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_enter_reads_stored_record() {
        let (_, ctx) = context("1");
        let first = analyzed(&ctx).await;

        let reentered = MatchAnalysis::enter(ctx).unwrap();
        assert_eq!(reentered.record(), first.record());
        assert_eq!(reentered.band(), MatchBand::Excellent);
    }

    #[tokio::test]
    async fn test_unreadable_cv_text_still_enters() {
        let (_, ctx) = context("1");
        analyzed(&ctx).await;
        ctx.session.put(HandoffKey::CvText, &42).unwrap();

        let mut step = MatchAnalysis::enter(ctx).unwrap();
        assert_eq!(step.record().match_percentage, 82);
        assert!(step.request_alternatives().await.is_ok());
    }

    #[tokio::test]
    async fn test_alternatives_do_not_advance() {
        let (backend, ctx) = context("1");
        let mut step = analyzed(&ctx).await;

        let recs = step.request_alternatives().await.unwrap().to_vec();
        assert!(!recs.is_empty() && recs.len() <= 4);
        assert!(recs.iter().all(|r| r.job.id != "1"));
        assert!(step.alternatives().is_some());
        assert!(!ctx.session.contains(HandoffKey::ApplicationId));

        step.close_alternatives();
        assert!(step.alternatives().is_none());
        assert_eq!(backend.call_count(Operation::GetRecommendedJobs), 1);
    }

    #[tokio::test]
    async fn test_alternatives_failure_keeps_modal_closed() {
        let (backend, ctx) = context("1");
        let mut step = analyzed(&ctx).await;
        backend.fail_on(Operation::GetRecommendedJobs);

        assert!(step.request_alternatives().await.is_err());
        assert!(step.alternatives().is_none());
        assert!(!step.is_submitting());
    }

    #[tokio::test]
    async fn test_proceed_publishes_application_id() {
        let (_, ctx) = context("1");
        let step = analyzed(&ctx).await;
        let id = step.proceed().unwrap();

        let stored: ApplicationId = ctx
            .session
            .require(HandoffKey::ApplicationId, Step::CvUpload)
            .unwrap();
        assert_eq!(stored, id);
        assert_eq!(&id, &step.record().application_id);
    }
}

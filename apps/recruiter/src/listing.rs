//! Read-only views outside the wizard: the job board, a single posting and the
//! candidate's past applications.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::RecruitingBackend;
use crate::errors::AppError;
use crate::models::application::ApplicationSummary;
use crate::models::job::{JobPosting, Seniority};
use crate::wizard::Step;

pub const HOME_ROUTE: &str = "/";

/// Board filter. An empty search and no seniority match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search: String,
    pub seniority: Option<Seniority>,
}

impl JobFilter {
    /// Search hits title or company, case-insensitively.
    pub fn matches(&self, job: &JobPosting) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || job.title.to_lowercase().contains(&needle)
            || job.company.to_lowercase().contains(&needle);
        let level_ok = self.seniority.map_or(true, |s| job.seniority == s);
        text_ok && level_ok
    }

    pub fn apply<'a>(&self, jobs: &'a [JobPosting]) -> Vec<&'a JobPosting> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

pub struct JobBoard {
    jobs: Vec<JobPosting>,
}

impl JobBoard {
    pub async fn load(backend: &Arc<dyn RecruitingBackend>) -> Result<Self, AppError> {
        let jobs = backend.list_jobs().await?;
        debug!("Job board loaded with {} postings", jobs.len());
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn filter(&self, filter: &JobFilter) -> Vec<&JobPosting> {
        filter.apply(&self.jobs)
    }
}

pub struct JobDetails {
    job: JobPosting,
}

impl JobDetails {
    /// `Ok(None)` means the posting does not exist and the caller should go to
    /// `HOME_ROUTE`.
    pub async fn load(
        backend: &Arc<dyn RecruitingBackend>,
        job_id: &str,
    ) -> Result<Option<Self>, AppError> {
        match backend.get_job(job_id).await {
            Ok(job) => Ok(Some(Self { job })),
            Err(AppError::NotFound(msg)) => {
                warn!("Job {job_id} not found ({msg}), redirecting home");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn job(&self) -> &JobPosting {
        &self.job
    }

    /// Where the apply button leads. `None` once the candidate has applied.
    pub fn apply_route(&self) -> Option<String> {
        (!self.job.is_applied()).then(|| Step::CvUpload.route(&self.job.id))
    }
}

pub struct ApplicationsView {
    applications: Vec<ApplicationSummary>,
}

impl ApplicationsView {
    pub async fn load(backend: &Arc<dyn RecruitingBackend>) -> Result<Self, AppError> {
        let applications = backend.list_applications().await?;
        Ok(Self { applications })
    }

    pub fn applications(&self) -> &[ApplicationSummary] {
        &self.applications
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

/// First `n` skills for a card, plus how many were left out.
pub fn skill_preview(skills: &[String], n: usize) -> (&[String], usize) {
    let shown = n.min(skills.len());
    (&skills[..shown], skills.len() - shown)
}

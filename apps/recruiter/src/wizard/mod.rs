//! The five-step candidate journey: CV upload → match analysis → interview →
//! reverse recruitment → interview complete.
//!
//! Each step is a type. The in-order path hands the previous step's typed output
//! straight to the next constructor (`MatchAnalysis::from_record`,
//! `Interview::start`, `ReverseRecruitment::start`); the session store is only read
//! when a step is entered directly (`enter`), and a missing key there becomes
//! `AppError::MissingState` carrying the step to redirect to.
//!
//! Every action takes `&mut self`, so a step cannot issue a second backend call
//! while one is outstanding.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::backend::RecruitingBackend;
use crate::session::SessionStore;

pub mod complete;
pub mod cv_upload;
pub mod interview;
pub mod match_analysis;
pub mod reverse;
pub mod validation;

pub use complete::{CompletionSummary, InterviewComplete};
pub use cv_upload::{CvFile, CvForm, CvSource, CvUpload};
pub use interview::{AnswerOutcome, Interview};
pub use match_analysis::MatchAnalysis;
pub use reverse::ReverseRecruitment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    CvUpload,
    MatchAnalysis,
    Interview,
    ReverseRecruitment,
    InterviewComplete,
}

impl Step {
    pub const ORDER: [Step; 5] = [
        Step::CvUpload,
        Step::MatchAnalysis,
        Step::Interview,
        Step::ReverseRecruitment,
        Step::InterviewComplete,
    ];

    /// The only forward transition out of this step. `None` for the terminal step.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::CvUpload => Some(Step::MatchAnalysis),
            Step::MatchAnalysis => Some(Step::Interview),
            Step::Interview => Some(Step::ReverseRecruitment),
            Step::ReverseRecruitment => Some(Step::InterviewComplete),
            Step::InterviewComplete => None,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Step::CvUpload => "apply",
            Step::MatchAnalysis => "match",
            Step::Interview => "interview",
            Step::ReverseRecruitment => "reverse-recruitment",
            Step::InterviewComplete => "complete",
        }
    }

    pub fn route(self, job_id: &str) -> String {
        format!("/job/{job_id}/{}", self.slug())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CvUpload => "CvUpload",
            Step::MatchAnalysis => "MatchAnalysis",
            Step::Interview => "Interview",
            Step::ReverseRecruitment => "ReverseRecruitment",
            Step::InterviewComplete => "InterviewComplete",
        };
        f.write_str(name)
    }
}

/// What every step needs: the backend, the tab's session store and the posting applied to.
#[derive(Clone)]
pub struct WizardContext {
    pub backend: Arc<dyn RecruitingBackend>,
    pub session: SessionStore,
    pub job_id: String,
}

impl WizardContext {
    pub fn new(
        backend: Arc<dyn RecruitingBackend>,
        session: SessionStore,
        job_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            session,
            job_id: job_id.into(),
        }
    }

    /// The candidate leaves the flow; nothing from this application survives.
    pub fn abandon(&self) {
        info!("Wizard for job {} abandoned", self.job_id);
        self.session.clear_wizard();
    }

    pub fn route(&self, step: Step) -> String {
        step.route(&self.job_id)
    }
}

use chrono::{DateTime, Duration, Utc};

use crate::models::application::ApplicationId;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub application_id: ApplicationId,
    pub report_url: String,
    pub message: String,
    /// Known only if the analysis was still in the session when the interview ended.
    pub match_percentage: Option<u8>,
    pub questions_answered: usize,
    pub questions_asked: usize,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl CompletionSummary {
    /// Whole minutes, never below one.
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes().max(1)
    }
}

/// Step 5: terminal, read-only. The only way on is a fresh start from the job board.
#[derive(Debug, Clone)]
pub struct InterviewComplete {
    summary: CompletionSummary,
}

impl InterviewComplete {
    pub(crate) fn new(summary: CompletionSummary) -> Self {
        Self { summary }
    }

    pub fn summary(&self) -> &CompletionSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rounds_up_to_one_minute() {
        let summary = CompletionSummary {
            application_id: ApplicationId::new("app_1"),
            report_url: "/reports/report_app_1.pdf".to_string(),
            message: "Interview completed successfully".to_string(),
            match_percentage: Some(82),
            questions_answered: 3,
            questions_asked: 2,
            duration: Duration::seconds(20),
            completed_at: Utc::now(),
        };
        assert_eq!(summary.duration_minutes(), 1);

        let longer = CompletionSummary {
            duration: Duration::minutes(12),
            ..summary
        };
        assert_eq!(InterviewComplete::new(longer).summary().duration_minutes(), 12);
    }
}

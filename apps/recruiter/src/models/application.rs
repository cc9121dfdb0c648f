use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque application token issued by `analyzeCv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one CV analysis. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub match_percentage: u8, // 0 – 100
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_highlights: Option<Vec<String>>,
}

impl ApplicationRecord {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_percentage(self.match_percentage)
    }

    /// Highlights worth showing; an empty list is treated like an absent one.
    pub fn highlights(&self) -> &[String] {
        self.cv_highlights.as_deref().unwrap_or(&[])
    }
}

/// Coarse classification of a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Excellent, // ≥ 80
    Good,      // 50 – 79
    Weak,      // < 50
}

impl MatchBand {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            MatchBand::Excellent
        } else if percentage >= 50 {
            MatchBand::Good
        } else {
            MatchBand::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchBand::Excellent => "Excellent match!",
            MatchBand::Good => "Good match!",
            MatchBand::Weak => "There are some gaps, but let's talk about them",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: String,
    pub question: String,
    /// Minutes.
    pub estimated_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuestionRecord {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationProgress {
    Completed,
    InProgress,
    #[serde(other)]
    Pending,
}

impl ApplicationProgress {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationProgress::Completed => "Completed",
            ApplicationProgress::InProgress => "In Progress",
            ApplicationProgress::Pending => "Pending",
        }
    }
}

/// One row of the candidate's "my applications" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub status: ApplicationProgress,
    pub match_percentage: u8,
    pub applied_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(MatchBand::from_percentage(100), MatchBand::Excellent);
        assert_eq!(MatchBand::from_percentage(80), MatchBand::Excellent);
        assert_eq!(MatchBand::from_percentage(79), MatchBand::Good);
        assert_eq!(MatchBand::from_percentage(50), MatchBand::Good);
        assert_eq!(MatchBand::from_percentage(49), MatchBand::Weak);
        assert_eq!(MatchBand::from_percentage(0), MatchBand::Weak);
    }

    #[test]
    fn test_record_without_highlights() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "applicationId": "app_abc123xyz",
            "matchPercentage": 82,
            "strengths": ["React"],
            "gaps": ["AWS"],
            "summary": "Good fit"
        }))
        .unwrap();

        assert_eq!(record.application_id.as_str(), "app_abc123xyz");
        assert!(record.highlights().is_empty());
        assert_eq!(record.band(), MatchBand::Excellent);
    }

    #[test]
    fn test_unknown_progress_is_pending() {
        let summary: ApplicationSummary = serde_json::from_value(json!({
            "_id": "app_3",
            "jobId": "4",
            "jobTitle": "DevOps Engineer",
            "company": "CloudSystems",
            "status": "under_review",
            "matchPercentage": 64,
            "appliedAt": "2024-01-17T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(summary.status, ApplicationProgress::Pending);
        assert_eq!(summary.status.label(), "Pending");
    }
}

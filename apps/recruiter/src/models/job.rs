use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid",
            Seniority::Senior => "Senior",
        };
        f.write_str(label)
    }
}

/// Whether the current candidate has already applied to a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationTag {
    Applied,
    NotApplied,
}

/// A job posting as served by the Recruiting Backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// Only present on the single-posting (`getJob`) response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    pub seniority: Seniority,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationTag>,
}

impl JobPosting {
    pub fn is_applied(&self) -> bool {
        self.status == Some(ApplicationTag::Applied)
    }
}

/// A posting suggested as an alternative to the one the candidate applied for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_percentage: u8,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_posting_reads_wire_shape() {
        let job: JobPosting = serde_json::from_value(json!({
            "_id": "2",
            "title": "Full Stack Developer",
            "company": "StartupXYZ",
            "location": "Remote",
            "description": "Build scalable web applications with modern technologies.",
            "seniority": "Mid",
            "skills": ["React", "Node.js"],
            "status": "not_applied"
        }))
        .unwrap();

        assert_eq!(job.id, "2");
        assert_eq!(job.seniority, Seniority::Mid);
        assert_eq!(job.status, Some(ApplicationTag::NotApplied));
        assert!(job.full_description.is_none());
        assert!(!job.is_applied());
    }

    #[test]
    fn test_recommendation_flattens_posting() {
        let value = json!({
            "_id": "5",
            "title": "Backend Developer",
            "company": "DataFlow",
            "location": "Wroclaw, Poland",
            "description": "Build robust backend systems for data processing.",
            "seniority": "Mid",
            "skills": ["Python"],
            "matchPercentage": 61,
            "reason": "Matches your skills: Python"
        });
        let rec: JobRecommendation = serde_json::from_value(value).unwrap();
        assert_eq!(rec.job.id, "5");
        assert_eq!(rec.match_percentage, 61);
        assert!(rec.job.status.is_none());
    }
}

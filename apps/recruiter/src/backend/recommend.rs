//! Alternative-posting ranking used by the simulated `getRecommendedJobs`.
//!
//! Algorithm:
//! 1. Skip the posting the candidate is applying for.
//! 2. skill overlap = share of the posting's skills mentioned in the CV text
//!    (case-insensitive substring) × 100
//! 3. match = round(0.6 × overlap + 0.4 × candidate match), capped at 100
//! 4. Sort descending by match (ties by id), keep the top 4.

use crate::backend::wire::RecommendationRequest;
use crate::models::job::{JobPosting, JobRecommendation};

pub const MAX_RECOMMENDATIONS: usize = 4;

const OVERLAP_WEIGHT: f32 = 0.6;
const BASE_WEIGHT: f32 = 0.4;

pub fn recommend(
    catalog: &[JobPosting],
    request: &RecommendationRequest,
) -> Vec<JobRecommendation> {
    let cv_lower = request.cv_text.to_lowercase();
    let base = f32::from(request.match_percentage.min(100));

    let mut ranked: Vec<JobRecommendation> = catalog
        .iter()
        .filter(|job| job.id != request.current_job_id)
        .map(|job| {
            let matched: Vec<&str> = job
                .skills
                .iter()
                .filter(|skill| cv_lower.contains(&skill.to_lowercase()))
                .map(String::as_str)
                .collect();

            let overlap = if job.skills.is_empty() {
                0.0
            } else {
                matched.len() as f32 / job.skills.len() as f32 * 100.0
            };
            let score = (OVERLAP_WEIGHT * overlap + BASE_WEIGHT * base).round().min(100.0);

            JobRecommendation {
                job: JobPosting {
                    status: None,
                    ..job.clone()
                },
                match_percentage: score as u8,
                reason: build_reason(&matched, job),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_percentage
            .cmp(&a.match_percentage)
            .then_with(|| a.job.id.cmp(&b.job.id))
    });
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

fn build_reason(matched: &[&str], job: &JobPosting) -> String {
    if matched.is_empty() {
        format!(
            "A chance to grow towards {} as a {} {}.",
            job.skills.first().map(String::as_str).unwrap_or("new skills"),
            job.seniority,
            job.title
        )
    } else {
        format!("Matches your skills: {}.", matched.join(", "))
    }
}

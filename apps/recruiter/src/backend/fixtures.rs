//! Canned payloads served by `MockBackend`.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::application::{ApplicationProgress, ApplicationSummary, InterviewQuestion};
use crate::models::job::{ApplicationTag, JobPosting, Seniority};

/// Match percentage the simulated analysis always reports.
pub const ANALYSIS_MATCH_PERCENTAGE: u8 = 82;

pub const ANALYSIS_STRENGTHS: &[&str] = &[
    "Strong React and TypeScript expertise with 5+ years of experience",
    "Proven track record of building scalable applications",
    "Experience with modern development tools and practices",
    "Excellent problem-solving and communication skills",
];

pub const ANALYSIS_GAPS: &[&str] = &[
    "Limited experience with PostgreSQL (mostly MongoDB)",
    "No prior experience with AWS services",
    "Limited DevOps knowledge",
];

pub const ANALYSIS_SUMMARY: &str = "Your profile shows a very good match for this position. \
    You have strong React skills and relevant experience. We recommend proceeding with the \
    interview to discuss your background further.";

/// Recruiter answers keyed by the phrase that must appear in the candidate's question.
pub const CANNED_ANSWERS: &[(&str, &str)] = &[
    (
        "What does a typical day in the team look like?",
        "Our typical day starts with a 9:00 standup where we go over current tasks. We work in \
         two-week sprints. Hours are flexible as long as you are available during core hours \
         (10:00-16:00). Afternoons are usually focused work time with the occasional code review.",
    ),
    (
        "What tools do you use?",
        "We use a modern stack: React, TypeScript, Node.js, PostgreSQL, Docker and Kubernetes. \
         Slack for communication, Jira for projects and Git for version control.",
    ),
    (
        "What does onboarding look like?",
        "Onboarding takes about two weeks. Day one is meeting the team and the infrastructure. \
         The second week is small tasks to learn the codebase. You get a dedicated mentor, and \
         after two weeks you are ready for regular work.",
    ),
    (
        "What are the growth opportunities?",
        "We offer a training and conference budget, room for your own projects and a mentoring \
         programme. The career path runs from Junior to Senior and then on to Tech Lead or \
         Architect.",
    ),
    (
        "What is the company culture like?",
        "Our culture is built on transparency, collaboration and continuous learning. We value \
         work-life balance and flexibility, hold regular team events, and every voice counts \
         regardless of role.",
    ),
];

pub const FALLBACK_ANSWER: &str = "Thanks for the question! We'd be happy to discuss it in more \
    detail during the conversation. You can also reach out to our HR team, who will gladly \
    answer all of your questions.";

pub fn interview_questions() -> Vec<InterviewQuestion> {
    [
        (
            "q1",
            "Tell us about your most challenging React project and how you overcame the obstacles.",
        ),
        (
            "q2",
            "How do you approach performance optimization in large-scale React applications?",
        ),
        (
            "q3",
            "Describe your experience with TypeScript and why you prefer it over JavaScript.",
        ),
    ]
    .into_iter()
    .map(|(id, question)| InterviewQuestion {
        id: id.to_string(),
        question: question.to_string(),
        estimated_time: 2,
    })
    .collect()
}

struct PostingSeed {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    full_description: &'static str,
    seniority: Seniority,
    skills: &'static [&'static str],
    applied: bool,
}

const POSTINGS: &[PostingSeed] = &[
    PostingSeed {
        id: "1",
        title: "Senior React Developer",
        company: "TechCorp",
        location: "Warsaw, Poland",
        description: "We are looking for an experienced React developer to join our team.",
        full_description: "Join our team of talented developers and work on cutting-edge \
            projects. We offer competitive salary, flexible working hours, and great benefits.",
        seniority: Seniority::Senior,
        skills: &["React", "TypeScript", "Node.js", "PostgreSQL"],
        applied: true,
    },
    PostingSeed {
        id: "2",
        title: "Full Stack Developer",
        company: "StartupXYZ",
        location: "Remote",
        description: "Build scalable web applications with modern technologies.",
        full_description: "Own features end to end in a small product team, from the React \
            frontend to Node.js services running on AWS.",
        seniority: Seniority::Mid,
        skills: &["React", "Node.js", "MongoDB", "AWS"],
        applied: false,
    },
    PostingSeed {
        id: "3",
        title: "Junior Frontend Developer",
        company: "WebStudio",
        location: "Krakow, Poland",
        description: "Start your career with us in a supportive environment.",
        full_description: "Learn from senior mentors while shipping accessible, responsive \
            interfaces for our agency clients.",
        seniority: Seniority::Junior,
        skills: &["HTML", "CSS", "JavaScript", "React"],
        applied: false,
    },
    PostingSeed {
        id: "4",
        title: "DevOps Engineer",
        company: "CloudSystems",
        location: "Remote",
        description: "Manage and optimize our cloud infrastructure.",
        full_description: "Run container platforms and delivery pipelines for dozens of \
            product teams across several cloud regions.",
        seniority: Seniority::Senior,
        skills: &["Docker", "Kubernetes", "AWS", "CI/CD"],
        applied: false,
    },
    PostingSeed {
        id: "5",
        title: "Backend Developer",
        company: "DataFlow",
        location: "Wroclaw, Poland",
        description: "Build robust backend systems for data processing.",
        full_description: "Design ingestion services and data pipelines that process \
            millions of events a day.",
        seniority: Seniority::Mid,
        skills: &["Python", "PostgreSQL", "Redis", "Docker"],
        applied: false,
    },
    PostingSeed {
        id: "6",
        title: "UI/UX Designer",
        company: "DesignHub",
        location: "Remote",
        description: "Create beautiful and intuitive user interfaces.",
        full_description: "Lead research and design for a design-system-driven product suite \
            used by thousands of customers.",
        seniority: Seniority::Mid,
        skills: &["Figma", "UI Design", "UX Research", "Prototyping"],
        applied: false,
    },
];

impl PostingSeed {
    fn to_posting(&self, with_full_description: bool) -> JobPosting {
        JobPosting {
            id: self.id.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            location: self.location.to_string(),
            description: self.description.to_string(),
            full_description: with_full_description.then(|| self.full_description.to_string()),
            seniority: self.seniority,
            skills: self.skills.iter().map(|s| s.to_string()).collect(),
            status: Some(if self.applied {
                ApplicationTag::Applied
            } else {
                ApplicationTag::NotApplied
            }),
        }
    }
}

/// The listing view of every posting (no full description).
pub fn catalog() -> Vec<JobPosting> {
    POSTINGS.iter().map(|p| p.to_posting(false)).collect()
}

/// The extended single-posting view, or `None` for an unknown id.
pub fn posting(job_id: &str) -> Option<JobPosting> {
    POSTINGS
        .iter()
        .find(|p| p.id == job_id)
        .map(|p| p.to_posting(true))
}

pub fn applications() -> Vec<ApplicationSummary> {
    vec![
        ApplicationSummary {
            id: "app_1".to_string(),
            job_id: "1".to_string(),
            job_title: "Senior React Developer".to_string(),
            company: "TechCorp".to_string(),
            status: ApplicationProgress::Completed,
            match_percentage: 82,
            applied_at: applied_at(2024, 1, 15, 10, 30),
        },
        ApplicationSummary {
            id: "app_2".to_string(),
            job_id: "2".to_string(),
            job_title: "Full Stack Developer".to_string(),
            company: "StartupXYZ".to_string(),
            status: ApplicationProgress::InProgress,
            match_percentage: 75,
            applied_at: applied_at(2024, 1, 16, 14, 20),
        },
    ]
}

fn applied_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

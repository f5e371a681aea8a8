//! Heuristic resume score and the template summary used when no text
//! generator is configured. Same rules as the backend's scoring endpoint, so
//! `InMemoryRemote` answers exactly as a backend without AI would.

use std::collections::BTreeMap;

use crate::models::resume::ResumeData;
use crate::models::score::{GeneratedSummary, Score};
use crate::sync::remote::SummaryContext;

pub const TEMPLATE_SUMMARY_NOTE: &str =
    "AI summary generation is not configured. This is a template - please customize it.";

/// Category weights: personal_info 15, summary 15, experience 25,
/// education 15, skills 15, achievements 15.
pub fn heuristic_score(data: &ResumeData) -> Score {
    let mut breakdown = BTreeMap::new();
    let mut suggestions = Vec::new();

    let info = &data.personal_info;
    let contact_complete =
        !info.full_name.is_empty() && !info.email.is_empty() && !info.phone.is_empty();
    breakdown.insert("personal_info".to_string(), if contact_complete { 15 } else { 0 });
    if !contact_complete {
        suggestions.push("Complete your contact information".to_string());
    }

    let summary_ok = data.summary.chars().count() > 50;
    breakdown.insert("summary".to_string(), if summary_ok { 15 } else { 0 });
    if !summary_ok {
        suggestions.push("Add a professional summary (2-3 sentences)".to_string());
    }

    let work = data.experiences.len() + data.internships.len();
    let experience = match work {
        0 => {
            suggestions.push("Add work experiences or internships".to_string());
            0
        }
        1 => {
            suggestions.push("Add more work experiences or internships".to_string());
            15
        }
        _ => 25,
    };
    breakdown.insert("experience".to_string(), experience);

    let education = if data.education.is_empty() {
        suggestions.push("Add your education background".to_string());
        0
    } else {
        15
    };
    breakdown.insert("education".to_string(), education);

    let skills = match data.skills.len() {
        0 => {
            suggestions.push("Add your technical and professional skills".to_string());
            0
        }
        n if n < 5 => {
            suggestions.push("Add more skills (aim for 5+)".to_string());
            10
        }
        _ => 15,
    };
    breakdown.insert("skills".to_string(), skills);

    let achievements = match data.hackathons.len() + data.projects.len() + data.events.len() {
        0 => {
            suggestions.push("Add projects, hackathons, or relevant events".to_string());
            0
        }
        n if n < 3 => {
            suggestions.push("Add more projects, hackathons, or events".to_string());
            10
        }
        _ => 15,
    };
    breakdown.insert("achievements".to_string(), achievements);

    let score: u32 = breakdown.values().sum();
    let headline = match score {
        s if s < 60 => "Your resume needs more content to stand out",
        s if s < 80 => "Good progress! Add more details to reach excellence",
        _ => "Great resume! Consider fine-tuning descriptions",
    };
    suggestions.insert(0, headline.to_string());

    Score {
        score,
        breakdown,
        suggestions,
    }
}

/// Fill-in-the-blanks summary, returned with an advisory note.
pub fn template_summary(context: &SummaryContext) -> GeneratedSummary {
    let skills = context
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let skills: String = skills.chars().take(50).collect();

    let mut track_record = String::new();
    if !context.internships.is_empty() {
        track_record.push_str("internships and ");
    }
    if !context.hackathons.is_empty() {
        track_record.push_str("hackathons and ");
    }

    GeneratedSummary {
        summary: format!(
            "Motivated professional with experience in {skills}... Proven track record in {track_record}project development."
        ),
        note: Some(TEMPLATE_SUMMARY_NOTE.to_string()),
    }
}

//! Live preview projection.
//!
//! `project` is a pure function of the document: no I/O, no hidden state.
//! The same `data` always yields the same `PreviewModel`, section for section,
//! so the preview can be recomputed on every keystroke without reordering.

pub mod render;

use serde::Serialize;

use crate::document::ids::EntityId;
use crate::models::entities::{Education, Event, Experience, Hackathon, Internship, Project};
use crate::models::resume::{ResumeData, ResumeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experiences,
    Internships,
    Hackathons,
    Education,
    Projects,
    Events,
    Skills,
}

impl SectionKind {
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Summary => "PROFESSIONAL SUMMARY",
            SectionKind::Experiences => "EXPERIENCE",
            SectionKind::Internships => "INTERNSHIPS",
            SectionKind::Hackathons => "HACKATHONS",
            SectionKind::Education => "EDUCATION",
            SectionKind::Projects => "PROJECTS",
            SectionKind::Events => "EVENTS & ACTIVITIES",
            SectionKind::Skills => "SKILLS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewModel {
    pub header: Option<PreviewHeader>,
    pub sections: Vec<PreviewSection>,
}

impl PreviewModel {
    pub fn section(&self, kind: SectionKind) -> Option<&PreviewSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHeader {
    pub full_name: String,
    /// Non-blank email, phone and location, in that order.
    pub contact: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSection {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    Entries(Vec<PreviewEntry>),
    Badges(Vec<String>),
}

/// One rendered entity. `title` is kept even when blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub id: EntityId,
    pub title: String,
    pub subtitle: Option<String>,
    pub highlight: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

pub fn project(document: &ResumeDocument) -> PreviewModel {
    project_data(&document.data)
}

pub fn project_data(data: &ResumeData) -> PreviewModel {
    let mut sections = Vec::new();

    if !is_blank(&data.summary) {
        sections.push(section(SectionKind::Summary, SectionBody::Text(data.summary.clone())));
    }

    push_entries(&mut sections, SectionKind::Experiences, &data.experiences, experience_entry);
    push_entries(&mut sections, SectionKind::Internships, &data.internships, internship_entry);
    push_entries(&mut sections, SectionKind::Hackathons, &data.hackathons, hackathon_entry);
    push_entries(&mut sections, SectionKind::Education, &data.education, education_entry);
    push_entries(&mut sections, SectionKind::Projects, &data.projects, project_entry);
    push_entries(&mut sections, SectionKind::Events, &data.events, event_entry);

    // Skills alone drop entries with a blank name.
    let badges: Vec<String> = data
        .skills
        .iter()
        .filter(|s| !is_blank(&s.name))
        .map(|s| s.name.clone())
        .collect();
    if !badges.is_empty() {
        sections.push(section(SectionKind::Skills, SectionBody::Badges(badges)));
    }

    PreviewModel {
        header: header(data),
        sections,
    }
}

fn header(data: &ResumeData) -> Option<PreviewHeader> {
    let info = &data.personal_info;
    if is_blank(&info.full_name) {
        return None;
    }
    let contact = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter(|v| !is_blank(v))
        .cloned()
        .collect();
    Some(PreviewHeader {
        full_name: info.full_name.clone(),
        contact,
    })
}

fn section(kind: SectionKind, body: SectionBody) -> PreviewSection {
    PreviewSection {
        kind,
        heading: kind.heading(),
        body,
    }
}

fn push_entries<T>(
    sections: &mut Vec<PreviewSection>,
    kind: SectionKind,
    items: &[T],
    to_entry: fn(&T) -> PreviewEntry,
) {
    if items.is_empty() {
        return;
    }
    let entries = items.iter().map(to_entry).collect();
    sections.push(section(kind, SectionBody::Entries(entries)));
}

fn experience_entry(exp: &Experience) -> PreviewEntry {
    PreviewEntry {
        id: exp.id.clone(),
        title: exp.title.clone(),
        subtitle: non_blank(&exp.organization),
        highlight: None,
        dates: date_range(&exp.start_date, &exp.end_date),
        description: non_blank(&exp.description),
    }
}

fn internship_entry(intern: &Internship) -> PreviewEntry {
    PreviewEntry {
        id: intern.id.clone(),
        title: intern.title.clone(),
        subtitle: non_blank(&intern.company),
        highlight: None,
        dates: date_range(&intern.start_date, &intern.end_date),
        description: non_blank(&intern.description),
    }
}

fn hackathon_entry(hack: &Hackathon) -> PreviewEntry {
    PreviewEntry {
        id: hack.id.clone(),
        title: joined(&hack.name, &hack.organizer),
        subtitle: non_blank(&hack.project_title),
        highlight: non_blank(&hack.achievement),
        dates: non_blank(&hack.date),
        description: non_blank(&hack.description),
    }
}

fn education_entry(edu: &Education) -> PreviewEntry {
    PreviewEntry {
        id: edu.id.clone(),
        title: joined(&edu.degree, &edu.field),
        subtitle: non_blank(&edu.institution),
        highlight: None,
        dates: date_range(&edu.start_date, &edu.end_date),
        description: None,
    }
}

fn project_entry(proj: &Project) -> PreviewEntry {
    PreviewEntry {
        id: proj.id.clone(),
        title: proj.title.clone(),
        subtitle: None,
        highlight: None,
        dates: None,
        description: non_blank(&proj.description),
    }
}

fn event_entry(event: &Event) -> PreviewEntry {
    PreviewEntry {
        id: event.id.clone(),
        title: joined(&event.title, &event.organization),
        subtitle: None,
        highlight: non_blank(&event.role),
        dates: non_blank(&event.date),
        description: non_blank(&event.description),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_blank(s: &str) -> Option<String> {
    (!is_blank(s)).then(|| s.to_string())
}

/// "a - b", or whichever side is present.
fn joined(a: &str, b: &str) -> String {
    match (is_blank(a), is_blank(b)) {
        (false, false) => format!("{a} - {b}"),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (true, true) => String::new(),
    }
}

fn date_range(start: &str, end: &str) -> Option<String> {
    if is_blank(start) && is_blank(end) {
        None
    } else {
        Some(format!("{start} - {end}"))
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::collection::{CollectionName, EntityList};
use crate::errors::EditorError;
use crate::models::entities::{
    Education, Event, Experience, Hackathon, Internship, Project, Skill,
};

pub const DEFAULT_TEMPLATE: &str = "modern";

/// A résumé as stored by the backend. `data` is the unit exchanged on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub data: ResumeData,
    /// Advisory only. Never compared before a save.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

impl ResumeDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            title: title.into(),
            template: default_template(),
            data: ResumeData::default(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub internships: Vec<Internship>,
    pub hackathons: Vec<Hackathon>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub events: Vec<Event>,
}

impl ResumeData {
    /// Read access to a collection through the uniform operation set.
    pub fn collection(&self, name: CollectionName) -> &dyn EntityList {
        match name {
            CollectionName::Experiences => &self.experiences,
            CollectionName::Internships => &self.internships,
            CollectionName::Hackathons => &self.hackathons,
            CollectionName::Events => &self.events,
            CollectionName::Education => &self.education,
            CollectionName::Skills => &self.skills,
            CollectionName::Projects => &self.projects,
        }
    }

    pub fn collection_mut(&mut self, name: CollectionName) -> &mut dyn EntityList {
        match name {
            CollectionName::Experiences => &mut self.experiences,
            CollectionName::Internships => &mut self.internships,
            CollectionName::Hackathons => &mut self.hackathons,
            CollectionName::Events => &mut self.events,
            CollectionName::Education => &mut self.education,
            CollectionName::Skills => &mut self.skills,
            CollectionName::Projects => &mut self.projects,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Linkedin => &self.linkedin,
            PersonalField::Github => &self.github,
            PersonalField::Website => &self.website,
        }
    }

    pub fn set(&mut self, field: PersonalField, value: String) {
        let slot = match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Github => &mut self.github,
            PersonalField::Website => &mut self.website,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
}

impl PersonalField {
    pub const ALL: [PersonalField; 7] = [
        PersonalField::FullName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::Github,
        PersonalField::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalField::FullName => "full_name",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Github => "github",
            PersonalField::Website => "website",
        }
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalField {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonalField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| EditorError::UnknownField {
                target: "personal_info".to_string(),
                field: s.to_string(),
            })
    }
}

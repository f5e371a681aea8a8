//! Collection entity shapes.
//!
//! Field names match the backend's JSON exactly. Every struct deserializes
//! with defaults for missing keys, and its `Default` impl is the blank entity
//! the collection editor appends.

use serde::{Deserialize, Serialize};

use crate::document::collection::{CollectionName, Entity};
use crate::document::ids::EntityId;

/// Proficiency given to a freshly added skill (mid-point of the 1–5 scale).
pub const DEFAULT_PROFICIENCY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub id: EntityId,
    /// "work", "internship" or "hackathon". New entries are "work".
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub skills: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub verified: bool,
    pub location: String,
    pub achievements: Vec<String>,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            kind: "work".to_string(),
            title: String::new(),
            organization: String::new(),
            description: String::new(),
            skills: Vec::new(),
            start_date: String::new(),
            end_date: String::new(),
            verified: false,
            location: String::new(),
            achievements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Internship {
    pub id: EntityId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub certificate_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hackathon {
    pub id: EntityId,
    pub name: String,
    pub organizer: String,
    pub project_title: String,
    pub description: String,
    /// Winner, Runner-up, Participant, ... Free text.
    pub achievement: String,
    pub technologies: Vec<String>,
    pub date: String,
    pub project_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub date: String,
    /// Organizer, Participant, Speaker, ... Free text.
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub id: EntityId,
    pub degree: String,
    pub institution: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: EntityId,
    pub name: String,
    pub proficiency: u8,
    pub verified: bool,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            name: String::new(),
            proficiency: DEFAULT_PROFICIENCY,
            verified: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

macro_rules! impl_entity {
    ($ty:ty, $collection:expr) => {
        impl Entity for $ty {
            const COLLECTION: CollectionName = $collection;

            fn id(&self) -> &EntityId {
                &self.id
            }

            fn blank(id: EntityId) -> Self {
                Self {
                    id,
                    ..Self::default()
                }
            }
        }
    };
}

impl_entity!(Experience, CollectionName::Experiences);
impl_entity!(Internship, CollectionName::Internships);
impl_entity!(Hackathon, CollectionName::Hackathons);
impl_entity!(Event, CollectionName::Events);
impl_entity!(Education, CollectionName::Education);
impl_entity!(Skill, CollectionName::Skills);
impl_entity!(Project, CollectionName::Projects);

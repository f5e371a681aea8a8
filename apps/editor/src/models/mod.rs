pub mod entities;
pub mod resume;
pub mod score;

pub use entities::{Education, Event, Experience, Hackathon, Internship, Project, Skill};
pub use resume::{PersonalField, PersonalInfo, ResumeData, ResumeDocument};
pub use score::{GeneratedSummary, OptimizedContent, SaveAck, Score};

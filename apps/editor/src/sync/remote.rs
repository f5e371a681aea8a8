use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::models::entities::{Experience, Hackathon, Internship, Skill};
use crate::models::resume::{ResumeData, ResumeDocument};
use crate::models::score::{GeneratedSummary, OptimizedContent, SaveAck, Score};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// The slice of the document the summary generator reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryContext {
    pub experiences: Vec<Experience>,
    pub internships: Vec<Internship>,
    pub hackathons: Vec<Hackathon>,
    pub skills: Vec<Skill>,
}

impl SummaryContext {
    pub fn from_data(data: &ResumeData) -> Self {
        Self {
            experiences: data.experiences.clone(),
            internships: data.internships.clone(),
            hackathons: data.hackathons.clone(),
            skills: data.skills.clone(),
        }
    }
}

/// The remote document collaborator: persistence, enrichment and export.
///
/// Every call is a single request/response. Implementations must not retry,
/// queue or coalesce: two calls mean two requests.
///
/// Carried in `EditorSession` as `Arc<dyn ResumeRemote>`.
#[async_trait]
pub trait ResumeRemote: Send + Sync {
    async fn fetch_document(&self, id: &str) -> Result<ResumeDocument, RemoteError>;

    async fn save_document(&self, id: &str, data: &ResumeData) -> Result<SaveAck, RemoteError>;

    async fn generate_summary(
        &self,
        context: &SummaryContext,
    ) -> Result<GeneratedSummary, RemoteError>;

    async fn calculate_score(&self, data: &ResumeData) -> Result<Score, RemoteError>;

    async fn list_documents(&self) -> Result<Vec<ResumeDocument>, RemoteError>;

    async fn create_document(
        &self,
        title: &str,
        template: &str,
    ) -> Result<ResumeDocument, RemoteError>;

    async fn rename_document(&self, id: &str, title: &str) -> Result<ResumeDocument, RemoteError>;

    async fn delete_document(&self, id: &str) -> Result<(), RemoteError>;

    async fn optimize_content(&self, text: &str) -> Result<OptimizedContent, RemoteError>;

    /// The rendered PDF, opaque to the editor.
    async fn download_pdf(&self, id: &str) -> Result<Bytes, RemoteError>;
}

/// File name offered for a downloaded PDF.
pub fn download_filename(title: &str) -> String {
    format!("{}.pdf", title.replace(' ', "_"))
}

//! Process-local `ResumeRemote`.
//!
//! Behaves like the backend with no AI configured: heuristic scores, template
//! summaries, and pass-through content optimization. Any exchange can be set
//! to fail, and every request is counted, so hosts can test their handling of
//! remote failures without a server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::models::resume::{ResumeData, ResumeDocument};
use crate::models::score::{GeneratedSummary, OptimizedContent, SaveAck, Score};
use crate::scoring::{heuristic_score, template_summary};
use crate::sync::remote::{RemoteError, ResumeRemote, SummaryContext};

const OPTIMIZE_NOTE: &str =
    "AI optimization is not configured. Consider adding action verbs and quantifiable achievements.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exchange {
    Fetch,
    Save,
    GenerateSummary,
    CalculateScore,
    List,
    Create,
    Rename,
    Delete,
    Optimize,
    Download,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<String, ResumeDocument>,
    failing: HashSet<Exchange>,
    requests: HashMap<Exchange, usize>,
    generated_summary: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<MemoryState>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, document: ResumeDocument) -> Self {
        self.insert(document);
        self
    }

    /// Answers summary requests with `text` instead of the template.
    pub fn with_generated_summary(self, text: impl Into<String>) -> Self {
        self.lock().generated_summary = Some(text.into());
        self
    }

    pub fn insert(&self, document: ResumeDocument) {
        self.lock().documents.insert(document.id.clone(), document);
    }

    /// The stored copy of `id`, as the last successful save left it.
    pub fn stored(&self, id: &str) -> Option<ResumeDocument> {
        self.lock().documents.get(id).cloned()
    }

    /// Makes every subsequent `exchange` fail until `recover` is called.
    pub fn fail(&self, exchange: Exchange) {
        self.lock().failing.insert(exchange);
    }

    pub fn recover(&self, exchange: Exchange) {
        self.lock().failing.remove(&exchange);
    }

    pub fn request_count(&self, exchange: Exchange) -> usize {
        self.lock().requests.get(&exchange).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts the request and applies failure injection.
    fn begin(&self, exchange: Exchange) -> Result<MutexGuard<'_, MemoryState>, RemoteError> {
        let mut state = self.lock();
        *state.requests.entry(exchange).or_insert(0) += 1;
        if state.failing.contains(&exchange) {
            return Err(RemoteError::Unavailable(format!("{exchange:?} is failing")));
        }
        Ok(state)
    }
}

fn not_found(id: &str) -> RemoteError {
    RemoteError::NotFound(format!("resume {id}"))
}

#[async_trait]
impl ResumeRemote for InMemoryRemote {
    async fn fetch_document(&self, id: &str) -> Result<ResumeDocument, RemoteError> {
        let state = self.begin(Exchange::Fetch)?;
        state.documents.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn save_document(&self, id: &str, data: &ResumeData) -> Result<SaveAck, RemoteError> {
        let mut state = self.begin(Exchange::Save)?;
        let document = state.documents.get_mut(id).ok_or_else(|| not_found(id))?;
        document.data = data.clone();
        document.updated_at = Some(Utc::now());
        Ok(SaveAck {
            document_id: document.id.clone(),
            updated_at: document.updated_at,
        })
    }

    async fn generate_summary(
        &self,
        context: &SummaryContext,
    ) -> Result<GeneratedSummary, RemoteError> {
        let state = self.begin(Exchange::GenerateSummary)?;
        Ok(match &state.generated_summary {
            Some(text) => GeneratedSummary {
                summary: text.clone(),
                note: None,
            },
            None => template_summary(context),
        })
    }

    async fn calculate_score(&self, data: &ResumeData) -> Result<Score, RemoteError> {
        drop(self.begin(Exchange::CalculateScore)?);
        Ok(heuristic_score(data))
    }

    async fn list_documents(&self) -> Result<Vec<ResumeDocument>, RemoteError> {
        let state = self.begin(Exchange::List)?;
        Ok(state.documents.values().cloned().collect())
    }

    async fn create_document(
        &self,
        title: &str,
        template: &str,
    ) -> Result<ResumeDocument, RemoteError> {
        let mut state = self.begin(Exchange::Create)?;
        let now = Utc::now();
        let mut document = ResumeDocument::new(Uuid::new_v4().to_string(), title);
        document.template = template.to_string();
        document.created_at = Some(now);
        document.updated_at = Some(now);
        state.documents.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn rename_document(&self, id: &str, title: &str) -> Result<ResumeDocument, RemoteError> {
        let mut state = self.begin(Exchange::Rename)?;
        let document = state.documents.get_mut(id).ok_or_else(|| not_found(id))?;
        document.title = title.to_string();
        document.updated_at = Some(Utc::now());
        Ok(document.clone())
    }

    async fn delete_document(&self, id: &str) -> Result<(), RemoteError> {
        let mut state = self.begin(Exchange::Delete)?;
        state.documents.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn optimize_content(&self, text: &str) -> Result<OptimizedContent, RemoteError> {
        drop(self.begin(Exchange::Optimize)?);
        Ok(OptimizedContent {
            optimized: text.to_string(),
            note: Some(OPTIMIZE_NOTE.to_string()),
        })
    }

    async fn download_pdf(&self, id: &str) -> Result<Bytes, RemoteError> {
        let state = self.begin(Exchange::Download)?;
        if !state.documents.contains_key(id) {
            return Err(not_found(id));
        }
        Err(RemoteError::Unavailable(
            "PDF export is provided by the backend renderer".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_list_rename_delete() {
        let remote = InMemoryRemote::new();
        let created = remote.create_document("First", "modern").await.unwrap();
        assert_eq!(created.title, "First");
        assert!(created.created_at.is_some());

        let renamed = remote.rename_document(&created.id, "Renamed").await.unwrap();
        assert_eq!(renamed.title, "Renamed");

        let listed = remote.list_documents().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Renamed");

        remote.delete_document(&created.id).await.unwrap();
        assert!(matches!(
            remote.delete_document(&created.id).await,
            Err(RemoteError::NotFound(_))
        ));
        assert!(remote.list_documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let remote = InMemoryRemote::new();
        assert!(matches!(
            remote.fetch_document("nope").await,
            Err(RemoteError::NotFound(_))
        ));
        assert_eq!(remote.request_count(Exchange::Fetch), 1);
    }

    #[tokio::test]
    async fn test_failure_injection_and_recovery() {
        let remote = InMemoryRemote::new().with_document(ResumeDocument::new("r-1", "R"));
        remote.fail(Exchange::Fetch);
        assert!(matches!(
            remote.fetch_document("r-1").await,
            Err(RemoteError::Unavailable(_))
        ));
        remote.recover(Exchange::Fetch);
        assert!(remote.fetch_document("r-1").await.is_ok());
        assert_eq!(remote.request_count(Exchange::Fetch), 2);
    }

    #[tokio::test]
    async fn test_save_replaces_data_and_advances_timestamp() {
        let remote = InMemoryRemote::new().with_document(ResumeDocument::new("r-1", "R"));
        let mut data = ResumeData::default();
        data.summary = "Saved".into();
        let ack = remote.save_document("r-1", &data).await.unwrap();
        assert_eq!(ack.document_id, "r-1");
        assert!(ack.updated_at.is_some());
        assert_eq!(remote.stored("r-1").unwrap().data.summary, "Saved");
    }

    #[tokio::test]
    async fn test_score_counts_requests_and_releases_state() {
        let remote = InMemoryRemote::new().with_document(ResumeDocument::new("r-1", "R"));
        let data = ResumeData::default();
        assert_eq!(remote.calculate_score(&data).await.unwrap().score, 0);
        remote.optimize_content("x").await.unwrap();
        remote.calculate_score(&data).await.unwrap();
        assert_eq!(remote.request_count(Exchange::CalculateScore), 2);
        assert_eq!(remote.request_count(Exchange::Optimize), 1);
        assert!(remote.stored("r-1").is_some());
    }

    #[tokio::test]
    async fn test_optimize_passes_text_through_with_note() {
        let remote = InMemoryRemote::new();
        let result = remote.optimize_content("Did stuff").await.unwrap();
        assert_eq!(result.optimized, "Did stuff");
        assert!(result.note.is_some());
    }

    #[tokio::test]
    async fn test_download_without_renderer() {
        let remote = InMemoryRemote::new().with_document(ResumeDocument::new("r-1", "R"));
        assert!(matches!(
            remote.download_pdf("r-1").await,
            Err(RemoteError::Unavailable(_))
        ));
        assert!(matches!(
            remote.download_pdf("r-2").await,
            Err(RemoteError::NotFound(_))
        ));
    }
}

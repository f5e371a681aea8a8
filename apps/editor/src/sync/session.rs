use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::document::store::{DocumentStore, FieldPath};
use crate::errors::EditorError;
use crate::models::score::{GeneratedSummary, OptimizedContent, SaveAck, Score};
use crate::preview::{project, PreviewModel};
use crate::sync::remote::{download_filename, ResumeRemote, SummaryContext};

/// An enrichment result tagged with the document it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment<T> {
    pub document_id: String,
    pub value: T,
}

/// A downloaded PDF with the file name to offer it under.
#[derive(Debug, Clone)]
pub struct PdfDownload {
    pub filename: String,
    pub bytes: bytes::Bytes,
}

/// One editing session: the document store, the remote it syncs with, and
/// the transient score.
///
/// Local edits go through `store_mut()` and never suspend. The `*_request`
/// methods capture a snapshot and return a `'static` future, so the host can
/// keep editing while an exchange is in flight and apply the result after.
pub struct EditorSession {
    store: DocumentStore,
    remote: Arc<dyn ResumeRemote>,
    score: Option<Score>,
}

impl EditorSession {
    pub fn new(remote: Arc<dyn ResumeRemote>) -> Self {
        Self {
            store: DocumentStore::new(),
            remote,
            score: None,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn remote(&self) -> &Arc<dyn ResumeRemote> {
        &self.remote
    }

    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    pub fn preview(&self) -> Result<PreviewModel, EditorError> {
        let snapshot = self.store.snapshot()?;
        Ok(project(&snapshot))
    }

    /// Replaces the session's document with `id` from the remote.
    /// All or nothing: on failure the store is left empty.
    pub async fn load(&mut self, id: &str) -> Result<(), EditorError> {
        self.store.clear();
        self.score = None;

        match self.remote.fetch_document(id).await {
            Ok(document) => {
                info!("Loaded resume {} ({})", document.id, document.title);
                self.store.install(document);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load resume {id}: {e}");
                Err(EditorError::from_persistence(e))
            }
        }
    }

    /// Builds a save of the current `data`. Local state is never touched,
    /// whatever the outcome.
    pub fn save_request(
        &self,
    ) -> Result<impl Future<Output = Result<SaveAck, EditorError>> + Send + 'static, EditorError>
    {
        let snapshot = self.store.snapshot()?;
        let remote = Arc::clone(&self.remote);

        Ok(async move {
            match remote.save_document(&snapshot.id, &snapshot.data).await {
                Ok(ack) => {
                    info!("Saved resume {}", ack.document_id);
                    Ok(ack)
                }
                Err(e) => {
                    warn!("Failed to save resume {}: {e}", snapshot.id);
                    Err(EditorError::from_persistence(e))
                }
            }
        })
    }

    pub async fn save(&self) -> Result<SaveAck, EditorError> {
        self.save_request()?.await
    }

    /// Runs the save on the tokio runtime.
    pub fn spawn_save(&self) -> Result<JoinHandle<Result<SaveAck, EditorError>>, EditorError> {
        Ok(tokio::spawn(self.save_request()?))
    }

    pub fn summary_request(
        &self,
    ) -> Result<
        impl Future<Output = Result<Enrichment<GeneratedSummary>, EditorError>> + Send + 'static,
        EditorError,
    > {
        let snapshot = self.store.snapshot()?;
        let context = SummaryContext::from_data(&snapshot.data);
        let document_id = snapshot.id.clone();
        let remote = Arc::clone(&self.remote);

        Ok(async move {
            let value = remote.generate_summary(&context).await.map_err(|e| {
                warn!("Summary generation failed for resume {document_id}: {e}");
                EditorError::from_enrichment(e)
            })?;
            Ok(Enrichment { document_id, value })
        })
    }

    /// Replaces `summary` wholesale and returns the advisory note, if any.
    pub fn apply_summary(
        &mut self,
        result: Enrichment<GeneratedSummary>,
    ) -> Result<Option<String>, EditorError> {
        self.ensure_current(&result.document_id)?;
        self.store
            .replace_field(FieldPath::Summary, result.value.summary)?;
        info!("Applied generated summary to resume {}", result.document_id);
        Ok(result.value.note)
    }

    pub fn spawn_summary(
        &self,
    ) -> Result<JoinHandle<Result<Enrichment<GeneratedSummary>, EditorError>>, EditorError> {
        Ok(tokio::spawn(self.summary_request()?))
    }

    pub async fn generate_summary(&mut self) -> Result<Option<String>, EditorError> {
        let result = self.summary_request()?.await?;
        self.apply_summary(result)
    }

    pub fn score_request(
        &self,
    ) -> Result<
        impl Future<Output = Result<Enrichment<Score>, EditorError>> + Send + 'static,
        EditorError,
    > {
        let snapshot = self.store.snapshot()?;
        let remote = Arc::clone(&self.remote);

        Ok(async move {
            let value = remote.calculate_score(&snapshot.data).await.map_err(|e| {
                warn!("Score calculation failed for resume {}: {e}", snapshot.id);
                EditorError::from_enrichment(e)
            })?;
            Ok(Enrichment {
                document_id: snapshot.id.clone(),
                value,
            })
        })
    }

    pub fn apply_score(&mut self, result: Enrichment<Score>) -> Result<&Score, EditorError> {
        self.ensure_current(&result.document_id)?;
        let mut score = result.value;
        if !score.is_in_range() {
            warn!("Scorer returned {} (> 100); clamping", score.score);
            score = score.clamped();
        }
        Ok(&*self.score.insert(score))
    }

    pub fn spawn_score(
        &self,
    ) -> Result<JoinHandle<Result<Enrichment<Score>, EditorError>>, EditorError> {
        Ok(tokio::spawn(self.score_request()?))
    }

    /// On failure the previous score, if any, stays in place.
    pub async fn calculate_score(&mut self) -> Result<&Score, EditorError> {
        let result = self.score_request()?.await?;
        self.apply_score(result)
    }

    /// Renames the document remotely, then locally once the remote accepts.
    pub async fn rename(&mut self, title: &str) -> Result<(), EditorError> {
        let id = self.store.snapshot()?.id.clone();
        self.remote
            .rename_document(&id, title)
            .await
            .map_err(EditorError::from_persistence)?;
        self.ensure_current(&id)?;
        self.store.set_title(title)
    }

    pub async fn optimize_content(&self, text: &str) -> Result<OptimizedContent, EditorError> {
        self.remote
            .optimize_content(text)
            .await
            .map_err(EditorError::from_enrichment)
    }

    /// Fetches the server-rendered PDF of the last saved state.
    pub async fn download_pdf(&self) -> Result<PdfDownload, EditorError> {
        let snapshot = self.store.snapshot()?;
        let bytes = self
            .remote
            .download_pdf(&snapshot.id)
            .await
            .map_err(EditorError::from_persistence)?;
        Ok(PdfDownload {
            filename: download_filename(&snapshot.title),
            bytes,
        })
    }

    fn ensure_current(&self, document_id: &str) -> Result<(), EditorError> {
        match self.store.document_id() {
            None => Err(EditorError::NoDocumentLoaded),
            Some(current) if current == document_id => Ok(()),
            Some(current) => Err(EditorError::DocumentChanged {
                expected: document_id.to_string(),
                actual: current.to_string(),
            }),
        }
    }
}

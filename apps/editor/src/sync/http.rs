//! HTTP client for the résumé backend. The only module that talks to the
//! network.
//!
//! No retries: every exchange is at-most-once per call, and a failure is
//! handed straight back to the session.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::models::resume::{ResumeData, ResumeDocument};
use crate::models::score::{GeneratedSummary, OptimizedContent, SaveAck, Score};
use crate::sync::remote::{RemoteError, ResumeRemote, SummaryContext};

const SUMMARY_PROMPT: &str = "Generate summary";
const SCORE_PROMPT: &str = "Calculate score";

#[derive(Debug, Serialize)]
struct EnrichmentRequest<'a, C: Serialize> {
    prompt: &'a str,
    context: &'a C,
}

#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    data: &'a ResumeData,
}

#[derive(Debug, Serialize)]
struct RenameRequest<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    title: &'a str,
    template: &'a str,
}

/// `ResumeRemote` over the backend's REST API.
#[derive(Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpRemote {
    pub fn new(config: &Config) -> Result<Self, RemoteError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {e}", config.api_base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(config.api_base_url.clone()));
        }
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: config.api_token.clone(),
        })
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay a single path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.url(segments));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-success statuses into errors.
    /// `what` names the resource for `NotFound`.
    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, RemoteError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Err(RemoteError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        debug!("{} → {}", what, status);
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        what: &str,
    ) -> Result<T, RemoteError> {
        let response = self.send(builder, what).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pulls `detail` out of a `{"detail": ...}` error body; falls back to the raw body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => match fields.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

#[async_trait]
impl ResumeRemote for HttpRemote {
    async fn fetch_document(&self, id: &str) -> Result<ResumeDocument, RemoteError> {
        self.send_json(
            self.request(Method::GET, &["resumes", id]),
            &format!("resume {id}"),
        )
        .await
    }

    async fn save_document(&self, id: &str, data: &ResumeData) -> Result<SaveAck, RemoteError> {
        let saved: ResumeDocument = self
            .send_json(
                self.request(Method::PUT, &["resumes", id])
                    .json(&SaveRequest { data }),
                &format!("resume {id}"),
            )
            .await?;
        Ok(SaveAck {
            document_id: saved.id,
            updated_at: saved.updated_at,
        })
    }

    async fn generate_summary(
        &self,
        context: &SummaryContext,
    ) -> Result<GeneratedSummary, RemoteError> {
        self.send_json(
            self.request(Method::POST, &["ai", "generate-summary"])
                .json(&EnrichmentRequest {
                    prompt: SUMMARY_PROMPT,
                    context,
                }),
            "summary generator",
        )
        .await
    }

    async fn calculate_score(&self, data: &ResumeData) -> Result<Score, RemoteError> {
        self.send_json(
            self.request(Method::POST, &["ai", "calculate-score"])
                .json(&EnrichmentRequest {
                    prompt: SCORE_PROMPT,
                    context: data,
                }),
            "resume scorer",
        )
        .await
    }

    async fn list_documents(&self) -> Result<Vec<ResumeDocument>, RemoteError> {
        self.send_json(self.request(Method::GET, &["resumes"]), "resume list")
            .await
    }

    async fn create_document(
        &self,
        title: &str,
        template: &str,
    ) -> Result<ResumeDocument, RemoteError> {
        self.send_json(
            self.request(Method::POST, &["resumes"])
                .json(&CreateRequest { title, template }),
            "resume list",
        )
        .await
    }

    async fn rename_document(&self, id: &str, title: &str) -> Result<ResumeDocument, RemoteError> {
        self.send_json(
            self.request(Method::PUT, &["resumes", id])
                .json(&RenameRequest { title }),
            &format!("resume {id}"),
        )
        .await
    }

    async fn delete_document(&self, id: &str) -> Result<(), RemoteError> {
        self.send(
            self.request(Method::DELETE, &["resumes", id]),
            &format!("resume {id}"),
        )
        .await?;
        Ok(())
    }

    async fn optimize_content(&self, text: &str) -> Result<OptimizedContent, RemoteError> {
        self.send_json(
            self.request(Method::POST, &["ai", "optimize-content"])
                .json(&PromptRequest { prompt: text }),
            "content optimizer",
        )
        .await
    }

    async fn download_pdf(&self, id: &str) -> Result<Bytes, RemoteError> {
        let response = self
            .send(
                self.request(Method::GET, &["resumes", id, "download"]),
                &format!("resume {id}"),
            )
            .await?;
        Ok(response.bytes().await?)
    }
}

//! Résumé editor core: the document store, its collection operations, the
//! live preview projection, and the bridge to the remote document service.

pub mod config;
pub mod document;
pub mod errors;
pub mod models;
pub mod preview;
pub mod scoring;
pub mod sync;
pub mod telemetry;

pub use config::Config;
pub use document::{CollectionName, DocumentStore, EntityId, FieldPath, FieldValue};
pub use errors::EditorError;
pub use models::{ResumeData, ResumeDocument, Score};
pub use preview::{project, PreviewModel};
pub use sync::{EditorSession, HttpRemote, InMemoryRemote, ResumeRemote};

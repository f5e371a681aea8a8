// Sync Bridge: load, save and the two enrichment exchanges.
// All network traffic goes through a `ResumeRemote`; nothing here retries.

pub mod http;
pub mod memory;
pub mod remote;
pub mod session;

pub use http::HttpRemote;
pub use memory::{Exchange, InMemoryRemote};
pub use remote::{download_filename, RemoteError, ResumeRemote, SummaryContext};
pub use session::{EditorSession, Enrichment, PdfDownload};

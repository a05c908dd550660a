//! Clients for the two external services behind the editor: the landing
//! page extraction (crawl) service and the video-generation service.
//!
//! Both speak a small JSON-over-HTTP envelope (`{code, msg, data}`) with
//! fixed per-call timeouts and no automatic retries; a failed call is
//! surfaced to the caller, who repeats it manually if at all.

pub mod crawl;
pub mod error;
pub mod types;
pub mod video;

pub use crawl::{CrawlClient, CrawlConfig};
pub use error::{UpstreamError, UpstreamResult};
pub use types::{
    CrawlRecord, CrawlReply, ScenePayload, SettingsPayload, SubmitData, SubmitReply,
    SubmitTaskRequest,
};
pub use video::{VideoClient, VideoConfig};

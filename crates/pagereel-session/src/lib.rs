//! Editing-session and profile flows for PageReel.
//!
//! A [`GenerateSession`] owns one crawl-edit-submit flow end to end:
//! scenes, settings, the liked set, and the running activity log. The
//! [`ProfileView`] aggregates a user's submitted works and liked-asset
//! library for the profile page. Both drive the remote services through
//! clients from `pagereel-upstream`, `pagereel-supabase`, and
//! `pagereel-storage`; nothing here talks to the network directly.

pub mod error;
pub mod generate;
pub mod profile;

pub use error::{SessionError, SessionResult};
pub use generate::{GenerateSession, OptionLists, SessionDeps, SessionStep, UploadTicket};
pub use profile::ProfileView;

//! # atlas-maproulette
//!
//! Turns Atlas Checks flags into MapRoulette challenges and tasks.
//!
//! - [`challenge`]: challenge bodies from the checks config
//! - [`priority`]: priority rule normalization
//! - [`task`]: one task per flag
//! - [`MapRouletteApi`] / [`MapRouletteClient`]: the remote calls, over HTTP
//!   with retry
//! - [`Uploader`]: the end-to-end upload of a folder of logs

pub mod challenge;
pub mod priority;
pub mod task;
pub mod upload;

mod api;
mod client;
mod error;
mod http;

pub use api::{MapRouletteApi, ProjectRequest};
pub use challenge::{ChallengeRequest, build_challenge};
pub use client::{API_KEY_HEADER, MapRouletteClient};
pub use error::MapRouletteError;
pub use priority::{PriorityRule, PriorityRuleModel, priority_rule_string};
pub use task::{TaskRequest, build_task};
pub use upload::{
    ChallengeUpload, MAX_BATCH_SIZE, ProjectSelector, UploadEvent, UploadRequest, UploadSummary,
    Uploader, select_flags,
};

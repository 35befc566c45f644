//! The remote operations the upload driver needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MapRouletteError;
use crate::challenge::ChallengeRequest;
use crate::task::TaskRequest;

/// Body of a create-project call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub name: String,
    pub description: String,
}

impl ProjectRequest {
    /// A project with an empty description.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

/// MapRoulette operations used by [`Uploader`](crate::Uploader).
///
/// [`MapRouletteClient`](crate::MapRouletteClient) is the HTTP implementation;
/// tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait MapRouletteApi {
    /// Id of the project called `name`, or `None` if there is none.
    async fn find_project(&self, name: &str) -> Result<Option<u64>, MapRouletteError>;

    /// Create a project and return its id.
    async fn create_project(&self, project: &ProjectRequest) -> Result<u64, MapRouletteError>;

    /// Id of the challenge called `name` in project `project_id`, if any.
    async fn find_challenge(
        &self,
        project_id: u64,
        name: &str,
    ) -> Result<Option<u64>, MapRouletteError>;

    /// Create a challenge and return its id.
    async fn create_challenge(
        &self,
        challenge: &ChallengeRequest,
    ) -> Result<u64, MapRouletteError>;

    /// Submit one batch of tasks. Returns the raw service response.
    async fn create_tasks(&self, tasks: &[TaskRequest]) -> Result<Value, MapRouletteError>;
}

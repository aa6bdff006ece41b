use crate::dispatch::{Dispatcher, Payload, Verb};
use crate::error::Result;
use crate::mapper;
use crate::models::{Project, ProjectDraft};
use crate::wire::ProjectResponse;

/// Projects of the account behind the credential.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    dispatcher: Dispatcher,
}

impl ProjectRepository {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get a project by ID.
    pub async fn get(&self, id: u64) -> Result<Project> {
        let response: Option<ProjectResponse> = self
            .dispatcher
            .send(&format!("/projects/{}", id), Verb::Get, Payload::NONE)
            .await?;
        mapper::project::to_entity(response)
    }

    /// List all projects visible to the credential.
    pub async fn list(&self) -> Result<Vec<Project>> {
        let response: Option<Vec<ProjectResponse>> = self
            .dispatcher
            .send("/projects", Verb::Get, Payload::NONE)
            .await?;
        mapper::project::to_entities(response)
    }

    /// Create a project.
    pub async fn create(&self, draft: &ProjectDraft) -> Result<Project> {
        tracing::debug!(name = %draft.name, "creating project");
        let request = mapper::project::to_create_request(draft);
        let response: Option<ProjectResponse> = self
            .dispatcher
            .send("/projects", Verb::Post, Payload::Body(&request))
            .await?;
        mapper::project::to_entity(response)
    }
}

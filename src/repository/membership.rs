use crate::dispatch::{Dispatcher, Payload, Verb};
use crate::error::Result;
use crate::mapper;
use crate::models::{Membership, ProjectRef};
use crate::wire::MembershipResponse;

/// Memberships of a project.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    dispatcher: Dispatcher,
}

impl MembershipRepository {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List the memberships of a project.
    pub async fn list(&self, project: &ProjectRef) -> Result<Vec<Membership>> {
        let path = format!("/projects/{}/memberships", project.id);
        let response: Option<Vec<MembershipResponse>> =
            self.dispatcher.send(&path, Verb::Get, Payload::NONE).await?;
        mapper::membership::to_entities(response, project)
    }

    /// Get a membership by ID.
    pub async fn get(&self, project: &ProjectRef, membership_id: u64) -> Result<Membership> {
        let path = format!("/projects/{}/memberships/{}", project.id, membership_id);
        let response: Option<MembershipResponse> =
            self.dispatcher.send(&path, Verb::Get, Payload::NONE).await?;
        mapper::membership::to_entity(response, project)
    }

    /// Add a member to the project referenced by `membership.project`.
    pub async fn add(&self, membership: &Membership) -> Result<Membership> {
        tracing::debug!(project_id = membership.project.id, "adding membership");
        let request = mapper::membership::to_create_request(membership);
        let path = format!("/projects/{}/memberships", membership.project.id);
        let response: Option<MembershipResponse> = self
            .dispatcher
            .send(&path, Verb::Post, Payload::Body(&request))
            .await?;
        mapper::membership::to_entity(response, &membership.project)
    }

    /// Remove a membership from a project.
    pub async fn remove(&self, project: &ProjectRef, membership_id: u64) -> Result<Membership> {
        tracing::debug!(project_id = project.id, membership_id, "removing membership");
        let path = format!("/projects/{}/memberships/{}", project.id, membership_id);
        let response: Option<MembershipResponse> = self
            .dispatcher
            .send(&path, Verb::Delete, Payload::NONE)
            .await?;
        mapper::membership::to_entity(response, project)
    }
}

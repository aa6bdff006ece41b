use std::sync::Arc;

use super::{
    chain_node, Child, Link, MembershipsFacade, Node, ProjectStoriesFacade, ProjectsFacade,
};
use crate::error::Result;
use crate::models::Project;
use crate::repository::StoryRepository;

/// A single project, or nothing when a lookup found no match.
#[derive(Debug, Clone)]
pub struct ProjectFacade {
    link: Link<ProjectsFacade>,
    item: Option<Arc<Project>>,
}

chain_node!(ProjectFacade => ProjectsFacade);

impl ProjectFacade {
    pub(crate) fn new(link: Link<ProjectsFacade>, project: Option<Project>) -> Self {
        Self {
            link,
            item: project.map(Arc::new),
        }
    }

    pub fn item(&self) -> Option<&Project> {
        self.item.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// ID of the wrapped project; `0` for an empty node.
    pub fn id(&self) -> u64 {
        self.item.as_ref().map_or(0, |p| p.id)
    }

    /// Run `f` on the project, if any, and keep chaining.
    pub fn inspect(self, f: impl FnOnce(&Project)) -> Self {
        if let Some(project) = self.item.as_deref() {
            f(project);
        }
        self
    }

    /// Navigate to the project's stories.
    pub fn stories(&self) -> ProjectStoriesFacade {
        ProjectStoriesFacade::new(Link::under(self))
    }

    /// Navigate to the project's memberships.
    pub fn memberships(&self) -> MembershipsFacade {
        MembershipsFacade::new(Link::under(self))
    }

    /// Load the project again, as a sibling of this node.
    pub async fn reload(&self) -> Result<ProjectFacade> {
        self.parent().get(self.id()).await
    }

    /// Mark every finished story as delivered. Returns this node unchanged.
    pub async fn deliver_all_finished_stories(&self) -> Result<ProjectFacade> {
        let delivered = StoryRepository::new(self.root().dispatcher())
            .deliver_all_finished(self.id())
            .await?;
        tracing::debug!(project_id = self.id(), count = delivered.len(), "stories delivered");
        Ok(self.clone())
    }
}

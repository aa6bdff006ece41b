use super::{chain_node, Child, Link, Node, ProjectFacade};
use crate::error::Result;
use crate::models::{Membership, Project, ProjectRef};
use crate::repository::MembershipRepository;

/// The memberships of one project.
///
/// Memberships are always listed fresh from the service; the copy embedded
/// in the parent project may be stale.
#[derive(Debug, Clone)]
pub struct MembershipsFacade {
    link: Link<ProjectFacade>,
}

chain_node!(MembershipsFacade => ProjectFacade);

impl MembershipsFacade {
    pub(crate) fn new(link: Link<ProjectFacade>) -> Self {
        Self { link }
    }

    fn repository(&self) -> MembershipRepository {
        MembershipRepository::new(self.root().dispatcher())
    }

    fn project(&self) -> Project {
        self.parent().item().cloned().unwrap_or_default()
    }

    fn project_ref(&self) -> ProjectRef {
        self.project().reference()
    }

    pub async fn all(&self) -> Result<Vec<Membership>> {
        self.repository().list(&self.project_ref()).await
    }

    /// Run `f` on the current memberships and keep chaining.
    pub async fn inspect_all(&self, f: impl FnOnce(&[Membership])) -> Result<MembershipsFacade> {
        let memberships = self.all().await?;
        f(&memberships);
        Ok(self.clone())
    }

    /// Add `membership` to the parent project.
    pub async fn add(&self, mut membership: Membership) -> Result<MembershipsFacade> {
        membership.project = self.project_ref();
        let added = self.repository().add(&membership).await?;
        tracing::debug!(
            project_id = added.project.id,
            membership_id = added.id,
            "membership added"
        );
        Ok(self.clone())
    }

    /// Add the membership `build` derives from the parent project.
    pub async fn add_with(
        &self,
        build: impl FnOnce(&Project) -> Membership,
    ) -> Result<MembershipsFacade> {
        let membership = build(&self.project());
        self.add(membership).await
    }

    /// Remove the membership `select` picks from the project.
    ///
    /// `select` sees the parent project with its memberships freshly listed.
    /// Returning `None` removes nothing.
    pub async fn remove(
        &self,
        select: impl FnOnce(&Project) -> Option<Membership>,
    ) -> Result<MembershipsFacade> {
        let mut project = self.project();
        project.memberships = self.all().await?;
        match select(&project) {
            Some(membership) => {
                self.repository()
                    .remove(&project.reference(), membership.id)
                    .await?;
            }
            None => tracing::debug!(project_id = project.id, "no membership selected for removal"),
        }
        Ok(self.clone())
    }

    /// Remove every membership matching `predicate`, one at a time.
    pub async fn remove_where(
        &self,
        mut predicate: impl FnMut(&Membership) -> bool,
    ) -> Result<MembershipsFacade> {
        let project = self.project_ref();
        let repository = self.repository();
        for membership in repository.list(&project).await? {
            if predicate(&membership) {
                repository.remove(&project, membership.id).await?;
            }
        }
        Ok(self.clone())
    }
}

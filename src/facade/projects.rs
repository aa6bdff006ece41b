use chrono::{DateTime, Utc, Weekday};

use super::{chain_node, Link, Node, ProjectFacade, Tracker};
use crate::error::Result;
use crate::models::{Project, ProjectDraft};
use crate::repository::ProjectRepository;

/// All projects of the account.
#[derive(Debug, Clone)]
pub struct ProjectsFacade {
    link: Link<Tracker>,
}

chain_node!(ProjectsFacade => Tracker);

impl ProjectsFacade {
    pub(crate) fn new(root: &Tracker) -> Self {
        Self {
            link: Link::under(root),
        }
    }

    fn repository(&self) -> ProjectRepository {
        ProjectRepository::new(self.root().dispatcher())
    }

    /// Load every project, each wrapped in its own node.
    pub async fn all(&self) -> Result<Vec<ProjectFacade>> {
        let projects = self.repository().list().await?;
        let link = Link::under(self);
        Ok(projects
            .into_iter()
            .map(|p| ProjectFacade::new(link.clone(), Some(p)))
            .collect())
    }

    /// Load a project by ID.
    pub async fn get(&self, id: u64) -> Result<ProjectFacade> {
        let project = self.repository().get(id).await?;
        Ok(ProjectFacade::new(Link::under(self), Some(project)))
    }

    /// The first project matching `predicate`, or an empty node.
    pub async fn find(&self, mut predicate: impl FnMut(&Project) -> bool) -> Result<ProjectFacade> {
        let projects = self.repository().list().await?;
        let found = projects.into_iter().find(|p| predicate(p));
        Ok(ProjectFacade::new(Link::under(self), found))
    }

    /// Start building a new project.
    pub fn create(&self) -> ProjectCreateFacade {
        ProjectCreateFacade {
            link: Link::under(self),
            draft: ProjectDraft::default(),
        }
    }
}

/// Builder for a project about to be created.
#[derive(Debug, Clone)]
pub struct ProjectCreateFacade {
    link: Link<ProjectsFacade>,
    draft: ProjectDraft,
}

chain_node!(ProjectCreateFacade => ProjectsFacade);

impl ProjectCreateFacade {
    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    /// Iteration length in weeks. Defaults to 3.
    pub fn set_iteration_length(mut self, weeks: u32) -> Self {
        self.draft.iteration_length = weeks;
        self
    }

    pub fn set_public(mut self, public: bool) -> Self {
        self.draft.public = Some(public);
        self
    }

    pub fn set_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.draft.start_time = Some(start);
        self
    }

    pub fn set_week_start_day(mut self, day: Weekday) -> Self {
        self.draft.week_start_day = Some(day);
        self
    }

    /// Create the project and return a node for it under the projects node.
    pub async fn save(&self) -> Result<ProjectFacade> {
        let repository = ProjectRepository::new(self.root().dispatcher());
        let project = repository.create(&self.draft).await?;
        Ok(ProjectFacade::new(self.link.clone(), Some(project)))
    }
}

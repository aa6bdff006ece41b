use std::future::Future;
use std::sync::Arc;

use super::{chain_node, Child, Link, Node, ProjectFacade, StoryFacade, StoryParent};
use crate::error::Result;
use crate::models::{Label, Story, StoryDraft, StoryState, StoryType};
use crate::repository::StoryRepository;

/// The stories of one project.
#[derive(Debug, Clone)]
pub struct ProjectStoriesFacade {
    link: Link<ProjectFacade>,
}

chain_node!(ProjectStoriesFacade => ProjectFacade);

impl StoryParent for ProjectStoriesFacade {
    fn project_id(&self) -> u64 {
        self.parent().id()
    }
}

impl ProjectStoriesFacade {
    pub(crate) fn new(link: Link<ProjectFacade>) -> Self {
        Self { link }
    }

    fn repository(&self) -> StoryRepository {
        StoryRepository::new(self.root().dispatcher())
    }

    fn collection(&self, stories: Vec<Story>) -> StoriesFacade {
        StoriesFacade {
            link: Link::under(self),
            items: Arc::new(stories),
        }
    }

    /// Load every story of the project.
    pub async fn all(&self) -> Result<StoriesFacade> {
        let stories = self.repository().list(self.project_id()).await?;
        Ok(self.collection(stories))
    }

    /// Load the stories matching a service-side filter, e.g. `state:unstarted`.
    pub async fn filter(&self, expression: &str) -> Result<StoriesFacade> {
        let stories = self
            .repository()
            .filter(self.project_id(), expression)
            .await?;
        Ok(self.collection(stories))
    }

    /// Load at most `limit` stories starting at `offset`.
    pub async fn some(&self, offset: u32, limit: u32) -> Result<StoriesFacade> {
        let stories = self
            .repository()
            .page(self.project_id(), offset, limit)
            .await?;
        Ok(self.collection(stories))
    }

    /// Load a story by ID.
    pub async fn get(&self, id: u64) -> Result<StoryFacade<ProjectStoriesFacade>> {
        let story = self.repository().get(self.project_id(), id).await?;
        Ok(StoryFacade::new(Link::under(self), Some(story)))
    }

    /// Start building a new story.
    pub fn create(&self) -> StoryCreationFacade {
        StoryCreationFacade {
            link: Link::under(self),
            draft: StoryDraft::default(),
        }
    }
}

/// Builder for a story about to be created.
#[derive(Debug, Clone)]
pub struct StoryCreationFacade {
    link: Link<ProjectStoriesFacade>,
    draft: StoryDraft,
}

chain_node!(StoryCreationFacade => ProjectStoriesFacade);

impl StoryCreationFacade {
    pub fn draft(&self) -> &StoryDraft {
        &self.draft
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    pub fn set_type(mut self, story_type: StoryType) -> Self {
        self.draft.story_type = Some(story_type);
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = description.into();
        self
    }

    pub fn set_state(mut self, state: StoryState) -> Self {
        self.draft.current_state = Some(state);
        self
    }

    /// Set labels from a comma-separated list.
    pub fn set_label(self, labels: &str) -> Self {
        self.set_labels(labels.split(','))
    }

    pub fn set_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.draft.labels = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .map(Label::named)
            .collect();
        self
    }

    /// Person id of the owner.
    pub fn set_owner(mut self, person_id: u64) -> Self {
        self.draft.owned_by_id = person_id;
        self
    }

    /// Person id of the requester.
    pub fn set_requester(mut self, person_id: u64) -> Self {
        self.draft.requested_by_id = person_id;
        self
    }

    /// Only estimable story types accept points; the service rejects others.
    pub fn set_estimate(mut self, points: u32) -> Self {
        self.draft.estimate = points;
        self
    }

    /// Create the story and return a node for it under the project's stories.
    pub async fn save(&self) -> Result<StoryFacade<ProjectStoriesFacade>> {
        let project_id = self.parent().project_id();
        let story = StoryRepository::new(self.root().dispatcher())
            .create(project_id, &self.draft)
            .await?;
        Ok(StoryFacade::new(self.link.clone(), Some(story)))
    }
}

/// A list of stories, in the order the service returned them.
#[derive(Debug, Clone)]
pub struct StoriesFacade {
    link: Link<ProjectStoriesFacade>,
    items: Arc<Vec<Story>>,
}

chain_node!(StoriesFacade => ProjectStoriesFacade);

impl StoryParent for StoriesFacade {
    fn project_id(&self) -> u64 {
        self.parent().project_id()
    }
}

impl StoriesFacade {
    pub fn items(&self) -> &[Story] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run `f` on the stories and keep chaining.
    pub fn inspect(self, f: impl FnOnce(&[Story])) -> Self {
        f(&self.items);
        self
    }

    fn child(&self, story: &Story) -> StoryFacade<StoriesFacade> {
        StoryFacade::new(Link::under(self), Some(story.clone()))
    }

    /// The first story matching `predicate`, or an empty node.
    pub fn find(&self, mut predicate: impl FnMut(&Story) -> bool) -> StoryFacade<StoriesFacade> {
        match self.items.iter().find(|s| predicate(s)) {
            Some(story) => self.child(story),
            None => StoryFacade::new(Link::under(self), None),
        }
    }

    /// Run `action` on a node for each story, one at a time and in order.
    ///
    /// Stops at the first failing action.
    pub async fn each<F, Fut>(&self, mut action: F) -> Result<StoriesFacade>
    where
        F: FnMut(StoryFacade<StoriesFacade>) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        for story in self.items.iter() {
            action(self.child(story)).await?;
        }
        Ok(self.clone())
    }

    /// Apply `mutate` to each story and persist it before moving to the next.
    ///
    /// Stops at the first failed update. Returns this node as it was; the
    /// stories are not reloaded.
    pub async fn update_all(&self, mut mutate: impl FnMut(&mut Story)) -> Result<StoriesFacade> {
        for story in self.items.iter() {
            self.child(story).update(&mut mutate).await?;
        }
        Ok(self.clone())
    }
}

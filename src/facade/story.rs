use std::fmt::Debug;
use std::sync::Arc;

use super::{Child, Link, Node, Tracker};
use crate::error::Result;
use crate::models::{Attachment, MovePosition, Story};
use crate::repository::StoryRepository;

/// A node a [`StoryFacade`] can hang under.
pub trait StoryParent: Node + Clone + Debug {
    /// ID of the project the stories belong to.
    fn project_id(&self) -> u64;
}

/// A single story, or nothing when a lookup found no match.
///
/// Generic over its parent so that [`Child::done`] leads back to wherever
/// the story was reached from.
#[derive(Debug)]
pub struct StoryFacade<P> {
    link: Link<P>,
    item: Option<Arc<Story>>,
}

impl<P> Clone for StoryFacade<P> {
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
            item: self.item.clone(),
        }
    }
}

impl<P: StoryParent> Node for StoryFacade<P> {
    fn root(&self) -> &Tracker {
        &self.link.root
    }
}

impl<P: StoryParent> Child for StoryFacade<P> {
    type Parent = P;

    fn parent(&self) -> &P {
        &self.link.parent
    }
}

impl<P: StoryParent> StoryFacade<P> {
    pub(crate) fn new(link: Link<P>, story: Option<Story>) -> Self {
        Self {
            link,
            item: story.map(Arc::new),
        }
    }

    fn repository(&self) -> StoryRepository {
        StoryRepository::new(self.root().dispatcher())
    }

    fn sibling(&self, story: Story) -> Self {
        Self::new(self.link.clone(), Some(story))
    }

    pub fn item(&self) -> Option<&Story> {
        self.item.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// ID of the wrapped story; `0` for an empty node.
    pub fn id(&self) -> u64 {
        self.item.as_ref().map_or(0, |s| s.id)
    }

    /// Run `f` on the story, if any, and keep chaining.
    pub fn inspect(self, f: impl FnOnce(&Story)) -> Self {
        if let Some(story) = self.item.as_deref() {
            f(story);
        }
        self
    }

    /// Apply `mutate` to a copy of the story and persist it.
    ///
    /// The copy is bound to the parent's project before it is sent. The
    /// returned node wraps the story as stored by the service; this node
    /// keeps the old version.
    pub async fn update(&self, mutate: impl FnOnce(&mut Story)) -> Result<Self> {
        let mut story = self.item.as_deref().cloned().unwrap_or_default();
        mutate(&mut story);
        story.project_id = self.parent().project_id();
        let updated = self.repository().update(&story).await?;
        Ok(self.sibling(updated))
    }

    /// Delete the story and step back to the parent.
    pub async fn delete(&self) -> Result<P> {
        self.repository()
            .delete(self.parent().project_id(), self.id())
            .await?;
        Ok(self.done())
    }

    /// Add a note. The returned node carries the note after any existing ones.
    pub async fn add_note(&self, text: &str) -> Result<Self> {
        let note = self
            .repository()
            .add_note(self.parent().project_id(), self.id(), text)
            .await?;
        let mut story = self.item.as_deref().cloned().unwrap_or_default();
        story.notes.push(note);
        Ok(self.sibling(story))
    }

    /// Move this story right after `target_id`.
    pub async fn move_after(&self, target_id: u64) -> Result<Self> {
        self.move_to(MovePosition::After, target_id).await
    }

    /// Move this story right before `target_id`.
    pub async fn move_before(&self, target_id: u64) -> Result<Self> {
        self.move_to(MovePosition::Before, target_id).await
    }

    async fn move_to(&self, position: MovePosition, target_id: u64) -> Result<Self> {
        let moved = self
            .repository()
            .move_story(self.parent().project_id(), self.id(), position, target_id)
            .await?;
        Ok(self.sibling(moved))
    }

    pub async fn upload_attachment(
        &self,
        data: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<Attachment> {
        self.repository()
            .upload_attachment(
                self.parent().project_id(),
                self.id(),
                data,
                filename,
                content_type,
            )
            .await
    }

    pub async fn download_attachment(&self, attachment: &Attachment) -> Result<Vec<u8>> {
        self.repository().download_attachment(attachment).await
    }

    pub async fn link_to_external(&self, integration_id: u64) -> Result<Self> {
        let linked = self
            .repository()
            .link_to_external(self.parent().project_id(), self.id(), integration_id)
            .await?;
        Ok(self.sibling(linked))
    }
}

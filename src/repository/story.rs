use crate::dispatch::{Dispatcher, Payload, Verb};
use crate::error::{Error, Result};
use crate::mapper;
use crate::models::{Attachment, MovePosition, Note, Story, StoryDraft};
use crate::wire::{NoteRequest, NoteResponse, StoryMoveRequest, StoryResponse};

/// Stories of a project.
#[derive(Debug, Clone)]
pub struct StoryRepository {
    dispatcher: Dispatcher,
}

impl StoryRepository {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get a story by ID.
    pub async fn get(&self, project_id: u64, story_id: u64) -> Result<Story> {
        let path = format!("/projects/{}/stories/{}", project_id, story_id);
        let response: Option<StoryResponse> =
            self.dispatcher.send(&path, Verb::Get, Payload::NONE).await?;
        mapper::story::to_entity(response)
    }

    /// List all stories of a project.
    pub async fn list(&self, project_id: u64) -> Result<Vec<Story>> {
        self.fetch_many(&format!("/projects/{}/stories", project_id), Verb::Get)
            .await
    }

    /// List stories matching a service-side filter expression, e.g.
    /// `state:unstarted`. The expression is passed through untouched.
    pub async fn filter(&self, project_id: u64, filter: &str) -> Result<Vec<Story>> {
        let path = format!(
            "/projects/{}/stories?filter={}",
            project_id,
            urlencoding::encode(filter)
        );
        self.fetch_many(&path, Verb::Get).await
    }

    /// List one page of stories.
    pub async fn page(&self, project_id: u64, offset: u32, limit: u32) -> Result<Vec<Story>> {
        let path = format!(
            "/projects/{}/stories?limit={}&offset={}",
            project_id, limit, offset
        );
        self.fetch_many(&path, Verb::Get).await
    }

    /// Create a story in a project.
    pub async fn create(&self, project_id: u64, draft: &StoryDraft) -> Result<Story> {
        tracing::debug!(project_id, name = %draft.name, "creating story");
        let request = mapper::story::to_create_request(draft);
        let path = format!("/projects/{}/stories", project_id);
        let response: Option<StoryResponse> = self
            .dispatcher
            .send(&path, Verb::Post, Payload::Body(&request))
            .await?;
        mapper::story::to_entity(response)
    }

    /// Persist the story's current state and return the stored version.
    pub async fn update(&self, story: &Story) -> Result<Story> {
        tracing::debug!(project_id = story.project_id, story_id = story.id, "updating story");
        let request = mapper::story::to_update_request(story);
        let path = format!("/projects/{}/stories/{}", story.project_id, story.id);
        let response: Option<StoryResponse> = self
            .dispatcher
            .send(&path, Verb::Put, Payload::Body(&request))
            .await?;
        mapper::story::to_entity(response)
    }

    /// Delete a story. Returns whatever the service echoes back, which is
    /// usually nothing and maps to an empty story.
    pub async fn delete(&self, project_id: u64, story_id: u64) -> Result<Story> {
        tracing::debug!(project_id, story_id, "deleting story");
        let path = format!("/projects/{}/stories/{}", project_id, story_id);
        let response: Option<StoryResponse> = self
            .dispatcher
            .send(&path, Verb::Delete, Payload::NONE)
            .await?;
        mapper::story::to_entity(response)
    }

    /// Add a note to a story.
    pub async fn add_note(&self, project_id: u64, story_id: u64, text: &str) -> Result<Note> {
        let path = format!("/projects/{}/stories/{}/notes", project_id, story_id);
        let request = NoteRequest {
            text: text.to_string(),
        };
        let response: Option<NoteResponse> = self
            .dispatcher
            .send(&path, Verb::Post, Payload::Body(&request))
            .await?;
        Ok(response
            .map(|n| mapper::story::note_to_entity(n, story_id))
            .unwrap_or_else(|| Note {
                story_id,
                text: text.to_string(),
                ..Note::default()
            }))
    }

    /// Mark every finished story of the project as delivered.
    pub async fn deliver_all_finished(&self, project_id: u64) -> Result<Vec<Story>> {
        tracing::debug!(project_id, "delivering finished stories");
        let path = format!("/projects/{}/stories/deliver_all_finished", project_id);
        self.fetch_many(&path, Verb::Put).await
    }

    /// Move a story before or after another story of the same project.
    pub async fn move_story(
        &self,
        project_id: u64,
        story_id: u64,
        position: MovePosition,
        target_id: u64,
    ) -> Result<Story> {
        let request = match position {
            MovePosition::Before => StoryMoveRequest {
                before_id: Some(target_id),
                after_id: None,
            },
            MovePosition::After => StoryMoveRequest {
                before_id: None,
                after_id: Some(target_id),
            },
        };
        let path = format!("/projects/{}/stories/{}", project_id, story_id);
        let response: Option<StoryResponse> = self
            .dispatcher
            .send(&path, Verb::Put, Payload::Body(&request))
            .await?;
        mapper::story::to_entity(response)
    }

    /// Upload a file to a story. Not supported by this client.
    pub async fn upload_attachment(
        &self,
        _project_id: u64,
        _story_id: u64,
        _data: &[u8],
        _filename: &str,
        _content_type: &str,
    ) -> Result<Attachment> {
        Err(Error::NotImplemented("attachment upload"))
    }

    /// Download an attachment's content. Not supported by this client.
    pub async fn download_attachment(&self, _attachment: &Attachment) -> Result<Vec<u8>> {
        Err(Error::NotImplemented("attachment download"))
    }

    /// Link a story to an external integration. Not supported by this client.
    pub async fn link_to_external(
        &self,
        _project_id: u64,
        _story_id: u64,
        _integration_id: u64,
    ) -> Result<Story> {
        Err(Error::NotImplemented("external integration linking"))
    }

    async fn fetch_many(&self, path: &str, verb: Verb) -> Result<Vec<Story>> {
        let response: Option<Vec<StoryResponse>> =
            self.dispatcher.send(path, verb, Payload::NONE).await?;
        mapper::story::to_entities(response)
    }
}

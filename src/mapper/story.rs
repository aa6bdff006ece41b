use crate::error::Result;
use crate::models::{Attachment, Label, Note, Story, StoryDraft, Task};
use crate::wire::{
    AttachmentResponse, LabelRequest, LabelResponse, NoteResponse, StoryCreateRequest,
    StoryResponse, StoryUpdateRequest, TaskResponse,
};

use super::{collect, non_empty, non_zero};

/// Map a story response; an absent response yields an empty story.
pub fn to_entity(response: Option<StoryResponse>) -> Result<Story> {
    let Some(r) = response else {
        return Ok(Story::default());
    };
    let id = r.id;

    Ok(Story {
        id,
        project_id: r.project_id.unwrap_or_default(),
        story_type: match r.story_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => Default::default(),
        },
        url: r.url,
        estimate: r.estimate.unwrap_or_default(),
        current_state: match r.current_state.as_deref() {
            Some(raw) => raw.parse()?,
            None => Default::default(),
        },
        name: r.name.unwrap_or_default(),
        description: r.description.unwrap_or_default(),
        requested_by_id: r.requested_by_id.unwrap_or_default(),
        owned_by_id: r.owned_by_id.unwrap_or_default(),
        created_at: r.created_at,
        updated_at: r.updated_at,
        accepted_at: r.accepted_at,
        labels: collect(r.labels, |l| Ok(label_to_entity(l)))?,
        notes: collect(r.notes, |n| Ok(note_to_entity(n, id)))?,
        attachments: collect(r.attachments, |a| Ok(attachment_to_entity(a)))?,
        tasks: collect(r.tasks, |t| Ok(task_to_entity(t)))?,
    })
}

/// Map a story listing; an absent listing is empty.
pub fn to_entities(responses: Option<Vec<StoryResponse>>) -> Result<Vec<Story>> {
    collect(responses, |r| to_entity(Some(r)))
}

pub fn note_to_entity(r: NoteResponse, story_id: u64) -> Note {
    Note {
        id: r.id,
        story_id,
        author: r.author.unwrap_or_default(),
        text: r.text.unwrap_or_default(),
        noted_at: r.noted_at,
    }
}

fn label_to_entity(r: LabelResponse) -> Label {
    Label {
        id: r.id,
        name: r.name.unwrap_or_default(),
        created_at: r.created_at,
        updated_at: r.updated_at,
    }
}

fn attachment_to_entity(r: AttachmentResponse) -> Attachment {
    Attachment {
        id: r.id,
        filename: r.filename.unwrap_or_default(),
        description: r.description.unwrap_or_default(),
        uploaded_by: r.uploaded_by.unwrap_or_default(),
        uploaded_at: r.uploaded_at,
        url: r.url,
    }
}

fn task_to_entity(r: TaskResponse) -> Task {
    Task {
        id: r.id,
        description: r.description.unwrap_or_default(),
        position: r.position.unwrap_or_default(),
        complete: r.complete.unwrap_or_default(),
        created_at: r.created_at,
    }
}

/// Creation payload for a draft; unset fields are omitted.
pub fn to_create_request(draft: &StoryDraft) -> StoryCreateRequest {
    let labels: Vec<LabelRequest> = draft
        .labels
        .iter()
        .filter(|l| l.id != 0 || !l.name.trim().is_empty())
        .map(|l| LabelRequest {
            id: non_zero(l.id),
            name: non_empty(l.name.trim()),
        })
        .collect();

    StoryCreateRequest {
        name: non_empty(&draft.name),
        story_type: draft.story_type.map(|t| t.as_str().to_string()),
        description: non_empty(&draft.description),
        current_state: draft.current_state.map(|s| s.as_str().to_string()),
        estimate: non_zero(draft.estimate),
        requested_by_id: non_zero(draft.requested_by_id),
        owned_by_id: non_zero(draft.owned_by_id),
        labels: (!labels.is_empty()).then_some(labels),
    }
}

/// Update payload carrying the story's full core state.
///
/// The estimate is only sent when positive. Person ids are always sent, as
/// `null` when unset, so that clearing an owner or requester reaches the
/// service.
pub fn to_update_request(story: &Story) -> StoryUpdateRequest {
    StoryUpdateRequest {
        name: story.name.clone(),
        description: story.description.clone(),
        story_type: story.story_type.as_str().to_string(),
        current_state: story.current_state.as_str().to_string(),
        estimate: non_zero(story.estimate),
        requested_by_id: non_zero(story.requested_by_id),
        owned_by_id: non_zero(story.owned_by_id),
    }
}

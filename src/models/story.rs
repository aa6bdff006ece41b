use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::note::Note;
use super::task::Task;
use crate::error::Error;

/// A unit of work within a project.
///
/// Stories loaded from the service carry their labels, notes, attachments and
/// tasks in server order. Changing a field locally has no effect remotely
/// until the story is passed to an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub project_id: u64,
    pub story_type: StoryType,
    pub url: Option<String>,
    /// Points; `0` means unestimated.
    pub estimate: u32,
    pub current_state: StoryState,
    pub name: String,
    pub description: String,
    /// Person id of the requester; `0` when unknown.
    pub requested_by_id: u64,
    /// Person id of the owner; `0` when unowned.
    pub owned_by_id: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub labels: Vec<Label>,
    pub notes: Vec<Note>,
    pub attachments: Vec<Attachment>,
    pub tasks: Vec<Task>,
}

impl Story {
    /// Whether the story exists remotely.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// The kind of a story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    #[default]
    Feature,
    Bug,
    Chore,
    Release,
}

impl StoryType {
    pub const ALL: [StoryType; 4] = [Self::Feature, Self::Bug, Self::Chore, Self::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Chore => "chore",
            Self::Release => "release",
        }
    }
}

impl FromStr for StoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("story type", s))
    }
}

/// The workflow state of a story.
///
/// - `Unscheduled`: In the icebox
/// - `Unstarted` / `Planned`: In the backlog or current iteration
/// - `Started` → `Finished` → `Delivered` → `Accepted` | `Rejected`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryState {
    #[default]
    Unscheduled,
    Unstarted,
    Planned,
    Started,
    Finished,
    Delivered,
    Accepted,
    Rejected,
}

impl StoryState {
    pub const ALL: [StoryState; 8] = [
        Self::Unscheduled,
        Self::Unstarted,
        Self::Planned,
        Self::Started,
        Self::Finished,
        Self::Delivered,
        Self::Accepted,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscheduled => "unscheduled",
            Self::Unstarted => "unstarted",
            Self::Planned => "planned",
            Self::Started => "started",
            Self::Finished => "finished",
            Self::Delivered => "delivered",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for StoryState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("story state", s))
    }
}

/// A label attached to a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Label {
    /// A label known only by name, to be created or matched by the service.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A file attached to a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    pub description: String,
    pub uploaded_by: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

/// Where a story is moved relative to a target story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePosition {
    Before,
    After,
}

/// Builder state of a story about to be created.
///
/// Unset fields are left out of the creation request so that the service
/// applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryDraft {
    pub name: String,
    pub story_type: Option<StoryType>,
    pub description: String,
    pub current_state: Option<StoryState>,
    pub labels: Vec<Label>,
    pub requested_by_id: u64,
    pub owned_by_id: u64,
    pub estimate: u32,
}

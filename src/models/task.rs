use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checklist item inside a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
    /// 1-based position within the story's task list.
    pub position: u32,
    pub complete: bool,
    pub created_at: Option<DateTime<Utc>>,
}

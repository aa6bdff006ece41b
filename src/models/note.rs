use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left on a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    /// The story this note belongs to.
    pub story_id: u64,
    pub author: String,
    pub text: String,
    pub noted_at: Option<DateTime<Utc>>,
}

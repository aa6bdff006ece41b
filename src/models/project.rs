use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::membership::Membership;

/// A project containing stories.
///
/// Projects are the top-level organizational unit of an account. A project
/// loaded with [`crate::facade::ProjectsFacade::get`] carries the memberships
/// and integrations the service embeds in its response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub account_id: u64,
    /// Iteration length in weeks.
    pub iteration_length: u32,
    pub week_start_day: Option<Weekday>,
    /// Allowed estimate values, e.g. `0,1,2,3`.
    pub point_scale: String,
    pub current_velocity: u32,
    pub initial_velocity: u32,
    pub number_of_done_iterations_to_show: u32,
    pub labels: Vec<String>,
    pub attachments_allowed: bool,
    pub public: bool,
    pub bugs_and_chores_are_estimatable: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub memberships: Vec<Membership>,
    pub integrations: Vec<Integration>,
}

impl Project {
    /// Reference to this project, as held by its memberships.
    pub fn reference(&self) -> ProjectRef {
        ProjectRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Lightweight back-reference to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
}

/// An external tool linked to a project (bug tracker, CI server, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: u64,
    pub kind: String,
    pub name: String,
    pub active: bool,
}

/// Builder state of a project about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub iteration_length: u32,
    pub public: Option<bool>,
    pub start_time: Option<DateTime<Utc>>,
    pub week_start_day: Option<Weekday>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            iteration_length: 3,
            public: None,
            start_time: None,
            week_start_day: None,
        }
    }
}

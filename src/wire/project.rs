use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::membership::MembershipResponse;

/// `GET /projects/{id}` and each element of `GET /projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_velocity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_velocity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_done_iterations_to_show: Option<u32>,
    /// Comma-separated label names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_attachments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs_and_chores_are_estimatable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberships: Option<Vec<MembershipResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<IntegrationResponse>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// `POST /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreateRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start_day: Option<String>,
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::project::ProjectRef;
use crate::error::Error;

/// A person's membership in a project.
///
/// `project` is filled in by the client from the owning project, since the
/// service does not repeat it for every embedded membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: u64,
    pub person: Person,
    pub role: MembershipRole,
    pub project: ProjectRef,
    /// Hex color used for this member in the project, e.g. `8100ea`.
    pub project_color: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Membership {
    /// A membership to be added for the person with this email.
    pub fn invite(email: impl Into<String>, role: MembershipRole) -> Self {
        Self {
            person: Person {
                email: email.into(),
                ..Person::default()
            },
            role,
            ..Self::default()
        }
    }
}

/// A Tracker user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub initials: String,
    pub username: String,
}

/// Access level of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    Owner,
    #[default]
    Member,
    Viewer,
}

impl MembershipRole {
    pub const ALL: [MembershipRole; 3] = [Self::Owner, Self::Member, Self::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for MembershipRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("membership role", s))
    }
}

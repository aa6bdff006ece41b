use crate::error::Result;
use crate::models::{Membership, MembershipRole, Person, ProjectRef};
use crate::wire::{MembershipCreateRequest, MembershipResponse, PersonResponse};

use super::{non_empty, non_zero};

/// Map a membership, pointing it back at `project`.
///
/// The project reference comes from the caller because embedded memberships
/// do not carry it. An id in the response wins over the caller's id.
pub fn to_entity(response: Option<MembershipResponse>, project: &ProjectRef) -> Result<Membership> {
    let Some(r) = response else {
        return Ok(Membership {
            project: project.clone(),
            ..Membership::default()
        });
    };

    let role = match r.role.as_deref() {
        Some(raw) => raw.parse()?,
        None => MembershipRole::default(),
    };
    let project = ProjectRef {
        id: r.project_id.unwrap_or(project.id),
        name: project.name.clone(),
    };

    Ok(Membership {
        id: r.id,
        person: r.person.map(person_to_entity).unwrap_or_default(),
        role,
        project,
        project_color: r.project_color.unwrap_or_default(),
        created_at: r.created_at,
    })
}

pub fn to_entities(
    responses: Option<Vec<MembershipResponse>>,
    project: &ProjectRef,
) -> Result<Vec<Membership>> {
    super::collect(responses, |r| to_entity(Some(r), project))
}

fn person_to_entity(r: PersonResponse) -> Person {
    Person {
        id: r.id,
        name: r.name.unwrap_or_default(),
        email: r.email.unwrap_or_default(),
        initials: r.initials.unwrap_or_default(),
        username: r.username.unwrap_or_default(),
    }
}

/// Creation payload; empty person fields are omitted.
pub fn to_create_request(membership: &Membership) -> MembershipCreateRequest {
    MembershipCreateRequest {
        person_id: non_zero(membership.person.id),
        role: Some(membership.role.as_str().to_string()),
        email: non_empty(&membership.person.email),
        name: non_empty(&membership.person.name),
        initials: non_empty(&membership.person.initials),
        project_color: non_empty(&membership.project_color),
    }
}

use chrono::Weekday;

use crate::error::{Error, Result};
use crate::models::{Integration, Project, ProjectDraft};
use crate::wire::{IntegrationResponse, ProjectCreateRequest, ProjectResponse};

use super::collect;

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

/// Weekday by its full English name, ignoring case.
pub fn parse_weekday(raw: &str) -> Result<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, day)| *day)
        .ok_or_else(|| Error::unknown("week start day", raw))
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Map a project response; an absent response yields an empty project.
///
/// Embedded memberships are pointed back at this project.
pub fn to_entity(response: Option<ProjectResponse>) -> Result<Project> {
    let Some(r) = response else {
        return Ok(Project::default());
    };

    let mut project = Project {
        id: r.id,
        name: r.name.unwrap_or_default(),
        account_id: r.account_id.unwrap_or_default(),
        iteration_length: r.iteration_length.unwrap_or_default(),
        week_start_day: r.week_start_day.as_deref().map(parse_weekday).transpose()?,
        point_scale: r.point_scale.unwrap_or_default(),
        current_velocity: r.current_velocity.unwrap_or_default(),
        initial_velocity: r.initial_velocity.unwrap_or_default(),
        number_of_done_iterations_to_show: r
            .number_of_done_iterations_to_show
            .unwrap_or_default(),
        labels: r
            .labels
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        attachments_allowed: r.allow_attachments.unwrap_or_default(),
        public: r.public.unwrap_or_default(),
        bugs_and_chores_are_estimatable: r.bugs_and_chores_are_estimatable.unwrap_or_default(),
        start_time: r.start_time,
        updated_at: r.updated_at,
        memberships: Vec::new(),
        integrations: collect(r.integrations, |i| Ok(integration_to_entity(i)))?,
    };
    project.memberships = super::membership::to_entities(r.memberships, &project.reference())?;

    Ok(project)
}

pub fn to_entities(responses: Option<Vec<ProjectResponse>>) -> Result<Vec<Project>> {
    collect(responses, |r| to_entity(Some(r)))
}

fn integration_to_entity(r: IntegrationResponse) -> Integration {
    Integration {
        id: r.id,
        kind: r.kind.unwrap_or_default(),
        name: r.name.unwrap_or_default(),
        active: r.active.unwrap_or_default(),
    }
}

/// Creation payload for a draft; unset fields are omitted.
pub fn to_create_request(draft: &ProjectDraft) -> ProjectCreateRequest {
    ProjectCreateRequest {
        name: draft.name.clone(),
        iteration_length: super::non_zero(draft.iteration_length),
        public: draft.public,
        start_time: draft.start_time,
        week_start_day: draft.week_start_day.map(|d| weekday_name(d).to_string()),
    }
}

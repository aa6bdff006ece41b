//! In-process stand-ins for the Tracker service.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use pivotal_fluent::wire::{
    LabelResponse, MembershipCreateRequest, MembershipResponse, NoteRequest, NoteResponse,
    PersonResponse, ProjectCreateRequest, ProjectResponse, StoryCreateRequest, StoryMoveRequest,
    StoryResponse, StoryUpdateRequest,
};
use pivotal_fluent::{Credential, RetryPolicy, Tracker};

pub const TOKEN: &str = "test-token";

/// Person id the service records as requester when none is given.
pub const DEFAULT_REQUESTER: u64 = 101;

/// Bind `app` on an ephemeral port and return the service root URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service failed");
    });
    format!("http://{}/services/v5", addr)
}

/// A root with a short retry delay so failing tests stay fast.
pub fn tracker(base_url: &str) -> Tracker {
    let credential = Credential::new(TOKEN, base_url).expect("Invalid test credential");
    Tracker::with_retry(credential, RetryPolicy::new(3, Duration::from_millis(20)))
}

// ============================================================
// Stateful Tracker mock
// ============================================================

#[derive(Debug, Default)]
pub struct Db {
    next_id: u64,
    pub projects: Vec<ProjectResponse>,
    /// Every story of every project, in display order.
    pub stories: Vec<StoryResponse>,
    pub memberships: Vec<MembershipResponse>,
}

impl Db {
    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn story_mut(&mut self, project_id: u64, story_id: u64) -> Option<&mut StoryResponse> {
        self.stories
            .iter_mut()
            .find(|s| s.id == story_id && s.project_id == Some(project_id))
    }

    fn story_index(&self, project_id: u64, story_id: u64) -> Option<usize> {
        self.stories
            .iter()
            .position(|s| s.id == story_id && s.project_id == Some(project_id))
    }
}

pub type Shared = Arc<Mutex<Db>>;

type Reply<T> = Result<Json<T>, (StatusCode, String)>;

fn not_found(what: &str, id: u64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} {} not found", what, id))
}

async fn require_token(request: Request, next: Next) -> Response {
    match request.headers().get("X-TrackerToken") {
        Some(token) if token == TOKEN => next.run(request).await,
        _ => (StatusCode::UNAUTHORIZED, "invalid authentication").into_response(),
    }
}

/// The Tracker REST surface under `/services/v5`, backed by memory.
pub fn tracker_service() -> (Router, Shared) {
    let db = Shared::default();
    let api = Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}/stories", get(list_stories).post(create_story))
        .route(
            "/projects/{id}/stories/deliver_all_finished",
            put(deliver_all_finished),
        )
        .route(
            "/projects/{id}/stories/{story_id}",
            get(get_story).put(put_story).delete(delete_story),
        )
        .route("/projects/{id}/stories/{story_id}/notes", post(add_note))
        .route(
            "/projects/{id}/memberships",
            get(list_memberships).post(add_membership),
        )
        .route(
            "/projects/{id}/memberships/{membership_id}",
            get(get_membership).delete(remove_membership),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(db.clone());
    (Router::new().nest("/services/v5", api), db)
}

async fn list_projects(State(db): State<Shared>) -> Json<Vec<ProjectResponse>> {
    Json(db.lock().unwrap().projects.clone())
}

async fn create_project(
    State(db): State<Shared>,
    Json(input): Json<ProjectCreateRequest>,
) -> Reply<ProjectResponse> {
    if input.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }
    let mut db = db.lock().unwrap();
    let project = ProjectResponse {
        id: db.id(),
        name: Some(input.name),
        account_id: Some(7),
        iteration_length: Some(input.iteration_length.unwrap_or(1)),
        week_start_day: Some(input.week_start_day.unwrap_or_else(|| "Monday".into())),
        point_scale: Some("0,1,2,3".into()),
        public: Some(input.public.unwrap_or(false)),
        start_time: input.start_time,
        ..ProjectResponse::default()
    };
    db.projects.push(project.clone());
    Ok(Json(project))
}

async fn get_project(State(db): State<Shared>, Path(id): Path<u64>) -> Reply<ProjectResponse> {
    let db = db.lock().unwrap();
    let mut project = db
        .projects
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| not_found("project", id))?;
    // Embedded memberships leave out the project.
    project.memberships = Some(
        db.memberships
            .iter()
            .filter(|m| m.project_id == Some(id))
            .map(|m| MembershipResponse {
                project_id: None,
                ..m.clone()
            })
            .collect(),
    );
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
struct StoryQuery {
    filter: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

async fn list_stories(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Query(query): Query<StoryQuery>,
) -> Json<Vec<StoryResponse>> {
    let db = db.lock().unwrap();
    let state = query
        .filter
        .as_deref()
        .and_then(|f| f.strip_prefix("state:"))
        .map(str::to_string);
    let stories = db
        .stories
        .iter()
        .filter(|s| s.project_id == Some(id))
        .filter(|s| state.is_none() || s.current_state == state)
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Json(stories)
}

async fn create_story(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(input): Json<StoryCreateRequest>,
) -> Reply<StoryResponse> {
    let mut db = db.lock().unwrap();
    if !db.projects.iter().any(|p| p.id == id) {
        return Err(not_found("project", id));
    }
    let labels = input
        .labels
        .unwrap_or_default()
        .into_iter()
        .map(|l| LabelResponse {
            id: l.id.unwrap_or(0),
            project_id: Some(id),
            name: l.name,
            ..LabelResponse::default()
        })
        .collect::<Vec<_>>();
    let mut story = StoryResponse {
        id: db.id(),
        project_id: Some(id),
        story_type: Some(input.story_type.unwrap_or_else(|| "feature".into())),
        current_state: Some(input.current_state.unwrap_or_else(|| "unscheduled".into())),
        name: input.name,
        description: input.description,
        estimate: input.estimate,
        requested_by_id: Some(input.requested_by_id.unwrap_or(DEFAULT_REQUESTER)),
        owned_by_id: input.owned_by_id,
        ..StoryResponse::default()
    };
    story.labels = Some(
        labels
            .into_iter()
            .map(|mut l| {
                if l.id == 0 {
                    l.id = db.id();
                }
                l
            })
            .collect(),
    );
    story.url = Some(format!("https://tracker.test/story/show/{}", story.id));
    db.stories.push(story.clone());
    Ok(Json(story))
}

async fn deliver_all_finished(
    State(db): State<Shared>,
    Path(id): Path<u64>,
) -> Json<Vec<StoryResponse>> {
    let mut db = db.lock().unwrap();
    let delivered = db
        .stories
        .iter_mut()
        .filter(|s| s.project_id == Some(id) && s.current_state.as_deref() == Some("finished"))
        .map(|s| {
            s.current_state = Some("delivered".into());
            s.clone()
        })
        .collect();
    Json(delivered)
}

async fn get_story(
    State(db): State<Shared>,
    Path((id, story_id)): Path<(u64, u64)>,
) -> Reply<StoryResponse> {
    let mut db = db.lock().unwrap();
    db.story_mut(id, story_id)
        .map(|s| Json(s.clone()))
        .ok_or_else(|| not_found("story", story_id))
}

/// Either a move (`before_id` / `after_id`) or a field update.
async fn put_story(
    State(db): State<Shared>,
    Path((id, story_id)): Path<(u64, u64)>,
    Json(body): Json<serde_json::Value>,
) -> Reply<StoryResponse> {
    let mut db = db.lock().unwrap();
    let index = db
        .story_index(id, story_id)
        .ok_or_else(|| not_found("story", story_id))?;

    if body.get("before_id").is_some() || body.get("after_id").is_some() {
        let request: StoryMoveRequest = serde_json::from_value(body)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let story = db.stories.remove(index);
        let (target, after) = match (request.before_id, request.after_id) {
            (Some(before), _) => (before, false),
            (None, Some(after)) => (after, true),
            (None, None) => unreachable!(),
        };
        let Some(target_index) = db.story_index(id, target) else {
            db.stories.insert(index, story);
            return Err(not_found("story", target));
        };
        let at = if after { target_index + 1 } else { target_index };
        db.stories.insert(at, story.clone());
        return Ok(Json(story));
    }

    let request: StoryUpdateRequest =
        serde_json::from_value(body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let story = &mut db.stories[index];
    story.name = Some(request.name);
    story.description = Some(request.description);
    story.story_type = Some(request.story_type);
    story.current_state = Some(request.current_state);
    if request.estimate.is_some() {
        story.estimate = request.estimate;
    }
    story.requested_by_id = request.requested_by_id;
    story.owned_by_id = request.owned_by_id;
    Ok(Json(story.clone()))
}

async fn delete_story(
    State(db): State<Shared>,
    Path((id, story_id)): Path<(u64, u64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut db = db.lock().unwrap();
    let index = db
        .story_index(id, story_id)
        .ok_or_else(|| not_found("story", story_id))?;
    db.stories.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_note(
    State(db): State<Shared>,
    Path((id, story_id)): Path<(u64, u64)>,
    Json(input): Json<NoteRequest>,
) -> Reply<NoteResponse> {
    let mut db = db.lock().unwrap();
    let note = NoteResponse {
        id: db.id(),
        text: Some(input.text),
        author: Some("tester".into()),
        noted_at: None,
    };
    let story = db
        .story_mut(id, story_id)
        .ok_or_else(|| not_found("story", story_id))?;
    story.notes.get_or_insert_with(Vec::new).push(note.clone());
    Ok(Json(note))
}

async fn list_memberships(
    State(db): State<Shared>,
    Path(id): Path<u64>,
) -> Json<Vec<MembershipResponse>> {
    let db = db.lock().unwrap();
    Json(
        db.memberships
            .iter()
            .filter(|m| m.project_id == Some(id))
            .cloned()
            .collect(),
    )
}

async fn add_membership(
    State(db): State<Shared>,
    Path(id): Path<u64>,
    Json(input): Json<MembershipCreateRequest>,
) -> Reply<MembershipResponse> {
    let mut db = db.lock().unwrap();
    if !db.projects.iter().any(|p| p.id == id) {
        return Err(not_found("project", id));
    }
    if input.person_id.is_none() && input.email.is_none() {
        return Err((StatusCode::BAD_REQUEST, "person_id or email required".into()));
    }
    let person = PersonResponse {
        id: input.person_id.unwrap_or_else(|| db.id()),
        name: input.name,
        email: input.email,
        initials: input.initials,
        username: None,
    };
    let membership = MembershipResponse {
        id: db.id(),
        person: Some(person),
        project_id: Some(id),
        role: input.role,
        project_color: input.project_color,
        created_at: None,
    };
    db.memberships.push(membership.clone());
    Ok(Json(membership))
}

async fn get_membership(
    State(db): State<Shared>,
    Path((id, membership_id)): Path<(u64, u64)>,
) -> Reply<MembershipResponse> {
    let db = db.lock().unwrap();
    db.memberships
        .iter()
        .find(|m| m.id == membership_id && m.project_id == Some(id))
        .map(|m| Json(m.clone()))
        .ok_or_else(|| not_found("membership", membership_id))
}

async fn remove_membership(
    State(db): State<Shared>,
    Path((id, membership_id)): Path<(u64, u64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut db = db.lock().unwrap();
    let index = db
        .memberships
        .iter()
        .position(|m| m.id == membership_id && m.project_id == Some(id))
        .ok_or_else(|| not_found("membership", membership_id))?;
    db.memberships.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Scripted service
// ============================================================

/// A request as seen by the scripted service.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

/// Replays canned responses in order, repeating the last one, and records
/// every request.
#[derive(Debug, Default)]
pub struct Script {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    last: Mutex<Option<(StatusCode, String)>>,
    seen: Mutex<Vec<Seen>>,
}

impl Script {
    pub fn hits(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn next(&self) -> (StatusCode, String) {
        let mut last = self.last.lock().unwrap();
        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            *last = Some(response);
        }
        last.clone()
            .unwrap_or_else(|| (StatusCode::OK, "null".to_string()))
    }
}

pub fn scripted<I, S>(responses: I) -> (Router, Arc<Script>)
where
    I: IntoIterator<Item = (u16, S)>,
    S: Into<String>,
{
    let script = Arc::new(Script {
        responses: Mutex::new(
            responses
                .into_iter()
                .map(|(status, body)| {
                    let status = StatusCode::from_u16(status).expect("Invalid status code");
                    (status, body.into())
                })
                .collect(),
        ),
        ..Script::default()
    });
    let app = Router::new().fallback(replay).with_state(script.clone());
    (app, script)
}

async fn replay(
    State(script): State<Arc<Script>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    script.seen.lock().unwrap().push(Seen {
        method,
        uri,
        headers,
        body,
    });
    script.next().into_response()
}

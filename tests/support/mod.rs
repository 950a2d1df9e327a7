//! In-process stand-in for the polling API, enough to drive the client end to end.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use polldance_client::ApiClient;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct StubPoll {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<(String, Vec<String>)>,
}

impl StubPoll {
    pub fn new(id: i64, author: &str, title: &str, options: &[(&str, Vec<&str>)]) -> Self {
        StubPoll {
            id,
            author: author.to_string(),
            title: title.to_string(),
            description: format!("About {title}"),
            fields: options
                .iter()
                .map(|(t, voters)| (t.to_string(), voters.iter().map(|v| v.to_string()).collect()))
                .collect(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "author": self.author,
            "title": self.title,
            "description": self.description,
            "fields": self.fields.iter().map(|(title, voters)| json!({
                "title": title,
                "votes_list_db": voters,
            })).collect::<Vec<_>>(),
        })
    }
}

#[derive(Default)]
pub struct Backend {
    pub polls: Vec<StubPoll>,
    pub users: Vec<(String, String)>,
    pub deleted_titles: Vec<String>,
    pub next_id: i64,
}

#[derive(Clone)]
pub struct StubState {
    pub backend: Arc<Mutex<Backend>>,
    pub hits: Arc<AtomicUsize>,
}

pub struct StubServer {
    pub url: Url,
    pub state: StubState,
    task: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(polls: Vec<StubPoll>) -> Self {
        let next_id = polls.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let state = StubState {
            backend: Arc::new(Mutex::new(Backend {
                polls,
                next_id,
                ..Backend::default()
            })),
            hits: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/polling_api/get_all_polls/", get(get_all_polls))
            .route("/polling_api/get_poll_by_id/:id/", get(get_poll_by_id))
            .route("/polling_api/get_polls_by_author/:username/", get(get_polls_by_author))
            .route("/polling_api/get_voted_polls/:username/", get(get_voted_polls))
            .route("/polling_api/add_poll/", post(add_poll))
            .route("/polling_api/delete_poll/:title/", delete(delete_poll))
            .route("/polling_api/vote/", post(vote))
            .route("/polling_api/cancel_vote/", post(cancel_vote))
            .route("/polling_api/register/", post(register))
            .route("/polling_api/login/", post(login))
            .layer(middleware::from_fn_with_state(state.clone(), count_hits))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Unable to spawn tcp listener");
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubServer {
            url: Url::parse(&format!("http://{addr}")).unwrap(),
            state,
            task,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(self.url.clone())
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.state.backend.lock().unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn count_hits(State(state): State<StubState>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn get_all_polls(State(state): State<StubState>) -> Response {
    let backend = state.backend.lock().unwrap();
    let summaries: Vec<Value> = backend
        .polls
        .iter()
        .map(|p| json!({"id": p.id, "title": p.title, "author": p.author}))
        .collect();
    Json(summaries).into_response()
}

async fn get_poll_by_id(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    let backend = state.backend.lock().unwrap();
    match backend.polls.iter().find(|p| p.id.to_string() == id) {
        Some(poll) => Json(poll.to_json()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Poll not found"),
    }
}

async fn get_polls_by_author(
    State(state): State<StubState>,
    Path(username): Path<String>,
) -> Response {
    let backend = state.backend.lock().unwrap();
    if username == "weird" {
        return Json(json!({"message": "no polls"})).into_response();
    }
    let polls: Vec<Value> = backend
        .polls
        .iter()
        .filter(|p| p.author == username)
        .map(StubPoll::to_json)
        .collect();
    Json(polls).into_response()
}

async fn get_voted_polls(State(state): State<StubState>, Path(username): Path<String>) -> Response {
    let backend = state.backend.lock().unwrap();
    let voted: Vec<Value> = backend
        .polls
        .iter()
        .filter_map(|p| {
            p.fields
                .iter()
                .find(|(_, voters)| voters.contains(&username))
                .map(|(title, _)| json!({"id": p.id, "title": p.title, "selectedOption": title}))
        })
        .collect();
    Json(voted).into_response()
}

#[derive(Deserialize)]
struct AddPoll {
    author: String,
    title: String,
    description: String,
    fields: Vec<AddField>,
}

#[derive(Deserialize)]
struct AddField {
    title: String,
    votes_list_db: Vec<String>,
}

async fn add_poll(State(state): State<StubState>, Json(payload): Json<AddPoll>) -> Response {
    let mut backend = state.backend.lock().unwrap();
    if backend.polls.iter().any(|p| p.title == payload.title) {
        return detail(StatusCode::BAD_REQUEST, "Poll already exists");
    }
    let id = backend.next_id;
    backend.next_id += 1;
    let poll = StubPoll {
        id,
        author: payload.author,
        title: payload.title,
        description: payload.description,
        fields: payload
            .fields
            .into_iter()
            .map(|f| (f.title, f.votes_list_db))
            .collect(),
    };
    let body = poll.to_json();
    backend.polls.push(poll);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_poll(State(state): State<StubState>, Path(title): Path<String>) -> Response {
    let mut backend = state.backend.lock().unwrap();
    backend.deleted_titles.push(title.clone());
    let before = backend.polls.len();
    backend.polls.retain(|p| p.title != title);
    if backend.polls.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

#[derive(Deserialize)]
struct VotePayload {
    poll_id: i64,
    username: String,
    option_title: String,
}

async fn vote(State(state): State<StubState>, Json(payload): Json<VotePayload>) -> Response {
    let mut backend = state.backend.lock().unwrap();
    let Some(poll) = backend.polls.iter_mut().find(|p| p.id == payload.poll_id) else {
        return detail(StatusCode::NOT_FOUND, "Poll not found");
    };
    if poll
        .fields
        .iter()
        .any(|(_, voters)| voters.contains(&payload.username))
    {
        return detail(StatusCode::BAD_REQUEST, "already voted");
    }
    let Some((_, voters)) = poll
        .fields
        .iter_mut()
        .find(|(title, _)| *title == payload.option_title)
    else {
        return detail(StatusCode::BAD_REQUEST, "Option not found");
    };
    voters.push(payload.username);
    Json(json!({ "poll": poll.to_json() })).into_response()
}

#[derive(Deserialize)]
struct CancelPayload {
    poll_id: i64,
    username: String,
}

async fn cancel_vote(State(state): State<StubState>, Json(payload): Json<CancelPayload>) -> Response {
    let mut backend = state.backend.lock().unwrap();
    let Some(poll) = backend.polls.iter_mut().find(|p| p.id == payload.poll_id) else {
        return detail(StatusCode::NOT_FOUND, "Poll not found");
    };
    let mut removed = false;
    for (_, voters) in &mut poll.fields {
        let before = voters.len();
        voters.retain(|v| *v != payload.username);
        removed |= voters.len() != before;
    }
    if !removed {
        return detail(StatusCode::BAD_REQUEST, "You have not voted in this poll");
    }
    StatusCode::OK.into_response()
}

#[derive(Deserialize)]
struct CredentialsPayload {
    username: String,
    password: String,
}

async fn register(
    State(state): State<StubState>,
    Json(payload): Json<CredentialsPayload>,
) -> Response {
    let mut backend = state.backend.lock().unwrap();
    if backend.users.iter().any(|(name, _)| *name == payload.username) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    backend.users.push((payload.username, payload.password));
    StatusCode::CREATED.into_response()
}

async fn login(State(state): State<StubState>, Json(payload): Json<CredentialsPayload>) -> Response {
    let backend = state.backend.lock().unwrap();
    let known = backend
        .users
        .iter()
        .any(|(name, password)| *name == payload.username && *password == payload.password);
    if !known {
        return detail(StatusCode::UNAUTHORIZED, "Wrong credentials");
    }
    Json(json!({
        "username": payload.username,
        "registration_date": "2024-05-17T09:30:00Z",
    }))
    .into_response()
}

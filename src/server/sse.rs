//! MCP HTTP+SSE transport (protocol revision `2024-11-05`).
//!
//! - `GET /sse` opens an event stream. Its first event is `endpoint`, whose
//!   data is the URL to post messages to (`/messages?session_id=…`).
//! - `POST /messages?session_id=…` takes one JSON-RPC message and answers
//!   `202 Accepted`; the reply arrives on that session's stream as a
//!   `message` event.
//!
//! Each session handles at most [`MAX_IN_FLIGHT`] messages at once; a POST
//! beyond that waits for a slot before it is accepted.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::routing::{get, post};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Semaphore, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use uuid::Uuid;

use crate::error::Result;
use crate::server::McpServer;
use crate::server::transport::{MAX_IN_FLIGHT, REPLY_BUFFER};

/// Path of the event stream.
pub const SSE_PATH: &str = "/sse";

/// Path messages are posted to.
pub const MESSAGES_PATH: &str = "/messages";

/// Interval of the keep-alive comment on idle streams.
const KEEP_ALIVE: Duration = Duration::from_secs(15);

#[derive(Debug)]
struct Session {
    tx: mpsc::Sender<String>,
    slots: Arc<Semaphore>,
}

/// Shared state of the SSE routes: the dispatcher and the open sessions.
#[derive(Debug, Clone)]
pub struct SseState {
    server: Arc<McpServer>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SseState {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    session_id: String,
}

/// Routes for `GET /sse` and `POST /messages`.
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route(SSE_PATH, get(open_stream))
        .route(MESSAGES_PATH, post(post_message))
        .with_state(SseState::new(server))
}

/// Serve the SSE transport on `listener` until the server stops.
pub async fn serve_sse(server: Arc<McpServer>, listener: TcpListener) -> Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "serving MCP over SSE");
    axum::serve(listener, router(server)).await?;
    Ok(())
}

async fn open_stream(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = std::result::Result<SseEvent, Infallible>>> {
    let id = Uuid::new_v4().simple().to_string();
    let (tx, rx) = mpsc::channel::<String>(REPLY_BUFFER);
    {
        let mut sessions = state.sessions.lock().await;
        // Sessions whose client went away are dropped here.
        sessions.retain(|_, s| !s.tx.is_closed());
        sessions.insert(
            id.clone(),
            Session {
                tx,
                slots: Arc::new(Semaphore::new(MAX_IN_FLIGHT)),
            },
        );
    }
    tracing::info!(session = %id, "SSE session opened");

    let endpoint = SseEvent::default()
        .event("endpoint")
        .data(format!("{MESSAGES_PATH}?session_id={id}"));
    let replies = ReceiverStream::new(rx)
        .map(|reply| Ok::<_, Infallible>(SseEvent::default().event("message").data(reply)));
    let stream = tokio_stream::once(Ok::<_, Infallible>(endpoint)).chain(replies);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE).text("keep-alive"))
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> StatusCode {
    let (tx, slots) = {
        let sessions = state.sessions.lock().await;
        match sessions.get(&query.session_id) {
            Some(s) if !s.tx.is_closed() => (s.tx.clone(), Arc::clone(&s.slots)),
            _ => {
                tracing::warn!(session = %query.session_id, "message for unknown session");
                return StatusCode::NOT_FOUND;
            }
        }
    };

    let Ok(permit) = slots.acquire_owned().await else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };
    let server = Arc::clone(&state.server);
    tokio::spawn(async move {
        if let Some(reply) = server.handle_bytes(&body).await {
            if tx.send(reply).await.is_err() {
                tracing::warn!("SSE stream closed before reply was sent");
            }
        }
        drop(permit);
    });

    StatusCode::ACCEPTED
}

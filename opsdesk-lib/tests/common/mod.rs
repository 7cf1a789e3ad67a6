//! Shared test fixtures: an in-process backend and a scripted event source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use opsdesk_lib::error::Error;
use opsdesk_lib::inbox::EventSource;
use opsdesk_lib::model::Event;
use opsdesk_lib::model::Severity;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::sync::Semaphore;

// =============================================================================
// Mock backend
// =============================================================================

/// A canned answer.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path and query, without the mount prefix.
    pub path: String,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

/// Answers `(METHOD, path)` from a route table; everything else is a 404
/// with a `detail`.
pub struct MockBackend {
    pub url: String,
    routes: Arc<Mutex<HashMap<(String, String), Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

const PREFIX: &str = "/api/v1";

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<Mutex<HashMap<(String, String), Reply>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

        let (r, q) = (routes.clone(), requests.clone());
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let (routes, requests) = (r.clone(), q.clone());
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let (routes, requests) = (routes.clone(), requests.clone());
                        async move { Ok::<_, Infallible>(answer(req, &routes, &requests).await) }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{addr}{PREFIX}"),
            routes,
            requests,
        }
    }

    pub fn route(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests other than `GET`.
    pub fn writes(&self) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.method != "GET").collect()
    }
}

async fn answer(
    req: Request<Incoming>,
    routes: &Mutex<HashMap<(String, String), Reply>>,
    requests: &Mutex<Vec<Recorded>>,
) -> Response<Full<Bytes>> {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .trim_start_matches(PREFIX)
        .to_string();
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header("content-type");
    let cookie = header("cookie");
    let body = req
        .into_body()
        .collect()
        .await
        .map(|collected| String::from_utf8_lossy(&collected.to_bytes()).into_owned())
        .unwrap_or_default();

    requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        content_type,
        cookie,
        body,
    });

    let reply = routes
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned()
        .unwrap_or_else(|| Reply::json(404, serde_json::json!({"detail": "Not found"})));

    let mut response = Response::builder().status(reply.status);
    if let Some(content_type) = reply.content_type {
        response = response.header("Content-Type", content_type);
    }
    for (name, value) in &reply.headers {
        response = response.header(*name, value);
    }
    response.body(Full::new(Bytes::from(reply.body))).unwrap()
}

// =============================================================================
// Scripted event source
// =============================================================================

pub fn event(id: i64, kind: &str, severity: Severity) -> Event {
    Event {
        id,
        kind: kind.to_string(),
        severity,
        text: format!("event {id}"),
        created_at: Utc.with_ymd_and_hms(2025, 11, 3, 8, 0, 0).unwrap() + chrono::Duration::minutes(id),
    }
}

/// Hands out scripted results in order, repeating the last one.
///
/// With a gate, every fetch waits for a permit after announcing it started.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<Event>, String>>>,
    last: Mutex<Result<Vec<Event>, String>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
    pub started: Notify,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<Event>, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Ok(Vec::new())),
            calls: AtomicUsize::new(0),
            gate: None,
            started: Notify::new(),
        }
    }

    pub fn always(events: Vec<Event>) -> Self {
        Self::new(vec![Ok(events)])
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn fetch_events(&self, _limit: usize) -> Result<Vec<Event>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let next = self.script.lock().unwrap().pop_front();
        let result = match next {
            Some(result) => {
                *self.last.lock().unwrap() = result.clone();
                result
            }
            None => self.last.lock().unwrap().clone(),
        };
        result.map_err(|message| opsdesk_lib::error::ApiError::http(502, message).into())
    }
}

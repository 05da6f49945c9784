//! In-process HTTP stub for integration tests.
//!
//! Serves canned answers keyed by method and path, and records every request
//! so tests can check headers and bodies.

#![allow(dead_code)]

use std::sync::Arc;

use booknet::App;
use booknet::models::Config;
use booknet::storage::{KeyValueStore, MemoryStorage};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A canned answer.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: String,
}

/// Answer `method path` (path relative to `/api/v1/`) with a JSON body.
pub fn route(method: &'static str, path: &str, status: u16, body: Value) -> Route {
    Route {
        method,
        path: format!("/api/v1/{path}"),
        status,
        body: if body.is_null() {
            String::new()
        } else {
            body.to_string()
        },
    }
}

/// Answer `method path` where `path` is absolute.
pub fn raw_route(method: &'static str, path: &str, status: u16, body: Value) -> Route {
    Route {
        path: path.to_string(),
        ..route(method, "", status, body)
    }
}

/// A request as the stub received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

pub struct StubServer {
    addr: std::net::SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn root_url(&self) -> String {
        format!("{}/api/v1", self.base_url())
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().await.clone()
    }

    /// Requests sent to `method path` (path relative to `/api/v1/`).
    pub async fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests_to_raw(method, &format!("/api/v1/{path}")).await
    }

    /// Requests sent to `method path` with an absolute path.
    pub async fn requests_to_raw(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn serve(
    mut stream: TcpStream,
    routes: &[Route],
    recorded: &Mutex<Vec<Recorded>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let mut body = buf[head_end..].to_vec();
    if let Some(length) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        while body.len() < length {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    } else if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        while find(&body, b"0\r\n\r\n").is_none() {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.clone(), None),
    };

    let (status, payload) = routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or_else(|| (404, json!({"error": format!("no route for {path}")}).to_string()));

    recorded.lock().await.push(Recorded {
        method,
        path,
        query,
        headers,
        body,
    });

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Client wired to the stub, with an in-memory session store.
pub fn app_for(server: &StubServer) -> (Arc<MemoryStorage>, App) {
    let store = Arc::new(MemoryStorage::new());
    let mut config = Config::default();
    config.api.root_url = server.root_url();
    let app = App::new(config, Arc::clone(&store) as Arc<dyn KeyValueStore>).unwrap();
    (store, app)
}

/// Signed token expiring `offset_secs` from now.
pub fn token_expiring_in(offset_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + offset_secs;
    encode(
        &Header::default(),
        &json!({
            "sub": "reader@example.com",
            "exp": exp,
            "fullName": {"firstname": "Ada", "lastname": "Lovelace"}
        }),
        &EncodingKey::from_secret(b"stub"),
    )
    .unwrap()
}

/// App already holding a valid token.
pub async fn logged_in_app(server: &StubServer) -> (Arc<MemoryStorage>, App, String) {
    let (store, app) = app_for(server);
    let token = token_expiring_in(3600);
    app.tokens.set_token(&token).await.unwrap();
    (store, app, token)
}

/// Spring-style page envelope.
pub fn page_of(content: Value, number: u32, total_pages: u32) -> Value {
    let len = content.as_array().map(Vec::len).unwrap_or_default();
    json!({
        "content": content,
        "number": number,
        "size": 5,
        "totalElements": len,
        "totalPages": total_pages,
        "first": number == 0,
        "last": number + 1 >= total_pages
    })
}

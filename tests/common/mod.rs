//! Common test infrastructure for `provider-hub`.
//!
//! Offline, deterministic mock HTTP serving for the dynamic model-listing
//! tests, plus small input-building helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use provider_hub::ResolutionInputs;

/// Build [`ResolutionInputs`] from literal pairs.
#[must_use]
pub fn inputs(
    api_keys: &[(&str, &str)],
    base_urls: &[(&str, &str)],
    server_env: &[(&str, &str)],
) -> ResolutionInputs {
    let mut built = ResolutionInputs::default();
    for (provider, key) in api_keys {
        built.set_api_key(*provider, *key);
    }
    for (provider, url) in base_urls {
        built.set_base_url(*provider, *url);
    }
    for (name, value) in server_env {
        built.set_server_env(*name, *value);
    }
    built
}

// ============================================================================
// Mock HTTP Server
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockHttpResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl MockHttpResponse {
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: body.into().into_bytes(),
        }
    }

    #[must_use]
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockHttpRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl MockHttpRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    method: String,
    path: String,
}

pub struct MockHttpServer {
    addr: SocketAddr,
    routes: Arc<Mutex<HashMap<RouteKey, MockHttpResponse>>>,
    requests: Arc<Mutex<Vec<MockHttpRequest>>>,
    shutdown: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl MockHttpServer {
    #[must_use]
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock http listener");
        let addr = listener.local_addr().expect("mock http listener addr");
        listener
            .set_nonblocking(true)
            .expect("set mock http listener nonblocking");

        let routes = Arc::new(Mutex::new(HashMap::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        let thread_shutdown = Arc::clone(&shutdown);

        let join = thread::spawn(move || {
            while !thread_shutdown.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((mut stream, _peer)) => {
                        let _ = handle_connection(&mut stream, &thread_routes, &thread_requests);
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            addr,
            routes,
            requests,
            shutdown,
            join: Some(join),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn add_route(&self, method: &str, path: &str, response: MockHttpResponse) {
        let key = RouteKey {
            method: method.trim().to_ascii_uppercase(),
            path: path.to_string(),
        };
        self.routes.lock().unwrap().insert(key, response);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<MockHttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Poke the listener to unblock accept loops on some platforms.
        let _ = TcpStream::connect(self.addr);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn handle_connection(
    stream: &mut TcpStream,
    routes: &Arc<Mutex<HashMap<RouteKey, MockHttpResponse>>>,
    requests: &Arc<Mutex<Vec<MockHttpRequest>>>,
) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_ascii_uppercase();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body)?;
    }

    requests.lock().unwrap().push(MockHttpRequest {
        method: method.clone(),
        path: path.clone(),
        headers,
    });

    let response = routes
        .lock()
        .unwrap()
        .get(&RouteKey { method, path })
        .cloned()
        .unwrap_or_else(|| MockHttpResponse::text(404, "no such route"));

    let head = format!(
        "HTTP/1.1 {} mock\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len(),
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}

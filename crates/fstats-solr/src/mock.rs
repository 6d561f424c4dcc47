//! In-process stand-in for a Solr instance.
//!
//! `MockSolr` listens on a loopback port and answers each connection with a response chosen by
//! a handler closure. `MockCollection` provides a handler that behaves like a real collection
//! with a fixed schema and fixed document counts. Only compiled for tests and with the `mock`
//! feature.

use std::{
    collections::BTreeMap,
    io::{BufRead, BufReader, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use reqwest::Url;

use crate::Endpoint;

/// A request received by the mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// Request path, e.g. `/solr/books/select`.
    pub path: String,
    /// Decoded query parameters in request order.
    pub params: Vec<(String, String)>,
}

impl MockRequest {
    /// Returns the first value of the named query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A canned HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl MockResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// A response with an arbitrary status.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Handler deciding the response for each request.
type Handler = dyn Fn(&MockRequest) -> MockResponse + Send + Sync;

/// A loopback HTTP server answering with canned Solr responses.
///
/// The server stops when dropped.
pub struct MockSolr {
    /// Bound listener address.
    addr: SocketAddr,
    /// Requests received so far, in arrival order.
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Set on drop to stop the accept loop.
    shutdown: Arc<AtomicBool>,
    /// Accept loop thread.
    thread: Option<JoinHandle<()>>,
}

impl MockSolr {
    /// Starts a server that answers every request through `handler`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let handler: Box<Handler> = Box::new(handler);
        let thread = {
            let requests = Arc::clone(&requests);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if shutdown.load(Ordering::SeqCst) {
                        break;
                    }
                    if let Ok(stream) = stream {
                        serve(&stream, handler.as_ref(), &requests);
                    }
                }
            })
        };

        Self {
            addr,
            requests,
            shutdown,
            thread: Some(thread),
        }
    }

    /// Starts a server that behaves like `collection`.
    pub fn with_collection(collection: MockCollection) -> Self {
        Self::start(move |request| collection.respond(request))
    }

    /// Host to connect to.
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Port to connect to.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Endpoint pointing at this server.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.host(), Some(self.port()))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().expect("request log").clone()
    }
}

impl Drop for MockSolr {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so it observes the flag.
        drop(TcpStream::connect(self.addr));
        if let Some(thread) = self.thread.take() {
            drop(thread.join());
        }
    }
}

/// Reads one request from `stream`, records it, and writes the handler's response.
fn serve(stream: &TcpStream, handler: &Handler, requests: &Mutex<Vec<MockRequest>>) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers; requests carry no body.
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let Some(request) = parse_request_line(&request_line) else {
        return;
    };
    let response = handler(&request);
    requests.lock().expect("request log").push(request);

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body
    );
    let mut writer = stream;
    drop(writer.write_all(reply.as_bytes()));
    drop(writer.flush());
}

/// Parses `GET /path?query HTTP/1.1` into a `MockRequest`.
fn parse_request_line(line: &str) -> Option<MockRequest> {
    let target = line.split_whitespace().nth(1)?;
    let url = Url::parse(&format!("http://mock{target}")).ok()?;
    Some(MockRequest {
        path: url.path().to_string(),
        params: url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
    })
}

/// Reason phrase for the status line.
fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A fake collection answering the schema and select handlers like Solr does.
#[derive(Debug, Clone, Default)]
pub struct MockCollection {
    /// Collection name; requests for other collections get a 404.
    name: String,
    /// Declared schema fields.
    schema_fields: Vec<String>,
    /// Header row returned for zero-row CSV selects.
    used_fields: Vec<String>,
    /// Total number of documents.
    total: u64,
    /// Number of documents holding each field; absent fields count as zero.
    present: BTreeMap<String, u64>,
}

impl MockCollection {
    /// Creates an empty collection named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Sets the declared schema fields.
    pub fn schema_fields(mut self, fields: &[&str]) -> Self {
        self.schema_fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Sets the fields listed in the CSV header row.
    pub fn used_fields(mut self, fields: &[&str]) -> Self {
        self.used_fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Sets the total document count.
    pub fn total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    /// Sets how many documents hold `field`.
    pub fn present(mut self, field: &str, count: u64) -> Self {
        self.present.insert(field.to_string(), count);
        self
    }

    /// Answers a request the way Solr would for this collection.
    pub fn respond(&self, request: &MockRequest) -> MockResponse {
        let prefix = format!("/solr/{}/", self.name);
        let Some(handler) = request.path.strip_prefix(&prefix) else {
            return MockResponse::status(404, "Not Found");
        };

        match (handler, request.param("wt")) {
            ("schema", Some("json")) => MockResponse::ok(self.schema_body()),
            ("select", Some("csv")) => MockResponse::ok(format!("{}\n", self.used_fields.join(","))),
            ("select", Some("json")) => match request.param("q").and_then(|q| self.matches(q)) {
                Some(count) => MockResponse::ok(select_body(count)),
                None => MockResponse::status(400, r#"{"error":{"msg":"undefined query"}}"#),
            },
            _ => MockResponse::status(404, "Not Found"),
        }
    }

    /// Number of documents matching a standard-parser query.
    fn matches(&self, q: &str) -> Option<u64> {
        if q == "*:*" {
            return Some(self.total);
        }
        let (negated, clause) = match q.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, q),
        };
        let field = clause.strip_suffix(":*")?;
        let present = self.present.get(field).copied().unwrap_or(0);
        Some(if negated {
            self.total.saturating_sub(present)
        } else {
            present
        })
    }

    /// Body of the schema response.
    fn schema_body(&self) -> String {
        let fields = self
            .schema_fields
            .iter()
            .map(|name| format!(r#"{{"name":"{name}","type":"string"}}"#))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"responseHeader":{{"status":0,"QTime":0}},"schema":{{"name":"{}","fields":[{fields}]}}}}"#,
            self.name
        )
    }
}

/// Body of a zero-row select response.
fn select_body(count: u64) -> String {
    format!(
        r#"{{"responseHeader":{{"status":0,"QTime":0}},"response":{{"numFound":{count},"start":0,"docs":[]}}}}"#
    )
}

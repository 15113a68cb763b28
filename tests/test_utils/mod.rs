//! Mock HTTP servers for integration tests.
//!
//! Real sockets, no HTTP library: requests are parsed by hand so tests can
//! assert on exactly what hit the wire, and responses can carry status
//! lines (like `999`) that a well-behaved server would never produce.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    /// Header value by lowercase name.
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[allow(dead_code)]
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub fn bind_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

#[allow(dead_code)]
fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Parses a single header line into a lowercase key and trimmed value.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    line.split_once(':')
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
}

fn read_headers(reader: &mut BufReader<TcpStream>) -> (Vec<(String, String)>, usize) {
    let mut headers = Vec::new();
    let mut content_length = 0usize;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = parse_header_line(&line) else {
            continue;
        };
        if key == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.push((key, value));
    }

    (headers, content_length)
}

fn read_body(reader: &mut BufReader<TcpStream>, content_length: usize) -> String {
    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).expect("read body");
    }
    String::from_utf8_lossy(&body).to_string()
}

fn read_http_request(stream: &mut TcpStream) -> CapturedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let parts: Vec<&str> = request_line.trim().split(' ').collect();
    let method = parts.first().unwrap_or(&"").to_string();
    let path = parts.get(1).unwrap_or(&"").to_string();

    let (headers, content_length) = read_headers(&mut reader);
    let body = read_body(&mut reader, content_length);

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

/// Spawns a server that answers one request with the given status and body,
/// then stops. The captured request arrives on the returned channel.
#[allow(dead_code)]
pub fn spawn_server(
    listener: TcpListener,
    status: u16,
    body: &str,
) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    let body = body.to_string();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let captured = read_http_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            status_text(status),
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = tx.send(captured);
    });

    (addr, rx)
}

/// One scripted step of a streaming response body.
#[allow(dead_code)]
pub enum StreamAction {
    /// Write these bytes and flush.
    Chunk(Vec<u8>),
    /// Hold the connection open without writing.
    Pause(Duration),
}

/// Spawns a server that answers one request with a `200` whose body is
/// written incrementally per the script, then closes the connection. The
/// body is connection-delimited (no `Content-Length`), matching a feed that
/// ends only when the peer goes away.
#[allow(dead_code)]
pub fn spawn_stream_server(
    listener: TcpListener,
    actions: Vec<StreamAction>,
) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let _ = stream.set_nodelay(true);
        let captured = read_http_request(&mut stream);
        let _ = tx.send(captured);

        if stream
            .write_all(b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n")
            .is_err()
        {
            return;
        }
        for action in actions {
            match action {
                StreamAction::Chunk(bytes) => {
                    if stream.write_all(&bytes).is_err() {
                        return;
                    }
                    let _ = stream.flush();
                }
                StreamAction::Pause(duration) => thread::sleep(duration),
            }
        }
    });

    (addr, rx)
}

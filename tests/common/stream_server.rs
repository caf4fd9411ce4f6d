//! Minimal HTTP/1.1 server for capture tests.
//!
//! Answers HEAD with a configurable status and GET with either a fixed body or
//! an endless drip of bytes. Every response carries `Connection: close`, so
//! the client never reuses a probe connection for the capture.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Body {
    /// Sent in full with a Content-Length, then the connection closes.
    Finite(Vec<u8>),
    /// `piece` bytes every `interval` until the client goes away.
    Endless { piece: usize, interval: Duration },
    /// Advertises `advertised` bytes, sends the first `sent` of
    /// [`payload`], then drops the connection.
    Truncated { advertised: usize, sent: usize },
}

#[derive(Debug, Clone)]
pub struct StreamServerOptions {
    pub head_status: u16,
    pub get_status: u16,
}

impl Default for StreamServerOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            get_status: 200,
        }
    }
}

/// Starts a server on a background thread and returns its URL
/// (e.g. "http://127.0.0.1:12345/live").
pub fn start(body: Body) -> String {
    start_with_options(body, StreamServerOptions::default())
}

pub fn start_with_options(body: Body, opts: StreamServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let shared = Arc::new((body, opts));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let shared = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &shared.0, &shared.1));
        }
    });
    format!("http://127.0.0.1:{}/live", port)
}

/// A URL nothing listens on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/live", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, body: &Body, opts: &StreamServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let method = request.split_whitespace().next().unwrap_or("");

    if method.eq_ignore_ascii_case("HEAD") {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: audio/mpeg\r\nConnection: close\r\n\r\n",
            opts.head_status,
            reason(opts.head_status)
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    if opts.get_status != 200 {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            opts.get_status,
            reason(opts.get_status)
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    match body {
        Body::Finite(bytes) => {
            let _ = stream.write_all(ok_header(Some(bytes.len())).as_bytes());
            let _ = stream.write_all(bytes);
        }
        Body::Truncated { advertised, sent } => {
            let _ = stream.write_all(ok_header(Some(*advertised)).as_bytes());
            let _ = stream.write_all(&payload(*sent));
            let _ = stream.flush();
            let _ = stream.shutdown(Shutdown::Write);
        }
        Body::Endless { piece, interval } => {
            if stream.write_all(ok_header(None).as_bytes()).is_err() {
                return;
            }
            let data: Vec<u8> = (0u8..=255).cycle().take(*piece).collect();
            while stream.write_all(&data).is_ok() {
                thread::sleep(*interval);
            }
        }
    }
}

fn ok_header(content_length: Option<usize>) -> String {
    let length = content_length
        .map(|len| format!("Content-Length: {}\r\n", len))
        .unwrap_or_default();
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\n{}Connection: close\r\n\r\n",
        length
    )
}

/// Deterministic, non-repeating-per-chunk test payload.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

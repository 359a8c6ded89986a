#![allow(dead_code)]
//! Shared helpers for integration tests: a stand-in classification server
//! built on tiny_http and a few image fixtures.

use std::io::{Cursor, Read};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use image::{DynamicImage, ImageOutputFormat, RgbImage};
use tiny_http::{Header, Response, Server, StatusCode};

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method:       String,
    pub path:         String,
    pub content_type: String,
    pub body:         Vec<u8>,
}

impl Recorded {
    /// Bytes of the file part named `field`, if the body carries one.
    pub fn file_part(&self, field: &str) -> Option<FilePart> {
        let boundary = extract_boundary(&self.content_type)?;
        multipart_file_by_name(&self.body, &boundary, field)
    }
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename:     String,
    pub content_type: String,
    pub bytes:        Vec<u8>,
}

/// A canned reply: status code plus body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body:   String,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Reply {
        Reply { status, body: body.to_owned() }
    }
}

/// A local server that answers every request with the same reply and keeps
/// a log of what it received.
pub struct MockServer {
    server:   Arc<Server>,
    addr:     SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    worker:   Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start(reply: Reply) -> MockServer {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock server"));
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = server.clone();
            let requests = requests.clone();
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let content_type = request.headers().iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_owned())
                        .unwrap_or_default();
                    let mut body = Vec::new();
                    let _ = request.as_reader().read_to_end(&mut body);
                    requests.lock().unwrap().push(Recorded {
                        method: request.method().to_string(),
                        path: request.url().to_owned(),
                        content_type,
                        body,
                    });

                    let bytes = reply.body.clone().into_bytes();
                    let len = bytes.len();
                    let response = Response::new(
                        StatusCode(reply.status),
                        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
                        Cursor::new(bytes),
                        Some(len),
                        None,
                    );
                    let _ = request.respond(response);
                }
            })
        };

        MockServer { server, addr, requests, worker: Some(worker) }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// A base URL nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

// ---------------------------------------------------------------------------
// multipart/form-data parsing (server side)
// ---------------------------------------------------------------------------

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
}

fn header_param(headers: &str, key: &str) -> Option<String> {
    let key = format!("{}=\"", key);
    let pos = headers.find(&key)?;
    let rest = &headers[pos + key.len()..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

fn multipart_file_by_name(body: &[u8], boundary: &str, field_name: &str) -> Option<FilePart> {
    let delimiter = format!("--{}", boundary);
    for part in split_on(body, delimiter.as_bytes()) {
        let sep = b"\r\n\r\n";
        let Some(sep_pos) = find_subsequence(part, sep) else { continue };
        let headers = String::from_utf8_lossy(&part[..sep_pos]);
        let has_name = headers.contains(&format!(" name=\"{}\"", field_name));
        let Some(filename) = header_param(&headers, "filename") else { continue };
        if !has_name {
            continue;
        }
        let content_type = headers
            .lines()
            .find_map(|l| l.strip_prefix("Content-Type: "))
            .unwrap_or("")
            .to_owned();
        let raw = &part[sep_pos + sep.len()..];
        let bytes = raw.strip_suffix(b"\r\n").unwrap_or(raw).to_vec();
        return Some(FilePart { filename, content_type, bytes });
    }
    None
}

//! Response sink abstraction.
//!
//! This crate does not own an HTTP server; everything it renders leaves
//! through [`ResponseSink`], the seam a host binds to its framework's
//! response type. The contract is the usual HTTP one: headers first, then a
//! status line, then body bytes.

use std::borrow::Cow;
use std::io;

/// The `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Content type for JSON responses.
pub const CONTENT_JSON: &str = "application/json";
/// Content type for rendered HTML responses.
pub const CONTENT_HTML: &str = "text/html";
/// Content type for plain-text error bodies.
pub const CONTENT_PLAIN: &str = "text/plain; charset=utf-8";

/// Where rendered responses go.
///
/// Implementations map these calls onto the host framework's response
/// object. Callers write headers before the status and the status before any
/// body bytes; a second status write for the same response is a protocol
/// violation left to the transport to handle or ignore.
pub trait ResponseSink {
    /// Sets a response header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Writes the status line.
    fn write_status(&mut self, status: u16);

    /// Writes body bytes.
    ///
    /// Failures here (a client that hung up, a closed connection) are not
    /// recoverable at this layer; the renderer discards them once a body
    /// write has started.
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// In-memory sink that records everything written through it.
///
/// Intended for handler tests: assert on the recorded status, headers, and
/// body instead of standing up a server.
///
/// # Example
///
/// ```rust,ignore
/// let mut sink = BufferSink::new();
/// state.renderer(&mut sink).json(200, &payload);
///
/// assert_eq!(sink.status, Some(200));
/// assert_eq!(sink.header("Content-Type"), Some("application/json"));
/// ```
#[derive(Debug, Default)]
pub struct BufferSink {
    /// Headers in the order they were set.
    pub headers: Vec<(String, String)>,
    /// The written status code, if any.
    pub status: Option<u16>,
    /// Accumulated body bytes.
    pub body: Vec<u8>,
}

impl BufferSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a recorded header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The recorded body as text.
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl ResponseSink for BufferSink {
    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}

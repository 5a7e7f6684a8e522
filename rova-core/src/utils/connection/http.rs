//! Minimal HTTP/1.x handling.
//!
//! Only the request target of the first line is looked at; method, version and
//! headers are ignored. Every response is a `200 OK` followed by a closed
//! connection.

use core::fmt::{self, Write as _};

use embedded_io_async::Write;

use crate::utils::frontend::{PAGE_HEAD, PAGE_TAIL};

const PLAIN_HEAD: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n";
const HTML_HEAD: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n";

/// Second whitespace-delimited token of the first request line.
///
/// Falls back to `/` when the line has no target or the target is not UTF-8.
pub fn request_target(request: &[u8]) -> &str {
    let first_line = request.split(|&b| b == b'\n').next().unwrap_or_default();
    first_line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .nth(1)
        .and_then(|token| core::str::from_utf8(token).ok())
        .unwrap_or("/")
}

/// What the controller answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// `text/plain` body `OK`.
    Ok,
    /// The control page with the slider set to `speed`.
    Page { speed: u16 },
}

impl Response {
    pub fn content_type(&self) -> &'static str {
        match self {
            Response::Ok => "text/plain",
            Response::Page { .. } => "text/html",
        }
    }

    fn head(&self) -> &'static str {
        match self {
            Response::Ok => PLAIN_HEAD,
            Response::Page { .. } => HTML_HEAD,
        }
    }

    /// Write the full response, status line to end of body.
    pub async fn send<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<(), W::Error> {
        out.write_all(self.head().as_bytes()).await?;
        match self {
            Response::Ok => out.write_all(b"OK").await,
            Response::Page { speed } => {
                let value = decimal(*speed);
                out.write_all(PAGE_HEAD.as_bytes()).await?;
                out.write_all(value.as_bytes()).await?;
                out.write_all(PAGE_TAIL.as_bytes()).await
            }
        }
    }
}

impl fmt::Display for Response {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.head())?;
        match self {
            Response::Ok => f.write_str("OK"),
            Response::Page { speed } => write!(f, "{}{}{}", PAGE_HEAD, speed, PAGE_TAIL),
        }
    }
}

fn decimal(value: u16) -> heapless::String<5> {
    let mut text = heapless::String::new();
    // u16::MAX has five digits
    let _ = write!(text, "{}", value);
    text
}

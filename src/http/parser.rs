use std::borrow::Cow;

use url::form_urlencoded;

use crate::http::request::{FORM_URLENCODED, Method, Params, Request, find_header};

const LINE_END: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Why a buffer could not be turned into a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No `\r\n` after the request line
    MissingRequestLine,
    /// Request line is not UTF-8 or does not have exactly three tokens
    InvalidRequestLine,
    /// Method outside the allow-list
    InvalidMethod,
    /// Request target does not start with `/`
    InvalidPath,
    /// No `\r\n\r\n` between headers and body
    MissingHeaderTerminator,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            ParseError::MissingRequestLine => "request line terminator not found",
            ParseError::InvalidRequestLine => "request line must have exactly 3 tokens",
            ParseError::InvalidMethod => "method not allowed",
            ParseError::InvalidPath => "request target must start with '/'",
            ParseError::MissingHeaderTerminator => "header terminator not found",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for ParseError {}

/// Parses the bytes of a single read into a [`Request`].
///
/// `buf` must be exactly the bytes received (`&buffer[..n]`). Bytes past the
/// declared Content-Length are ignored; a body shorter than declared is
/// kept as-is.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let line_end = find(buf, LINE_END, 0).ok_or(ParseError::MissingRequestLine)?;

    let request_line =
        std::str::from_utf8(&buf[..line_end]).map_err(|_| ParseError::InvalidRequestLine)?;

    let parts: Vec<&str> = request_line.split(' ').collect();
    let [method_str, target, version] = parts[..] else {
        return Err(ParseError::InvalidRequestLine);
    };

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    if !target.starts_with('/') {
        return Err(ParseError::InvalidPath);
    }

    // Searching from the request line's own CRLF lets a request with no
    // headers at all terminate on "\r\n\r\n".
    let headers_end = find(buf, HEADERS_END, line_end).ok_or(ParseError::MissingHeaderTerminator)?;

    let headers_start = line_end + LINE_END.len();
    let headers: Vec<String> = if headers_end > line_end {
        String::from_utf8_lossy(&buf[headers_start..headers_end])
            .split("\r\n")
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let (path, query_params) = match target.split_once('?') {
        Some((path, query)) => (path, decode_form(query.as_bytes())),
        None => (target, Params::new()),
    };

    let body = if method != Method::GET {
        extract_body(buf, headers_end + HEADERS_END.len(), &headers)
    } else {
        None
    };

    let post_params = match &body {
        Some(bytes) if is_form_urlencoded(&headers) => decode_form(bytes),
        _ => Params::new(),
    };

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
        query_params,
        post_params,
    })
}

fn extract_body(buf: &[u8], body_start: usize, headers: &[String]) -> Option<Vec<u8>> {
    let content_length = find_header(headers, "Content-Length")?.parse::<usize>().ok()?;

    let available = buf.len().saturating_sub(body_start);
    if available < content_length {
        tracing::debug!(
            content_length,
            available,
            "Body shorter than Content-Length, truncating"
        );
    }

    let end = body_start + content_length.min(available);
    Some(buf[body_start.min(buf.len())..end].to_vec())
}

fn is_form_urlencoded(headers: &[String]) -> bool {
    match find_header(headers, "Content-Type") {
        Some(value) => value
            .split(';')
            .next()
            .is_some_and(|media| media.trim().eq_ignore_ascii_case(FORM_URLENCODED)),
        None => true,
    }
}

/// Decodes `application/x-www-form-urlencoded` data.
///
/// Pairs whose escapes decode to invalid UTF-8 are dropped; the rest are kept.
pub fn decode_form(input: &[u8]) -> Params {
    input
        .split(|&b| b == b'&')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let (name, value) = form_urlencoded::parse(segment).next()?;
            if lossy(&name, segment) || lossy(&value, segment) {
                tracing::debug!(
                    segment = %String::from_utf8_lossy(segment),
                    "Skipping undecodable form pair"
                );
                return None;
            }
            Some((name.into_owned(), value.into_owned()))
        })
        .collect()
}

// form_urlencoded substitutes U+FFFD for invalid UTF-8 instead of failing.
fn lossy(decoded: &Cow<'_, str>, raw: &[u8]) -> bool {
    decoded.contains('\u{FFFD}')
        && !std::str::from_utf8(raw).is_ok_and(|s| {
            s.contains('\u{FFFD}') || s.to_ascii_uppercase().contains("%EF%BF%BD")
        })
}

fn find(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    haystack
        .get(start..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + start)
}

use std::io::Write;

use crate::http::writer::serialize_response;

/// HTTP status codes emitted by the server core and its built-in handlers.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): No handler for the method and path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order so the serialized form is stable.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in emission order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing an existing one with the same name.
    ///
    /// Names are compared case-insensitively; a replaced header keeps its
    /// original position.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends `Content-Length` (from the body size) and `Connection: close`
    /// unless they were set explicitly.
    pub fn build(self) -> Response {
        let has = |name: &str| self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name));
        let needs_length = !has("Content-Length");
        let needs_connection = !has("Connection");

        let mut headers = self.headers;
        if needs_length {
            headers.push(("Content-Length".to_string(), self.body.len().to_string()));
        }
        // One request per connection, always.
        if needs_connection {
            headers.push(("Connection".to_string(), "close".to_string()));
        }

        Response {
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with the given content type and body.
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(body.into())
            .build()
    }

    /// Creates an empty 400 Bad Request response.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest).build()
    }

    /// Creates an empty 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// Serializes the response onto a handler's output sink.
    pub fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        out.write_all(&serialize_response(self))
    }
}

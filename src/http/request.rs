/// Media type used when a request carries no `Content-Type` header.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP request methods accepted by the server.
///
/// Anything outside this allow-list makes a request malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data
    POST,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string is an allowed method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("PUT"), None);
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Name/value pairs decoded from a query string or form body.
///
/// A name may repeat; every occurrence is kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded for `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Represents a parsed, well-formed HTTP request.
///
/// Only the parser produces these from the wire; a buffer that fails
/// validation never becomes a `Request`, so handlers never see a
/// half-populated value.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// Request path with any query string removed (e.g. "/index.html")
    pub path: String,
    /// Third token of the request line (typically "HTTP/1.1")
    pub version: String,
    /// Raw header lines in the order they were received
    pub headers: Vec<String>,
    /// Body bytes; only set for non-GET requests with a Content-Length
    pub body: Option<Vec<u8>>,
    /// Parameters decoded from the query string
    pub query_params: Params,
    /// Parameters decoded from a form-encoded body
    pub post_params: Params,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: Vec<String>,
    body: Option<Vec<u8>>,
    query_params: Params,
    post_params: Params,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: Vec::new(),
            body: None,
            query_params: Params::new(),
            post_params: Params::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", key, value));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(name, value);
        self
    }

    pub fn post_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.post_params.push(name, value);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        if !path.starts_with('/') {
            return Err("path must start with '/'");
        }

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
            query_params: self.query_params,
            post_params: self.post_params,
        })
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Names are compared case-insensitively; when a header repeats, the
    /// first occurrence wins. The value is trimmed.
    pub fn header(&self, key: &str) -> Option<&str> {
        find_header(&self.headers, key)
    }

    /// The declared content type, defaulting to form-url-encoding.
    pub fn content_type(&self) -> &str {
        self.header("Content-Type").unwrap_or(FORM_URLENCODED)
    }

    /// All query-string values for `name`.
    pub fn query_param(&self, name: &str) -> Vec<&str> {
        self.query_params.get_all(name)
    }

    /// All form-body values for `name`.
    pub fn post_param(&self, name: &str) -> Vec<&str> {
        self.post_params.get_all(name)
    }
}

pub(crate) fn find_header<'a, S: AsRef<str>>(headers: &'a [S], key: &str) -> Option<&'a str> {
    headers.iter().find_map(|line| {
        let (name, value) = line.as_ref().split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(key)
            .then(|| value.trim())
    })
}

//! HTTP request/response values exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `RequestBuilder` produces
//! `HttpRequest` values and consumes `HttpResponse` values without touching
//! the network; a `Transport` executes the round-trip in between. Keeping
//! the values owned (`String`, `Vec`) lets any transport, blocking or not,
//! take them across threads.

/// Header sent with every request.
pub const ACCEPT: &str = "Accept";
/// Header sent with every request that carries a body.
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request. The web API only uses GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Cross-origin mode a browser-backed transport must use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    #[default]
    Cors,
}

/// Credential policy. Requests never carry cookies or ambient auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    Omit,
}

/// An HTTP request described as plain data.
///
/// Built by `RequestBuilder::build_*` methods and handed to a `Transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL: base URL, path and, for some GETs, a query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub mode: RequestMode,
    pub credentials: Credentials,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: vec![(ACCEPT.to_string(), APPLICATION_JSON.to_string())],
            mode: RequestMode::Cors,
            credentials: Credentials::Omit,
            body: None,
        }
    }

    pub(crate) fn post_json(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: vec![
                (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
                (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
            ],
            mode: RequestMode::Cors,
            credentials: Credentials::Omit,
            body: Some(body),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Returned by a `Transport` after executing an `HttpRequest`, then passed
/// to `RequestBuilder::parse_*` methods. Non-2xx statuses are data here, not
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

//! Executes `HttpRequest` values.
//!
//! # Design
//! The facade never reaches for a global HTTP client; it is handed a
//! `Transport` at construction. Any `Fn(&HttpRequest) -> Result<HttpResponse,
//! ApiError>` closure is a transport, which is how tests and hosts with their
//! own HTTP stack plug in. `UreqTransport` is the default blocking transport.
//!
//! Transports return non-2xx responses as data; only failures to obtain a
//! response at all are `ApiError::Transport`.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::native::UreqTransport;

#[cfg(feature = "ureq")]
mod native {
    use ureq::Agent;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// Status-as-error is disabled so 4xx/5xx come back as responses, and
    /// the agent keeps no cookie store, so credentials are always omitted.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl std::fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "UreqTransport")
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        /// Use a preconfigured agent (timeouts, proxy, TLS). It must not
        /// treat HTTP statuses as errors.
        pub fn with_agent(agent: Agent) -> Self {
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let result = match (request.method, &request.body) {
                (HttpMethod::Get, _) => {
                    let mut builder = self.agent.get(&request.url);
                    for (key, value) in &request.headers {
                        builder = builder.header(key.as_str(), value.as_str());
                    }
                    builder.call()
                }
                (HttpMethod::Post, body) => {
                    let mut builder = self.agent.post(&request.url);
                    for (key, value) in &request.headers {
                        builder = builder.header(key.as_str(), value.as_str());
                    }
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn closures_are_transports() {
        let seen = Mutex::new(Vec::new());
        let transport = |request: &HttpRequest| {
            seen.lock().unwrap().push(request.url.clone());
            Ok::<_, ApiError>(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "{}".to_string(),
            })
        };
        let response = transport
            .execute(&HttpRequest::get("http://localhost/ip".to_string()))
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(*seen.lock().unwrap(), vec!["http://localhost/ip".to_string()]);
    }

    #[cfg(feature = "ureq")]
    #[test]
    fn ureq_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = UreqTransport::new()
            .execute(&HttpRequest::get(format!("http://127.0.0.1:{port}/ip")))
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}

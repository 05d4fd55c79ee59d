//! Typed client for the consent-management web API.
//!
//! # Overview
//! Location lookup, configuration retrieval, consent and subscription
//! get/set, rights invocation, preference QR URLs and web reporting. Every
//! operation is one HTTP request with fixed headers, mode and credentials,
//! and a typed JSON response.
//!
//! # Design
//! - `RequestBuilder` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - `Transport` executes one round-trip and is injected into the client;
//!   closures qualify, and `UreqTransport` (feature `ureq`) is the default.
//! - `WebApiClient` is the facade: build → execute → parse, with the
//!   fail-open consent policy from `ClientConfig`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod requests;
pub mod transport;
pub mod types;

pub use client::WebApiClient;
pub use config::{ApiVersion, ClientConfig, ConsentFailurePolicy};
pub use error::ApiError;
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse, RequestMode};
pub use requests::RequestBuilder;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::*;

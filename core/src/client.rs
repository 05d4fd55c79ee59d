//! Client facade: one method per web API operation.
//!
//! # Design
//! `WebApiClient` owns an immutable `ClientConfig`, a `RequestBuilder`
//! derived from it and an injected `Transport`. Every method is
//! build → execute → parse with no state carried between calls, so a client
//! can be shared across threads whenever its transport can.
//!
//! Get/set consent honour `ConsentFailurePolicy`; every other operation
//! propagates failures.

use tracing::{debug, warn};

use crate::config::{ClientConfig, ConsentFailurePolicy};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::requests::RequestBuilder;
use crate::transport::Transport;
use crate::types::{
    Configuration, GetBootstrapConfigurationRequest, GetConsentRequest, GetConsentResponse,
    GetExperienceConfigurationRequest, GetFullConfigurationRequest, GetLocationResponse,
    GetSubscriptionsConfigurationRequest, GetSubscriptionsRequest, GetSubscriptionsResponse,
    InvokeRightRequest, PreferenceQrRequest, SetConsentRequest, SetSubscriptionsRequest,
    SubscriptionConfiguration, WebReportRequest,
};

#[derive(Debug, Clone)]
pub struct WebApiClient<T> {
    config: ClientConfig,
    requests: RequestBuilder,
    transport: T,
}

#[cfg(feature = "ureq")]
impl WebApiClient<crate::transport::UreqTransport> {
    /// Client with default settings and the blocking ureq transport.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(ClientConfig::new(base_url), crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> WebApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            requests: RequestBuilder::from_config(&config),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The sans-IO builder, for callers that run requests themselves.
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        if !response.is_success() {
            warn!(status = response.status, url = %request.url, "request failed");
        }
        Ok(response)
    }

    /// Location of the caller's IP address.
    pub fn get_location(&self) -> Result<GetLocationResponse, ApiError> {
        let response = self.send(self.requests.build_get_location())?;
        self.requests.parse_get_location(response)
    }

    pub fn get_bootstrap_configuration(
        &self,
        request: &GetBootstrapConfigurationRequest,
    ) -> Result<Configuration, ApiError> {
        let response = self.send(self.requests.build_get_bootstrap_configuration(request))?;
        self.requests.parse_configuration(response)
    }

    pub fn get_full_configuration(&self, request: &GetFullConfigurationRequest) -> Result<Configuration, ApiError> {
        let response = self.send(self.requests.build_get_full_configuration(request))?;
        self.requests.parse_configuration(response)
    }

    pub fn get_consent_configuration(
        &self,
        request: &GetExperienceConfigurationRequest,
    ) -> Result<Configuration, ApiError> {
        let response = self.send(self.requests.build_get_consent_configuration(request))?;
        self.requests.parse_configuration(response)
    }

    pub fn get_preference_configuration(
        &self,
        request: &GetExperienceConfigurationRequest,
    ) -> Result<Configuration, ApiError> {
        let response = self.send(self.requests.build_get_preference_configuration(request))?;
        self.requests.parse_configuration(response)
    }

    pub fn get_subscriptions_configuration(
        &self,
        request: &GetSubscriptionsConfigurationRequest,
    ) -> Result<SubscriptionConfiguration, ApiError> {
        let response = self.send(self.requests.build_get_subscriptions_configuration(request))?;
        self.requests.parse_subscriptions_configuration(response)
    }

    /// Current consent for the requested purposes.
    ///
    /// Under `FailOpen`, a failed call or a response with no purposes
    /// resolves to an echo of `request` (see `GetConsentResponse::from_request`).
    pub fn get_consent(&self, request: &GetConsentRequest) -> Result<GetConsentResponse, ApiError> {
        let result = self
            .requests
            .build_get_consent(request)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.requests.parse_get_consent(resp));

        if self.config.consent_failure_policy() == ConsentFailurePolicy::Propagate {
            return result;
        }
        match result {
            Ok(consent) if !consent.purposes.is_empty() => Ok(consent),
            Ok(_) => {
                warn!(
                    organization = %request.organization_code,
                    "consent service returned no purposes, using request values"
                );
                Ok(GetConsentResponse::from_request(request))
            }
            Err(err) => {
                warn!(
                    organization = %request.organization_code,
                    error = %err,
                    "get consent failed, using request values"
                );
                Ok(GetConsentResponse::from_request(request))
            }
        }
    }

    /// Records consent. Under `FailOpen`, failures are logged and dropped.
    pub fn set_consent(&self, request: &SetConsentRequest) -> Result<(), ApiError> {
        let result = self
            .requests
            .build_set_consent(request)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.requests.parse_set_consent(resp));

        match (result, self.config.consent_failure_policy()) {
            (Err(err), ConsentFailurePolicy::FailOpen) => {
                warn!(
                    organization = %request.organization_code,
                    error = %err,
                    "set consent failed, continuing"
                );
                Ok(())
            }
            (result, _) => result,
        }
    }

    pub fn get_subscriptions(&self, request: &GetSubscriptionsRequest) -> Result<GetSubscriptionsResponse, ApiError> {
        let response = self.send(self.requests.build_get_subscriptions(request)?)?;
        self.requests.parse_get_subscriptions(response)
    }

    pub fn set_subscriptions(&self, request: &SetSubscriptionsRequest) -> Result<(), ApiError> {
        let response = self.send(self.requests.build_set_subscriptions(request)?)?;
        self.requests.parse_set_subscriptions(response)
    }

    pub fn invoke_right(&self, request: &InvokeRightRequest) -> Result<(), ApiError> {
        let response = self.send(self.requests.build_invoke_right(request)?)?;
        self.requests.parse_invoke_right(response)
    }

    /// URL of the preference-center QR image. Makes no request.
    pub fn preference_qr(&self, request: &PreferenceQrRequest) -> String {
        self.requests.preference_qr_url(request)
    }

    pub fn web_report(&self, channel: &str, request: &WebReportRequest) -> Result<(), ApiError> {
        let response = self.send(self.requests.build_web_report(channel, request)?)?;
        self.requests.parse_web_report(response)
    }
}

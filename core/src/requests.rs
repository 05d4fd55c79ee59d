//! Stateless request builder and response parser for the consent web API.
//!
//! # Design
//! `RequestBuilder` holds only the base URL and the API version. Each
//! operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! URL templating and decoding stay deterministic and free of I/O. Path
//! segments are substituted verbatim; nothing is validated or escaped
//! except query values.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::config::{ApiVersion, ClientConfig};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{
    Configuration, GetBootstrapConfigurationRequest, GetConsentRequest, GetConsentResponse,
    GetExperienceConfigurationRequest, GetFullConfigurationRequest, GetLocationResponse,
    GetSubscriptionsConfigurationRequest, GetSubscriptionsRequest, GetSubscriptionsResponse,
    InvokeRightRequest, PreferenceQrRequest, SetConsentRequest, SetSubscriptionsRequest,
    SubscriptionConfiguration, WebReportRequest,
};

/// Synchronous, stateless builder/parser for the consent web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    base_url: String,
    api_version: ApiVersion,
}

impl RequestBuilder {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            api_version: config.api_version(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::serialization)?;
        Ok(HttpRequest::post_json(self.url(path), body))
    }

    // --- location ---

    pub fn build_get_location(&self) -> HttpRequest {
        HttpRequest::get(self.url("/ip"))
    }

    pub fn parse_get_location(&self, response: HttpResponse) -> Result<GetLocationResponse, ApiError> {
        parse_json(response)
    }

    // --- configuration ---

    pub fn build_get_bootstrap_configuration(&self, request: &GetBootstrapConfigurationRequest) -> HttpRequest {
        HttpRequest::get(self.url(&format!(
            "/config/{}/{}/boot.json",
            request.organization_code, request.property_code
        )))
    }

    /// Uses the detailed path only when environment, hash, jurisdiction and
    /// language are all present; any gap falls back to the short path.
    pub fn build_get_full_configuration(&self, request: &GetFullConfigurationRequest) -> HttpRequest {
        let org = &request.organization_code;
        let property = &request.property_code;
        let detailed = match (
            &request.environment_code,
            &request.hash,
            &request.jurisdiction_code,
            &request.language_code,
        ) {
            (Some(env), Some(hash), Some(jurisdiction), Some(language)) => Some((env, hash, jurisdiction, language)),
            _ => None,
        };

        let path = match (detailed, self.api_version) {
            (None, _) => format!("/config/{org}/{property}/config.json"),
            (Some((env, hash, jurisdiction, language)), ApiVersion::V3) => format!(
                "/config/{org}/{property}/{env}/{jurisdiction}/{language}/config.json?{}",
                query(&[("hash", hash.as_str())])
            ),
            (Some((env, hash, jurisdiction, language)), _) => {
                format!("/config/{org}/{property}/{env}/{hash}/{jurisdiction}/{language}/config.json")
            }
        };
        HttpRequest::get(self.url(&path))
    }

    pub fn build_get_consent_configuration(&self, request: &GetExperienceConfigurationRequest) -> HttpRequest {
        HttpRequest::get(self.url(&experience_path(request, "consent.json")))
    }

    pub fn build_get_preference_configuration(&self, request: &GetExperienceConfigurationRequest) -> HttpRequest {
        HttpRequest::get(self.url(&experience_path(request, "preference.json")))
    }

    pub fn parse_configuration(&self, response: HttpResponse) -> Result<Configuration, ApiError> {
        parse_json(response)
    }

    pub fn build_get_subscriptions_configuration(
        &self,
        request: &GetSubscriptionsConfigurationRequest,
    ) -> HttpRequest {
        HttpRequest::get(self.url(&format!(
            "/config/{}/{}/{}/{}/subscriptions.json",
            request.organization_code, request.property_code, request.language_code, request.experience_code
        )))
    }

    pub fn parse_subscriptions_configuration(
        &self,
        response: HttpResponse,
    ) -> Result<SubscriptionConfiguration, ApiError> {
        parse_json(response)
    }

    // --- consent ---

    pub fn build_get_consent(&self, request: &GetConsentRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/consent/{}/get", request.organization_code), request)
    }

    pub fn parse_get_consent(&self, response: HttpResponse) -> Result<GetConsentResponse, ApiError> {
        parse_json(response)
    }

    pub fn build_set_consent(&self, request: &SetConsentRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/consent/{}/update", request.organization_code), request)
    }

    pub fn parse_set_consent(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- subscriptions ---

    pub fn build_get_subscriptions(&self, request: &GetSubscriptionsRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/subscriptions/{}/get", request.organization_code), request)
    }

    pub fn parse_get_subscriptions(&self, response: HttpResponse) -> Result<GetSubscriptionsResponse, ApiError> {
        parse_json(response)
    }

    pub fn build_set_subscriptions(&self, request: &SetSubscriptionsRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/subscriptions/{}/update", request.organization_code), request)
    }

    pub fn parse_set_subscriptions(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- rights ---

    pub fn build_invoke_right(&self, request: &InvokeRightRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/rights/{}/invoke", request.organization_code), request)
    }

    pub fn parse_invoke_right(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- QR ---

    /// URL of the preference-center QR image. No request is made.
    ///
    /// Fixed fields come first (`env`, `size`, `path`, `bgcolor`,
    /// `fgcolor`), then caller parameters. Setting a name twice keeps its
    /// first position and the last value.
    pub fn preference_qr_url(&self, request: &PreferenceQrRequest) -> String {
        let mut params: Vec<(String, String)> = Vec::new();
        set_param(&mut params, "env", Some(request.environment_code.clone()));
        set_param(&mut params, "size", request.image_size.map(|s| s.to_string()));
        set_param(&mut params, "path", request.path.clone());
        set_param(&mut params, "bgcolor", request.background_color.clone());
        set_param(&mut params, "fgcolor", request.foreground_color.clone());
        for (key, value) in &request.parameters {
            set_param(&mut params, key, Some(value.clone()));
        }

        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        self.url(&format!(
            "/qr/{}/{}/preferences.png?{}",
            request.organization_code,
            request.property_code,
            query(&pairs)
        ))
    }

    // --- reporting ---

    pub fn build_web_report(&self, channel: &str, request: &WebReportRequest) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/report/{channel}"), request)
    }

    pub fn parse_web_report(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn experience_path(request: &GetExperienceConfigurationRequest, document: &str) -> String {
    let path = format!(
        "/config/{}/{}/{}/{}/{}/{document}",
        request.organization_code,
        request.property_code,
        request.environment_code,
        request.jurisdiction_code,
        request.language_code
    );
    match &request.hash {
        Some(hash) => format!("{path}?{}", query(&[("hash", hash.as_str())])),
        None => path,
    }
}

fn query(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn set_param(params: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    let Some(value) = value else {
        return;
    };
    match params.iter_mut().find(|(k, _)| k == key) {
        Some(existing) => existing.1 = value,
        None => params.push((key.to_string(), value)),
    }
}

/// Map non-2xx status codes to `ApiError::HttpError`, keeping the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// An empty 2xx body decodes as `{}`.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    let body = response.body.trim();
    let body = if body.is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(ApiError::deserialization)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::{DataSubject, PurposeAllowedLegalBasis, PurposeLegalBasis};

    const BASE: &str = "https://global.ketchcdn.com/web/v2";

    fn builder() -> RequestBuilder {
        RequestBuilder::new(BASE)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn full(env: Option<&str>, hash: Option<&str>, jurisdiction: Option<&str>, language: Option<&str>) -> GetFullConfigurationRequest {
        GetFullConfigurationRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "foo".to_string(),
            environment_code: env.map(String::from),
            hash: hash.map(String::from),
            jurisdiction_code: jurisdiction.map(String::from),
            language_code: language.map(String::from),
        }
    }

    fn identities() -> BTreeMap<String, String> {
        BTreeMap::from([("swb_switchbit".to_string(), "2I0tgfvRzAyP7A9ma7Eqo6".to_string())])
    }

    #[test]
    fn build_get_location_produces_correct_request() {
        let req = builder().build_get_location();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, format!("{BASE}/ip"));
        assert!(req.body.is_none());
        assert_eq!(req.headers, vec![("Accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn bootstrap_path_has_no_query() {
        let req = builder().build_get_bootstrap_configuration(&GetBootstrapConfigurationRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "foo".to_string(),
        });
        assert_eq!(req.url, format!("{BASE}/config/switchbitcorp/foo/boot.json"));
        assert!(!req.url.contains('?'));
    }

    #[test]
    fn full_configuration_short_path_without_optionals() {
        let req = builder().build_get_full_configuration(&full(None, None, None, None));
        assert_eq!(req.url, format!("{BASE}/config/switchbitcorp/foo/config.json"));
    }

    #[test]
    fn full_configuration_detailed_path_with_all_optionals() {
        let req = builder().build_get_full_configuration(&full(
            Some("foo"),
            Some("8913461971881236311"),
            Some("foo"),
            Some("en-US"),
        ));
        assert_eq!(
            req.url,
            format!("{BASE}/config/switchbitcorp/foo/foo/8913461971881236311/foo/en-US/config.json")
        );
    }

    #[test]
    fn full_configuration_v1_uses_v2_layout() {
        let builder = RequestBuilder::new("https://global.ketchcdn.com/web/v1");
        let req = builder.build_get_full_configuration(&full(Some("foo"), Some("42"), Some("foo"), Some("en-US")));
        assert_eq!(
            req.url,
            "https://global.ketchcdn.com/web/v1/config/switchbitcorp/foo/foo/42/foo/en-US/config.json"
        );
    }

    #[test]
    fn full_configuration_partial_optionals_fall_back_to_short_path() {
        let cases = [
            full(Some("foo"), None, None, None),
            full(Some("foo"), Some("1"), Some("foo"), None),
            full(None, Some("1"), Some("foo"), Some("en-US")),
            full(Some("foo"), Some("1"), None, Some("en-US")),
        ];
        for request in &cases {
            let req = builder().build_get_full_configuration(request);
            assert_eq!(req.url, format!("{BASE}/config/switchbitcorp/foo/config.json"), "{request:?}");
        }
    }

    #[test]
    fn full_configuration_v3_moves_hash_to_query() {
        let builder = RequestBuilder::new("https://global.ketchcdn.com/web/v3");
        let req = builder.build_get_full_configuration(&full(
            Some("foo"),
            Some("8913461971881236311"),
            Some("foo"),
            Some("en-US"),
        ));
        assert_eq!(
            req.url,
            "https://global.ketchcdn.com/web/v3/config/switchbitcorp/foo/foo/foo/en-US/config.json?hash=8913461971881236311"
        );

        let req = builder.build_get_full_configuration(&full(None, None, None, None));
        assert_eq!(req.url, "https://global.ketchcdn.com/web/v3/config/switchbitcorp/foo/config.json");
    }

    #[test]
    fn get_urls_are_pure_functions_of_input() {
        let request = full(Some("foo"), Some("1"), Some("bar"), Some("en-US"));
        let a = builder().build_get_full_configuration(&request);
        let b = builder().build_get_full_configuration(&request);
        assert_eq!(a, b);
    }

    #[test]
    fn experience_configuration_paths() {
        let mut request = GetExperienceConfigurationRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "foo".to_string(),
            environment_code: "test".to_string(),
            jurisdiction_code: "bar".to_string(),
            language_code: "en-US".to_string(),
            hash: Some("baz".to_string()),
        };
        assert_eq!(
            builder().build_get_consent_configuration(&request).url,
            format!("{BASE}/config/switchbitcorp/foo/test/bar/en-US/consent.json?hash=baz")
        );
        assert_eq!(
            builder().build_get_preference_configuration(&request).url,
            format!("{BASE}/config/switchbitcorp/foo/test/bar/en-US/preference.json?hash=baz")
        );
        request.hash = None;
        assert_eq!(
            builder().build_get_consent_configuration(&request).url,
            format!("{BASE}/config/switchbitcorp/foo/test/bar/en-US/consent.json")
        );
    }

    #[test]
    fn subscriptions_configuration_path() {
        let req = builder().build_get_subscriptions_configuration(&GetSubscriptionsConfigurationRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "foo".to_string(),
            language_code: "en-US".to_string(),
            experience_code: "bar".to_string(),
        });
        assert_eq!(req.url, format!("{BASE}/config/switchbitcorp/foo/en-US/bar/subscriptions.json"));
    }

    #[test]
    fn build_get_consent_posts_request_verbatim() {
        let request = GetConsentRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "switchbit".to_string(),
            environment_code: "production".to_string(),
            identities: identities(),
            jurisdiction_code: "default".to_string(),
            purposes: BTreeMap::from([(
                "coreprodserv".to_string(),
                PurposeLegalBasis {
                    legal_basis_code: "disclosure".to_string(),
                },
            )]),
            ..Default::default()
        };
        let req = builder().build_get_consent(&request).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("{BASE}/consent/switchbitcorp/get"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::to_value(&request).unwrap());
        assert!(body.get("controllerCode").is_none());
        assert_eq!(body["purposes"]["coreprodserv"]["legalBasisCode"], "disclosure");
    }

    #[test]
    fn build_set_consent_posts_to_update() {
        let request = SetConsentRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "switchbit".to_string(),
            environment_code: "production".to_string(),
            identities: identities(),
            purposes: BTreeMap::from([(
                "hschat".to_string(),
                PurposeAllowedLegalBasis {
                    allowed: false,
                    legal_basis_code: "consent_optin".to_string(),
                },
            )]),
            migration_option: Some(crate::types::MigrationOption::MigrateNever),
            ..Default::default()
        };
        let req = builder().build_set_consent(&request).unwrap();
        assert_eq!(req.url, format!("{BASE}/consent/switchbitcorp/update"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["purposes"]["hschat"]["allowed"], "false");
        assert_eq!(body["migrationOption"], 1);
        assert_eq!(body["jurisdictionCode"], "");
    }

    #[test]
    fn build_invoke_right_posts_to_invoke() {
        let request = InvokeRightRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "switchbit".to_string(),
            environment_code: "production".to_string(),
            identities: identities(),
            jurisdiction_code: "gdpreea".to_string(),
            right_code: "gdpr_portability".to_string(),
            user: DataSubject {
                email: "ignore.me@ketch.com".to_string(),
                first_name: "Just\"".to_string(),
                last_name: "Testing".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let req = builder().build_invoke_right(&request).unwrap();
        assert_eq!(req.url, format!("{BASE}/rights/switchbitcorp/invoke"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["user"]["firstName"], "Just\"");
        assert!(body.get("rightCodes").is_none());
    }

    #[test]
    fn preference_qr_url_matches_known_vector() {
        let url = builder().preference_qr_url(&PreferenceQrRequest {
            organization_code: "switchbitcorp".to_string(),
            property_code: "switchbit".to_string(),
            environment_code: "production".to_string(),
            image_size: Some(1024),
            path: Some("/policy.html".to_string()),
            background_color: Some("white".to_string()),
            foreground_color: Some("black".to_string()),
            parameters: vec![("foo".to_string(), "bar".to_string())],
        });
        assert_eq!(
            url,
            format!("{BASE}/qr/switchbitcorp/switchbit/preferences.png?env=production&size=1024&path=%2Fpolicy.html&bgcolor=white&fgcolor=black&foo=bar")
        );
    }

    #[test]
    fn preference_qr_later_parameters_override_in_place() {
        let url = builder().preference_qr_url(&PreferenceQrRequest {
            organization_code: "o".to_string(),
            property_code: "p".to_string(),
            environment_code: "production".to_string(),
            image_size: Some(256),
            parameters: vec![
                ("env".to_string(), "staging".to_string()),
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2 3".to_string()),
            ],
            ..Default::default()
        });
        assert_eq!(url, format!("{BASE}/qr/o/p/preferences.png?env=staging&size=256&a=2+3"));
    }

    #[test]
    fn build_web_report_posts_to_channel() {
        let request = WebReportRequest {
            report_type: "sometype".to_string(),
            url: "https://localhost/".to_string(),
            age: 1,
            body: serde_json::json!({"mykey": "myvalue"}),
            user_agent: "myagent".to_string(),
        };
        let req = builder().build_web_report("mychannel", &request).unwrap();
        assert_eq!(req.url, format!("{BASE}/report/mychannel"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type":"sometype","url":"https://localhost/","age":1,"body":{"mykey":"myvalue"},"user_agent":"myagent"})
        );
    }

    #[test]
    fn parse_configuration_success() {
        let config = builder()
            .parse_configuration(response(200, r#"{"organization":{"code":"switchbitcorp"},"language":"en-US","regulations":["gdpr"]}"#))
            .unwrap();
        assert_eq!(config.language.as_deref(), Some("en-US"));
        assert_eq!(config.regulations, vec!["gdpr".to_string()]);
    }

    #[test]
    fn parse_configuration_wrong_status() {
        let err = builder().parse_configuration(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_configuration_bad_json() {
        let err = builder().parse_configuration(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_consent_empty_body_is_empty_response() {
        let consent = builder().parse_get_consent(response(204, "")).unwrap();
        assert!(consent.purposes.is_empty());
    }

    #[test]
    fn parse_writes_ignore_body() {
        let b = builder();
        assert!(b.parse_set_consent(response(200, "{}")).is_ok());
        assert!(b.parse_set_subscriptions(response(204, "")).is_ok());
        assert!(b.parse_invoke_right(response(200, "not json at all")).is_ok());
        assert!(b.parse_web_report(response(204, "")).is_ok());
        assert!(matches!(
            b.parse_invoke_right(response(400, "bad right")),
            Err(ApiError::HttpError { status: 400, .. })
        ));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = RequestBuilder::new("http://localhost:3000/").build_get_location();
        assert_eq!(req.url, "http://localhost:3000/ip");
    }
}

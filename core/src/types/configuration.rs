//! Configuration documents served under `/config/...`.
//!
//! A configuration bundles everything a consent UI needs for one
//! organization/property/environment/jurisdiction/language tuple. Only
//! `organization` is guaranteed; the server trims the rest depending on
//! which document (bootstrap, full, consent, preference) was requested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::wire_enum;

wire_enum! {
    /// Which consent experience is shown first.
    ExperienceDefault {
        Banner = 1,
        Modal = 2,
    }
}

wire_enum! {
    /// Where a secondary experience button leads.
    ExperienceButtonDestination {
        GotoModal = 1,
        GotoPreference = 2,
    }
}

wire_enum! {
    CookieDuration {
        Session = 1,
        Persistent = 2,
    }
}

wire_enum! {
    CookieProvenance {
        FirstParty = 1,
        ThirdParty = 2,
    }
}

wire_enum! {
    CookieCategory {
        StrictlyNecessary = 1,
        Functional = 2,
        Performance = 3,
        Marketing = 4,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub code: String,
    /// Base64-encoded regex matched against the page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scope_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Region code → jurisdiction code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}

/// How an identity value is located on the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(rename = "type")]
    pub identity_type: String,
    pub variable: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Deployment {
    pub code: String,
    #[serde(default)]
    pub version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub host: String,
    pub duration: CookieDuration,
    pub provenance: CookieProvenance,
    pub category: CookieCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub service_provider: String,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub version: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purpose {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub legal_basis_code: String,
    #[serde(default)]
    pub requires_opt_in: bool,
    #[serde(default)]
    pub allows_opt_out: bool,
    #[serde(default)]
    pub requires_privacy_policy: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<Cookie>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorPurpose {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<String>,
}

/// A third-party vendor processing data for one or more purposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purposes: Vec<VendorPurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Right {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyDocument {
    pub code: String,
    #[serde(default)]
    pub version: u64,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub footer_description: String,
    #[serde(default)]
    pub agreement: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub secondary_button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button_destination: Option<ExperienceButtonDestination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Modal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_title: String,
    #[serde(default)]
    pub body_description: String,
    #[serde(default)]
    pub footer_description: String,
    #[serde(default)]
    pub agreement: String,
    #[serde(default)]
    pub button_text: String,
}

/// Just-in-time prompt shown when a purpose is first needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Jit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_description: String,
    #[serde(default)]
    pub accept_button_text: String,
    #[serde(default)]
    pub decline_button_text: String,
    #[serde(default)]
    pub more_info_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info_destination: Option<ExperienceButtonDestination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentExperience {
    pub code: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub banner: Banner,
    #[serde(default)]
    pub modal: Modal,
    #[serde(default)]
    pub jit: Jit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_default: Option<ExperienceDefault>,
}

/// Text for one tab of the preference center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceTab {
    #[serde(default)]
    pub tab_name: String,
    #[serde(default)]
    pub body_title: String,
    #[serde(default)]
    pub body_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceExperience {
    pub code: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: PreferenceTab,
    #[serde(default)]
    pub rights: PreferenceTab,
    #[serde(default)]
    pub consents: PreferenceTab,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent: Option<ConsentExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<PreferenceExperience>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner_background_color: String,
    #[serde(default)]
    pub lightbox_ribbon_color: String,
    #[serde(default)]
    pub form_header_color: String,
    #[serde(default)]
    pub status_color: String,
    #[serde(default)]
    pub highlight_color: String,
    #[serde(default)]
    pub feedback_color: String,
}

/// Consent-UI configuration for an organization and property.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub organization: Organization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identities: BTreeMap<String, Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Deployment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regulations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rights: Vec<Right>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purposes: Vec<Purpose>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vendors: Vec<Vendor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Experience>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<PolicyDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<PolicyDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBootstrapConfigurationRequest {
    pub organization_code: String,
    pub property_code: String,
}

/// Parameters for the full configuration.
///
/// The detailed path is used only when `environment_code`, `hash`,
/// `jurisdiction_code` and `language_code` are all set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFullConfigurationRequest {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: Option<String>,
    pub hash: Option<String>,
    pub jurisdiction_code: Option<String>,
    pub language_code: Option<String>,
}

/// Parameters for the consent and preference experience documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetExperienceConfigurationRequest {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: String,
    pub jurisdiction_code: String,
    pub language_code: String,
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubscriptionsConfigurationRequest {
    pub organization_code: String,
    pub property_code: String,
    pub language_code: String,
    pub experience_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionContactMethod {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopic {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_methods: Vec<SubscriptionContactMethod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionControl {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Topics and controls offered by a subscriptions experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfiguration {
    #[serde(default)]
    pub identities: BTreeMap<String, Identity>,
    #[serde(default)]
    pub controls: Vec<SubscriptionControl>,
    #[serde(default)]
    pub topics: Vec<SubscriptionTopic>,
}

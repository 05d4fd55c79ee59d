use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The person on whose behalf a right is invoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataSubject {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state_region: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
}

/// A data-subject rights request (access, erasure, portability, ...).
///
/// `right_code` is the right being invoked; `right_codes` lists further
/// rights filed in the same request and is omitted from the body when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRightRequest {
    pub organization_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_code: Option<String>,
    pub property_code: String,
    pub environment_code: String,
    pub identities: BTreeMap<String, String>,
    pub jurisdiction_code: String,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoked_at: Option<u64>,
    pub right_code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_codes: Vec<String>,
    pub user: DataSubject,
}

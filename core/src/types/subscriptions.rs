use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionSetting {
    pub status: SubscriptionStatus,
}

impl SubscriptionSetting {
    pub fn granted() -> Self {
        Self {
            status: SubscriptionStatus::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            status: SubscriptionStatus::Denied,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetSubscriptionsRequest {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: String,
    pub identities: BTreeMap<String, String>,
}

/// Topic and control settings recorded for a set of identities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetSubscriptionsResponse {
    #[serde(default)]
    pub topics: BTreeMap<String, SubscriptionSetting>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub controls: BTreeMap<String, SubscriptionSetting>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetSubscriptionsRequest {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: String,
    pub identities: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub topics: BTreeMap<String, SubscriptionSetting>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub controls: BTreeMap<String, SubscriptionSetting>,
}

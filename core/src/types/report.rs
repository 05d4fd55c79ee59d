use serde::{Deserialize, Serialize};

/// A browser report (CSP violation, deprecation, intervention, ...).
///
/// Field names follow the Reporting API, hence `user_agent` in snake case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebReportRequest {
    #[serde(rename = "type")]
    pub report_type: String,
    pub url: String,
    #[serde(default)]
    pub age: u64,
    #[serde(default)]
    pub body: serde_json::Value,
    #[serde(default)]
    pub user_agent: String,
}

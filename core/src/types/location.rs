use serde::{Deserialize, Serialize};

/// A language spoken at the caller's location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpLanguage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub native: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default)]
    pub languages: Vec<IpLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_flag_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_flag_emoji_unicode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_code: Option<String>,
    #[serde(default, rename = "isEU")]
    pub is_eu: bool,
}

/// Geolocation of the caller's IP address.
///
/// Every field except `ip` is best-effort; lookups for private or unknown
/// addresses come back mostly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpInfo {
    #[serde(default)]
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<IpLocation>,
}

/// Response of the location lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GetLocationResponse {
    pub location: IpInfo,
}

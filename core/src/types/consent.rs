use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::wire_enum;

wire_enum! {
    /// How the service reconciles previously recorded consent when new
    /// purposes are introduced.
    #[derive(Default)]
    MigrationOption {
        #[default]
        MigrateDefault = 0,
        MigrateNever = 1,
        MigrateFromAllow = 2,
        MigrateFromDeny = 3,
        MigrateAlways = 4,
    }
}

/// `"true"`/`"false"` on the wire, `bool` in Rust. Accepts JSON booleans too.
pub(crate) mod string_bool {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Str(String),
    }

    fn parse<E: de::Error>(flag: Flag) -> Result<bool, E> {
        match flag {
            Flag::Bool(b) => Ok(b),
            Flag::Str(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(E::custom(format!("invalid consent flag {other:?}"))),
            },
        }
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        parse(Flag::deserialize(deserializer)?)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::Flag;

        pub fn serialize<S: Serializer>(
            value: &Option<bool>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<bool>, D::Error> {
            Option::<Flag>::deserialize(deserializer)?
                .map(super::parse)
                .transpose()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurposeLegalBasis {
    pub legal_basis_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurposeAllowedLegalBasis {
    #[serde(with = "string_bool")]
    pub allowed: bool,
    pub legal_basis_code: String,
}

/// Consent state of one purpose as reported by the service.
///
/// `allowed` is `None` when the service has nothing recorded, which is also
/// what a fail-open response carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurposeStatus {
    #[serde(
        default,
        with = "string_bool::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_basis_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetConsentRequest {
    pub organization_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_code: Option<String>,
    pub property_code: String,
    pub environment_code: String,
    /// Identity space code → identity value.
    pub identities: BTreeMap<String, String>,
    pub jurisdiction_code: String,
    pub purposes: BTreeMap<String, PurposeLegalBasis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetConsentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_code: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identities: BTreeMap<String, String>,
    #[serde(default)]
    pub purposes: BTreeMap<String, PurposeStatus>,
}

impl GetConsentResponse {
    /// Echo of a request, used when the service cannot answer.
    pub fn from_request(request: &GetConsentRequest) -> Self {
        Self {
            organization_code: Some(request.organization_code.clone()),
            property_code: Some(request.property_code.clone()),
            environment_code: Some(request.environment_code.clone()),
            jurisdiction_code: Some(request.jurisdiction_code.clone()),
            identities: request.identities.clone(),
            purposes: request
                .purposes
                .iter()
                .map(|(code, basis)| {
                    (
                        code.clone(),
                        PurposeStatus {
                            allowed: None,
                            legal_basis_code: Some(basis.legal_basis_code.clone()),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetConsentRequest {
    pub organization_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_code: Option<String>,
    pub property_code: String,
    pub environment_code: String,
    pub identities: BTreeMap<String, String>,
    pub jurisdiction_code: String,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<u64>,
    pub purposes: BTreeMap<String, PurposeAllowedLegalBasis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_option: Option<MigrationOption>,
}

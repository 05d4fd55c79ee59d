//! In-memory implementation of the consent web API.
//!
//! Serves synthesized configuration documents and keeps consent,
//! subscriptions, rights invocations and reports in process memory. The
//! organization code `unavailable` answers 503 on every organization-scoped
//! route.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const UNAVAILABLE_ORG: &str = "unavailable";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPurpose {
    pub allowed: String,
    pub legal_basis_code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentQuery {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: String,
    pub identities: BTreeMap<String, String>,
    pub jurisdiction_code: String,
    #[serde(default)]
    pub purposes: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentUpdate {
    pub identities: BTreeMap<String, String>,
    pub purposes: BTreeMap<String, StoredPurpose>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredSubscription {
    pub status: String,
}

#[derive(Deserialize)]
pub struct SubscriptionsUpdate {
    pub identities: BTreeMap<String, String>,
    #[serde(default)]
    pub topics: BTreeMap<String, StoredSubscription>,
    #[serde(default)]
    pub controls: BTreeMap<String, StoredSubscription>,
}

#[derive(Deserialize)]
pub struct SubscriptionsQuery {
    pub identities: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionSettings {
    pub topics: BTreeMap<String, StoredSubscription>,
    pub controls: BTreeMap<String, StoredSubscription>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightRequest {
    pub jurisdiction_code: String,
    pub right_code: String,
    #[serde(default)]
    pub right_codes: Vec<String>,
    pub user: RightUser,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightUser {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub id: Uuid,
    pub jurisdiction_code: String,
    pub right_codes: Vec<String>,
    pub email: String,
}

#[derive(Default)]
pub struct Store {
    /// (organization, identity key) → purpose code → recorded consent.
    consents: HashMap<(String, String), BTreeMap<String, StoredPurpose>>,
    subscriptions: HashMap<(String, String), SubscriptionSettings>,
    invocations: HashMap<String, Vec<Invocation>>,
    reports: HashMap<String, Vec<Value>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/ip", get(location))
        .route("/config/{*path}", get(configuration))
        .route("/consent/{org}/get", post(get_consent))
        .route("/consent/{org}/update", post(set_consent))
        .route("/subscriptions/{org}/get", post(get_subscriptions))
        .route("/subscriptions/{org}/update", post(set_subscriptions))
        .route("/rights/{org}/invoke", post(invoke_right))
        .route("/rights/{org}/invocations", get(list_invocations))
        .route("/report/{channel}", post(record_report).get(list_reports))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Identities keyed independently of map order.
fn identity_key(identities: &BTreeMap<String, String>) -> String {
    identities
        .iter()
        .map(|(space, value)| format!("{space}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn available(org: &str) -> Result<(), StatusCode> {
    if org == UNAVAILABLE_ORG {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(())
}

async fn location() -> Json<Value> {
    Json(json!({
        "location": {
            "ip": "127.0.0.1",
            "countryCode": "US",
            "countryName": "United States",
            "regionCode": "CA",
            "regionName": "California",
            "city": "San Francisco",
            "latitude": 37.7749,
            "longitude": -122.4194,
            "location": {
                "languages": [{"code": "en", "name": "English", "native": "English"}],
                "callingCode": "1",
                "isEU": false
            }
        }
    }))
}

async fn configuration(
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    if let Some(org) = segments.first() {
        available(org)?;
    }
    let hash = query.get("hash").map(String::as_str);
    let doc = match segments[..] {
        [org, property, "boot.json"] => bootstrap_config(org, property),
        [org, property, "config.json"] => full_config(org, property, None, None, None, None),
        [org, property, env, hash, jurisdiction, language, "config.json"] => {
            full_config(org, property, Some(env), Some(hash), Some(jurisdiction), Some(language))
        }
        [org, property, env, jurisdiction, language, "config.json"] => {
            full_config(org, property, Some(env), hash, Some(jurisdiction), Some(language))
        }
        [org, property, env, jurisdiction, language, "consent.json"] => {
            let mut doc = full_config(org, property, Some(env), hash, Some(jurisdiction), Some(language));
            doc["experiences"] = json!({"consent": consent_experience()});
            doc
        }
        [org, property, env, jurisdiction, language, "preference.json"] => {
            let mut doc = full_config(org, property, Some(env), hash, Some(jurisdiction), Some(language));
            doc["experiences"] = json!({"preference": preference_experience()});
            doc
        }
        [_, _, _, _, "subscriptions.json"] => subscriptions_config(),
        _ => return Err(StatusCode::NOT_FOUND),
    };
    Ok(Json(doc))
}

fn bootstrap_config(org: &str, property: &str) -> Value {
    json!({
        "organization": {"code": org},
        "property": {"code": property, "platform": "WEB"},
        "language": "en-US",
        "environments": [
            {"code": "production", "hash": "8913461971881236311"},
            {"code": "staging", "pattern": "c3RhZ2luZw==", "hash": "1234"}
        ],
        "jurisdiction": {
            "defaultScopeCode": "default",
            "variable": "jurisdiction",
            "scopes": {"US-CA": "ccpa", "FR": "gdpreea"}
        },
        "identities": {
            "swb_switchbit": {"type": "managedCookie", "variable": "_swb"}
        },
        "scripts": ["https://global.ketchcdn.com/web/v2/lanyard.js"]
    })
}

fn full_config(
    org: &str,
    property: &str,
    env: Option<&str>,
    hash: Option<&str>,
    jurisdiction: Option<&str>,
    language: Option<&str>,
) -> Value {
    let mut doc = bootstrap_config(org, property);
    doc["language"] = json!(language.unwrap_or("en-US"));
    doc["environment"] = json!({
        "code": env.unwrap_or("production"),
        "hash": hash.unwrap_or("8913461971881236311"),
    });
    doc["jurisdiction"]["code"] = json!(jurisdiction.unwrap_or("default"));
    doc["deployment"] = json!({"code": "default", "version": 1});
    doc["regulations"] = json!(["gdpr"]);
    doc["rights"] = json!([
        {"code": "gdpr_portability", "name": "Portability", "description": "Get a copy of your data"},
        {"code": "gdpr_rtbf", "name": "Erasure", "description": "Delete your data"}
    ]);
    doc["purposes"] = json!([
        {
            "code": "coreprodserv",
            "name": "Core product and service",
            "legalBasisCode": "legitimateinterest",
            "allowsOptOut": false,
            "cookies": [{
                "name": "_swb", "code": "swb", "host": "switchbit.com",
                "duration": 2, "provenance": 1, "category": 1,
                "description": "Session identity", "serviceProvider": "switchbit",
                "latest": true, "version": 1
            }]
        },
        {"code": "analytics", "name": "Analytics", "legalBasisCode": "consent_optin", "requiresOptIn": true}
    ]);
    doc["vendors"] = json!([
        {"id": "1", "name": "Acme Analytics", "purposes": [{"name": "analytics", "legalBasis": "consent_optin"}]}
    ]);
    doc["privacyPolicy"] = json!({"code": "privacy", "version": 3, "url": "https://switchbit.com/privacy"});
    doc["termsOfService"] = json!({"code": "terms", "version": 1, "url": "https://switchbit.com/terms"});
    doc["theme"] = json!({
        "code": "default", "name": "Default",
        "bannerBackgroundColor": "#01090E", "lightboxRibbonColor": "#01090E",
        "formHeaderColor": "#01090E", "statusColor": "#FFFFFF",
        "highlightColor": "#FFFFFF", "feedbackColor": "#2E8B57"
    });
    doc["services"] = json!({"lanyard": "https://global.ketchcdn.com/web/v2/lanyard.js"});
    doc["options"] = json!({"appDivs": "hubspot-messages-iframe-container"});
    doc
}

fn consent_experience() -> Value {
    json!({
        "code": "default",
        "version": 1,
        "banner": {
            "title": "Your privacy",
            "buttonText": "I understand",
            "secondaryButtonText": "Settings",
            "secondaryButtonDestination": 1
        },
        "modal": {"title": "Your privacy", "buttonText": "Save"},
        "jit": {"title": "Before you continue", "acceptButtonText": "Accept", "declineButtonText": "Decline", "moreInfoDestination": 2},
        "experienceDefault": 1
    })
}

fn preference_experience() -> Value {
    json!({
        "code": "default",
        "version": 1,
        "title": "Preferences",
        "overview": {"tabName": "Overview", "bodyTitle": "Your data", "bodyDescription": "What we collect"},
        "consents": {"tabName": "Preferences", "bodyTitle": "Choices", "bodyDescription": "Opt in or out", "buttonText": "Submit"},
        "rights": {"tabName": "Rights", "bodyTitle": "Your rights", "bodyDescription": "Ask us", "buttonText": "Send"}
    })
}

fn subscriptions_config() -> Value {
    json!({
        "identities": {"swb_switchbit": {"type": "managedCookie", "variable": "_swb"}},
        "controls": [{"code": "global_unsubscribe", "name": "Unsubscribe from all"}],
        "topics": [{
            "code": "newsletter",
            "name": "Newsletter",
            "description": "Monthly product news",
            "contactMethods": [{"code": "email", "name": "Email"}]
        }]
    })
}

async fn get_consent(
    State(db): State<Db>,
    Path(org): Path<String>,
    Json(query): Json<ConsentQuery>,
) -> Result<Json<Value>, StatusCode> {
    available(&org)?;
    let store = db.read().await;
    let recorded = store.consents.get(&(org.clone(), identity_key(&query.identities)));
    let purposes: BTreeMap<&String, &StoredPurpose> = query
        .purposes
        .keys()
        .filter_map(|code| recorded.and_then(|r| r.get(code)).map(|p| (code, p)))
        .collect();
    Ok(Json(json!({
        "organizationCode": query.organization_code,
        "propertyCode": query.property_code,
        "environmentCode": query.environment_code,
        "jurisdictionCode": query.jurisdiction_code,
        "identities": query.identities,
        "purposes": purposes,
    })))
}

async fn set_consent(
    State(db): State<Db>,
    Path(org): Path<String>,
    Json(update): Json<ConsentUpdate>,
) -> Result<Json<Value>, StatusCode> {
    available(&org)?;
    let mut store = db.write().await;
    store
        .consents
        .entry((org, identity_key(&update.identities)))
        .or_default()
        .extend(update.purposes);
    Ok(Json(json!({})))
}

async fn get_subscriptions(
    State(db): State<Db>,
    Path(org): Path<String>,
    Json(query): Json<SubscriptionsQuery>,
) -> Result<Json<SubscriptionSettings>, StatusCode> {
    available(&org)?;
    let store = db.read().await;
    let settings = store
        .subscriptions
        .get(&(org, identity_key(&query.identities)))
        .cloned()
        .unwrap_or_default();
    Ok(Json(settings))
}

async fn set_subscriptions(
    State(db): State<Db>,
    Path(org): Path<String>,
    Json(update): Json<SubscriptionsUpdate>,
) -> Result<StatusCode, StatusCode> {
    available(&org)?;
    let mut store = db.write().await;
    let settings = store
        .subscriptions
        .entry((org, identity_key(&update.identities)))
        .or_default();
    settings.topics.extend(update.topics);
    settings.controls.extend(update.controls);
    Ok(StatusCode::NO_CONTENT)
}

async fn invoke_right(
    State(db): State<Db>,
    Path(org): Path<String>,
    Json(request): Json<RightRequest>,
) -> Result<Json<Value>, StatusCode> {
    available(&org)?;
    let mut right_codes = vec![request.right_code];
    right_codes.extend(request.right_codes);
    let invocation = Invocation {
        id: Uuid::new_v4(),
        jurisdiction_code: request.jurisdiction_code,
        right_codes,
        email: request.user.email,
    };
    tracing::info!(%org, id = %invocation.id, "right invoked");
    db.write().await.invocations.entry(org).or_default().push(invocation);
    Ok(Json(json!({})))
}

async fn list_invocations(
    State(db): State<Db>,
    Path(org): Path<String>,
) -> Result<Json<Vec<Invocation>>, StatusCode> {
    available(&org)?;
    let store = db.read().await;
    Ok(Json(store.invocations.get(&org).cloned().unwrap_or_default()))
}

async fn record_report(
    State(db): State<Db>,
    Path(channel): Path<String>,
    Json(report): Json<Value>,
) -> StatusCode {
    db.write().await.reports.entry(channel).or_default().push(report);
    StatusCode::NO_CONTENT
}

async fn list_reports(State(db): State<Db>, Path(channel): Path<String>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(store.reports.get(&channel).cloned().unwrap_or_default())
}

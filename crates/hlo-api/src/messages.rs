//! Request and response envelopes for each endpoint
//!
//! Every request carries the base `RequestEnvelope` (caller id plus access
//! token) flattened into its own fields; every response carries the base
//! `ResponseEnvelope` the same way. The `ApiRequest` and `ApiResponse`
//! traits expose those shared parts to the dispatcher and the token
//! lifecycle manager without knowing the endpoint-specific payload.
//!
//! Field names follow the service's camelCase wire format.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codes::{CharacterChangeStatus, ResultCode, Severity};
use crate::export::CharacterExport;

/// A request that can have an access token injected.
pub trait ApiRequest: Serialize {
    fn envelope(&self) -> &RequestEnvelope;
    fn envelope_mut(&mut self) -> &mut RequestEnvelope;
}

/// A response that carries the base envelope.
pub trait ApiResponse: DeserializeOwned {
    fn envelope(&self) -> &ResponseEnvelope;
}

/// Fields shared by all requests. Also the complete verify request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Correlation value parroted back by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl RequestEnvelope {
    pub fn with_caller_id(caller_id: i64) -> Self {
        Self {
            caller_id: Some(caller_id),
            access_token: None,
        }
    }

    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            caller_id: None,
            access_token: Some(access_token.into()),
        }
    }
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEnvelope")
            .field("caller_id", &self.caller_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiRequest for RequestEnvelope {
    fn envelope(&self) -> &RequestEnvelope {
        self
    }

    fn envelope_mut(&mut self) -> &mut RequestEnvelope {
        self
    }
}

/// Fields shared by all responses. Also the complete verify response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Echo of the request's caller id; 0 when the service omits it.
    #[serde(default)]
    pub caller_id: i64,
    pub result: ResultCode,
    pub severity: Severity,
    /// Plain-text explanation, present when the request failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }

    /// Severity `Error` or worse.
    pub fn is_failure(&self) -> bool {
        self.severity.is_failure()
    }

    pub fn is_bad_api_token(&self) -> bool {
        self.result == ResultCode::BAD_API_TOKEN
    }
}

impl ApiResponse for ResponseEnvelope {
    fn envelope(&self) -> &ResponseEnvelope {
        self
    }
}

macro_rules! impl_api_request {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ApiRequest for $ty {
                fn envelope(&self) -> &RequestEnvelope {
                    &self.envelope
                }

                fn envelope_mut(&mut self) -> &mut RequestEnvelope {
                    &mut self.envelope
                }
            }
        )+
    };
}

macro_rules! impl_api_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn envelope(&self) -> &ResponseEnvelope {
                    &self.envelope
                }
            }
        )+
    };
}

/// Exchange a user token for an access token.
///
/// Never carries an access token, so it has its own caller id field rather
/// than the shared envelope.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireAccessTokenRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<i64>,
    /// The user token.
    pub refresh_token: String,
    /// Filled from the client configuration when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Short token lifespan in seconds, for testing. Zero or absent yields
    /// the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,
}

impl AcquireAccessTokenRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            ..Self::default()
        }
    }

    pub fn tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn caller_id(mut self, caller_id: i64) -> Self {
        self.caller_id = Some(caller_id);
        self
    }

    pub fn lifespan(mut self, seconds: u32) -> Self {
        self.lifespan = Some(seconds);
        self
    }
}

impl fmt::Debug for AcquireAccessTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquireAccessTokenRequest")
            .field("caller_id", &self.caller_id)
            .field("refresh_token", &"[REDACTED]")
            .field("tool_name", &self.tool_name)
            .field("lifespan", &self.lifespan)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireAccessTokenResponse {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope,
    /// Issued token; absent when the acquisition failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl AcquireAccessTokenResponse {
    /// The issued token when the acquisition succeeded with a non-empty one.
    pub fn issued_token(&self) -> Option<&str> {
        match self.access_token.as_deref() {
            Some(token) if self.envelope.is_success() && !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

impl fmt::Debug for AcquireAccessTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquireAccessTokenResponse")
            .field("envelope", &self.envelope)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Export of a single character or cast member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCharacterRequest {
    #[serde(flatten)]
    pub envelope: RequestEnvelope,
    /// Character token or cast member token.
    pub element_token: String,
    /// Restrict the export to one actor; all actors when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Revision the caller already has; absent or 0 requests a full export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<u64>,
}

impl GetCharacterRequest {
    pub fn new(element_token: impl Into<String>) -> Self {
        Self {
            element_token: element_token.into(),
            ..Self::default()
        }
    }

    pub fn baseline(mut self, baseline: u64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

impl From<&str> for GetCharacterRequest {
    fn from(element_token: &str) -> Self {
        Self::new(element_token)
    }
}

impl From<String> for GetCharacterRequest {
    fn from(element_token: String) -> Self {
        Self::new(element_token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCharacterResponse {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope,
    /// Minimum interval before the next retrieval request, in milliseconds.
    #[serde(default)]
    pub wait: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CharacterChangeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<CharacterExport>,
}

impl GetCharacterResponse {
    /// Drop export data unless the status says one was delivered.
    pub(crate) fn normalize(&mut self) {
        if !self.status.is_some_and(CharacterChangeStatus::carries_export) {
            self.export = None;
        }
    }
}

/// One entry of a bulk character request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterQuery {
    /// Character, cast member or campaign token.
    pub element_token: String,
    /// Cast member id; only valid together with a campaign token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<u64>,
}

impl CharacterQuery {
    pub fn new(element_token: impl Into<String>) -> Self {
        Self {
            element_token: element_token.into(),
            ..Self::default()
        }
    }

    /// Cast member `cast_id` of the campaign identified by `campaign_token`.
    pub fn cast_member(campaign_token: impl Into<String>, cast_id: impl Into<String>) -> Self {
        Self {
            element_token: campaign_token.into(),
            cast_id: Some(cast_id.into()),
            ..Self::default()
        }
    }

    pub fn baseline(mut self, baseline: u64) -> Self {
        self.baseline = Some(baseline);
        self
    }
}

impl From<&str> for CharacterQuery {
    fn from(element_token: &str) -> Self {
        Self::new(element_token)
    }
}

impl From<String> for CharacterQuery {
    fn from(element_token: String) -> Self {
        Self::new(element_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCharacterBulkRequest {
    #[serde(flatten)]
    pub envelope: RequestEnvelope,
    pub characters: Vec<CharacterQuery>,
}

impl<Q: Into<CharacterQuery>> FromIterator<Q> for GetCharacterBulkRequest {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        Self {
            envelope: RequestEnvelope::default(),
            characters: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<CharacterQuery>> for GetCharacterBulkRequest {
    fn from(characters: Vec<CharacterQuery>) -> Self {
        characters.into_iter().collect()
    }
}

impl From<Vec<String>> for GetCharacterBulkRequest {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<Vec<&str>> for GetCharacterBulkRequest {
    fn from(tokens: Vec<&str>) -> Self {
        tokens.into_iter().collect()
    }
}

/// One entry of a bulk character response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResult {
    /// Token exactly as requested.
    pub element_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<String>,
    pub status: CharacterChangeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<CharacterExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCharacterBulkResponse {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope,
    #[serde(default)]
    pub wait: u64,
    /// Absent whenever the call as a whole failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CharacterResult>>,
}

impl GetCharacterBulkResponse {
    /// A failed bulk call carries no per-character results; surviving
    /// entries keep export data only for Delta/Complete.
    pub(crate) fn normalize(&mut self) {
        if self.envelope.is_failure() {
            self.characters = None;
            return;
        }
        for character in self.characters.iter_mut().flatten() {
            if !character.status.carries_export() {
                character.export = None;
            }
        }
    }
}

/// Cast members on a campaign's stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCastListRequest {
    #[serde(flatten)]
    pub envelope: RequestEnvelope,
    pub campaign_token: String,
}

impl From<&str> for GetCastListRequest {
    fn from(campaign_token: &str) -> Self {
        campaign_token.to_owned().into()
    }
}

impl From<String> for GetCastListRequest {
    fn from(campaign_token: String) -> Self {
        Self {
            envelope: RequestEnvelope::default(),
            campaign_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCastListResponse {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope,
    #[serde(default)]
    pub wait: u64,
    /// Ids of the PC cast members currently on stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_list: Option<Vec<String>>,
}

impl_api_request!(GetCharacterRequest, GetCharacterBulkRequest, GetCastListRequest);

impl_api_response!(
    AcquireAccessTokenResponse,
    GetCharacterResponse,
    GetCharacterBulkResponse,
    GetCastListResponse,
);

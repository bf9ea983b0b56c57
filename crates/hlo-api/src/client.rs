//! API client and access-token lifecycle
//!
//! `HloClient` owns the only mutable state in the crate: the current access
//! token. Every operation that may acquire or refresh it takes `&mut self`,
//! so one logical call runs its read-refresh-retry sequence without another
//! call interleaving. Callers that share a client across tasks wrap it in
//! their own mutex.
//!
//! Token states:
//! - `NoToken` → `TokenPresent` on a successful acquisition
//! - `TokenPresent` → `TokenPresent` on refresh (the token is replaced)
//! - a token is never revoked locally
//!
//! Token-requiring calls go through `dispatch_with_token_handling`, which
//! injects the token, and on a `BAD_API_TOKEN` result refreshes once and
//! re-dispatches once. Nothing else is retried.

use std::sync::Arc;
use std::time::Duration;

use common::Secret;
use tracing::{debug, info, warn};
use transport::{ReqwestTransport, Transport};

use crate::constants::{
    ACQUIRE_ACCESS_TOKEN_PATH, API_BASE_URL, DEFAULT_TOOL_NAME, GET_CAST_LIST_PATH,
    GET_CHARACTER_BULK_PATH, GET_CHARACTER_PATH, MAX_TOKEN_RETRIES, VERIFY_ACCESS_TOKEN_PATH,
};
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::messages::{
    AcquireAccessTokenRequest, AcquireAccessTokenResponse, ApiRequest, ApiResponse,
    GetCastListRequest, GetCastListResponse, GetCharacterBulkRequest, GetCharacterBulkResponse,
    GetCharacterRequest, GetCharacterResponse, RequestEnvelope, ResponseEnvelope,
};

/// Immutable per-client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    user_token: Secret<String>,
    tool_name: String,
    auto_token_handling: bool,
}

impl ClientConfig {
    pub fn user_token(&self) -> &Secret<String> {
        &self.user_token
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn auto_token_handling(&self) -> bool {
        self.auto_token_handling
    }
}

/// Builder for [`HloClient`].
pub struct HloClientBuilder {
    user_token: String,
    access_token: Option<String>,
    auto_token_handling: bool,
    tool_name: Option<String>,
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    timeout: Duration,
}

impl HloClientBuilder {
    /// Start with a token obtained earlier, e.g. read from disk.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// When off, callers manage tokens and a missing token fails locally.
    pub fn auto_token_handling(mut self, enabled: bool) -> Self {
        self.auto_token_handling = enabled;
        self
    }

    pub fn tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the default `ReqwestTransport`.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Timeout for the default transport. Ignored with a custom transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> HloClient {
        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(ReqwestTransport::new(self.timeout)) as Arc<dyn Transport>
        });
        let tool_name = self
            .tool_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string());

        HloClient {
            dispatcher: Dispatcher::new(transport, &self.base_url),
            config: ClientConfig {
                user_token: Secret::new(self.user_token),
                tool_name,
                auto_token_handling: self.auto_token_handling,
            },
            access_token: self
                .access_token
                .filter(|token| !token.is_empty())
                .map(Secret::new),
        }
    }
}

/// Client for the Hero Lab Online API with automatic token handling.
pub struct HloClient {
    dispatcher: Dispatcher,
    config: ClientConfig,
    /// Absent or non-empty. Written only by `store_access_token`.
    access_token: Option<Secret<String>>,
}

impl HloClient {
    pub fn builder(user_token: impl Into<String>) -> HloClientBuilder {
        HloClientBuilder {
            user_token: user_token.into(),
            access_token: None,
            auto_token_handling: true,
            tool_name: None,
            base_url: API_BASE_URL.to_string(),
            transport: None,
            timeout: transport::http::DEFAULT_TIMEOUT,
        }
    }

    /// Client with default settings and automatic token handling.
    pub fn new(user_token: impl Into<String>) -> Self {
        Self::builder(user_token).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current access token, if one has been set or acquired.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(Secret::as_str)
    }

    /// Exchange the user token for an access token.
    ///
    /// Without `request`, one is built from the configured user token and
    /// tool name; a request lacking a tool name gets the configured one. No
    /// access token is attached. On success with a non-empty token the token
    /// is stored unless `persist` is false.
    ///
    /// The response is returned whatever its severity; only transport,
    /// HTTP and parse failures are errors.
    pub async fn acquire_access_token(
        &mut self,
        request: Option<AcquireAccessTokenRequest>,
        persist: bool,
    ) -> Result<AcquireAccessTokenResponse> {
        let mut request = request.unwrap_or_else(|| self.default_acquire_request(None));
        if request.tool_name.is_none() {
            request.tool_name = Some(self.config.tool_name.clone());
        }

        let response: AcquireAccessTokenResponse = self
            .dispatcher
            .send(ACQUIRE_ACCESS_TOKEN_PATH, &request)
            .await?;

        if persist {
            if let Some(token) = response.issued_token() {
                self.store_access_token(token);
            }
        }
        Ok(response)
    }

    /// Ask the service whether an access token is still valid.
    ///
    /// Uses the request's token if it has one, else the stored token. With
    /// neither, automatic mode acquires one first and manual mode fails with
    /// `TokenRequired`. A rejected token is reported, never refreshed: the
    /// answer to "is this token valid" must not be masked by a retry.
    pub async fn verify_access_token(
        &mut self,
        request: Option<RequestEnvelope>,
    ) -> Result<ResponseEnvelope> {
        let mut request = request.unwrap_or_default();
        self.ensure_access_token(&mut request).await?;
        self.dispatcher
            .send(VERIFY_ACCESS_TOKEN_PATH, &request)
            .await
    }

    /// Export of one character. Accepts a bare element token or a full
    /// request. `export` is only kept for `Delta` and `Complete`.
    pub async fn get_character(
        &mut self,
        request: impl Into<GetCharacterRequest>,
    ) -> Result<GetCharacterResponse> {
        let mut response: GetCharacterResponse = self
            .dispatch_with_token_handling(GET_CHARACTER_PATH, request.into())
            .await?;
        response.normalize();
        Ok(response)
    }

    /// Exports of several characters in one call. A failed call carries no
    /// `characters` at all.
    pub async fn get_characters(
        &mut self,
        request: impl Into<GetCharacterBulkRequest>,
    ) -> Result<GetCharacterBulkResponse> {
        let mut response: GetCharacterBulkResponse = self
            .dispatch_with_token_handling(GET_CHARACTER_BULK_PATH, request.into())
            .await?;
        response.normalize();
        Ok(response)
    }

    /// Cast members currently on a campaign's stage.
    pub async fn get_cast_list(
        &mut self,
        request: impl Into<GetCastListRequest>,
    ) -> Result<GetCastListResponse> {
        self.dispatch_with_token_handling(GET_CAST_LIST_PATH, request.into())
            .await
    }

    /// Dispatch with token injection and a single refresh-and-retry.
    async fn dispatch_with_token_handling<Req, Resp>(
        &mut self,
        path: &str,
        mut request: Req,
    ) -> Result<Resp>
    where
        Req: ApiRequest,
        Resp: ApiResponse,
    {
        self.ensure_access_token(request.envelope_mut()).await?;
        let caller_id = request.envelope().caller_id;

        let mut retries_remaining = MAX_TOKEN_RETRIES;
        loop {
            let response: Resp = self.dispatcher.send(path, &request).await?;

            let rejected = response.envelope().is_bad_api_token();
            if !rejected || !self.config.auto_token_handling || retries_remaining == 0 {
                return Ok(response);
            }
            retries_remaining -= 1;

            warn!(path, "access token rejected, refreshing");
            let token = self.refresh_access_token(caller_id).await?;
            request.envelope_mut().access_token = Some(token);
        }
    }

    /// Fill in the request's token from the stored one, acquiring it first
    /// when automatic handling allows.
    async fn ensure_access_token(&mut self, envelope: &mut RequestEnvelope) -> Result<()> {
        if envelope.access_token.is_some() {
            return Ok(());
        }
        if let Some(token) = self.access_token() {
            envelope.access_token = Some(token.to_string());
            return Ok(());
        }
        if !self.config.auto_token_handling {
            return Err(Error::TokenRequired {
                caller_id: envelope.caller_id.unwrap_or_default(),
            });
        }
        debug!("no access token, acquiring");
        let token = self.refresh_access_token(envelope.caller_id).await?;
        envelope.access_token = Some(token);
        Ok(())
    }

    /// Acquire a fresh token from the user token and store it. A refusal is
    /// raised as `Error::Service`: the caller needed this token to proceed.
    async fn refresh_access_token(&mut self, caller_id: Option<i64>) -> Result<String> {
        let request = self.default_acquire_request(caller_id);
        let response = self.acquire_access_token(Some(request), true).await?;

        if !response.envelope.is_success() {
            return Err(Error::from_envelope(&response.envelope));
        }
        response
            .issued_token()
            .map(str::to_string)
            .ok_or_else(|| Error::Protocol("acquire succeeded without an access token".into()))
    }

    fn default_acquire_request(&self, caller_id: Option<i64>) -> AcquireAccessTokenRequest {
        AcquireAccessTokenRequest {
            caller_id,
            refresh_token: self.config.user_token.as_str().to_string(),
            tool_name: Some(self.config.tool_name.clone()),
            lifespan: None,
        }
    }

    fn store_access_token(&mut self, token: &str) {
        info!(replaced = self.access_token.is_some(), "access token acquired");
        self.access_token = Some(Secret::new(token.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{CharacterChangeStatus, ResultCode, Severity};
    use crate::testing::{MockHloApi, tokens};

    fn client(mock: &Arc<MockHloApi>, user_token: &str, auto: bool) -> HloClient {
        HloClient::builder(user_token)
            .auto_token_handling(auto)
            .tool_name("HLO API Unit Test")
            .transport(mock.clone())
            .build()
    }

    #[tokio::test]
    async fn valid_user_token_is_exchanged() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, false);

        let response = api.acquire_access_token(None, true).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        assert_eq!(response.envelope.result, ResultCode::SUCCESS);
        assert_eq!(response.access_token.as_deref(), Some(tokens::VALID_ACCESS));
        assert_eq!(api.access_token(), Some(tokens::VALID_ACCESS));
    }

    #[tokio::test]
    async fn explicit_request_with_short_tool_name() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, false);

        let request = AcquireAccessTokenRequest::new(tokens::VALID_USER).tool_name("T");
        let response = api.acquire_access_token(Some(request), true).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        assert_eq!(response.envelope.result, ResultCode(0));
        assert_eq!(response.access_token.as_deref(), Some("VALID_ACCESS_TOKEN"));
    }

    #[tokio::test]
    async fn invalid_user_token_returns_envelope_not_error() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::INVALID_USER, true);

        let response = api.acquire_access_token(None, true).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Error);
        assert_eq!(response.envelope.result, ResultCode::BAD_API_TOKEN);
        assert!(api.access_token().is_none());
    }

    #[tokio::test]
    async fn empty_tool_name_is_rejected_by_service() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, false);

        let request = AcquireAccessTokenRequest::new(tokens::VALID_USER).tool_name("");
        let err = api
            .acquire_access_token(Some(request), true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidApiCall));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[tokio::test]
    async fn missing_tool_name_uses_configured_one() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, false);

        let request = AcquireAccessTokenRequest::new(tokens::VALID_USER);
        let response = api.acquire_access_token(Some(request), true).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);

        let sent = mock.requests();
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["toolName"], "HLO API Unit Test");
        assert!(body.get("accessToken").is_none());
    }

    #[tokio::test]
    async fn unpersisted_acquire_leaves_token_untouched() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(mock.clone())
            .build();

        let response = api.acquire_access_token(None, false).await.unwrap();
        assert_eq!(response.access_token.as_deref(), Some(tokens::VALID_ACCESS));
        assert_eq!(api.access_token(), Some(tokens::INVALID_ACCESS));
    }

    #[tokio::test]
    async fn verify_is_idempotent() {
        let mock = MockHloApi::shared();
        let mut valid = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::VALID_ACCESS)
            .transport(mock.clone())
            .build();
        let mut invalid = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(mock.clone())
            .build();

        for _ in 0..3 {
            let ok = valid.verify_access_token(None).await.unwrap();
            assert_eq!((ok.severity, ok.result), (Severity::Success, ResultCode(0)));

            let bad = invalid
                .verify_access_token(Some(RequestEnvelope::default()))
                .await
                .unwrap();
            assert_eq!((bad.severity, bad.result), (Severity::Error, ResultCode(7100)));
        }
        // Verification never refreshes, so exactly one call per verify
        assert_eq!(mock.call_count(), 6);
        assert_eq!(invalid.access_token(), Some(tokens::INVALID_ACCESS));
    }

    #[tokio::test]
    async fn verify_request_token_overrides_stored_token() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(mock.clone())
            .build();

        let response = api
            .verify_access_token(Some(RequestEnvelope::with_access_token(tokens::VALID_ACCESS)))
            .await
            .unwrap();
        assert_eq!(response.severity, Severity::Success);
    }

    #[tokio::test]
    async fn missing_token_is_acquired_before_first_call() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, true);

        let response = api.get_character(tokens::VALID_CHARACTER).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        assert_eq!(mock.calls_to("acquire-access-token"), 1);
        assert_eq!(mock.calls_to("get"), 1);
        assert_eq!(api.access_token(), Some(tokens::VALID_ACCESS));
    }

    #[tokio::test]
    async fn stale_token_is_refreshed_exactly_once() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(mock.clone())
            .build();

        let response = api.get_character(tokens::VALID_CHARACTER).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        assert_eq!(response.status, Some(CharacterChangeStatus::Complete));
        assert_eq!(
            response.export.unwrap().lead_actor().unwrap().name,
            "Unit Test"
        );

        // failing dispatch + refresh + retried dispatch
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls_to("get"), 2);
        assert_eq!(mock.calls_to("acquire-access-token"), 1);
        assert_eq!(api.access_token(), Some(tokens::VALID_ACCESS));
    }

    /// Issues tokens like the real service but answers every other call
    /// with a bad-token result, even after a refresh.
    #[derive(Default)]
    struct RejectingService {
        urls: std::sync::Mutex<Vec<String>>,
    }

    impl Transport for RejectingService {
        fn send(&self, request: transport::TransportRequest) -> transport::SendFuture<'_> {
            let response = if request.url.ends_with(ACQUIRE_ACCESS_TOKEN_PATH) {
                crate::testing::respond(&request.url, request.body.as_deref().unwrap_or_default())
            } else {
                transport::TransportResponse::new(200, r#"{"severity":150,"result":7100}"#)
            };
            self.urls.lock().unwrap().push(request.url);
            Box::pin(async move { Ok(response) })
        }
    }

    #[tokio::test]
    async fn retry_stops_when_refreshed_token_is_also_rejected() {
        let service = Arc::new(RejectingService::default());
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(service.clone())
            .build();

        let response = api.get_character(tokens::VALID_CHARACTER).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Error);
        assert_eq!(response.envelope.result, ResultCode::BAD_API_TOKEN);
        assert!(response.export.is_none());

        let character = format!("{API_BASE_URL}{GET_CHARACTER_PATH}");
        let acquire = format!("{API_BASE_URL}{ACQUIRE_ACCESS_TOKEN_PATH}");
        assert_eq!(
            *service.urls.lock().unwrap(),
            vec![character.clone(), acquire, character]
        );
        assert_eq!(api.access_token(), Some(tokens::VALID_ACCESS));
    }

    #[tokio::test]
    async fn refresh_failure_raises_service_error() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::INVALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .transport(mock.clone())
            .build();

        let err = api.get_character(tokens::VALID_CHARACTER).await.unwrap_err();
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(err.result(), ResultCode::BAD_API_TOKEN);
        assert!(matches!(err, Error::Service { .. }));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn bootstrap_failure_aborts_before_primary_request() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::INVALID_USER, true);

        let err = api.get_character(tokens::VALID_CHARACTER).await.unwrap_err();
        assert!(matches!(err, Error::Service { .. }));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls_to("get"), 0);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::VALID_ACCESS)
            .transport(mock.clone())
            .build();

        let response = api.get_character(tokens::INVALID_ELEMENT).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Error);
        assert_eq!(response.envelope.result, ResultCode::BAD_ELEMENT_TOKEN);
        assert!(response.export.is_none());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn manual_mode_without_token_fails_locally() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, false);

        let err = api.get_character(tokens::VALID_CHARACTER).await.unwrap_err();
        assert!(matches!(err, Error::TokenRequired { .. }));
        assert_eq!(err.result(), ResultCode::BAD_API_TOKEN);

        let err = api.verify_access_token(None).await.unwrap_err();
        assert!(matches!(err, Error::TokenRequired { .. }));

        let err = api.get_cast_list(tokens::VALID_CAMPAIGN).await.unwrap_err();
        assert!(matches!(err, Error::TokenRequired { .. }));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn manual_mode_returns_bad_token_without_refresh() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::INVALID_ACCESS)
            .auto_token_handling(false)
            .transport(mock.clone())
            .build();

        let response = api.get_character(tokens::VALID_CHARACTER).await.unwrap();
        assert_eq!(response.envelope.result, ResultCode::BAD_API_TOKEN);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn caller_id_is_echoed() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::VALID_ACCESS)
            .transport(mock.clone())
            .build();

        let mut request = GetCharacterRequest::from(tokens::VALID_CHARACTER);
        request.envelope.caller_id = Some(77);
        let response = api.get_character(request).await.unwrap();
        assert_eq!(response.envelope.caller_id, 77);
    }

    #[tokio::test]
    async fn unchanged_character_has_no_export() {
        let mock = MockHloApi::shared();
        let mut api = HloClient::builder(tokens::VALID_USER)
            .access_token(tokens::VALID_ACCESS)
            .transport(mock.clone())
            .build();

        let request = GetCharacterRequest::new(tokens::VALID_CHARACTER)
            .baseline(crate::testing::CHARACTER_VERSION);
        let response = api.get_character(request).await.unwrap();
        assert_eq!(response.status, Some(CharacterChangeStatus::Unchanged));
        assert!(response.export.is_none());

        let delta = api
            .get_character(GetCharacterRequest::new(tokens::VALID_CHARACTER).baseline(4))
            .await
            .unwrap();
        assert_eq!(delta.status, Some(CharacterChangeStatus::Delta));
        assert!(delta.export.unwrap().is_differential());
    }

    #[tokio::test]
    async fn bulk_with_invalid_token_fails_atomically() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, true);

        let response = api
            .get_characters(vec![tokens::VALID_CHARACTER, tokens::INVALID_ELEMENT])
            .await
            .unwrap();
        assert_eq!(response.envelope.severity, Severity::Error);
        assert_eq!(response.envelope.result, ResultCode::BAD_ELEMENT_TOKEN);
        assert!(response.characters.is_none());
    }

    #[tokio::test]
    async fn bulk_with_valid_tokens_returns_each_character() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, true);

        let response = api
            .get_characters(vec![tokens::VALID_CHARACTER, tokens::VALID_CHARACTER])
            .await
            .unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        let characters = response.characters.unwrap();
        assert_eq!(characters.len(), 2);
        assert!(
            characters
                .iter()
                .all(|c| c.status == CharacterChangeStatus::Complete && c.export.is_some())
        );
    }

    #[tokio::test]
    async fn cast_list_for_campaign() {
        let mock = MockHloApi::shared();
        let mut api = client(&mock, tokens::VALID_USER, true);

        let response = api.get_cast_list(tokens::VALID_CAMPAIGN).await.unwrap();
        assert_eq!(response.envelope.severity, Severity::Success);
        assert_eq!(
            response.cast_list.unwrap(),
            vec!["cast.1".to_string(), "cast.2".to_string()]
        );

        let missing = api.get_cast_list("NO_SUCH_CAMPAIGN").await.unwrap();
        assert_eq!(missing.envelope.result, ResultCode::BAD_CAMPAIGN);
        assert!(missing.cast_list.is_none());
    }

    #[test]
    fn empty_configuration_values_fall_back() {
        let api = HloClient::builder(tokens::VALID_USER)
            .tool_name("")
            .access_token("")
            .transport(MockHloApi::shared())
            .build();
        assert_eq!(api.config().tool_name(), DEFAULT_TOOL_NAME);
        assert!(api.access_token().is_none());
        assert!(api.config().auto_token_handling());
        assert_eq!(api.config().user_token().as_str(), tokens::VALID_USER);
    }
}

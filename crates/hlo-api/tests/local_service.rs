//! End-to-end tests against a local HTTP server serving the canned API.
//!
//! Unlike the unit tests these go through `ReqwestTransport`, so URL
//! joining, headers, status handling and body decoding all run for real.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;

use hlo_api::testing::{self, tokens};
use hlo_api::{
    CharacterChangeStatus, Error, GetCharacterRequest, HloClient, ResultCode, Severity,
    TokenStore,
};

async fn handle(State(calls): State<Arc<AtomicUsize>>, uri: Uri, body: String) -> impl IntoResponse {
    calls.fetch_add(1, Ordering::SeqCst);
    let response = testing::respond(uri.path(), &body);
    let status = StatusCode::from_u16(response.status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], response.body)
}

/// Spawn the canned API and return its versioned base URL plus a call counter.
async fn spawn_service() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new().fallback(handle).with_state(calls.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1"), calls)
}

#[tokio::test]
async fn stale_token_refreshes_over_http() {
    let (base_url, calls) = spawn_service().await;
    let mut api = HloClient::builder(tokens::VALID_USER)
        .access_token(tokens::INVALID_ACCESS)
        .base_url(base_url)
        .build();

    let response = api.get_character(tokens::VALID_CHARACTER).await.unwrap();
    assert_eq!(response.envelope.severity, Severity::Success);
    assert_eq!(response.status, Some(CharacterChangeStatus::Complete));
    let export = response.export.unwrap();
    assert_eq!(export.portfolio.char_id, "unittest");
    assert_eq!(export.lead_actor().unwrap().name, "Unit Test");

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(api.access_token(), Some(tokens::VALID_ACCESS));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let (base_url, _calls) = spawn_service().await;
    let mut api = HloClient::builder(tokens::VALID_USER)
        .base_url(format!("{base_url}/"))
        .build();

    let response = api.get_cast_list(tokens::VALID_CAMPAIGN).await.unwrap();
    assert_eq!(response.cast_list.unwrap(), testing::CAST_LIST);
}

#[tokio::test]
async fn http_400_surfaces_as_invalid_api_call() {
    let (base_url, _calls) = spawn_service().await;
    let mut api = HloClient::builder(tokens::VALID_USER)
        .base_url(base_url)
        .build();

    let request = hlo_api::AcquireAccessTokenRequest::new(tokens::VALID_USER).tool_name("");
    let err = api
        .acquire_access_token(Some(request), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidApiCall));
    assert_eq!(err.to_string(), "Invalid API call");
    assert_eq!(err.severity(), Severity::Error);
    assert!(api.access_token().is_none());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut api = HloClient::builder(tokens::VALID_USER)
        .access_token(tokens::VALID_ACCESS)
        .base_url(format!("http://{addr}/v1"))
        .build();

    let err = api.verify_access_token(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn persisted_token_is_reused_by_next_session() {
    let (base_url, calls) = spawn_service().await;
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path());

    // First session acquires and persists
    let mut first = HloClient::builder(tokens::VALID_USER)
        .base_url(base_url.clone())
        .build();
    let acquired = first.acquire_access_token(None, true).await.unwrap();
    assert_eq!(acquired.envelope.result, ResultCode::SUCCESS);
    store
        .save_access_token(first.access_token().unwrap())
        .await
        .unwrap();

    // Second session starts from disk and needs no acquisition
    let saved = store.read_access_token().await.unwrap().unwrap();
    let mut second = HloClient::builder(tokens::VALID_USER)
        .access_token(saved.as_str())
        .base_url(base_url)
        .build();
    let before = calls.load(Ordering::SeqCst);

    let request = GetCharacterRequest::new(tokens::VALID_CHARACTER).baseline(testing::CHARACTER_VERSION);
    let response = second.get_character(request).await.unwrap();
    assert_eq!(response.status, Some(CharacterChangeStatus::Unchanged));
    assert!(response.export.is_none());
    assert_eq!(calls.load(Ordering::SeqCst) - before, 1);
}

//! Hero Lab Online API client library
//!
//! Typed access to the Hero Lab Online (HLO) character API: acquiring and
//! verifying access tokens, retrieving character exports singly or in bulk,
//! and listing a campaign's cast. The client is independent of the CLI and
//! of any particular HTTP stack; the transport is injected.
//!
//! Request flow:
//! 1. `HloClient::get_character()` (or another token-requiring call)
//! 2. The client injects the stored access token, acquiring one first if
//!    none is stored and automatic handling is on
//! 3. `dispatch::Dispatcher` POSTs the JSON body and validates the HTTP status
//! 4. A `BAD_API_TOKEN` result triggers one refresh and one retry
//! 5. The typed response is returned; service-level errors stay in its
//!    envelope for the caller to inspect

pub mod client;
pub mod codes;
pub mod constants;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod messages;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::{ClientConfig, HloClient, HloClientBuilder};
pub use codes::{CharacterChangeStatus, ResultCode, Severity};
pub use constants::*;
pub use credentials::TokenStore;
pub use error::{Error, Result};
pub use export::CharacterExport;
pub use messages::{
    AcquireAccessTokenRequest, AcquireAccessTokenResponse, CharacterQuery, CharacterResult,
    GetCastListRequest, GetCastListResponse, GetCharacterBulkRequest, GetCharacterBulkResponse,
    GetCharacterRequest, GetCharacterResponse, RequestEnvelope, ResponseEnvelope,
};

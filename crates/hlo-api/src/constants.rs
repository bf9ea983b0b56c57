//! Hero Lab Online API constants
//!
//! Endpoint paths are relative to the versioned base URL. The dispatcher
//! concatenates base URL and path verbatim, so every path carries its
//! leading slash.

/// Versioned base URL of the public API
pub const API_BASE_URL: &str = "https://api.herolab.online/v1";

/// Exchange a user token for an access token (the only call sent without one)
pub const ACQUIRE_ACCESS_TOKEN_PATH: &str = "/access/acquire-access-token";

/// Check whether an access token is still accepted
pub const VERIFY_ACCESS_TOKEN_PATH: &str = "/access/verify-access-token";

/// Export of a single character or cast member
pub const GET_CHARACTER_PATH: &str = "/character/get";

/// Exports of several characters in one call
pub const GET_CHARACTER_BULK_PATH: &str = "/character/get-bulk";

/// Cast members currently on a campaign's stage
pub const GET_CAST_LIST_PATH: &str = "/campaign/get-stage";

/// Tool name sent when the caller configures none.
pub const DEFAULT_TOOL_NAME: &str = "de.dreiersoftware.hloApi";

/// Headers sent with every request
pub const STANDARD_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
];

/// Number of refresh-and-retry attempts after a rejected access token
pub const MAX_TOKEN_RETRIES: u8 = 1;

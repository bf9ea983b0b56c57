//! Deterministic stand-in for the Hero Lab Online service
//!
//! `respond` maps an endpoint and a JSON request body to the response the
//! service would give, without any I/O. `MockHloApi` wraps it as a
//! [`Transport`] and records every request, so tests can assert on call
//! counts. The same function can back a real HTTP server for end-to-end
//! tests.
//!
//! Only the tokens in [`tokens`] are accepted.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value, json};
use transport::{SendFuture, Transport, TransportRequest, TransportResponse};

use crate::codes::{CharacterChangeStatus, ResultCode, Severity};

pub mod tokens {
    pub const VALID_USER: &str = "VALID_USER_TOKEN";
    pub const VALID_ACCESS: &str = "VALID_ACCESS_TOKEN";
    pub const INVALID_USER: &str = "INVALID_USER_TOKEN";
    pub const INVALID_ACCESS: &str = "INVALID_ACCESS_TOKEN";
    /// Element token of the fixture character.
    pub const VALID_CHARACTER: &str = "VALID_CHARACTER_TOKEN";
    pub const INVALID_ELEMENT: &str = "INVALID_ELEMENT_TOKEN";
    pub const VALID_CAMPAIGN: &str = "VALID_CAMPAIGN_TOKEN";
}

/// Current version of the fixture character. Requests with this baseline
/// (or later) get `Unchanged`.
pub const CHARACTER_VERSION: u64 = 10;

/// Cast members on the stage of [`tokens::VALID_CAMPAIGN`].
pub const CAST_LIST: [&str; 2] = ["cast.1", "cast.2"];

/// Recording mock transport.
#[derive(Debug, Default)]
pub struct MockHloApi {
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockHloApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, ready for `HloClientBuilder::transport`.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of requests sent so far.
    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of requests whose final path segment is `operation`,
    /// e.g. `"get"` or `"acquire-access-token"`.
    pub fn calls_to(&self, operation: &str) -> usize {
        self.lock()
            .iter()
            .filter(|request| operation_of(&request.url).1 == operation)
            .count()
    }

    /// Copies of all recorded requests, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TransportRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockHloApi {
    fn send(&self, request: TransportRequest) -> SendFuture<'_> {
        let response = respond(&request.url, request.body.as_deref().unwrap_or_default());
        self.lock().push(request);
        Box::pin(async move { Ok(response) })
    }
}

/// Canned service behaviour for a request to `url` (or a bare path).
pub fn respond(url: &str, body: &str) -> TransportResponse {
    let Ok(Value::Object(request)) = serde_json::from_str::<Value>(body) else {
        return TransportResponse::new(400, "Bad Request");
    };

    match operation_of(url) {
        ("access", "acquire-access-token") => acquire_access_token(&request),
        ("access", "verify-access-token") => {
            let valid = str_field(&request, "accessToken") == Some(tokens::VALID_ACCESS);
            envelope(&request, token_outcome(valid), Map::new())
        }
        (
            "access",
            "identify-game-server"
            | "identify-notification-server"
            | "attach-game-server"
            | "unsubscribe-all",
        ) => envelope(
            &request,
            (Severity::Failure, ResultCode::NOT_ENABLED),
            Map::new(),
        ),
        ("character", "get") => with_access(&request, get_character),
        ("character", "get-bulk") => with_access(&request, get_character_bulk),
        ("campaign", "get-stage") => with_access(&request, get_stage),
        _ => envelope(
            &request,
            (Severity::Error, ResultCode::UNSPECIFIED_ERROR),
            Map::new(),
        ),
    }
}

/// Full export of the fixture character.
pub fn character_export() -> Value {
    json!({
        "portfolio": { "charId": "unittest", "version": CHARACTER_VERSION, "baseline": 0 },
        "metadata": {
            "gameCode": "pf2",
            "gameName": "Pathfinder Roleplaying Game (Second Edition)",
            "gameMajor": 3,
            "gameMinor": 28,
            "hloVersion": 1058,
            "exportVersion": 1,
            "legal": "Hero Lab and the Hero Lab logo are Registered Trademarks of LWD Technology, Inc."
        },
        "actors": {
            "actor.1": {
                "name": "Unit Test",
                "player": "Unit Tester",
                "gameValues": {
                    "actLevelNet": 1,
                    "actAlignment": "Chaotic Neutral",
                    "actRace": "human",
                    "actBackgroundText": "Field Medic",
                    "actClassText": "alchemist 1",
                    "actBulk": 4.1,
                    "actEncumbered": 7,
                    "actOverburdened": 12,
                    "actSpace": 5,
                    "actReach": 5,
                    "actSocietyChar": 2001
                },
                "items": {}
            }
        }
    })
}

/// Differential export of the fixture character against `baseline`.
fn character_delta(baseline: u64) -> Value {
    json!({
        "portfolio": { "charId": "unittest", "version": CHARACTER_VERSION, "baseline": baseline },
        "actors": {
            "actor.1": { "gameValues": { "actLevelNet": 1 } }
        },
        "deletedActors": []
    })
}

/// `(area, operation)`: the last two path segments.
fn operation_of(url: &str) -> (&str, &str) {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let operation = segments.next().unwrap_or_default();
    let area = segments.next().unwrap_or_default();
    (area, operation)
}

fn str_field<'a>(request: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    request.get(name).and_then(Value::as_str)
}

fn token_outcome(valid: bool) -> (Severity, ResultCode) {
    if valid {
        (Severity::Success, ResultCode::SUCCESS)
    } else {
        (Severity::Error, ResultCode::BAD_API_TOKEN)
    }
}

/// 200 response with the base envelope merged into `fields`.
fn envelope(
    request: &Map<String, Value>,
    (severity, result): (Severity, ResultCode),
    mut fields: Map<String, Value>,
) -> TransportResponse {
    if let Some(caller_id) = request.get("callerId").filter(|id| !id.is_null()) {
        fields.insert("callerId".into(), caller_id.clone());
    }
    fields.insert("severity".into(), json!(severity));
    fields.insert("result".into(), json!(result));
    TransportResponse::new(200, Value::Object(fields).to_string())
}

fn acquire_access_token(request: &Map<String, Value>) -> TransportResponse {
    if str_field(request, "toolName").is_none_or(str::is_empty) {
        return TransportResponse::new(400, "toolName is required");
    }
    let valid = str_field(request, "refreshToken") == Some(tokens::VALID_USER);
    let mut fields = Map::new();
    if valid {
        fields.insert("accessToken".into(), json!(tokens::VALID_ACCESS));
    }
    envelope(request, token_outcome(valid), fields)
}

fn with_access(
    request: &Map<String, Value>,
    handler: fn(&Map<String, Value>) -> TransportResponse,
) -> TransportResponse {
    if str_field(request, "accessToken") == Some(tokens::VALID_ACCESS) {
        handler(request)
    } else {
        envelope(request, token_outcome(false), Map::new())
    }
}

/// Status and export for the fixture character relative to `baseline`.
fn lookup(baseline: Option<u64>) -> (CharacterChangeStatus, Option<Value>) {
    match baseline.unwrap_or_default() {
        0 => (CharacterChangeStatus::Complete, Some(character_export())),
        b if b >= CHARACTER_VERSION => (CharacterChangeStatus::Unchanged, None),
        b => (CharacterChangeStatus::Delta, Some(character_delta(b))),
    }
}

fn bad_element(request: &Map<String, Value>) -> TransportResponse {
    envelope(
        request,
        (Severity::Error, ResultCode::BAD_ELEMENT_TOKEN),
        Map::new(),
    )
}

fn get_character(request: &Map<String, Value>) -> TransportResponse {
    if str_field(request, "elementToken") != Some(tokens::VALID_CHARACTER) {
        return bad_element(request);
    }
    let (status, export) = lookup(request.get("baseline").and_then(Value::as_u64));

    let mut fields = Map::new();
    fields.insert("status".into(), json!(status));
    if let Some(export) = export {
        fields.insert("export".into(), export);
    }
    envelope(request, (Severity::Success, ResultCode::SUCCESS), fields)
}

fn get_character_bulk(request: &Map<String, Value>) -> TransportResponse {
    let queries = request
        .get("characters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut characters = Vec::with_capacity(queries.len());
    for query in &queries {
        let Some(query) = query.as_object() else {
            return bad_element(request);
        };
        let element_token = str_field(query, "elementToken");
        if element_token != Some(tokens::VALID_CHARACTER) {
            return bad_element(request);
        }
        let (status, export) = lookup(query.get("baseline").and_then(Value::as_u64));

        let mut entry = Map::new();
        entry.insert("elementToken".into(), json!(element_token));
        if let Some(cast_id) = query.get("castId") {
            entry.insert("castId".into(), cast_id.clone());
        }
        entry.insert("status".into(), json!(status));
        if let Some(export) = export {
            entry.insert("export".into(), export);
        }
        characters.push(Value::Object(entry));
    }

    let mut fields = Map::new();
    fields.insert("characters".into(), Value::Array(characters));
    envelope(request, (Severity::Success, ResultCode::SUCCESS), fields)
}

fn get_stage(request: &Map<String, Value>) -> TransportResponse {
    if str_field(request, "campaignToken") != Some(tokens::VALID_CAMPAIGN) {
        return envelope(
            request,
            (Severity::Error, ResultCode::BAD_CAMPAIGN),
            Map::new(),
        );
    }
    let mut fields = Map::new();
    fields.insert("castList".into(), json!(CAST_LIST));
    envelope(request, (Severity::Success, ResultCode::SUCCESS), fields)
}

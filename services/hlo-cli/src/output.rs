//! Text rendering of API responses.

use hlo_api::{
    CharacterChangeStatus, CharacterResult, GetCastListResponse, GetCharacterBulkResponse,
    GetCharacterResponse, ResponseEnvelope,
};

/// `Error <result>: <message>` for a failed envelope.
pub fn service_error(envelope: &ResponseEnvelope) -> Option<String> {
    envelope.is_failure().then(|| {
        let message = envelope
            .error
            .as_deref()
            .or_else(|| envelope.result.name())
            .unwrap_or("request failed");
        error_line(envelope.result.0, message)
    })
}

pub fn error_line(result: i64, message: impl std::fmt::Display) -> String {
    format!("Error {result}: {message}")
}

pub fn character(response: &GetCharacterResponse) -> serde_json::Result<String> {
    if let Some(line) = service_error(&response.envelope) {
        return Ok(line);
    }
    describe(response.status, response.export.as_ref())
}

pub fn characters(response: &GetCharacterBulkResponse) -> serde_json::Result<Vec<String>> {
    if let Some(line) = service_error(&response.envelope) {
        return Ok(vec![line]);
    }
    let Some(characters) = &response.characters else {
        return Ok(vec!["No character data received".to_string()]);
    };
    characters.iter().map(bulk_entry).collect()
}

fn bulk_entry(character: &CharacterResult) -> serde_json::Result<String> {
    let text = describe(Some(character.status), character.export.as_ref())?;
    Ok(format!("{}: {text}", character.element_token))
}

fn describe(
    status: Option<CharacterChangeStatus>,
    export: Option<&hlo_api::CharacterExport>,
) -> serde_json::Result<String> {
    match (status, export) {
        (Some(CharacterChangeStatus::Missing), _) => Ok("Character not found".to_string()),
        (Some(CharacterChangeStatus::Unchanged), _) => Ok("Character unchanged".to_string()),
        (_, Some(export)) => serde_json::to_string(export),
        _ => Ok("No character data received".to_string()),
    }
}

pub fn cast_list(response: &GetCastListResponse) -> Vec<String> {
    if let Some(line) = service_error(&response.envelope) {
        return vec![line];
    }
    match response.cast_list.as_deref() {
        Some(cast) if !cast.is_empty() => cast.to_vec(),
        _ => vec!["No cast members on stage".to_string()],
    }
}

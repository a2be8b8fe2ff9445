//! Share-code codec: JSON, percent-encoded, then base64.
//!
//! The percent-encoding step keeps the base64 input ASCII-only so codes
//! survive channels that mangle raw UTF-8.

use crate::save::SavePayload;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveCodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid utf-8 in decoded payload: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed save payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes a payload as a portable share code.
pub fn encode_save(payload: &SavePayload) -> Result<String, SaveCodeError> {
    let json = serde_json::to_string(payload)?;
    let escaped = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
    Ok(STANDARD.encode(escaped))
}

/// Decodes a share code back into a payload. Any stage may fail on
/// corrupted input.
pub fn decode_save(code: &str) -> Result<SavePayload, SaveCodeError> {
    let bytes = STANDARD.decode(code.trim())?;
    let escaped = std::str::from_utf8(&bytes)?;
    let json = percent_decode_str(escaped).decode_utf8()?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::create_save_payload;
    use crate::state::GameState;

    #[test]
    fn test_share_code_round_trip() {
        let mut state = GameState::new();
        state.resources.plasma = 123.5;
        state.resources.day = 7;
        state.log.push("A day to remember.");
        let payload = create_save_payload(&state);

        let code = encode_save(&payload).unwrap();
        assert!(!code.is_empty());
        // The code is plain ASCII base64
        assert!(code.bytes().all(|b| b.is_ascii()));

        let decoded = decode_save(&code).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_save("not a code!!!").is_err());
        assert!(decode_save("").is_err());
        // Valid base64, invalid payload underneath
        let bogus = STANDARD.encode("%7B%22not%22%3A%22a%20save%22%7D");
        assert!(decode_save(&bogus).is_err());
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let payload = create_save_payload(&GameState::new());
        let code = encode_save(&payload).unwrap();
        let padded = format!("  {}\n", code);
        assert_eq!(decode_save(&padded).unwrap(), payload);
    }

    #[test]
    fn test_truncated_code_fails() {
        let payload = create_save_payload(&GameState::new());
        let code = encode_save(&payload).unwrap();
        let truncated = &code[..code.len() / 2];
        assert!(decode_save(truncated).is_err());
    }
}

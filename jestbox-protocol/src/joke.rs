//! Joke documents
//!
//! Local records are `[setup, punchline]` pairs, one per line. The remote
//! endpoint answers with an array of objects and only the first one's
//! `text` field is used.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

use crate::error::DecodeError;

/// A two-part joke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRecord {
    pub setup: String,
    pub punchline: String,
}

#[derive(Deserialize)]
struct RemoteJokeEntry {
    text: String,
}

/// Decode one line of the local record file
pub fn decode_record(line: &str) -> Result<JokeRecord, DecodeError> {
    let (setup, punchline): (String, String) = serde_json::from_str(line.trim())?;
    Ok(JokeRecord { setup, punchline })
}

/// Decode the remote joke endpoint's response body
///
/// Returns the text of the first entry.
pub fn decode_remote_joke(body: &str) -> Result<String, DecodeError> {
    let entries: Vec<RemoteJokeEntry> = serde_json::from_str(body)?;
    entries
        .into_iter()
        .next()
        .map(|entry| entry.text)
        .ok_or(DecodeError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_record() {
        let record = decode_record(r#"["Why?", "Because."]"#).unwrap();
        assert_eq!(record.setup, "Why?");
        assert_eq!(record.punchline, "Because.");
    }

    #[test]
    fn test_decode_record_keeps_unicode() {
        let record = decode_record("[\"Was ist grün?\", \"Eine Gurke\"]\r\n").unwrap();
        assert_eq!(record.setup, "Was ist grün?");
    }

    #[test]
    fn test_decode_record_rejects_wrong_arity() {
        assert!(matches!(
            decode_record(r#"["only one"]"#),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            decode_record(r#"["a", "b", "c"]"#),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_decode_remote_first_entry() {
        let body = r#"[{"id": 7, "text": "Erster Witz", "category": "x"}, {"text": "Zweiter"}]"#;
        assert_eq!(decode_remote_joke(body).unwrap(), "Erster Witz");
    }

    #[test]
    fn test_decode_remote_empty_array() {
        assert_eq!(decode_remote_joke("[]"), Err(DecodeError::Empty));
    }

    #[test]
    fn test_decode_remote_missing_text() {
        let err = decode_remote_joke(r#"[{"joke": "no text field"}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_decode_remote_not_json() {
        let err = decode_remote_joke("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err, DecodeError::Malformed { line: 1, column: 1 });
    }
}

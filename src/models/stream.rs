use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::error::ApiError;

pub const SONG_MID_PARAM: &str = "songMid";

/// Query of `GET /api/stream` once it has passed validation.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamQuery {
    pub song_mid: String,
}

/// Form-decodes one query component. `None` when the percent-decoded bytes
/// are not UTF-8.
fn decode_component(raw: &str) -> Option<String> {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8().ok().map(Cow::into_owned)
}

/// Checks the raw query string of a stream request.
///
/// `songMid` has to appear exactly once with a non-empty value. A repeated
/// key decodes to a list rather than a string and is rejected, as is a value
/// that does not decode to UTF-8. Unrelated parameters are ignored.
pub fn validate_stream_query(raw_query: Option<&str>) -> Result<StreamQuery, ApiError> {
    let mut song_mids = Vec::new();
    for pair in raw_query.unwrap_or_default().split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_component(key).as_deref() != Some(SONG_MID_PARAM) {
            continue;
        }
        song_mids.push(decode_component(value).ok_or(ApiError::InvalidParams)?);
    }

    let mut song_mids = song_mids.into_iter();
    match (song_mids.next(), song_mids.next()) {
        (Some(song_mid), None) if !song_mid.is_empty() => Ok(StreamQuery { song_mid }),
        _ => Err(ApiError::InvalidParams),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_mid(raw: &str) -> Option<String> {
        validate_stream_query(Some(raw)).ok().map(|query| query.song_mid)
    }

    #[test]
    fn accepts_a_single_song_mid() {
        assert_eq!(song_mid("songMid=abc123").as_deref(), Some("abc123"));
    }

    #[test]
    fn decodes_percent_encoded_values() {
        assert_eq!(song_mid("songMid=003a%2B1%20x").as_deref(), Some("003a+1 x"));
        assert_eq!(song_mid("songMid=a+b").as_deref(), Some("a b"));
    }

    #[test]
    fn ignores_unrelated_params() {
        assert_eq!(song_mid("quality=high&songMid=xyz&t=1").as_deref(), Some("xyz"));
    }

    #[test]
    fn rejects_missing_song_mid() {
        assert!(matches!(validate_stream_query(None), Err(ApiError::InvalidParams)));
        assert_eq!(song_mid(""), None);
        assert_eq!(song_mid("songmid=abc123"), None);
        assert_eq!(song_mid("q=abc123"), None);
    }

    #[test]
    fn rejects_empty_song_mid() {
        assert_eq!(song_mid("songMid="), None);
        assert_eq!(song_mid("songMid"), None);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            validate_stream_query(Some("songMid=%FF")),
            Err(ApiError::InvalidParams)
        ));
        assert_eq!(song_mid("songMid=abc%C3"), None);
    }

    #[test]
    fn keeps_an_encoded_replacement_character() {
        assert_eq!(song_mid("songMid=%EF%BF%BD").as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn percent_encoded_key_still_matches() {
        assert_eq!(song_mid("song%4Did=abc123").as_deref(), Some("abc123"));
    }

    #[test]
    fn rejects_repeated_song_mid() {
        assert_eq!(song_mid("songMid=a&songMid=b"), None);
    }

    #[test]
    fn serializes_with_the_wire_name() {
        let query = StreamQuery {
            song_mid: "abc123".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "songMid": "abc123" })
        );
    }
}

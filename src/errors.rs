//! Error taxonomy for the subtitle extractor.
//!
//! Every failure is terminal. The binary reports it as a single JSON object on
//! stderr (see [`SubtitleError::to_json`]) and exits with status 1.

use crate::models::SubtitleTrack;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Neither a `BV` nor an `av` identifier appears in the input URL.
    #[error("Could not extract BV ID or av ID from URL")]
    NoIdentifierFound { url: String },

    /// The video page could not be fetched.
    #[error("Failed to fetch video page: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page exposes no subtitle list, or the list is empty.
    #[error("No subtitles available for this video")]
    NoSubtitlesAvailable { bvid: String, url: String },

    /// No track matched the language priority and falling back was disabled.
    #[error("No matching subtitle found")]
    NoMatchingSubtitle { bvid: String, available: Vec<String> },

    /// The chosen track has no usable content URL.
    #[error("Subtitle URL not found")]
    NoSubtitleUrlFound { subtitle: SubtitleTrack },

    /// The track content could not be fetched.
    #[error("Failed to fetch subtitle: {source}")]
    SubtitleFetchError {
        subtitle_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The track content is not valid JSON.
    #[error("Failed to parse subtitle JSON: {source}")]
    SubtitleJsonParseError {
        /// Leading slice of the offending content.
        content: String,
        #[source]
        source: serde_json::Error,
    },

    /// The track content is JSON but neither `{"body": [...]}` nor an array.
    #[error("Unknown subtitle format")]
    UnknownSubtitleFormat { structure: Value },
}

impl SubtitleError {
    /// Taxonomy name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            SubtitleError::NoIdentifierFound { .. } => "NoIdentifierFound",
            SubtitleError::FetchError { .. } => "FetchError",
            SubtitleError::NoSubtitlesAvailable { .. } => "NoSubtitlesAvailable",
            SubtitleError::NoMatchingSubtitle { .. } => "NoMatchingSubtitle",
            SubtitleError::NoSubtitleUrlFound { .. } => "NoSubtitleUrlFound",
            SubtitleError::SubtitleFetchError { .. } => "SubtitleFetchError",
            SubtitleError::SubtitleJsonParseError { .. } => "SubtitleJsonParseError",
            SubtitleError::UnknownSubtitleFormat { .. } => "UnknownSubtitleFormat",
        }
    }

    /// Structured error object: the message, the variant name and its context.
    pub fn to_json(&self) -> Value {
        let mut object = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });

        let context = match self {
            SubtitleError::NoIdentifierFound { url } | SubtitleError::FetchError { url, .. } => {
                json!({ "url": url })
            }
            SubtitleError::NoSubtitlesAvailable { bvid, url } => json!({ "bvid": bvid, "url": url }),
            SubtitleError::NoMatchingSubtitle { bvid, available } => {
                json!({ "bvid": bvid, "available": available })
            }
            SubtitleError::NoSubtitleUrlFound { subtitle } => json!({ "subtitle": subtitle }),
            SubtitleError::SubtitleFetchError { subtitle_url, .. } => {
                json!({ "subtitle_url": subtitle_url })
            }
            SubtitleError::SubtitleJsonParseError { content, .. } => json!({ "content": content }),
            SubtitleError::UnknownSubtitleFormat { structure } => json!({ "structure": structure }),
        };

        if let (Some(target), Value::Object(fields)) = (object.as_object_mut(), context) {
            target.extend(fields);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_identifier_object() {
        let err = SubtitleError::NoIdentifierFound {
            url: "https://example.com".into(),
        };
        let object = err.to_json();
        assert_eq!(object["kind"], "NoIdentifierFound");
        assert_eq!(object["error"], "Could not extract BV ID or av ID from URL");
        assert_eq!(object["url"], "https://example.com");
    }

    #[test]
    fn test_json_parse_error_object_keeps_source_message() {
        let source = serde_json::from_str::<Value>("{oops").unwrap_err();
        let err = SubtitleError::SubtitleJsonParseError {
            content: "{oops".into(),
            source,
        };
        let object = err.to_json();
        assert_eq!(object["kind"], "SubtitleJsonParseError");
        assert!(
            object["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to parse subtitle JSON: ")
        );
        assert_eq!(object["content"], "{oops");
    }

    #[test]
    fn test_no_matching_subtitle_lists_available() {
        let err = SubtitleError::NoMatchingSubtitle {
            bvid: "BV1a2b3c4d5E".into(),
            available: vec!["en".into(), "ja".into()],
        };
        assert_eq!(err.to_json()["available"], json!(["en", "ja"]));
    }

    #[test]
    fn test_missing_url_echoes_track() {
        let subtitle = SubtitleTrack {
            lan: Some("zh-CN".into()),
            ..Default::default()
        };
        let object = SubtitleError::NoSubtitleUrlFound { subtitle }.to_json();
        assert_eq!(object["subtitle"], json!({ "lan": "zh-CN" }));
    }
}

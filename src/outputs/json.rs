//! Single-line JSON objects written to stderr by the subtitle extractor.
//!
//! On success stderr carries one metadata object; on failure it carries one
//! error object. Either way it is exactly one line, so callers can read it
//! without a streaming parser.

use crate::errors::SubtitleError;
use crate::models::SubtitleMetadata;

/// Serialize the success metadata as one line.
pub fn metadata_line(metadata: &SubtitleMetadata) -> serde_json::Result<String> {
    serde_json::to_string(metadata)
}

/// Serialize an error object as one line.
pub fn error_line(err: &SubtitleError) -> String {
    err.to_json().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimestampFormat;
    use serde_json::Value;

    #[test]
    fn test_metadata_line_is_single_line() {
        let metadata = SubtitleMetadata {
            bvid: "av123456".into(),
            url: "https://www.bilibili.com/video/av123456/".into(),
            language: "zh-CN".into(),
            timestamp_format: TimestampFormat::Included,
            line_count: 12,
        };
        let line = metadata_line(&metadata).unwrap();
        assert!(!line.contains('\n'));

        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["bvid"], "av123456");
        assert_eq!(parsed["language"], "zh-CN");
        assert_eq!(parsed["timestamp_format"], "included");
    }

    #[test]
    fn test_error_line_round_trips() {
        let err = SubtitleError::NoSubtitlesAvailable {
            bvid: "BV1a2b3c4d5E".into(),
            url: "https://www.bilibili.com/video/BV1a2b3c4d5E/".into(),
        };
        let line = error_line(&err);
        assert!(!line.contains('\n'));

        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["error"], "No subtitles available for this video");
        assert_eq!(parsed["kind"], "NoSubtitlesAvailable");
        assert_eq!(parsed["bvid"], "BV1a2b3c4d5E");
    }
}

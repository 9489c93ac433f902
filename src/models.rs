//! Data models shared by the report builder and the subtitle extractor.
//!
//! Everything here is transient: values are built, used and dropped within a
//! single run of one of the binaries.
//!
//! - [`WeekRange`] and [`Category`]: inputs to the weekly report
//! - [`VideoId`]: the Bilibili identifier pulled out of a user-supplied URL
//! - [`SubtitleTrack`]: one language's entry in a page's subtitle list
//! - [`SubtitleLine`]: one line of a downloaded subtitle track
//! - [`SubtitleMetadata`]: the summary object printed to stderr on success

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The Monday-to-Sunday week a report covers, plus the day it was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    /// Monday of the current week.
    pub start: NaiveDate,
    /// Sunday of the current week, always `start + 6 days`.
    pub end: NaiveDate,
    /// The generation date.
    pub today: NaiveDate,
}

/// Search-query categories of the weekly report.
///
/// The set is closed; lookups by key for anything else return nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// API and developer platform updates.
    ApiTools,
    /// Agent frameworks, skills and tool calling.
    AgentFrameworks,
    /// SDK and library releases.
    Libraries,
    /// Technical research and best practices.
    Technical,
    /// Open-source projects and tools.
    OpenSource,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Category::ApiTools,
        Category::AgentFrameworks,
        Category::Libraries,
        Category::Technical,
        Category::OpenSource,
    ];

    /// Stable lookup key.
    pub fn key(self) -> &'static str {
        match self {
            Category::ApiTools => "api_tools",
            Category::AgentFrameworks => "agent_frameworks",
            Category::Libraries => "libraries",
            Category::Technical => "technical",
            Category::OpenSource => "opensource",
        }
    }

    /// Human-readable label, used in `--help`.
    pub fn label(self) -> &'static str {
        match self {
            Category::ApiTools => "API & Developer Tools",
            Category::AgentFrameworks => "Agent Frameworks & Skills",
            Category::Libraries => "SDK & Library Releases",
            Category::Technical => "Technical Research & Best Practices",
            Category::OpenSource => "Open Source & Tools",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// A Bilibili video identifier.
///
/// Bilibili has used two formats over time: the current `BV` form (`BV`
/// followed by ten alphanumerics) and the legacy numeric `av` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoId {
    /// Full token including the `BV` prefix.
    Bv(String),
    /// Digits only; displayed with the `av` prefix.
    Av(String),
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoId::Bv(id) => f.write_str(id),
            VideoId::Av(digits) => write!(f, "av{digits}"),
        }
    }
}

/// One entry of a page's subtitle list.
///
/// The site exposes this record under different shapes depending on the page
/// layout, so both known spellings of each field are kept and resolved by the
/// accessors. Unrecognized fields are retained in `extra` so the record can be
/// echoed back verbatim in error reports.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SubtitleTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubtitleTrack {
    /// Language code, preferring `lang` over `lan`.
    pub fn language(&self) -> Option<&str> {
        self.lang.as_deref().or(self.lan.as_deref())
    }

    /// Raw content URL, preferring a non-empty `subtitle_url` over `url`.
    pub fn content_url(&self) -> Option<&str> {
        self.subtitle_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }
}

/// One line of a downloaded subtitle track, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum SubtitleLine {
    /// A line with a start and end time.
    Cue { from: f64, to: f64, content: String },
    /// A line with a single timestamp.
    Point { timestamp: f64, content: String },
}

impl SubtitleLine {
    /// Read a line from one element of a track body.
    ///
    /// Objects carrying both `from` and `to` become [`SubtitleLine::Cue`];
    /// anything else becomes [`SubtitleLine::Point`] with `timestamp`
    /// defaulting to zero. Missing or non-numeric times read as zero.
    pub fn from_value(value: &Value) -> Self {
        let seconds = |key: &str| value.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        let content = value
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        if value.get("from").is_some() && value.get("to").is_some() {
            SubtitleLine::Cue {
                from: seconds("from"),
                to: seconds("to"),
                content,
            }
        } else {
            SubtitleLine::Point {
                timestamp: seconds("timestamp"),
                content,
            }
        }
    }

    pub fn content(&self) -> &str {
        match self {
            SubtitleLine::Cue { content, .. } | SubtitleLine::Point { content, .. } => content,
        }
    }
}

/// Whether rendered subtitle lines carry timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    Included,
    Excluded,
}

impl TimestampFormat {
    pub fn from_flag(include_timestamps: bool) -> Self {
        if include_timestamps {
            TimestampFormat::Included
        } else {
            TimestampFormat::Excluded
        }
    }
}

/// Summary of a successful extraction, printed to stderr as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleMetadata {
    /// The video identifier (`BV...` or `av...`).
    pub bvid: String,
    /// The video page that was scraped.
    pub url: String,
    /// Language of the chosen track.
    pub language: String,
    pub timestamp_format: TimestampFormat,
    pub line_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("industry"), None);
    }

    #[test]
    fn test_video_id_display() {
        assert_eq!(VideoId::Bv("BV1a2b3c4d5E".into()).to_string(), "BV1a2b3c4d5E");
        assert_eq!(VideoId::Av("123456".into()).to_string(), "av123456");
    }

    #[test]
    fn test_track_prefers_lang_over_lan() {
        let track: SubtitleTrack =
            serde_json::from_value(json!({"lang": "en", "lan": "zh-CN"})).unwrap();
        assert_eq!(track.language(), Some("en"));

        let track: SubtitleTrack = serde_json::from_value(json!({"lan": "ai-zh"})).unwrap();
        assert_eq!(track.language(), Some("ai-zh"));
    }

    #[test]
    fn test_track_content_url_skips_empty_subtitle_url() {
        let track: SubtitleTrack = serde_json::from_value(json!({
            "lan": "zh-CN",
            "subtitle_url": "",
            "url": "//example.com/sub.json"
        }))
        .unwrap();
        assert_eq!(track.content_url(), Some("//example.com/sub.json"));

        let track: SubtitleTrack = serde_json::from_value(json!({"lan": "zh-CN"})).unwrap();
        assert_eq!(track.content_url(), None);
    }

    #[test]
    fn test_track_keeps_unknown_fields() {
        let track: SubtitleTrack = serde_json::from_value(json!({
            "id": 42,
            "lan": "en-US",
            "lan_doc": "English"
        }))
        .unwrap();
        assert_eq!(track.extra.get("id"), Some(&json!(42)));

        let echoed = serde_json::to_value(&track).unwrap();
        assert_eq!(echoed["lan_doc"], "English");
        assert!(echoed.get("subtitle_url").is_none());
    }

    #[test]
    fn test_line_from_cue_object() {
        let line = SubtitleLine::from_value(&json!({"from": 1, "to": 2.5, "content": "  hi  "}));
        assert_eq!(
            line,
            SubtitleLine::Cue {
                from: 1.0,
                to: 2.5,
                content: "hi".into()
            }
        );
    }

    #[test]
    fn test_line_without_times_defaults_to_zero() {
        let line = SubtitleLine::from_value(&json!({"content": "hello"}));
        assert_eq!(
            line,
            SubtitleLine::Point {
                timestamp: 0.0,
                content: "hello".into()
            }
        );
        assert_eq!(line.content(), "hello");
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = SubtitleMetadata {
            bvid: "BV1a2b3c4d5E".into(),
            url: "https://www.bilibili.com/video/BV1a2b3c4d5E/".into(),
            language: "zh-CN".into(),
            timestamp_format: TimestampFormat::from_flag(false),
            line_count: 3,
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["timestamp_format"], "excluded");
        assert_eq!(value["line_count"], 3);
    }
}

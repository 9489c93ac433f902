//! Subtitle track parsing and plain-text rendering.

use crate::errors::SubtitleError;
use crate::models::SubtitleLine;
use crate::utils::truncate_chars;
use itertools::Itertools;
use serde_json::Value;

/// Characters of unparseable content echoed back in the error object.
const PARSE_ERROR_PREVIEW_CHARS: usize = 200;

/// Format seconds as `HH:MM:SS.mmm`.
///
/// ```
/// use ai_weekly_tools::outputs::subtitles::format_timestamp;
///
/// assert_eq!(format_timestamp(3725.5), "01:02:05.500");
/// assert_eq!(format_timestamp(0.0), "00:00:00.000");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours as i64, minutes as i64, secs)
}

/// Parse downloaded track content into lines.
///
/// Accepts `{"body": [...]}` or a bare array of line objects. Each element is
/// read with [`SubtitleLine::from_value`], so malformed lines degrade to empty
/// content at time zero instead of failing the whole track.
///
/// # Arguments
///
/// * `content` - The decoded response body of the track URL
///
/// # Returns
///
/// * `Ok(lines)` - Lines in source order
/// * `Err(SubtitleJsonParseError)` - Not JSON; carries the first 200 characters
/// * `Err(UnknownSubtitleFormat)` - JSON of another shape; carries the object's
///   keys or the JSON type name
///
/// # Examples
///
/// ```
/// use ai_weekly_tools::outputs::subtitles::parse_track_body;
///
/// let lines = parse_track_body(r#"{"body":[{"from":1,"to":2,"content":"hi"}]}"#).unwrap();
/// assert_eq!(lines[0].content(), "hi");
/// assert!(parse_track_body("[]").unwrap().is_empty());
/// ```
pub fn parse_track_body(content: &str) -> Result<Vec<SubtitleLine>, SubtitleError> {
    let json: Value =
        serde_json::from_str(content).map_err(|source| SubtitleError::SubtitleJsonParseError {
            content: truncate_chars(content, PARSE_ERROR_PREVIEW_CHARS).to_string(),
            source,
        })?;

    let items = match &json {
        Value::Object(map) => match map.get("body") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SubtitleError::UnknownSubtitleFormat {
                    structure: Value::from(map.keys().cloned().collect::<Vec<_>>()),
                });
            }
        },
        Value::Array(items) => items,
        other => {
            return Err(SubtitleError::UnknownSubtitleFormat {
                structure: Value::from(json_type_name(other)),
            });
        }
    };

    Ok(items.iter().map(SubtitleLine::from_value).collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render one line.
pub fn render_line(line: &SubtitleLine, include_timestamps: bool) -> String {
    if !include_timestamps {
        return line.content().to_string();
    }
    match line {
        SubtitleLine::Cue { from, to, content } => format!(
            "[{} --> {}] {}",
            format_timestamp(*from),
            format_timestamp(*to),
            content
        ),
        SubtitleLine::Point { timestamp, content } => {
            format!("[{}] {}", format_timestamp(*timestamp), content)
        }
    }
}

/// Render lines in source order, one per output line.
pub fn render_lines(lines: &[SubtitleLine], include_timestamps: bool) -> String {
    lines
        .iter()
        .map(|line| render_line(line, include_timestamps))
        .join("\n")
}

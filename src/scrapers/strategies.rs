//! Ordered extraction strategies for Bilibili video pages.
//!
//! Video pages inline their hydration data in script tags, but the shape of
//! that data differs between page layouts. Extraction therefore runs two
//! ordered strategy lists, each stopping at the first strategy that yields a
//! result:
//!
//! 1. [`EMBEDDED_STRATEGIES`] pull a JSON object out of the page
//!    (`window.__INITIAL_STATE__`, then `__playinfo__`).
//! 2. [`TRACK_LIST_STRATEGIES`] find the subtitle track list, first by probing
//!    known paths inside that object, then by searching the raw page text.
//!
//! Regexes only locate where a JSON value begins. The value itself is
//! delimited by the JSON parser, so `};` or `]` inside string literals or
//! nested arrays cannot cut it short.

use crate::models::SubtitleTrack;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Parse the JSON value at the start of `s`, ignoring whatever follows it.
pub fn parse_json_prefix<T: DeserializeOwned>(s: &str) -> Option<T> {
    serde_json::Deserializer::from_str(s)
        .into_iter::<T>()
        .next()?
        .ok()
}

/// A way of pulling the embedded state object out of a page.
pub trait EmbeddedDataStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The parsed object, or `None` when the pattern is absent or the JSON
    /// is malformed.
    fn extract(&self, html: &str) -> Option<Value>;
}

/// A `<script>` assignment of an object literal to a global.
pub struct ScriptAssignment {
    name: &'static str,
    anchor: Regex,
}

impl ScriptAssignment {
    /// `anchor` must match up to (not including) the object literal.
    pub fn new(name: &'static str, anchor: Regex) -> Self {
        Self { name, anchor }
    }
}

impl EmbeddedDataStrategy for ScriptAssignment {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, html: &str) -> Option<Value> {
        let m = self.anchor.find(html)?;
        parse_json_prefix::<Value>(&html[m.end()..]).filter(Value::is_object)
    }
}

pub static EMBEDDED_STRATEGIES: Lazy<Vec<Box<dyn EmbeddedDataStrategy>>> = Lazy::new(|| {
    let strategies: Vec<Box<dyn EmbeddedDataStrategy>> = vec![
        Box::new(ScriptAssignment::new(
            "initial_state",
            Regex::new(r"<script[^>]*>\s*window\.__INITIAL_STATE__\s*=\s*").unwrap(),
        )),
        Box::new(ScriptAssignment::new(
            "playinfo",
            Regex::new(r"<script[^>]*>\s*(?:window\.)?__playinfo__\s*=\s*").unwrap(),
        )),
    ];
    strategies
});

/// Run [`EMBEDDED_STRATEGIES`] in order and return the first object found.
pub fn extract_embedded_data(html: &str) -> Option<Value> {
    EMBEDDED_STRATEGIES.iter().find_map(|strategy| {
        let data = strategy.extract(html);
        debug!(strategy = strategy.name(), found = data.is_some(), "Embedded data strategy");
        data
    })
}

/// What the track-list strategies get to look at.
#[derive(Debug, Clone, Copy)]
pub struct PageData<'a> {
    /// The raw page text.
    pub html: &'a str,
    /// The embedded state object, if any strategy found one.
    pub embedded: Option<&'a Value>,
}

/// A way of locating the subtitle track list.
pub trait TrackListStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The track list, or `None` when absent or empty.
    fn locate(&self, page: &PageData<'_>) -> Option<Vec<SubtitleTrack>>;
}

/// A known path to a `subtitles` array inside the embedded state.
pub struct EmbeddedPath {
    /// JSON pointer to the array.
    pointer: &'static str,
}

impl TrackListStrategy for EmbeddedPath {
    fn name(&self) -> &'static str {
        self.pointer
    }

    fn locate(&self, page: &PageData<'_>) -> Option<Vec<SubtitleTrack>> {
        let values = page.embedded?.pointer(self.pointer)?.as_array()?;
        non_empty(tracks_from_values(values))
    }
}

static SUBTITLES_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r#""subtitles"\s*:\s*\["#).unwrap());

/// Searches the raw page for a `"subtitles": [...]` array.
///
/// Used when the page layout is not one the embedded paths know about. Every
/// occurrence is tried in page order.
pub struct RawSubtitlesArray;

impl TrackListStrategy for RawSubtitlesArray {
    fn name(&self) -> &'static str {
        "raw_subtitles_array"
    }

    fn locate(&self, page: &PageData<'_>) -> Option<Vec<SubtitleTrack>> {
        SUBTITLES_KEY.find_iter(page.html).find_map(|m| {
            // Back up onto the opening bracket so the parser sees the array.
            let values = parse_json_prefix::<Vec<Value>>(&page.html[m.end() - 1..])?;
            non_empty(tracks_from_values(&values))
        })
    }
}

pub static TRACK_LIST_STRATEGIES: Lazy<Vec<Box<dyn TrackListStrategy>>> = Lazy::new(|| {
    let strategies: Vec<Box<dyn TrackListStrategy>> = vec![
        Box::new(EmbeddedPath {
            pointer: "/subtitleData/subtitles",
        }),
        Box::new(EmbeddedPath {
            pointer: "/videoData/subtitle/subtitles",
        }),
        Box::new(EmbeddedPath {
            pointer: "/data/subtitle/subtitles",
        }),
        Box::new(RawSubtitlesArray),
    ];
    strategies
});

/// Run [`TRACK_LIST_STRATEGIES`] in order and return the first non-empty
/// list along with the name of the strategy that found it.
///
/// # Arguments
///
/// * `page` - The raw page and, if one was found, its embedded state
///
/// # Returns
///
/// `Some((strategy_name, tracks))` with at least one track, or `None` when no
/// strategy finds a non-empty list.
pub fn locate_tracks(page: &PageData<'_>) -> Option<(&'static str, Vec<SubtitleTrack>)> {
    TRACK_LIST_STRATEGIES.iter().find_map(|strategy| {
        let tracks = strategy.locate(page)?;
        debug!(strategy = strategy.name(), count = tracks.len(), "Located subtitle tracks");
        Some((strategy.name(), tracks))
    })
}

/// Entries that are not track-shaped objects are skipped.
fn tracks_from_values(values: &[Value]) -> Vec<SubtitleTrack> {
    values
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

//! Bilibili subtitle scraper.
//!
//! Pipeline for one video, aborting at the first failure:
//!
//! 1. Pull a `BV`/`av` identifier out of the user's URL.
//! 2. Fetch the video page with browser-like headers.
//! 3. Locate the subtitle track list (see [`super::strategies`]).
//! 4. Pick a track by language priority.
//! 5. Fetch the track JSON and render it as text.
//!
//! Responses are gzip-decoded by the HTTP client. Every request is bounded
//! by the client timeout and nothing is retried.

use super::strategies::{PageData, extract_embedded_data, locate_tracks};
use crate::errors::SubtitleError;
use crate::models::{SubtitleMetadata, SubtitleTrack, TimestampFormat, VideoId};
use crate::outputs::subtitles::{parse_track_body, render_lines};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};
use url::Url;

/// Origin serving video pages.
pub const PAGE_BASE: &str = "https://www.bilibili.com";
/// Origin that absolute-path track URLs are resolved against.
pub const API_BASE: &str = "https://api.bilibili.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BILIBILI_REFERER: &str = "https://www.bilibili.com";

/// Built-in language preference, tried after any user-supplied language.
pub const CHINESE_LANGUAGE_PRIORITY: [&str; 4] = ["zh-CN", "zh", "zh-Hans", "zh-Hant"];

static BV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"BV[a-zA-Z0-9]{10}").unwrap());
static AV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"av(\d+)").unwrap());

/// Extract the video identifier from a URL.
///
/// A `BV` identifier anywhere in the input wins over an `av` one. Nothing is
/// validated beyond the pattern match; the input need not even be a URL.
///
/// # Arguments
///
/// * `url` - The user-supplied video URL
///
/// # Returns
///
/// * `Ok(VideoId)` - `Bv` with the full `BV...` token, or `Av` with the digits
/// * `Err(SubtitleError::NoIdentifierFound)` - Neither pattern occurs
///
/// # Examples
///
/// ```
/// use ai_weekly_tools::scrapers::bilibili::extract_video_id;
///
/// let id = extract_video_id("https://www.bilibili.com/video/av170001/").unwrap();
/// assert_eq!(id.to_string(), "av170001");
/// ```
pub fn extract_video_id(url: &str) -> Result<VideoId, SubtitleError> {
    if let Some(m) = BV_PATTERN.find(url) {
        return Ok(VideoId::Bv(m.as_str().to_string()));
    }
    if let Some(caps) = AV_PATTERN.captures(url) {
        return Ok(VideoId::Av(caps[1].to_string()));
    }
    Err(SubtitleError::NoIdentifierFound {
        url: url.to_string(),
    })
}

/// Language codes to try, most preferred first.
///
/// An empty preference counts as none.
pub fn language_priority(preferred: Option<&str>) -> Vec<String> {
    preferred
        .filter(|lang| !lang.is_empty())
        .into_iter()
        .chain(CHINESE_LANGUAGE_PRIORITY)
        .map(str::to_string)
        .collect()
}

/// The outcome of track selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub track: &'a SubtitleTrack,
    /// Language reported in the metadata: the priority code that matched, or
    /// the track's own code when falling back to the first track.
    pub language: String,
}

/// Choose a track by language priority.
///
/// For each code in [`language_priority`], the first track whose language
/// equals or starts with that code wins. When nothing matches, the first
/// track is returned if `fall_back_to_first` is set.
pub fn select_track<'a>(
    tracks: &'a [SubtitleTrack],
    preferred: Option<&str>,
    fall_back_to_first: bool,
) -> Option<Selection<'a>> {
    for code in language_priority(preferred) {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.language().is_some_and(|lang| lang.starts_with(code.as_str())))
        {
            debug!(%code, language = ?track.language(), "Matched subtitle language");
            return Some(Selection {
                track,
                language: code.clone(),
            });
        }
    }

    if !fall_back_to_first {
        return None;
    }
    tracks.first().map(|track| Selection {
        track,
        language: track.language().unwrap_or("unknown").to_string(),
    })
}

/// Resolve a raw track URL to an absolute one.
///
/// Protocol-relative URLs get `https:`, absolute paths are resolved against
/// `api_base`, anything else is taken as-is.
pub fn resolve_track_url(api_base: &str, raw: &str) -> Option<String> {
    if raw.starts_with("//") {
        Some(format!("https:{raw}"))
    } else if raw.starts_with('/') {
        Url::parse(api_base)
            .and_then(|base| base.join(raw))
            .ok()
            .map(String::from)
    } else {
        Some(raw.to_string())
    }
}

/// One extraction request, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleRequest {
    pub url: String,
    pub include_timestamps: bool,
    pub preferred_lang: Option<String>,
    /// Fail with `NoMatchingSubtitle` instead of using the first track.
    pub strict_lang: bool,
}

/// A successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleReport {
    pub metadata: SubtitleMetadata,
    /// Rendered lines joined by `\n`.
    pub text: String,
}

/// HTTP client for video pages and subtitle tracks.
#[derive(Debug, Clone)]
pub struct BilibiliClient {
    client: Client,
    page_base: String,
    api_base: String,
}

impl BilibiliClient {
    /// Client against the live site.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_urls(PAGE_BASE, API_BASE, timeout)
    }

    /// Client against arbitrary origins.
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn with_base_urls(
        page_base: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(BILIBILI_REFERER));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            page_base: page_base.into().trim_end_matches('/').to_string(),
            api_base: api_base.into(),
        })
    }

    /// The page URL scraped for `id`.
    pub fn video_page_url(&self, id: &VideoId) -> String {
        format!("{}/video/{}/", self.page_base, id)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let t0 = Instant::now();
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            bytes = body.len(),
            "GET complete"
        );
        Ok(body)
    }

    /// Run the whole pipeline for one request.
    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    pub async fn extract(&self, request: &SubtitleRequest) -> Result<SubtitleReport, SubtitleError> {
        let video_id = extract_video_id(&request.url)?;
        let bvid = video_id.to_string();
        let page_url = self.video_page_url(&video_id);
        info!(%bvid, %page_url, "Fetching video page");

        let html = self
            .get_text(&page_url)
            .await
            .map_err(|source| SubtitleError::FetchError {
                url: page_url.clone(),
                source,
            })?;

        let embedded = extract_embedded_data(&html);
        let page = PageData {
            html: &html,
            embedded: embedded.as_ref(),
        };
        let tracks = match locate_tracks(&page) {
            Some((strategy, tracks)) => {
                info!(strategy, count = tracks.len(), "Found subtitle tracks");
                tracks
            }
            None => {
                debug!(
                    embedded = embedded.is_some(),
                    preview = %truncate_for_log(&html, 300),
                    "No subtitle list found on page"
                );
                return Err(SubtitleError::NoSubtitlesAvailable {
                    bvid,
                    url: page_url,
                });
            }
        };

        let selection = select_track(
            &tracks,
            request.preferred_lang.as_deref(),
            !request.strict_lang,
        )
        .ok_or_else(|| SubtitleError::NoMatchingSubtitle {
            bvid: bvid.clone(),
            available: tracks
                .iter()
                .map(|t| t.language().unwrap_or("unknown").to_string())
                .collect(),
        })?;

        let track_url = selection
            .track
            .content_url()
            .and_then(|raw| resolve_track_url(&self.api_base, raw))
            .ok_or_else(|| SubtitleError::NoSubtitleUrlFound {
                subtitle: selection.track.clone(),
            })?;
        info!(language = %selection.language, %track_url, "Fetching subtitle track");

        let content = self.get_text(&track_url).await.map_err(|source| {
            SubtitleError::SubtitleFetchError {
                subtitle_url: track_url.clone(),
                source,
            }
        })?;

        let lines = parse_track_body(&content)?;
        info!(line_count = lines.len(), "Parsed subtitle track");

        Ok(SubtitleReport {
            text: render_lines(&lines, request.include_timestamps),
            metadata: SubtitleMetadata {
                bvid,
                url: page_url,
                language: selection.language,
                timestamp_format: TimestampFormat::from_flag(request.include_timestamps),
                line_count: lines.len(),
            },
        })
    }
}

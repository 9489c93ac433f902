//! Command-line interface definitions for both binaries.
//!
//! Arguments are parsed with `clap`. The extractor's language and timeout can
//! also come from environment variables.

use crate::models::Category;
use crate::scrapers::bilibili::SubtitleRequest;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Print a weekly AI developer news report template with search queries for
/// the current week.
#[derive(Parser, Debug)]
#[command(name = "ai-weekly", author, version, about, after_help = weekly_after_help())]
pub struct WeeklyCli {
    /// Build the report for the week containing this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stray arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

fn weekly_after_help() -> String {
    let mut help = String::from(
        "Output: Markdown template with search queries for the current week\n\nCategories:",
    );
    for category in Category::ALL {
        help.push_str("\n  - ");
        help.push_str(category.label());
    }
    help
}

/// Extract subtitles from a Bilibili video.
///
/// Prints the subtitle text to stdout and one JSON metadata line to stderr.
/// On failure prints one JSON error line to stderr and exits with status 1.
#[derive(Parser, Debug)]
#[command(name = "bilibili-subtitle", author, version, about)]
pub struct SubtitleCli {
    /// Bilibili video URL containing a BV or av identifier
    pub url: String,

    /// Output plain text without timestamps
    #[arg(long, overrides_with = "timestamps")]
    pub plain: bool,

    /// Output with timestamps (default)
    #[arg(long, overrides_with = "plain")]
    pub timestamps: bool,

    /// Preferred subtitle language code (e.g. zh-CN, en-US)
    #[arg(long, env = "BILIBILI_SUBTITLE_LANG")]
    pub lang: Option<String>,

    /// Fail instead of falling back to the first track when no language matches
    #[arg(long)]
    pub strict_lang: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "BILIBILI_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl SubtitleCli {
    pub fn include_timestamps(&self) -> bool {
        !self.plain
    }

    pub fn to_request(&self) -> SubtitleRequest {
        SubtitleRequest {
            url: self.url.clone(),
            include_timestamps: self.include_timestamps(),
            preferred_lang: self.lang.clone().filter(|l| !l.is_empty()),
            strict_lang: self.strict_lang,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const URL: &str = "https://www.bilibili.com/video/BV1a2b3c4d5E";

    #[test]
    fn test_weekly_no_args() {
        let cli = WeeklyCli::try_parse_from(["ai-weekly"]).unwrap();
        assert!(cli.date.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_weekly_date_and_output() {
        let cli =
            WeeklyCli::try_parse_from(["ai-weekly", "--date", "2025-05-08", "-o", "week.md"]).unwrap();
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 5, 8));
        assert_eq!(cli.output, Some(PathBuf::from("week.md")));
    }

    #[test]
    fn test_weekly_ignores_extra_arguments() {
        let cli = WeeklyCli::try_parse_from(["ai-weekly", "foo", "bar"]).unwrap();
        assert!(cli.date.is_none());
        assert_eq!(cli.ignored, vec!["foo", "bar"]);

        let cli = WeeklyCli::try_parse_from(["ai-weekly", "--date", "2025-05-08", "extra"]).unwrap();
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 5, 8));
    }

    #[test]
    fn test_weekly_help_lists_categories() {
        let err = WeeklyCli::try_parse_from(["ai-weekly", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("Agent Frameworks & Skills"));
        assert!(help.contains("Open Source & Tools"));
    }

    #[test]
    fn test_subtitle_defaults() {
        let cli = SubtitleCli::try_parse_from(["bilibili-subtitle", URL]).unwrap();
        assert!(cli.include_timestamps());
        assert!(!cli.strict_lang);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.to_request().url, URL);
    }

    #[test]
    fn test_subtitle_missing_url() {
        let err = SubtitleCli::try_parse_from(["bilibili-subtitle"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_subtitle_last_timestamp_flag_wins() {
        let cli = SubtitleCli::try_parse_from(["bilibili-subtitle", URL, "--plain"]).unwrap();
        assert!(!cli.include_timestamps());

        let cli =
            SubtitleCli::try_parse_from(["bilibili-subtitle", URL, "--plain", "--timestamps"]).unwrap();
        assert!(cli.include_timestamps());

        let cli =
            SubtitleCli::try_parse_from(["bilibili-subtitle", URL, "--timestamps", "--plain"]).unwrap();
        assert!(!cli.include_timestamps());
    }

    #[test]
    fn test_subtitle_lang_equals_syntax() {
        let cli = SubtitleCli::try_parse_from(["bilibili-subtitle", URL, "--lang=ja"]).unwrap();
        assert_eq!(cli.to_request().preferred_lang.as_deref(), Some("ja"));

        let cli = SubtitleCli::try_parse_from(["bilibili-subtitle", URL, "--lang="]).unwrap();
        assert_eq!(cli.to_request().preferred_lang, None);
    }

    #[test]
    fn test_subtitle_strict_and_timeout() {
        let cli = SubtitleCli::try_parse_from([
            "bilibili-subtitle",
            URL,
            "--strict-lang",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert!(cli.to_request().strict_lang);
        assert_eq!(cli.timeout, 5);
    }
}

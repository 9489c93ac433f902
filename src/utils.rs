//! Utility functions for tracing setup, string truncation and output files.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Install the global tracing subscriber.
///
/// Logs always go to stderr: stdout carries the tool's product output. The
/// filter comes from `RUST_LOG`, falling back to `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// Truncate a string to at most `max` characters.
///
/// Counts characters rather than bytes so multi-byte text (subtitle content
/// is mostly CJK) is never split mid-codepoint.
///
/// # Arguments
///
/// * `s` - The string to truncate
/// * `max` - Maximum number of characters to keep
///
/// # Returns
///
/// A prefix of `s` borrowing from it; `s` itself when it is short enough.
///
/// # Examples
///
/// ```
/// use ai_weekly_tools::utils::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 100), "short");
/// assert_eq!(truncate_chars("字幕内容", 2), "字幕");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with `"…(+N bytes)"` appended.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of characters to keep
///
/// # Returns
///
/// The original string if it fits, otherwise the truncated prefix plus the
/// count of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", kept, s.len() - kept.len())
    }
}

/// Write `contents` to `path`, creating missing parent directories first.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_output_file(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;
    info!(bytes = contents.len(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let s = "你好世界";
        assert_eq!(truncate_chars(s, 2), "你好");
        assert_eq!(truncate_chars(s, 4), s);
        assert_eq!(truncate_chars(s, 0), "");
        assert_eq!(truncate_for_log(s, 3), "你好世…(+3 bytes)");
    }

    #[tokio::test]
    async fn test_write_output_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/2025/week.md");
        write_output_file(&path, "# report\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report\n");
    }
}

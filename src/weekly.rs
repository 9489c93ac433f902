//! Week arithmetic and search-query templates for the weekly report.

use crate::models::{Category, WeekRange};
use chrono::{Datelike, Duration, NaiveDate};

/// Compute the Monday-anchored week containing `today`.
///
/// # Arguments
///
/// * `today` - The generation date; any weekday
///
/// # Returns
///
/// A [`WeekRange`] whose `start` is the Monday on or before `today` and whose
/// `end` is the following Sunday. `today` is carried through unchanged.
///
/// # Examples
///
/// ```
/// use ai_weekly_tools::weekly::week_range;
/// use chrono::NaiveDate;
///
/// let thursday = NaiveDate::from_ymd_opt(2025, 5, 8).unwrap();
/// let range = week_range(thursday);
/// assert_eq!(range.start.to_string(), "2025-05-05");
/// assert_eq!(range.end.to_string(), "2025-05-11");
/// ```
pub fn week_range(today: NaiveDate) -> WeekRange {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    WeekRange {
        start,
        end: start + Duration::days(6),
        today,
    }
}

/// Search queries for a category key, with the week's dates substituted.
///
/// # Arguments
///
/// * `category` - A [`Category::key`], e.g. `"api_tools"`
/// * `start` - Week start, inserted verbatim (normally `YYYY-MM-DD`)
/// * `end` - Week end, inserted verbatim
///
/// # Returns
///
/// Three queries, each ending in `"{start} {end}"`. Unknown keys yield an
/// empty list rather than an error.
///
/// # Examples
///
/// ```
/// use ai_weekly_tools::weekly::search_queries;
///
/// let queries = search_queries("opensource", "2025-05-05", "2025-05-11");
/// assert_eq!(queries[2], "GitHub trending AI/ML 2025-05-05 2025-05-11");
/// assert!(search_queries("industry", "a", "b").is_empty());
/// ```
pub fn search_queries(category: &str, start: &str, end: &str) -> Vec<String> {
    Category::from_key(category)
        .map(|c| category_queries(c, start, end))
        .unwrap_or_default()
}

impl Category {
    /// Search queries for this category over `range`.
    pub fn queries(self, range: &WeekRange) -> Vec<String> {
        category_queries(self, &range.start.to_string(), &range.end.to_string())
    }
}

/// Queries for the industry section. Not a category: it has no lookup key
/// and only two queries.
pub fn industry_queries(range: &WeekRange) -> Vec<String> {
    let (s, e) = (range.start, range.end);
    vec![
        format!("AI platform policy changes OR developer tools acquisition {s} {e}"),
        format!("AI regulation impacting developers {s} {e}"),
    ]
}

fn category_queries(category: Category, s: &str, e: &str) -> Vec<String> {
    match category {
        Category::ApiTools => vec![
            format!(r#""OpenAI API update" OR "Anthropic Claude API" OR "Gemini API release" {s} {e}"#),
            format!("SDK release OR developer console OR endpoint changes {s} {e}"),
            format!("pricing update OR rate limit OR API features {s} {e}"),
        ],
        Category::AgentFrameworks => vec![
            format!(r#""agent framework" OR "agent skills" OR "function calling" OR "tool use" {s} {e}"#),
            format!(
                r#""Claude Skills" OR "OpenAI function calling" OR AutoGen OR "LangChain agent" OR CrewAI {s} {e}"#
            ),
            format!(r#""multi-agent system" OR "agent orchestration" OR "agent deployment" {s} {e}"#),
        ],
        Category::Libraries => vec![
            format!(
                r#""LangChain release" OR "LlamaIndex update" OR SDK release OR library launch {s} {e}"#
            ),
            format!("Python SDK OR JavaScript SDK OR TypeScript agent framework {s} {e}"),
            format!("version release AND AI framework {s} {e}"),
        ],
        Category::Technical => vec![
            format!(
                r#""prompt engineering guide" OR "RAG tutorial" OR "fine-tuning best practices" {s} {e}"#
            ),
            format!("LLM evaluation OR agent testing OR benchmarking tools {s} {e}"),
            format!("technical blog AND AI development OR engineering {s} {e}"),
        ],
        Category::OpenSource => vec![
            format!(
                r#""open-source LLM" OR "GitHub AI project" OR "agent framework open source" {s} {e}"#
            ),
            format!("Hugging Face release OR model repository OR developer tool {s} {e}"),
            format!("GitHub trending AI/ML {s} {e}"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_range_midweek() {
        let range = week_range(date(2025, 5, 8)); // Thursday
        assert_eq!(range.start, date(2025, 5, 5));
        assert_eq!(range.end, date(2025, 5, 11));
        assert_eq!(range.today, date(2025, 5, 8));
    }

    #[test]
    fn test_week_range_on_monday_and_sunday() {
        assert_eq!(week_range(date(2025, 5, 5)).start, date(2025, 5, 5));
        assert_eq!(week_range(date(2025, 5, 11)).start, date(2025, 5, 5));
    }

    #[test]
    fn test_week_range_crosses_year_boundary() {
        let range = week_range(date(2025, 1, 1)); // Wednesday
        assert_eq!(range.start, date(2024, 12, 30));
        assert_eq!(range.end, date(2025, 1, 5));
    }

    #[test]
    fn test_week_range_invariants_hold_for_a_year() {
        let mut day = date(2024, 1, 1);
        while day < date(2025, 1, 1) {
            let range = week_range(day);
            assert_eq!(range.start.weekday(), Weekday::Mon);
            assert_eq!(range.end.weekday(), Weekday::Sun);
            assert_eq!(range.end, range.start + Duration::days(6));
            assert!(range.start <= day && day <= range.end);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_search_queries_unknown_category() {
        assert!(search_queries("industry", "2025-05-05", "2025-05-11").is_empty());
        assert!(search_queries("", "2025-05-05", "2025-05-11").is_empty());
    }

    #[test]
    fn test_search_queries_substitute_both_dates() {
        for category in Category::ALL {
            let queries = search_queries(category.key(), "2025-05-05", "2025-05-11");
            assert_eq!(queries.len(), 3, "category {}", category.key());
            for q in &queries {
                assert!(q.ends_with(" 2025-05-05 2025-05-11"), "query {q}");
            }
        }
    }

    #[test]
    fn test_typed_queries_match_keyed_queries() {
        let range = week_range(date(2025, 5, 8));
        assert_eq!(
            Category::ApiTools.queries(&range),
            search_queries("api_tools", "2025-05-05", "2025-05-11")
        );
        assert_eq!(
            Category::OpenSource.queries(&range)[2],
            "GitHub trending AI/ML 2025-05-05 2025-05-11"
        );
    }

    #[test]
    fn test_industry_queries() {
        let range = week_range(date(2025, 5, 8));
        assert_eq!(
            industry_queries(&range),
            vec![
                "AI platform policy changes OR developer tools acquisition 2025-05-05 2025-05-11",
                "AI regulation impacting developers 2025-05-05 2025-05-11",
            ]
        );
    }
}

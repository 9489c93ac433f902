//! Markdown rendering of the weekly developer report skeleton.
//!
//! The report is meant for manual follow-up: each section lists the search
//! queries to run and leaves an HTML comment where results get pasted.

use crate::models::{Category, WeekRange};
use crate::weekly::industry_queries;
use std::fmt::Write;

/// A report section backed by search queries.
struct QuerySection {
    heading: &'static str,
    subheading: Option<&'static str>,
    placeholder: &'static str,
}

fn category_section(category: Category) -> QuerySection {
    match category {
        Category::ApiTools => QuerySection {
            heading: "🛠️ 开发工具与平台更新",
            subheading: Some("API 更新"),
            placeholder: "添加 API 更新信息",
        },
        Category::AgentFrameworks => QuerySection {
            heading: "🤖 Agent 框架与能力",
            subheading: Some("Agent Skills 与工具调用"),
            placeholder: "添加 Agent 框架更新信息",
        },
        Category::Libraries => QuerySection {
            heading: "📦 SDK 与库发布",
            subheading: None,
            placeholder: "添加 SDK 和库发布信息",
        },
        Category::Technical => QuerySection {
            heading: "🔬 技术研究与最佳实践",
            subheading: None,
            placeholder: "添加技术研究和最佳实践信息",
        },
        Category::OpenSource => QuerySection {
            heading: "💡 开源项目与工具",
            subheading: None,
            placeholder: "添加开源项目和工具信息",
        },
    }
}

const INDUSTRY_SECTION: QuerySection = QuerySection {
    heading: "📊 行业动态",
    subheading: None,
    placeholder: "添加行业动态信息",
};

/// Render the full report for `range`.
///
/// Deterministic: the same range always yields the same text.
pub fn render_report(range: &WeekRange) -> String {
    let mut md = String::new();

    writeln!(md, "# AI 开发者周报\n").unwrap();
    writeln!(md, "**本周时间**: {} 至 {}", range.start, range.end).unwrap();
    writeln!(md, "**生成时间**: {}\n", range.today).unwrap();
    writeln!(md, "> 面向 AI 应用开发者和智能体研发人员的技术情报周报\n").unwrap();
    writeln!(md, "---\n").unwrap();

    for category in Category::ALL {
        write_section(&mut md, &category_section(category), &category.queries(range));
    }
    write_section(&mut md, &INDUSTRY_SECTION, &industry_queries(range));

    writeln!(md, "## 🔑 本周开发者重点关注\n").unwrap();
    writeln!(md, "1.\n2.\n3.\n").unwrap();
    writeln!(md, "---\n").unwrap();
    writeln!(md, "## 📚 推荐阅读\n").unwrap();
    writeln!(md, "-\n-\n").unwrap();
    writeln!(md, "---").unwrap();
    writeln!(md, "*由 AI Weekly Skill 自动生成 - 开发者版*").unwrap();

    md
}

fn write_section(md: &mut String, section: &QuerySection, queries: &[String]) {
    writeln!(md, "## {}\n", section.heading).unwrap();
    if let Some(sub) = section.subheading {
        writeln!(md, "### {}\n", sub).unwrap();
    }
    writeln!(md, "*搜索查询:*").unwrap();
    writeln!(md, "```").unwrap();
    for q in queries {
        writeln!(md, "{}", q).unwrap();
    }
    writeln!(md, "```\n").unwrap();
    writeln!(md, "*结果:*").unwrap();
    writeln!(md, "<!-- {} -->\n", section.placeholder).unwrap();
    writeln!(md, "---\n").unwrap();
}

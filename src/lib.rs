//! # AI Weekly Tools
//!
//! Two small command-line tools sharing one crate:
//!
//! - **`ai-weekly`** prints a markdown skeleton for a weekly AI developer news
//!   report. Each section carries search queries scoped to the current
//!   Monday-to-Sunday week and a placeholder for the results.
//! - **`bilibili-subtitle`** scrapes a Bilibili video page for its embedded
//!   subtitle list, downloads one track and prints it as timestamped or plain
//!   text.
//!
//! ## Usage
//!
//! ```sh
//! ai-weekly > weekly.md
//! ai-weekly --date 2025-05-08 --output reports/2025-05-05.md
//! bilibili-subtitle https://www.bilibili.com/video/BV1a2b3c4d5E --lang=en-US --plain
//! ```
//!
//! ## Architecture
//!
//! Neither tool keeps state between runs. The report builder is pure date
//! arithmetic plus string templates ([`weekly`], [`outputs::markdown`]). The
//! subtitle extractor is a sequential pipeline ([`scrapers::bilibili`]) whose
//! page-data lookup runs ordered fallback strategies
//! ([`scrapers::strategies`]); any failure ends the run with a structured
//! [`errors::SubtitleError`].

pub mod cli;
pub mod errors;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
pub mod weekly;

//! Video page scrapers.
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Bilibili | [`bilibili`] | HTML + embedded JSON | Subtitle tracks only; no API key |
//!
//! Page data is located through the ordered strategy lists in
//! [`strategies`], so new page layouts are supported by adding a strategy
//! rather than by touching the pipeline.

pub mod bilibili;
pub mod strategies;

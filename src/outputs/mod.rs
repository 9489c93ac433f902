//! Output generation for both tools.
//!
//! # Submodules
//!
//! - [`markdown`]: renders the weekly report skeleton
//! - [`subtitles`]: parses downloaded tracks and renders them as text
//! - [`json`]: single-line metadata and error objects for stderr
//!
//! # Stream Layout
//!
//! ```text
//! ai-weekly          stdout: markdown report (or --output FILE)
//! bilibili-subtitle  stdout: rendered subtitle text
//!                    stderr: one JSON line (metadata or error)
//! ```

pub mod json;
pub mod markdown;
pub mod subtitles;

//! Shell-source recognizers and the extractors built on them.

pub mod analyze;
pub mod catalog;
pub mod patterns;

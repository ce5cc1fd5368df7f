//! # autocheck Store
//!
//! Persistence for the two named keyword lists ("packages" and "vods") and
//! the statistics of the last successful scan.
//!
//! Keyword text is processed the same way on every write: one keyword per
//! line, trimmed, blank lines dropped, duplicates removed case-insensitively
//! with the first spelling kept.

mod error;
mod keywords;
mod stats;
mod store;

pub use error::StoreError;
pub use keywords::{KeywordLists, ListKind, process_keywords};
pub use stats::RunStats;
pub use store::{FileKeywordStore, KeywordStore, MemoryKeywordStore};

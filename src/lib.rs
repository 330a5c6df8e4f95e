pub mod attributes;
pub mod config;
pub mod constants;
pub mod db;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod merge;
pub mod rewriter;
pub mod runner;
pub mod sentence_filter;
pub mod types;
pub mod variants;

pub use error::{CleanerError, Result};
pub use rewriter::TextRewriter;
pub use variants::VariantMap;

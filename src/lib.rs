//! Turns scraped Goethe collections (poems, maxims and reflections) into a
//! chat fine-tuning dataset.
//!
//! Two passes, each with its own binary:
//!   1. `extract_records`: HTML → `data/poems.json`, `data/maxims.json`
//!   2. `format_dataset`: JSON records → `processed/train.jsonl`, `processed/val.jsonl`

pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod records;
pub mod store;

pub use config::Settings;
pub use error::{PipelineError, Result};

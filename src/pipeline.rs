//! The two batch pipelines: HTML → JSON records, and JSON records →
//! train/validation JSONL.

use std::path::Path;

use tracing::{info, warn};

use crate::config::Settings;
use crate::dataset::format::{format_document, system_prompt, SourceDocument};
use crate::dataset::split::{rng_for, shuffle_and_split};
use crate::error::{PipelineError, Result};
use crate::extract::{maxims, merge, poems};
use crate::records::{ConversationExample, MaximPromptsDocument, MaximsDocument, PoemsDocument};
use crate::store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub poems: usize,
    pub maxims_extracted: usize,
    pub prompts: usize,
    pub maxims_merged: usize,
}

impl ExtractionSummary {
    pub fn print(&self) {
        println!(
            "Saved {} poems and {} maxims ({} extracted, {} prompts).",
            self.poems, self.maxims_merged, self.maxims_extracted, self.prompts,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingSummary {
    pub poems: usize,
    pub maxims: usize,
    pub train: usize,
    pub validation: usize,
}

impl FormattingSummary {
    pub fn print(&self) {
        println!(
            "Formatted {} poem and {} maxim examples: {} train, {} validation.",
            self.poems, self.maxims, self.train, self.validation,
        );
    }
}

/// Extract both documents, then write both JSON files. Nothing is written
/// unless every stage succeeds.
pub fn run_extraction(settings: &Settings) -> Result<ExtractionSummary> {
    let paths = &settings.paths;

    let prompts: MaximPromptsDocument = store::read_json(&paths.maxims_input)?;
    info!(prompts = prompts.maxims.len(), path = %paths.maxims_input.display(), "loaded maxim prompts");

    let maxims_html = store::read_text(&paths.maxims_html)?;
    let extracted = maxims::extract(&maxims_html, &settings.maxims)?;
    let merged = merge::merge(&extracted, &prompts.maxims, settings.maxims.strict_pairing)?;

    let poems_html = store::read_text(&paths.poems_html)?;
    let poems = poems::extract(&poems_html, &settings.poems)?;

    let summary = ExtractionSummary {
        poems: poems.len(),
        maxims_extracted: extracted.len(),
        prompts: prompts.maxims.len(),
        maxims_merged: merged.len(),
    };

    store::write_json_pretty(&paths.maxims_json, &MaximsDocument { maxims: merged })?;
    store::write_json_pretty(&paths.poems_json, &PoemsDocument { poems })?;
    info!(?summary, "extraction complete");
    Ok(summary)
}

/// Format both record documents, shuffle the union and split it.
pub fn run_formatting(settings: &Settings) -> Result<FormattingSummary> {
    let paths = &settings.paths;
    let dataset = &settings.dataset;

    let poems = load_examples(&paths.poems_json, settings)?;
    let maxims = load_examples(&paths.maxims_json, settings)?;
    let (poem_count, maxim_count) = (poems.len(), maxims.len());

    let mut combined = poems;
    combined.extend(maxims);

    let mut rng = rng_for(dataset.seed);
    let split = shuffle_and_split(combined, dataset.train_fraction, &mut rng);

    store::write_jsonl(&paths.train_jsonl, &split.train)?;
    store::write_jsonl(&paths.val_jsonl, &split.validation)?;

    let summary = FormattingSummary {
        poems: poem_count,
        maxims: maxim_count,
        train: split.train.len(),
        validation: split.validation.len(),
    };
    info!(?summary, seed = ?dataset.seed, "formatting complete");
    Ok(summary)
}

fn load_examples(path: &Path, settings: &Settings) -> Result<Vec<ConversationExample>> {
    // syntax errors surface as Serialization, shape errors as structural
    let value: serde_json::Value = store::read_json(path)?;
    let doc: SourceDocument = serde_json::from_value(value).map_err(|e| {
        PipelineError::structural(
            &path.display().to_string(),
            format!("expected a `poems` or `maxims` list: {}", e),
        )
    })?;
    let kind = doc.kind();
    if doc.is_empty() {
        warn!(path = %path.display(), ?kind, "document has no records");
    }
    info!(path = %path.display(), ?kind, records = doc.len(), "loaded records");
    Ok(format_document(&doc, system_prompt(&settings.dataset, kind)))
}

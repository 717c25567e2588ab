//! Layered settings: compiled-in defaults, an optional config file, then
//! `GOETHE_`-prefixed environment variables (`GOETHE_DATASET__SEED=7`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "dataset";
const ENV_PREFIX: &str = "GOETHE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub poems: PoemSettings,
    pub maxims: MaximSettings,
    pub dataset: DatasetSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub poems_html: PathBuf,
    pub maxims_html: PathBuf,
    pub maxims_input: PathBuf,
    pub poems_json: PathBuf,
    pub maxims_json: PathBuf,
    pub train_jsonl: PathBuf,
    pub val_jsonl: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoemSettings {
    /// Id of the first paragraph of the collection.
    pub start_id: String,
    /// Id of the node that ends the collection.
    pub end_id: String,
    /// Title of the poem whose heading sits before `start_id`.
    pub initial_title: String,
    pub corrections: Vec<TitleCorrection>,
}

/// A heading line that was scraped into a poem body but belongs to its title.
///
/// The heading is appended to the title after a single space
/// (`"1798.—— B. PREFACE."`). The scraped source concatenated the two with no
/// separator; the space is kept so titles stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCorrection {
    pub heading: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaximSettings {
    pub anchor_prefix: String,
    pub first: u32,
    pub last: u32,
    pub nature_anchor: String,
    pub nature_label: String,
    /// Fail instead of warning when prompt and maxim counts differ.
    pub strict_pairing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub poem_system_prompt: String,
    pub maxim_system_prompt: String,
    pub train_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PathSettings {
    fn default() -> Self {
        PathSettings {
            poems_html: PathBuf::from("data/poems.html"),
            maxims_html: PathBuf::from("data/maxims-reflections.html"),
            maxims_input: PathBuf::from("data/maxims-input.json"),
            poems_json: PathBuf::from("data/poems.json"),
            maxims_json: PathBuf::from("data/maxims.json"),
            train_jsonl: PathBuf::from("processed/train.jsonl"),
            val_jsonl: PathBuf::from("processed/val.jsonl"),
        }
    }
}

impl PathSettings {
    /// Re-anchor every relative path under `root`.
    pub fn under(&self, root: &Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };
        PathSettings {
            poems_html: join(&self.poems_html),
            maxims_html: join(&self.maxims_html),
            maxims_input: join(&self.maxims_input),
            poems_json: join(&self.poems_json),
            maxims_json: join(&self.maxims_json),
            train_jsonl: join(&self.train_jsonl),
            val_jsonl: join(&self.val_jsonl),
        }
    }
}

impl Default for PoemSettings {
    fn default() -> Self {
        PoemSettings {
            start_id: "id00109".to_string(),
            end_id: "id05473".to_string(),
            initial_title: "1797. DEDICATION.".to_string(),
            corrections: vec![TitleCorrection {
                heading: "TO THE KIND READER.".to_string(),
            }],
        }
    }
}

impl Default for MaximSettings {
    fn default() -> Self {
        MaximSettings {
            anchor_prefix: "a".to_string(),
            first: 1,
            last: 590,
            nature_anchor: "NATURE_APHORISMS".to_string(),
            nature_label: "NATURE: APHORISMS".to_string(),
            strict_pairing: false,
        }
    }
}

impl Default for DatasetSettings {
    fn default() -> Self {
        DatasetSettings {
            poem_system_prompt: "You are Johann Wolfgang von Goethe. Continue writing your poem."
                .to_string(),
            maxim_system_prompt: "You are Johann Wolfgang von Goethe. Respond to the following questions or statements."
                .to_string(),
            train_fraction: 0.9,
            seed: None,
        }
    }
}

impl Settings {
    /// Build settings from defaults, `file` (optional, any format `config`
    /// recognises by extension) and the environment.
    pub fn load(file: &str) -> Result<Settings> {
        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides on top of the layered settings. A `None`
    /// leaves the loaded value in place.
    pub fn apply_overrides(&mut self, root: Option<&Path>, seed: Option<u64>) {
        if let Some(root) = root {
            self.paths = self.paths.under(root);
        }
        if seed.is_some() {
            self.dataset.seed = seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fraction = self.dataset.train_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(PipelineError::InvalidConfig(format!(
                "dataset.train_fraction must be within 0..=1, got {}",
                fraction
            )));
        }
        if self.maxims.first > self.maxims.last {
            return Err(PipelineError::InvalidConfig(format!(
                "maxims.first ({}) is after maxims.last ({})",
                self.maxims.first, self.maxims.last
            )));
        }
        if self.maxims.anchor_prefix.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "maxims.anchor_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──

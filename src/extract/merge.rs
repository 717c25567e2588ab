use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::records::{ExtractedMaxim, MaximPrompt, MaximRecord};

/// Pair extracted maxims with prompts by position, stopping at the shorter
/// list. A count mismatch is a warning, or an error when `strict`.
pub fn merge(maxims: &[ExtractedMaxim], prompts: &[MaximPrompt], strict: bool) -> Result<Vec<MaximRecord>> {
    if maxims.len() != prompts.len() {
        if strict {
            return Err(PipelineError::LengthMismatch {
                prompts: prompts.len(),
                outputs: maxims.len(),
            });
        }
        warn!(
            prompts = prompts.len(),
            maxims = maxims.len(),
            dropped = maxims.len().abs_diff(prompts.len()),
            "maxim prompt count differs from extracted maxims, pairing the shorter list"
        );
    }

    Ok(maxims
        .iter()
        .zip(prompts)
        .map(|(maxim, prompt)| {
            debug!(number = %maxim.number, "paired maxim");
            MaximRecord {
                input: prompt.input.clone(),
                output: maxim.output.clone(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maxims(n: usize) -> Vec<ExtractedMaxim> {
        (1..=n)
            .map(|i| ExtractedMaxim {
                number: i.to_string(),
                output: format!("maxim {}", i),
            })
            .collect()
    }

    fn prompts(n: usize) -> Vec<MaximPrompt> {
        (1..=n)
            .map(|i| MaximPrompt {
                input: format!("prompt {}", i),
            })
            .collect()
    }

    #[test]
    fn pairs_by_position() {
        let merged = merge(&maxims(2), &prompts(2), true).unwrap();
        assert_eq!(
            merged[1],
            MaximRecord {
                input: "prompt 2".into(),
                output: "maxim 2".into(),
            }
        );
    }

    #[test]
    fn truncates_to_shorter_list() {
        let merged = merge(&maxims(3), &prompts(2), false).unwrap();
        assert_eq!(merged.len(), 2);
        let merged = merge(&maxims(1), &prompts(4), false).unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn strict_mode_rejects_mismatch() {
        let err = merge(&maxims(3), &prompts(2), true).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::LengthMismatch {
                prompts: 2,
                outputs: 3
            }
        ));
    }
}

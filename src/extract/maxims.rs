use std::collections::HashMap;

use scraper::Html;
use tracing::{debug, info, warn};

use super::dom;
use crate::config::MaximSettings;
use crate::error::{PipelineError, Result};
use crate::records::ExtractedMaxim;

const DOCUMENT: &str = "maxims-reflections";

/// Numbered maxims in anchor order, then the nature aphorisms as one entry.
pub fn extract(html: &str, settings: &MaximSettings) -> Result<Vec<ExtractedMaxim>> {
    let document = Html::parse_document(html);
    let mut maxims = numbered(&document, settings);
    if let Some(nature) = nature_aphorisms(&document, settings)? {
        maxims.push(nature);
    }
    Ok(maxims)
}

/// Look up `{prefix}{n}` anchors over the configured range. The anchor's
/// parent holds the displayed number, the parent's next `p` sibling the text.
pub fn numbered(document: &Html, settings: &MaximSettings) -> Vec<ExtractedMaxim> {
    // first anchor wins when an id repeats
    let mut anchors: HashMap<&str, _> = HashMap::new();
    for (id, el) in dom::elements_with_id(document, "a") {
        anchors.entry(id).or_insert(el);
    }
    let mut maxims = Vec::new();
    let mut skipped = 0usize;

    for n in settings.first..=settings.last {
        let id = format!("{}{}", settings.anchor_prefix, n);
        let found = anchors
            .get(id.as_str())
            .and_then(|anchor| dom::parent_element(*anchor))
            .and_then(|number_tag| {
                dom::next_sibling_named(number_tag, &["p"]).map(|text_tag| ExtractedMaxim {
                    number: dom::stripped_text(number_tag),
                    output: dom::collapse_whitespace(&dom::text(text_tag)),
                })
            });
        match found {
            Some(maxim) => maxims.push(maxim),
            None => {
                skipped += 1;
                debug!(anchor = %id, "no maxim for anchor");
            }
        }
    }

    info!(found = maxims.len(), skipped, "numbered maxims");
    maxims
}

/// Collect every paragraph between the nature anchor's heading and the next
/// heading into one aggregate entry.
pub fn nature_aphorisms(document: &Html, settings: &MaximSettings) -> Result<Option<ExtractedMaxim>> {
    let Some(anchor) = dom::find_by_id(document, "a", &settings.nature_anchor) else {
        warn!(anchor = %settings.nature_anchor, "nature aphorisms anchor not found");
        return Ok(None);
    };
    let heading = dom::enclosing(anchor, "h2").ok_or_else(|| {
        PipelineError::structural(
            DOCUMENT,
            format!("anchor #{} is not inside an h2", settings.nature_anchor),
        )
    })?;

    let mut paragraphs = Vec::new();
    let mut current = dom::next_element_sibling(heading);
    while let Some(el) = current {
        if dom::is_named(el, "h2") {
            break;
        }
        if dom::is_named(el, "p") {
            paragraphs.push(dom::collapse_whitespace(&dom::text(el)));
        }
        current = dom::next_element_sibling(el);
    }

    info!(paragraphs = paragraphs.len(), "nature aphorisms");
    if paragraphs.is_empty() {
        return Ok(None);
    }
    Ok(Some(ExtractedMaxim {
        number: settings.nature_label.clone(),
        output: paragraphs.join("\n\n"),
    }))
}

// ── Tests ──

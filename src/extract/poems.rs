use scraper::{ElementRef, Html};
use tracing::{debug, info};

use super::cleanup::{clean_body, clean_title, is_title_line};
use super::dom;
use crate::config::{PoemSettings, TitleCorrection};
use crate::error::{PipelineError, Result};
use crate::records::PoemRecord;

const DOCUMENT: &str = "poems";
const WALK_TAGS: &[&str] = &["p", "h5", "h2"];

/// A poem as segmented from the paragraph stream, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPoem {
    pub title: String,
    pub body: String,
}

/// Segment, correct and clean every poem in `html`.
pub fn extract(html: &str, settings: &PoemSettings) -> Result<Vec<PoemRecord>> {
    let document = Html::parse_document(html);
    let mut raw = segment(&document, settings)?;
    info!(poems = raw.len(), "segmented poems");
    apply_corrections(&mut raw, &settings.corrections)?;
    raw.iter().map(finish).collect()
}

/// Walk sibling paragraphs from the start node, cutting a new poem at every
/// title/date line.
pub fn segment(document: &Html, settings: &PoemSettings) -> Result<Vec<RawPoem>> {
    let start = dom::find_by_id(document, "p", &settings.start_id).ok_or_else(|| {
        PipelineError::structural(
            DOCUMENT,
            format!("start paragraph #{} not found", settings.start_id),
        )
    })?;

    let mut poems = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut title = settings.initial_title.clone();
    let mut prev_was_title = false;
    let mut current = start;

    loop {
        let name = current.value().name();
        // an h5 directly under a title line is a subtitle
        if name == "p" || (name == "h5" && !prev_was_title) {
            let text = dom::text(current);
            let text = text.trim();
            if is_title_line(text) {
                if !lines.is_empty() {
                    poems.push(RawPoem {
                        title: std::mem::replace(&mut title, text.to_string()),
                        body: std::mem::take(&mut lines).join("\n"),
                    });
                } else {
                    title = text.to_string();
                }
                prev_was_title = true;
            } else {
                lines.push(text.to_string());
                prev_was_title = false;
            }
        }

        match dom::next_sibling_named(current, WALK_TAGS) {
            Some(next) if !ends_collection(next, settings) => current = next,
            _ => {
                poems.push(RawPoem {
                    title,
                    body: lines.join("\n"),
                });
                return Ok(poems);
            }
        }
    }
}

fn ends_collection(el: ElementRef<'_>, settings: &PoemSettings) -> bool {
    if el.value().id() == Some(settings.end_id.as_str()) {
        return true;
    }
    dom::is_named(el, "h2") && is_title_line(dom::text(el).trim())
}

/// Move stray heading lines out of poem bodies and into their titles.
///
/// Each correction applies to the first poem whose body carries the heading
/// on a line of its own; a correction that finds nothing is an error.
pub fn apply_corrections(poems: &mut [RawPoem], corrections: &[TitleCorrection]) -> Result<()> {
    for correction in corrections {
        let marker = format!("{}\n", correction.heading);
        let poem = poems
            .iter_mut()
            .find(|p| p.body.contains(&marker))
            .ok_or_else(|| {
                PipelineError::structural(
                    DOCUMENT,
                    format!("correction heading {:?} not found in any poem", correction.heading),
                )
            })?;
        let rest = poem.body.split(&marker).nth(1).unwrap_or_default().to_string();
        debug!(title = %poem.title, heading = %correction.heading, "applied title correction");
        poem.body = rest;
        poem.title.push(' ');
        poem.title.push_str(&correction.heading);
    }
    Ok(())
}

fn finish(raw: &RawPoem) -> Result<PoemRecord> {
    let output = clean_body(&raw.body);
    let mut input = clean_title(&raw.title).ok_or_else(|| {
        PipelineError::structural(DOCUMENT, format!("title {:?} has no period", raw.title))
    })?;
    input.push('\n');
    input.push_str(output.split('\n').next().unwrap_or_default());
    Ok(PoemRecord { input, output })
}

// ── Tests ──

//! Text cleanup rules for poem titles and bodies.
//!
//! Each rule is a standalone pure function; `clean_body` applies them in
//! order. Span rules stop at the nearest closing delimiter.

use std::sync::LazyLock;

use regex::Regex;

/// Separator placed between a poem's year and its title.
pub const TITLE_SEPARATOR: &str = "——";

const GOETHE: &str = "goethe";

static TITLE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d{4}\.\*?\s*——").unwrap());
static INNER_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());
static INNER_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^()]*\)").unwrap());
static STARRED_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\(\*.*?\)").unwrap());
static BRACKET_TO_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*?\)").unwrap());

/// True for lines such as `1797.—— DEDICATION.` or `1799.* —— THE MINSTREL.`
pub fn is_title_line(line: &str) -> bool {
    TITLE_LINE_RE.is_match(line)
}

/// Rule 1: single-line `(...)` or `[...]` notes mentioning Goethe. The
/// outermost balanced span holding the name goes, nested spans and all.
pub fn strip_goethe_notes(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let line = strip_spans_mentioning(line, ('(', ')'), GOETHE);
            strip_spans_mentioning(&line, ('[', ']'), GOETHE)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rule 2: every `[...]` span, across lines, innermost first.
pub fn strip_bracketed(text: &str) -> String {
    strip_nested(&INNER_BRACKET_RE, text)
}

/// Rule 3: `(*...)` footnote markers, across lines, up to the first `)`.
pub fn strip_starred_notes(text: &str) -> String {
    STARRED_NOTE_RE.replace_all(text, "").into_owned()
}

/// Rule 4.
pub fn strip_asterisks(text: &str) -> String {
    text.replace('*', "")
}

/// Rule 5: scan debris where a `[` was closed by a `)`.
pub fn strip_unclosed_brackets(text: &str) -> String {
    BRACKET_TO_PAREN_RE.replace_all(text, "").into_owned()
}

pub fn strip_parenthesized(text: &str) -> String {
    strip_nested(&INNER_PAREN_RE, text)
}

pub fn clean_body(body: &str) -> String {
    let text = strip_goethe_notes(body);
    let text = strip_bracketed(&text);
    let text = strip_starred_notes(&text);
    let text = strip_asterisks(&text);
    strip_unclosed_brackets(&text)
}

/// Normalise a raw title line to `YEAR——TITLE`.
///
/// Returns `None` when the line has no period to split the year off at.
pub fn clean_title(raw: &str) -> Option<String> {
    let (head, tail) = raw.split_once('.')?;
    let tail: String = tail
        .chars()
        .filter(|c| !matches!(c, '\u{2014}' | '\n' | '-' | '*'))
        .collect();
    let tail = strip_unclosed_brackets(tail.trim());
    let tail = strip_parenthesized(&tail);
    let tail = strip_bracketed(&tail);
    Some(format!("{}{}{}", head.trim(), TITLE_SEPARATOR, tail.trim()))
}

/// Remove every outermost balanced `open..close` span on `line` whose
/// contents contain `needle` (lowercase), ignoring case.
fn strip_spans_mentioning(line: &str, (open, close): (char, char), needle: &str) -> String {
    let mut stack = Vec::new();
    let mut hits: Vec<(usize, usize)> = Vec::new();
    for (i, c) in line.char_indices() {
        if c == open {
            stack.push(i);
        } else if c == close {
            if let Some(start) = stack.pop() {
                let end = i + c.len_utf8();
                if line[start..end].to_lowercase().contains(needle) {
                    hits.push((start, end));
                }
            }
        }
    }
    if hits.is_empty() {
        return line.to_string();
    }

    // spans are nested or disjoint, so by start offset an outer span comes
    // before everything inside it
    hits.sort_unstable();
    let mut out = String::with_capacity(line.len());
    let mut pos = 0;
    for (start, end) in hits {
        if start < pos {
            continue;
        }
        out.push_str(&line[pos..start]);
        pos = end;
    }
    out.push_str(&line[pos..]);
    out
}

fn strip_nested(re: &Regex, text: &str) -> String {
    let mut current = text.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, "").into_owned();
    }
    current
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_line_pattern() {
        assert!(is_title_line("1797.—— DEDICATION."));
        assert!(is_title_line("  1799.*—— THE MINSTREL."));
        assert!(is_title_line("1800. ——MIGNON."));
        assert!(!is_title_line("1797. DEDICATION."));
        assert!(!is_title_line("In 1797.—— a line of verse"));
        assert!(!is_title_line("179.—— SHORT YEAR"));
    }

    #[test]
    fn goethe_notes_single_line_only() {
        assert_eq!(
            strip_goethe_notes("Fain would they be heard. (Compare GOETHE's note.)"),
            "Fain would they be heard. "
        );
        assert_eq!(strip_goethe_notes("a [see Goethe] b"), "a  b");
        // does not reach across lines or into unrelated parentheses
        assert_eq!(strip_goethe_notes("(one)\nGoethe (two)"), "(one)\nGoethe (two)");
        assert_eq!(strip_goethe_notes("(x) and (Goethe)"), "(x) and ");
    }

    #[test]
    fn goethe_notes_with_nested_spans() {
        assert_eq!(
            strip_goethe_notes("Fain would they be heard. (Compare Goethe's note (1815).)"),
            "Fain would they be heard. "
        );
        assert_eq!(strip_goethe_notes("a [Goethe [ed. 1827]] b"), "a  b");
        // the whole outer note goes even when only an inner span names him
        assert_eq!(strip_goethe_notes("x (see (after Goethe) p. 3) y"), "x  y");
        assert_eq!(strip_goethe_notes("x (Goethe (a (b))) y"), "x  y");
        assert_eq!(strip_goethe_notes("(one) (two (three))"), "(one) (two (three))");
        assert_eq!(strip_goethe_notes("((Goethe) unclosed"), "( unclosed");

        let cleaned = clean_body("Fain would they be heard. (Compare Goethe's note (1815).)");
        assert!(!cleaned.to_lowercase().contains("goethe"));
    }

    #[test]
    fn brackets_adjacent_and_nested() {
        assert_eq!(strip_bracketed("a [1] b [2] c"), "a  b  c");
        assert_eq!(strip_bracketed("a [outer [inner] tail] b"), "a  b");
        assert_eq!(strip_bracketed("a [spans\ntwo lines] b"), "a  b");
        assert_eq!(strip_bracketed("no brackets"), "no brackets");
    }

    #[test]
    fn starred_notes() {
        assert_eq!(strip_starred_notes("gate, (*a ballad)"), "gate, ");
        assert_eq!(strip_starred_notes("(*a) keep (*b)"), " keep ");
        assert_eq!(strip_starred_notes("x (*across\nlines) y"), "x  y");
        assert_eq!(strip_starred_notes("plain (aside)"), "plain (aside)");
    }

    #[test]
    fn asterisks_removed() {
        assert_eq!(strip_asterisks("bridge?\"*"), "bridge?\"");
    }

    #[test]
    fn unclosed_bracket_runs_to_first_paren() {
        assert_eq!(strip_unclosed_brackets("a [note) b) c"), "a  b) c");
        assert_eq!(strip_unclosed_brackets("a [open only"), "a [open only");
    }

    #[test]
    fn body_has_no_asterisks_or_goethe_notes() {
        let body = "Line one* [1]\n(*footnote) Line two (after Goethe)\n[stray) end";
        let cleaned = clean_body(body);
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.to_lowercase().contains("goethe"));
        assert_eq!(cleaned, "Line one \n Line two \n end");
    }

    #[test]
    fn clean_title_joins_year_and_title() {
        let cleaned = clean_title("1797. DEDICATION.").unwrap();
        assert!(cleaned.starts_with("1797——"));
        assert_eq!(cleaned, "1797——DEDICATION.");
    }

    #[test]
    fn clean_title_drops_dashes_stars_and_notes() {
        assert_eq!(clean_title("1799.*—— THE MINSTREL.").unwrap(), "1799——THE MINSTREL.");
        assert_eq!(
            clean_title("1800.—— MIGNON. [From Wilhelm Meister]").unwrap(),
            "1800——MIGNON."
        );
        assert_eq!(
            clean_title("1801.—— SELF-DECEPTION. (Written in Italy)").unwrap(),
            "1801——SELFDECEPTION."
        );
        assert_eq!(clean_title("1802.—— A\nB").unwrap(), "1802——AB");
    }

    #[test]
    fn clean_title_needs_a_period() {
        assert!(clean_title("no period here").is_none());
    }
}

//! Sibling and ancestor navigation over a parsed `scraper::Html` tree.

use scraper::{ElementRef, Html, Selector};

/// First element named `tag` whose `id` attribute equals `id`.
pub fn find_by_id<'a>(document: &'a Html, tag: &str, id: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    document
        .select(&selector)
        .find(|el| el.value().id() == Some(id))
}

/// Every element named `tag` that carries an `id`, in document order.
pub fn elements_with_id<'a>(document: &'a Html, tag: &str) -> Vec<(&'a str, ElementRef<'a>)> {
    let Ok(selector) = Selector::parse(&format!("{}[id]", tag)) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|el| el.value().id().map(|id| (id, el)))
        .collect()
}

pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Next sibling element whose tag name is one of `names`.
pub fn next_sibling_named<'a>(el: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| names.contains(&sib.value().name()))
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

pub fn enclosing<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|anc| anc.value().name() == name)
}

pub fn is_named(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

/// All descendant text, concatenated as-is.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text with each fragment trimmed and empty fragments dropped.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><body>
        <h2><a id="top"></a>Heading</h2>
        <p id="one">First <em>para</em></p>
        text between
        <div>skip</div>
        <p id="two">  Second
            para </p>
    </body></html>"#;

    #[test]
    fn siblings_skip_text_nodes() {
        let doc = Html::parse_document(HTML);
        let one = find_by_id(&doc, "p", "one").unwrap();
        assert_eq!(next_element_sibling(one).map(|e| e.value().name()), Some("div"));
        let two = next_sibling_named(one, &["p"]).unwrap();
        assert_eq!(two.value().id(), Some("two"));
        assert!(next_sibling_named(two, &["p"]).is_none());
    }

    #[test]
    fn text_helpers() {
        let doc = Html::parse_document(HTML);
        let one = find_by_id(&doc, "p", "one").unwrap();
        assert_eq!(text(one), "First para");
        assert_eq!(stripped_text(one), "Firstpara");
        let two = find_by_id(&doc, "p", "two").unwrap();
        assert_eq!(collapse_whitespace(&text(two)), "Second para");
    }

    #[test]
    fn anchor_ancestry() {
        let doc = Html::parse_document(HTML);
        let ids: Vec<&str> = elements_with_id(&doc, "a").into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["top"]);
        let top = find_by_id(&doc, "a", "top").unwrap();
        assert!(is_named(parent_element(top).unwrap(), "h2"));
        assert!(enclosing(top, "h2").is_some());
        assert!(enclosing(top, "table").is_none());
    }
}

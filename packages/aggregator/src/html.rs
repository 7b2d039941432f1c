//! Lightweight HTML field extraction over class-marked fragments.
//!
//! HTML sources here serve listing markup with stable class names, so
//! records are pulled out with targeted regexes instead of a full DOM
//! parser. Every helper returns `Option` — an absent element is a normal
//! outcome (the card gets skipped), never an error.

use regex::Regex;

/// Split a listing page into card fragments.
///
/// A card starts at an element whose `class` attribute contains the
/// marker as a whole class name (so `base-card` does not match
/// `base-card__full-link`) and runs until the next card start.
pub fn split_cards<'a>(html: &'a str, class_marker: &str) -> Vec<&'a str> {
    let pattern = format!(
        r#"<[a-zA-Z][^>]*class\s*=\s*["'][^"']*{}["' ]"#,
        regex::escape(class_marker)
    );
    let card_start = Regex::new(&pattern).unwrap();

    let starts: Vec<usize> = card_start.find_iter(html).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Extract the trimmed text of the first `tag` element carrying `class`.
pub fn element_text(fragment: &str, tag: &str, class: &str) -> Option<String> {
    let pattern = format!(
        r#"(?s)<{tag}[^>]*class\s*=\s*["'][^"']*{class}[^"']*["'][^>]*>(.*?)</{tag}>"#,
        tag = regex::escape(tag),
        class = regex::escape(class),
    );
    let element = Regex::new(&pattern).unwrap();

    element
        .captures(fragment)
        .and_then(|cap| cap.get(1))
        .map(|m| strip_tags(m.as_str()))
        .filter(|text| !text.is_empty())
}

/// Extract the `href` of the first anchor carrying `class`.
///
/// Tolerates either attribute order within the tag.
pub fn link_href(fragment: &str, class: &str) -> Option<String> {
    let tag_pattern = format!(
        r#"<a[^>]*class\s*=\s*["'][^"']*{}[^"']*["'][^>]*>"#,
        regex::escape(class)
    );
    let anchor = Regex::new(&tag_pattern).unwrap();
    let href = Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).unwrap();

    let tag = anchor.find(fragment)?.as_str();
    href.captures(tag)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reduce an HTML fragment to plain text.
///
/// Drops scripts and styles, turns paragraph/line-break boundaries into
/// newlines, strips remaining tags, decodes common entities, and
/// collapses runs of blank lines.
pub fn strip_tags(html: &str) -> String {
    let script_pattern = Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    let break_pattern = Regex::new(r"(?i)<br\s*/?>|</p>|</li>|</div>").unwrap();
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    let multi_newline = Regex::new(r"\n{3,}").unwrap();
    let spaces = Regex::new(r"[ \t]+").unwrap();

    let mut text = script_pattern.replace_all(html, "").to_string();
    text = style_pattern.replace_all(&text, "").to_string();
    text = break_pattern.replace_all(&text, "\n").to_string();
    text = tag_pattern.replace_all(&text, "").to_string();

    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    text = spaces.replace_all(&text, " ").to_string();
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    text = lines.join("\n");
    text = multi_newline.replace_all(&text, "\n\n").to_string();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <ul>
          <div class="base-card relative">
            <h3 class="base-search-card__title"> Rust Engineer </h3>
            <h4 class="base-search-card__subtitle"><a>Acme Corp</a></h4>
            <span class="job-search-card__location">Berlin, Germany</span>
            <a class="base-card__full-link" href="https://example.com/jobs/1">view</a>
          </div>
          <div class="base-card relative">
            <h3 class="base-search-card__title">Backend Developer</h3>
            <a class="base-card__full-link" href="https://example.com/jobs/2">view</a>
          </div>
        </ul>
    "#;

    #[test]
    fn test_split_cards() {
        let cards = split_cards(PAGE, "base-card");
        assert_eq!(cards.len(), 2);
        assert!(cards[0].contains("Rust Engineer"));
        assert!(cards[1].contains("Backend Developer"));
    }

    #[test]
    fn test_split_cards_ignores_nested_modifier_classes() {
        // base-card__full-link must not start a new card
        let html = r#"<div class="base-card"><a class="base-card__full-link" href="x">v</a></div>"#;
        assert_eq!(split_cards(html, "base-card").len(), 1);
    }

    #[test]
    fn test_element_text_strips_inner_markup() {
        let cards = split_cards(PAGE, "base-card");
        assert_eq!(
            element_text(cards[0], "h3", "base-search-card__title"),
            Some("Rust Engineer".to_string())
        );
        assert_eq!(
            element_text(cards[0], "h4", "base-search-card__subtitle"),
            Some("Acme Corp".to_string())
        );
        assert_eq!(
            element_text(cards[1], "h4", "base-search-card__subtitle"),
            None
        );
    }

    #[test]
    fn test_link_href() {
        let cards = split_cards(PAGE, "base-card");
        assert_eq!(
            link_href(cards[0], "base-card__full-link"),
            Some("https://example.com/jobs/1".to_string())
        );
        assert_eq!(link_href(cards[0], "no-such-class"), None);
    }

    #[test]
    fn test_link_href_attribute_order() {
        let html = r#"<a href="https://example.com/x" class="full-link">v</a>"#;
        assert_eq!(
            link_href(html, "full-link"),
            Some("https://example.com/x".to_string())
        );
    }

    #[test]
    fn test_strip_tags() {
        let html = "<p>First &amp; second</p><script>x()</script><p>Third&nbsp;line</p>";
        let text = strip_tags(html);
        assert_eq!(text, "First & second\nThird line");
    }
}

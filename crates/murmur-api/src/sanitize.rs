//! Markup stripping for user-supplied text.
//!
//! Tags, comments, declarations and processing instructions are removed;
//! the text between them is kept and character references are decoded.
//! A `<` that does not open a tag is ordinary text.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?(?:-->|$)", // comments, closed or not
        r"|<[!?][^>]*(?:>|$)",   // declarations and processing instructions
        // Start and end tags. Quoted attribute values may contain `>`;
        // a tag left open at the end of the input is dropped too.
        r#"|</?[A-Za-z](?:"[^"]*(?:"|$)|'[^']*(?:'|$)|[^'">])*(?:>|$)"#,
        r"|</>",
    ))
    .expect("markup pattern is valid")
});

/// Strip markup from `text`, keeping its textual content.
pub fn sanitize(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_keeps_text() {
        assert_eq!(sanitize("<b>hi</b>"), "hi");
        assert_eq!(sanitize(r#"<a href="x">link</a> after"#), "link after");
        assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
    }

    #[test]
    fn drops_comments_and_declarations() {
        assert_eq!(sanitize("a<!-- hidden -->b"), "ab");
        assert_eq!(sanitize("<!DOCTYPE html>text"), "text");
        assert_eq!(sanitize("<?xml version=\"1.0\"?>x"), "x");
    }

    #[test]
    fn lone_angle_brackets_are_text() {
        assert_eq!(sanitize("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
        assert_eq!(sanitize("<3"), "<3");
    }

    #[test]
    fn quoted_attributes_may_contain_brackets() {
        assert_eq!(sanitize(r#"<a title="a>b">x</a>"#), "x");
        assert_eq!(sanitize("<img alt='1 > 0'>ok"), "ok");
        assert_eq!(sanitize(r#"<b class="x>y"#), "");
    }

    #[test]
    fn trailing_unclosed_tag_is_dropped() {
        assert_eq!(sanitize("hi <b class="), "hi ");
    }

    #[test]
    fn decodes_character_references() {
        assert_eq!(sanitize("a &amp; b"), "a & b");
        assert_eq!(sanitize("&lt;b&gt;"), "<b>");
        assert_eq!(sanitize("&#72;&#x69;"), "Hi");
    }

    #[test]
    fn decodes_the_full_entity_table() {
        assert_eq!(sanitize("caf&eacute; &copy; 2024"), "café © 2024");
        assert_eq!(sanitize("<i>5&euro;</i>"), "5€");
    }

    #[test]
    fn escaped_markup_is_not_stripped_twice() {
        assert_eq!(sanitize("&lt;i&gt;x&lt;/i&gt;"), "<i>x</i>");
    }
}

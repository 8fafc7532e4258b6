//! Small HTML text utilities for cleaning product copy.

/// Removes HTML tags from a string.
pub fn strip_html_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Decodes the five basic HTML entities.
pub fn decode_html_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(strip_html_tags("<h2>Title</h2><p>Body</p>"), "TitleBody");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(strip_html_tags(""), "");
    }

    #[test]
    fn unclosed_tag_swallows_rest() {
        assert_eq!(strip_html_tags("a<b"), "a");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_html_entities("A &amp; B &lt;3 &quot;C&#039;s&quot;"), "A & B <3 \"C's\"");
    }
}

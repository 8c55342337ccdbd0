/// Escape text for interpolation into HTML content or attribute values.
/// Repository descriptions are arbitrary remote text; nothing from the API
/// reaches the page unescaped.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn amp_escapes_first_so_no_double_escaping() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}

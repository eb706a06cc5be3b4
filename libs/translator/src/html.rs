use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Comments and declarations, or an opening/closing tag with its name captured. Quoted
// attribute values may contain `>`; a tag or quote left open runs to the end of input.
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?(?:-->|$)|<[!?](?:[^>"']|"[^"]*(?:"|$)|'[^']*(?:'|$))*(?:>|$)|</?([A-Za-z][A-Za-z0-9]*)\b(?:[^>"']|"[^"]*(?:"|$)|'[^']*(?:'|$))*(?:>|$)"#,
    )
    .expect("valid tag regex")
});

/// Removes HTML tags and comments, keeping the text between them.
///
/// ```
/// use smooch_translator::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>there</b></p>"), "Hello there");
/// assert_eq!(strip_tags("1 < 2"), "1 < 2");
/// ```
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Like [`strip_tags`] but leaves `<img>` tags in place.
pub fn strip_tags_except_img(html: &str) -> String {
    TAG.replace_all(html, |caps: &Captures| match caps.get(1) {
        Some(name) if name.as_str().eq_ignore_ascii_case("img") => caps[0].to_string(),
        _ => String::new(),
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_attributes() {
        let html = r#"<div class="a"><!-- hidden <b> -->Visit <a href="https://x.io">us</a></div>"#;
        assert_eq!(strip_tags(html), "Visit us");
    }

    #[test]
    fn keeps_only_img_tags() {
        let html = r#"<p>Look <IMG src="http://x/a.png"/> here</p><br>"#;
        assert_eq!(
            strip_tags_except_img(html),
            r#"Look <IMG src="http://x/a.png"/> here"#
        );
    }

    #[test]
    fn quoted_gt_does_not_end_a_tag() {
        assert_eq!(strip_tags(r#"<a title="a>b">x</a>"#), "x");
        assert_eq!(strip_tags("<span data-x='1>2'>y</span>"), "y");
    }

    #[test]
    fn unclosed_trailing_tag_is_dropped() {
        assert_eq!(strip_tags("bold <b"), "bold ");
        assert_eq!(strip_tags("text <a href=\"x"), "text ");
        assert_eq!(strip_tags("a <!-- never closed"), "a ");
    }

    #[test]
    fn does_not_confuse_similar_tag_names() {
        assert_eq!(strip_tags_except_img("<imgx>a</imgx>"), "a");
    }
}

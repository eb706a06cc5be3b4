//! Splits answers with inline images into separate text and image messages.

use once_cell::sync::Lazy;
use regex::Regex;
use smooch_core::ChannelMessage;

use crate::html::strip_tags_except_img;

static IMG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<\s*img.*?src\s*=\s*"(.+?)".*?\s*/?>"#).expect("valid img regex")
});

const IMAGE_PREFIX: &str = "http";

/// Returns the text fragments and captured image URLs of `html` in document order.
///
/// Control whitespace is removed and every tag except `<img>` is stripped first. The result
/// always alternates text, URL, text, ... and starts and ends with a (possibly empty) text
/// fragment.
pub fn split_fragments(html: &str) -> Vec<String> {
    let text: String = strip_tags_except_img(html)
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();

    let mut fragments = Vec::new();
    let mut last = 0;
    for caps in IMG_TAG.captures_iter(&text) {
        let (Some(tag), Some(src)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        fragments.push(text[last..tag.start()].to_string());
        fragments.push(src.as_str().to_string());
        last = tag.end();
    }
    fragments.push(text[last..].to_string());
    fragments
}

/// Converts an answer containing `<img>` tags into an ordered run of channel messages.
///
/// Fragments starting with `http` become image messages, everything else (including empty
/// fragments) becomes a text message.
///
/// ```
/// use smooch_translator::split_images;
///
/// let messages = split_images(r#"hi <img src="http://x/a.png"> bye"#);
/// assert_eq!(messages.len(), 3);
/// assert_eq!(messages[1].media_url.as_deref(), Some("http://x/a.png"));
/// ```
pub fn split_images(html: &str) -> Vec<ChannelMessage> {
    split_fragments(html)
        .into_iter()
        .map(|fragment| {
            if fragment.starts_with(IMAGE_PREFIX) {
                ChannelMessage::image(fragment)
            } else {
                ChannelMessage::text(fragment)
            }
        })
        .collect()
}

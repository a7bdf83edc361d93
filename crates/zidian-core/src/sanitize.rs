use std::collections::HashSet;

use ammonia::Builder;

/// Presentational tags allowed through. No attributes survive.
const ALLOWED_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "br", "p", "span", "sub", "sup", "small", "ul", "ol", "li",
];

/// Tags dropped together with everything inside them
const STRIPPED_WITH_CONTENT: [&str; 2] = ["script", "style"];

/// Reduce untrusted markup to safe formatting
pub fn sanitize_html(html: &str) -> String {
    Builder::empty()
        .add_tags(ALLOWED_TAGS)
        .clean_content_tags(HashSet::from(STRIPPED_WITH_CONTENT))
        .clean(html)
        .to_string()
}

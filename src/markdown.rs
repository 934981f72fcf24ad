use pulldown_cmark::{html, Options, Parser};

/// Renders a Markdown body to an HTML fragment. The conversion itself is
/// [`pulldown_cmark`]'s; this function only fixes the extension set used
/// for every post in a build.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html_bold() {
        assert_eq!(to_html("**bold**"), "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn test_to_html_strikethrough_enabled() {
        assert!(to_html("~~gone~~").contains("<del>gone</del>"));
    }
}

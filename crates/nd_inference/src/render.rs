use pulldown_cmark::{html, Options, Parser};

/// Renders model output (Markdown) to an HTML fragment.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(text, options));
    out.truncate(out.trim_end().len());
    out
}

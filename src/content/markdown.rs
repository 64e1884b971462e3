//! Markdown rendering
//!
//! Conversion itself is left to pulldown-cmark; this module only picks the
//! extensions, splits excerpts and counts words for resolved pages.

use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown renderer with the GitHub-flavoured extensions blogs expect
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // YAML metadata blocks stay disabled; front matter is stripped
        // before the body gets here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Count words in the rendered text, ignoring markup.
    /// CJK ideographs count one word each.
    pub fn count_words(&self, markdown: &str) -> usize {
        let mut count = 0;
        let mut in_word = false;

        for event in Parser::new_ext(markdown, self.options) {
            let text = match event {
                Event::Text(text) | Event::Code(text) => text,
                _ => {
                    in_word = false;
                    continue;
                }
            };

            for c in text.chars() {
                if c.is_alphanumeric() && !is_cjk(c) {
                    if !in_word {
                        in_word = true;
                        count += 1;
                    }
                } else if is_cjk(c) {
                    count += 1;
                    in_word = false;
                } else {
                    in_word = false;
                }
            }
        }

        count
    }

    /// Split Markdown at the excerpt separator.
    /// Returns (excerpt, full_content_without_separator).
    pub fn split_excerpt(content: &str, separator: &str) -> (Option<String>, String) {
        if separator.is_empty() {
            return (None, content.to_string());
        }

        if let Some(pos) = content.find(separator) {
            let excerpt = content[..pos].trim().to_string();
            let remaining = content[pos + separator.len()..].trim().to_string();
            let full = format!("{}\n\n{}", excerpt, remaining);
            (Some(excerpt), full)
        } else {
            (None, content.to_string())
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

// restructured text knowledge
//
// only a very restricted subset of rst is understood: `..` comment lines,
// headings underlined with dashes, and blank-line separated paragraphs.

use super::FormatTools;
use super::types::SectionMap;

const COMMENT_PREFIX: &str = "..";
const UNDERLINE_PREFIX: &str = "---";

const NEW_TEMPLATE: &str = "\
.. A new changelog entry.
..
.. Uncomment the header that is right (remove the leading dots).
..
{% for cat in categories -%}
.. {{ cat }}
.. {{ cat|underline }}
..
.. - A bullet item for the {{ cat }} category.
..
{% endfor -%}
";

/// a line of `ch` as long as `title` is in characters
fn underline(title: &str, ch: char) -> String {
    std::iter::repeat_n(ch, title.chars().count()).collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// split on every line boundary, with `\r\n` counting as one
///
/// a break at the very end does not produce a trailing empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// true when `paragraph` is nothing but the heading line accumulated as content
fn is_heading_paragraph(paragraph: &str, heading: &str) -> bool {
    paragraph.strip_suffix('\n') == Some(heading)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RstTools;

impl RstTools {
    pub fn new() -> Self {
        Self
    }
}

impl FormatTools for RstTools {
    fn name(&self) -> &'static str {
        "rst"
    }

    fn file_extension(&self) -> &'static str {
        "rst"
    }

    fn new_template(&self) -> &'static str {
        NEW_TEMPLATE
    }

    fn parse_text(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::new();
        let mut prev_line = String::new();
        let mut current: Option<usize> = None;

        // trailing blank flushes the last open paragraph
        for line in split_lines(text).into_iter().chain(std::iter::once("")) {
            let line = line.trim_end();

            if line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            if line.starts_with(UNDERLINE_PREFIX) {
                // an underline with no heading line before it is not a section
                if prev_line.is_empty() {
                    continue;
                }

                if let Some(index) = current {
                    // the heading was taken as paragraph text, undo that
                    let paragraphs = sections.paragraphs_mut(index);
                    if paragraphs
                        .last()
                        .is_some_and(|last| is_heading_paragraph(last, &prev_line))
                    {
                        paragraphs.pop();
                    }
                }

                let index = sections.open(&prev_line);
                sections.paragraphs_mut(index).push(String::new());
                current = Some(index);
                continue;
            }

            if line.is_empty() {
                if let Some(index) = current {
                    sections.paragraphs_mut(index).push(String::new());
                }
                continue;
            }

            if let Some(index) = current
                && let Some(paragraph) = sections.paragraphs_mut(index).last_mut()
            {
                paragraph.push_str(line);
                paragraph.push('\n');
            }

            prev_line.clear();
            prev_line.push_str(line);
        }

        for section in sections.sections_mut() {
            for paragraph in &mut section.paragraphs {
                paragraph.truncate(paragraph.trim_end().len());
            }
        }
        sections.retain_paragraphs(|p| !p.is_empty());

        sections
    }

    fn format_sections(&self, sections: &SectionMap) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (title, paragraphs) in sections.iter() {
            lines.push(String::new());
            lines.push(title.to_string());
            lines.push(underline(title, '-'));

            for paragraph in paragraphs {
                lines.push(String::new());
                lines.push(paragraph.clone());
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn format_header(&self, title: &str) -> String {
        format!("\n{}\n{}\n", title, underline(title, '='))
    }
}

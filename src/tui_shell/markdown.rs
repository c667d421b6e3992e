use std::panic;

use pulldown_cmark::{Event, Parser, TagEnd};
use ratatui::text::{Line, Span, Text};

use super::entry::ListEntry;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("markdown renderer panicked: {0}")]
    Panicked(String),
}

/// Feed descriptions are usually HTML; turn them into markdown.
pub(super) fn description_markdown(description: &str) -> String {
    html2md::parse_html(description).trim().to_string()
}

pub(super) fn detail_markdown(entry: &ListEntry) -> String {
    format!(
        "# {}\n\n{}\n\n[Source](<{}>)\n\n*Press 'o' to open in browser, press Esc to go back.*",
        entry.title,
        description_markdown(&entry.description),
        entry.link
    )
}

pub(super) fn render_markdown(md: &str) -> Result<Text<'static>, RenderError> {
    panic::catch_unwind(|| into_owned(tui_markdown::from_str(md)))
        .map_err(|payload| RenderError::Panicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn into_owned(text: Text<'_>) -> Text<'static> {
    let lines: Vec<Line<'static>> = text
        .lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), span.style))
                .collect();
            let mut owned = Line::from(spans).style(line.style);
            if let Some(alignment) = line.alignment {
                owned = owned.alignment(alignment);
            }
            owned
        })
        .collect();
    Text::from(lines).style(text.style)
}

/// One-line text for a list row: markup dropped, entities decoded,
/// whitespace collapsed.
pub(super) fn plain_text(description: &str) -> String {
    let md = description_markdown(description);
    let mut out = String::with_capacity(md.len());
    for event in Parser::new(&md) {
        match event {
            Event::Text(s) | Event::Code(s) => out.push_str(&s),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => out.push(' '),
            Event::End(TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../tests/tui_shell/markdown_tests.rs"]
mod tests;

use ratatui::style::Modifier;

use super::*;

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn lines(text: &Text<'_>) -> Vec<String> {
    text.lines.iter().map(line_text).collect()
}

fn entry(description: &str) -> ListEntry {
    ListEntry {
        title: "Budget deal".to_string(),
        description: description.to_string(),
        link: "https://example.com/a".to_string(),
    }
}

#[test]
fn detail_document_renders_heading_body_source_and_hint() {
    let text = render_markdown(&detail_markdown(&entry(
        "<p>Leaders <b>agree</b> on a plan.</p>",
    )))
    .unwrap();
    let out = lines(&text);
    let joined = out.join("\n");

    assert!(out[0].contains("Budget deal"), "{out:?}");
    assert!(joined.contains("Leaders agree on a plan."), "{joined}");
    assert!(joined.contains("Source"));
    assert!(joined.contains("Press 'o' to open in browser, press Esc to go back."));
    assert!(!joined.contains("<b>"));

    let agree = text
        .lines
        .iter()
        .flat_map(|l| l.spans.iter())
        .find(|s| s.content.contains("agree"))
        .unwrap();
    assert!(agree.style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn detail_markdown_converts_html_description() {
    let md = detail_markdown(&entry("<p>It&rsquo;s done &mdash; finally&hellip;</p>"));
    assert!(md.starts_with("# Budget deal\n\n"));
    assert!(md.contains("It\u{2019}s done \u{2014} finally\u{2026}"), "{md}");
    assert!(md.contains("[Source](<https://example.com/a>)"));
    assert!(md.ends_with("*Press 'o' to open in browser, press Esc to go back.*"));
}

#[test]
fn plain_descriptions_pass_through() {
    assert_eq!(description_markdown("second"), "second");
    assert_eq!(plain_text("second"), "second");
}

#[test]
fn plain_text_flattens_markup_and_decodes_entities() {
    assert_eq!(
        plain_text("<p>Hello <a href=\"x\">world</a></p>\n<p>It&rsquo;s &mdash; done&hellip;</p>"),
        "Hello world It\u{2019}s \u{2014} done\u{2026}"
    );
    assert_eq!(plain_text("<ul><li>one</li><li>two</li></ul>"), "one two");
}

#[test]
fn empty_description_renders() {
    let text = render_markdown(&detail_markdown(&entry(""))).unwrap();
    assert!(lines(&text).join("\n").contains("Budget deal"));
    assert_eq!(plain_text(""), "");
}

#[test]
fn panic_payloads_become_messages() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
    assert_eq!(panic_message(payload.as_ref()), "boom");
    let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
    assert_eq!(panic_message(payload.as_ref()), "bang");
    let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
    assert_eq!(panic_message(payload.as_ref()), "unknown panic");
}

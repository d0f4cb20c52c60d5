// WebVTT subtitle format
use super::document::SubtitleDocument;
use super::text::{TextLine, TextSpan};
use super::SubtitleFormatter;

pub struct VttFormatter;

impl SubtitleFormatter for VttFormatter {
    fn format(&self, document: &SubtitleDocument) -> String {
        let mut output = String::from("WEBVTT\n\n");

        for cue in document.cues() {
            output.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                cue.id,
                cue.start,
                cue.end,
                cue.lines.iter().map(format_line).collect::<Vec<_>>().join("\n")
            ));
        }

        output
    }

    fn extension(&self) -> &'static str {
        "vtt"
    }
}

fn format_line(line: &TextLine) -> String {
    let text: String = line.spans().iter().map(format_span).collect();
    if text.is_empty() {
        "<i></i>".to_string()
    } else {
        text
    }
}

/// WebVTT has no font tag; colors become `<c.name>` classes.
fn format_span(span: &TextSpan) -> String {
    let text = escape(span.text());
    let Some(style) = span.style() else {
        return text;
    };

    let mut open = String::new();
    let mut close = String::new();
    if let Some(color) = style.color {
        open.push_str(&format!("<c.{}>", color.name()));
        close.insert_str(0, "</c>");
    }
    if style.is_bold() {
        open.push_str("<b>");
        close.insert_str(0, "</b>");
    }
    if style.is_italic() {
        open.push_str("<i>");
        close.insert_str(0, "</i>");
    }
    if style.is_underline() {
        open.push_str("<u>");
        close.insert_str(0, "</u>");
    }
    format!("{}{}{}", open, text, close)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

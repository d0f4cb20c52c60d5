// Inline markup scanner for <i>, <b>, <u> and <font color="..."> tags
use super::style::{FontStyle, FontWeight, NamedColor, Style, TextDecoration};
use super::text::{TextLine, TextSpan};
use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</?[ibu]>|<font color="(#(?:[a-f0-9]{3}){1,2})">|</font>"#)
        .expect("Invalid tag regex")
});

/// Open-tag state carried from one text line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupScanner {
    italic: bool,
    bold: bool,
    underline: bool,
    color: Option<NamedColor>,
}

impl MarkupScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Style implied by the currently open tags.
    pub fn current_style(&self) -> Style {
        Style {
            font_style: if self.italic {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            },
            font_weight: if self.bold {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            text_decoration: if self.underline {
                TextDecoration::Underline
            } else {
                TextDecoration::None
            },
            color: self.color,
        }
    }

    /// Splits one trimmed line into spans, stripping recognized tags.
    pub fn scan_line(&mut self, line: &str) -> TextLine {
        let mut spans: Vec<TextSpan> = Vec::new();
        let mut cursor = 0;

        for caps in TAG_REGEX.captures_iter(line) {
            let Some(tag) = caps.get(0) else { continue };
            push_span(&mut spans, &line[cursor..tag.start()], self.current_style());
            cursor = tag.end();

            match tag.as_str() {
                "<i>" => self.italic = true,
                "</i>" => self.italic = false,
                "<b>" => self.bold = true,
                "</b>" => self.bold = false,
                "<u>" => self.underline = true,
                "</u>" => self.underline = false,
                "</font>" => self.color = None,
                _ => {
                    if let Some(hex) = caps.get(1) {
                        self.color = NamedColor::from_hex(hex.as_str());
                    }
                }
            }
        }
        push_span(&mut spans, &line[cursor..], self.current_style());

        if spans.is_empty() {
            spans.push(TextSpan::with_style("", self.current_style()));
        }
        TextLine::from_spans(spans)
    }
}

/// Appends `text`, merging into the previous span when the style matches.
fn push_span(spans: &mut Vec<TextSpan>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        let last_style = last.style().copied().unwrap_or_default();
        if last_style == style {
            let merged = format!("{}{}", last.text(), text);
            *last = TextSpan::with_style(merged, style);
            return;
        }
    }
    spans.push(TextSpan::with_style(text, style));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Style {
        Style {
            font_weight: FontWeight::Bold,
            ..Default::default()
        }
    }

    fn italic() -> Style {
        Style {
            font_style: FontStyle::Italic,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_line_is_single_span() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("Just some text, <3 > 2");
        assert_eq!(line.spans(), &[TextSpan::plain("Just some text, <3 > 2")]);
    }

    #[test]
    fn test_nested_tags_combine() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("<i><b>hello</b></i>");
        let style = Style {
            font_style: FontStyle::Italic,
            font_weight: FontWeight::Bold,
            ..Default::default()
        };
        assert_eq!(line.spans(), &[TextSpan::styled("hello", style)]);
        assert_eq!(scanner, MarkupScanner::new());
    }

    #[test]
    fn test_partial_styling_splits_spans() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("Hello <b>world</b>");
        assert_eq!(
            line.spans(),
            &[TextSpan::plain("Hello "), TextSpan::styled("world", bold())]
        );
    }

    #[test]
    fn test_unclosed_tag_carries_to_next_line() {
        let mut scanner = MarkupScanner::new();
        scanner.scan_line("<i>a");
        let second = scanner.scan_line("b");
        assert_eq!(second.spans(), &[TextSpan::styled("b", italic())]);

        scanner.reset();
        assert_eq!(scanner.scan_line("c").spans(), &[TextSpan::plain("c")]);
    }

    #[test]
    fn test_font_color() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line(r##"<font color="#ff0000">alert</font> done"##);
        let red = Style {
            color: Some(NamedColor::Red),
            ..Default::default()
        };
        assert_eq!(
            line.spans(),
            &[TextSpan::styled("alert", red), TextSpan::plain(" done")]
        );
    }

    #[test]
    fn test_short_hex_color() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line(r##"<font color="#00f">sky"##);
        assert_eq!(
            line.spans()[0].style().and_then(|s| s.color),
            Some(NamedColor::Blue)
        );
    }

    #[test]
    fn test_unsupported_tags_left_in_place() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line(r#"<font color="red">x</font> <s>y</s> <I>z</I>"#);
        assert_eq!(line.text(), r#"<font color="red">x <s>y</s> <I>z</I>"#);
        assert!(!line.spans().iter().any(TextSpan::is_styled));
    }

    #[test]
    fn test_non_ascii_digits_in_color_left_in_place() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("<font color=\"#\u{661}\u{662}\u{663}\">x");
        assert_eq!(
            line.spans(),
            &[TextSpan::plain("<font color=\"#\u{661}\u{662}\u{663}\">x")]
        );
    }

    #[test]
    fn test_tag_only_line_keeps_empty_span() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("<i>");
        assert_eq!(line.spans(), &[TextSpan::styled("", italic())]);
        assert!(line.is_empty());
    }

    #[test]
    fn test_empty_tag_pair_merges_neighbours() {
        let mut scanner = MarkupScanner::new();
        let line = scanner.scan_line("a<b></b>b");
        assert_eq!(line.spans(), &[TextSpan::plain("ab")]);
    }
}

// SRT subtitle format
use super::document::{Cue, SubtitleDocument};
use super::markup::MarkupScanner;
use super::style::Style;
use super::text::{TextLine, TextSpan};
use super::timecode::{TimeCode, TIMECODE_WIDTH};
use super::{SubtitleFormatter, SubtitleParser};
use crate::error::{ParseError, ParseErrorKind, Result};
use std::io::BufRead;

/// Byte range of the `-->` arrow in a timecode line.
const ARROW_RANGE: std::ops::Range<usize> = 13..16;
/// Byte offset of the end timecode in a timecode line.
const END_OFFSET: usize = 17;

/// Where the parser is inside the current cue block.
enum Cursor {
    None,
    CueId(String),
    CueTimecode {
        id: String,
        start: TimeCode,
        end: TimeCode,
    },
    CueText(Cue),
}

/// Line-oriented SRT parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser {
    /// Keep unclosed `<i>`/`<b>`/`<u>`/`<font>` state open into the next cue.
    pub carry_style_across_cues: bool,
}

impl SrtParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_carryover(carry: bool) -> Self {
        Self {
            carry_style_across_cues: carry,
        }
    }
}

impl SubtitleParser for SrtParser {
    /// `strict` has no effect on SRT input.
    fn parse(&self, input: &mut dyn BufRead, _strict: bool) -> Result<SubtitleDocument> {
        let mut document = SubtitleDocument::new();
        let mut scanner = MarkupScanner::new();
        let mut cursor = Cursor::None;
        let mut last_line = String::new();
        let mut line_number = 0;

        for raw in input.lines() {
            let raw = raw?;
            line_number += 1;
            let line = raw.trim();

            cursor = match cursor {
                Cursor::None if line.is_empty() => Cursor::None,
                Cursor::None => {
                    if line.parse::<i32>().is_err() {
                        return Err(ParseError::new(
                            ParseErrorKind::MalformedCueIdentifier,
                            line,
                            line_number,
                            "Unable to parse cue number",
                        )
                        .into());
                    }
                    if !self.carry_style_across_cues {
                        scanner.reset();
                    }
                    Cursor::CueId(line.to_string())
                }
                Cursor::CueId(_) if line.is_empty() => {
                    return Err(unexpected(line, line_number, "Expected a timecode line"));
                }
                Cursor::CueId(id) => {
                    let (start, end) = parse_timecode_line(line, line_number)?;
                    Cursor::CueTimecode { id, start, end }
                }
                Cursor::CueTimecode { .. } if line.is_empty() => {
                    return Err(unexpected(line, line_number, "Cue has no text"));
                }
                Cursor::CueTimecode { id, start, end } => {
                    let mut cue = Cue::new(id, start, end);
                    cue.add_line(scanner.scan_line(line));
                    Cursor::CueText(cue)
                }
                Cursor::CueText(cue) if line.is_empty() => {
                    document.add_cue(cue);
                    Cursor::None
                }
                Cursor::CueText(mut cue) => {
                    cue.add_line(scanner.scan_line(line));
                    Cursor::CueText(cue)
                }
            };
            last_line = line.to_string();
        }

        match cursor {
            Cursor::None => {}
            Cursor::CueText(cue) => document.add_cue(cue),
            Cursor::CueId(_) | Cursor::CueTimecode { .. } => {
                return Err(ParseError::new(
                    ParseErrorKind::IncompleteCue,
                    last_line,
                    line_number,
                    "Input ended inside a cue",
                )
                .into());
            }
        }

        Ok(document)
    }

    fn extension(&self) -> &'static str {
        "srt"
    }
}

fn unexpected(line: &str, line_number: usize, reason: &str) -> crate::error::SubconvError {
    ParseError::new(
        ParseErrorKind::UnexpectedLine,
        line,
        line_number,
        format!("Unexpected line ({})", reason),
    )
    .into()
}

/// Parses `HH:MM:SS,mmm --> HH:MM:SS,mmm`, with the arrow at a fixed offset.
fn parse_timecode_line(
    line: &str,
    line_number: usize,
) -> std::result::Result<(TimeCode, TimeCode), ParseError> {
    if line.get(ARROW_RANGE) != Some("-->") {
        return Err(ParseError::new(
            ParseErrorKind::MalformedTimecodeLine,
            line,
            line_number,
            "Timecode line is badly formatted",
        ));
    }

    let start = parse_timecode_field(line, line.get(..TIMECODE_WIDTH).unwrap_or(""), line_number)?;
    let end = parse_timecode_field(line, line.get(END_OFFSET..).unwrap_or(""), line_number)?;
    Ok((start, end))
}

fn parse_timecode_field(
    line: &str,
    field: &str,
    line_number: usize,
) -> std::result::Result<TimeCode, ParseError> {
    TimeCode::from_fixed_width(field).map_err(|_| {
        ParseError::new(
            ParseErrorKind::MalformedTimecodeField,
            line,
            line_number,
            format!("Unable to parse time code '{}'", field),
        )
    })
}

pub struct SrtFormatter;

impl SubtitleFormatter for SrtFormatter {
    fn format(&self, document: &SubtitleDocument) -> String {
        document
            .cues()
            .iter()
            .map(|cue| {
                format!(
                    "{}\n{} --> {}\n{}\n",
                    cue.id,
                    cue.start.format_with(','),
                    cue.end.format_with(','),
                    cue.lines.iter().map(format_line).collect::<Vec<_>>().join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extension(&self) -> &'static str {
        "srt"
    }
}

/// A line with no visible text is written as an empty tag pair, since a blank line ends the cue.
fn format_line(line: &TextLine) -> String {
    let text: String = line.spans().iter().map(format_span).collect();
    if text.is_empty() {
        "<i></i>".to_string()
    } else {
        text
    }
}

fn format_span(span: &TextSpan) -> String {
    let Some(style) = span.style() else {
        return span.text().to_string();
    };
    let (open, close) = style_tags(style);
    format!("{}{}{}", open, span.text(), close)
}

fn style_tags(style: &Style) -> (String, String) {
    let mut open = String::new();
    let mut close = String::new();
    if let Some(color) = style.color {
        open.push_str(&format!("<font color=\"{}\">", color.hex()));
        close.insert_str(0, "</font>");
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
    (open, close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::style::{FontStyle, FontWeight};

    fn parse(input: &str) -> Result<SubtitleDocument> {
        SrtParser::new().parse_str(input, true)
    }

    fn parse_err(input: &str) -> ParseError {
        parse(input)
            .unwrap_err()
            .as_parse_error()
            .cloned()
            .expect("expected a parse error")
    }

    fn italic() -> Style {
        Style {
            font_style: FontStyle::Italic,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_single_cue() {
        let doc = parse("1\n00:00:01,000 --> 00:00:02,500\nHello <b>world</b>\n\n").unwrap();

        assert_eq!(doc.len(), 1);
        let cue = &doc.cues()[0];
        assert_eq!(cue.id, "1");
        assert_eq!(cue.start, TimeCode::new(0, 0, 1, 0).unwrap());
        assert_eq!(cue.end, TimeCode::new(0, 0, 2, 500).unwrap());
        assert_eq!(cue.lines.len(), 1);

        let bold = Style {
            font_weight: FontWeight::Bold,
            ..Default::default()
        };
        assert_eq!(
            cue.lines[0].spans(),
            &[TextSpan::plain("Hello "), TextSpan::styled("world", bold)]
        );
    }

    #[test]
    fn test_cue_count_and_order() {
        let input = "\n\n3\n00:00:05,000 --> 00:00:06,000\nthird\n\n\
                     1\n00:00:01,000 --> 00:00:02,000\nfirst\nsecond line\n\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\nsecond\n";
        let doc = parse(input).unwrap();

        let ids: Vec<&str> = doc.cues().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(doc.cues()[1].lines.len(), 2);
    }

    #[test]
    fn test_unterminated_final_cue() {
        let doc = parse("1\n00:00:01,000 --> 00:00:02,000\nlast words").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.cues()[0].text(), "last words");
    }

    #[test]
    fn test_crlf_and_padding_are_trimmed() {
        let doc = parse("  1  \r\n00:00:01,000 --> 00:00:02,000\r\n  padded  \r\n\r\n").unwrap();
        assert_eq!(doc.cues()[0].id, "1");
        assert_eq!(doc.cues()[0].text(), "padded");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_cue_identifier_is_32_bit() {
        assert!(parse("2147483647\n00:00:01,000 --> 00:00:02,000\ntext\n").is_ok());

        let err = parse_err("2147483648\n00:00:01,000 --> 00:00:02,000\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::MalformedCueIdentifier);
    }

    #[test]
    fn test_malformed_cue_identifier() {
        let err = parse_err("one\n00:00:01,000 --> 00:00:02,000\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::MalformedCueIdentifier);
        assert_eq!(err.line, "one");
        assert_eq!(err.line_number, 1);
    }

    #[test]
    fn test_shifted_arrow_is_malformed_line() {
        let line = "00:00:01,000  --> 00:00:02,000";
        let err = parse_err(&format!("1\n{}\ntext\n", line));
        assert_eq!(err.kind, ParseErrorKind::MalformedTimecodeLine);
        assert_eq!(err.line, line);
        assert_eq!(err.line_number, 2);
    }

    #[test]
    fn test_arrow_column_is_fixed() {
        assert!(parse_timecode_line("00:00:01,000 --> 00:00:02,000", 1).is_ok());
        assert!(parse_timecode_line("0:00:01,000 --> 00:00:02,000", 1).is_err());
        assert!(parse_timecode_line("00:00:01,000 -> 00:00:02,000", 1).is_err());
        assert!(parse_timecode_line("00:00:01,000", 1).is_err());
    }

    #[test]
    fn test_trailing_position_text_is_ignored() {
        let (start, end) =
            parse_timecode_line("00:00:01,000 --> 00:00:02,000 X1:100 X2:200", 1).unwrap();
        assert_eq!(start.total_millis(), 1_000);
        assert_eq!(end.total_millis(), 2_000);
    }

    #[test]
    fn test_malformed_timecode_field() {
        let err = parse_err("1\n00:0a:01,000 --> 00:00:02,000\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::MalformedTimecodeField);

        let err = parse_err("1\n00:00:01,000 --> 00:00:02\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::MalformedTimecodeField);

        let err = parse_err("1\n00:00:01,000 --> 00:75:02,000\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::MalformedTimecodeField);
    }

    #[test]
    fn test_blank_after_identifier_is_unexpected() {
        let err = parse_err("1\n\n00:00:01,000 --> 00:00:02,000\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedLine);
        assert_eq!(err.line_number, 2);
    }

    #[test]
    fn test_blank_after_timecode_is_unexpected() {
        let err = parse_err("1\n00:00:01,000 --> 00:00:02,000\n\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedLine);
        assert_eq!(err.line_number, 3);
    }

    #[test]
    fn test_truncated_cue_is_incomplete() {
        assert_eq!(parse_err("1\n").kind, ParseErrorKind::IncompleteCue);
        assert_eq!(
            parse_err("1\n00:00:01,000 --> 00:00:02,000\n").kind,
            ParseErrorKind::IncompleteCue
        );
    }

    #[test]
    fn test_unclosed_italic_within_cue() {
        let doc = parse("1\n00:00:01,000 --> 00:00:02,000\n<i>a\nb\n").unwrap();
        let cue = &doc.cues()[0];
        assert_eq!(cue.lines[0].spans(), &[TextSpan::styled("a", italic())]);
        assert_eq!(cue.lines[1].spans(), &[TextSpan::styled("b", italic())]);
    }

    #[test]
    fn test_style_reset_between_cues() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\n<i>open\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\nfresh\n";
        let doc = parse(input).unwrap();
        assert_eq!(doc.cues()[1].lines[0].spans(), &[TextSpan::plain("fresh")]);
    }

    #[test]
    fn test_style_carryover_between_cues() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\n<i>open\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\nleaked\n";
        let doc = SrtParser::with_style_carryover(true)
            .parse_str(input, true)
            .unwrap();
        assert_eq!(
            doc.cues()[1].lines[0].spans(),
            &[TextSpan::styled("leaked", italic())]
        );
    }

    #[test]
    fn test_strict_flag_has_no_effect() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\ntext\n";
        let parser = SrtParser::new();
        assert_eq!(
            parser.parse_str(input, true).unwrap(),
            parser.parse_str(input, false).unwrap()
        );
    }

    #[test]
    fn test_io_error_is_not_a_parse_error() {
        let bytes: &[u8] = b"1\n00:00:01,000 --> 00:00:02,000\n\xff\xfe\n";
        let mut reader = bytes;
        let err = SrtParser::new().parse(&mut reader, true).unwrap_err();
        assert!(err.as_parse_error().is_none());
    }

    #[test]
    fn test_srt_format() {
        let input = "1\n00:00:01,500 --> 00:00:04,000\nHello, <i>world</i>!\n\n\
                     2\n00:00:04,500 --> 00:00:07,000\n<font color=\"#ff0000\"><b>Alert</b></font>\nsecond line\n";
        let doc = parse(input).unwrap();
        let output = SrtFormatter.format(&doc);

        assert!(output.contains("1\n00:00:01,500 --> 00:00:04,000\nHello, <i>world</i>!\n"));
        assert!(output.contains(
            "2\n00:00:04,500 --> 00:00:07,000\n<font color=\"#ff0000\"><b>Alert</b></font>\nsecond line\n"
        ));
    }

    #[test]
    fn test_tag_only_line_survives_round_trip() {
        let doc = parse("1\n00:00:01,000 --> 00:00:02,000\n</i>\nb\n").unwrap();
        let output = SrtFormatter.format(&doc);

        assert_eq!(output, "1\n00:00:01,000 --> 00:00:02,000\n<i></i>\nb\n");
        assert_eq!(parse(&output).unwrap(), doc);
    }

    #[test]
    fn test_srt_output_parses_back() {
        let input = "1\n00:00:01,000 --> 00:00:02,500\nHello <b>world</b>\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\n<u>under</u> and <i>slanted</i>\n";
        let doc = parse(input).unwrap();
        let reparsed = parse(&SrtFormatter.format(&doc)).unwrap();
        assert_eq!(doc, reparsed);
    }
}

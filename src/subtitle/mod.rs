pub mod document;
pub mod json;
pub mod markup;
pub mod srt;
pub mod style;
pub mod text;
pub mod timecode;
pub mod vtt;

pub use document::{Cue, DocumentProperties, SubtitleDocument};
pub use markup::MarkupScanner;
pub use style::{FontStyle, FontWeight, NamedColor, Style, TextDecoration};
pub use text::{TextLine, TextSpan};
pub use timecode::TimeCode;

use crate::config::{InputFormat, OutputFormat};
use crate::error::Result;
use std::io::BufRead;

/// Turns a decoded character stream into a [`SubtitleDocument`].
pub trait SubtitleParser: Send + Sync {
    /// Fails on the first grammar violation; no partial document is returned.
    fn parse(&self, input: &mut dyn BufRead, strict: bool) -> Result<SubtitleDocument>;

    fn parse_str(&self, input: &str, strict: bool) -> Result<SubtitleDocument> {
        let mut reader = input.as_bytes();
        self.parse(&mut reader, strict)
    }

    fn extension(&self) -> &'static str;
}

pub trait SubtitleFormatter {
    fn format(&self, document: &SubtitleDocument) -> String;
    fn extension(&self) -> &'static str;
}

pub fn create_parser(format: InputFormat, carry_style_across_cues: bool) -> Box<dyn SubtitleParser> {
    match format {
        InputFormat::Srt => Box::new(srt::SrtParser::with_style_carryover(carry_style_across_cues)),
    }
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn SubtitleFormatter> {
    match format {
        OutputFormat::Srt => Box::new(srt::SrtFormatter),
        OutputFormat::Vtt => Box::new(vtt::VttFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter::default()),
    }
}

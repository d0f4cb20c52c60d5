use super::text::TextLine;
use super::timecode::TimeCode;
use crate::error::{Result, SubconvError};

/// One timed subtitle entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub id: String,
    pub start: TimeCode,
    pub end: TimeCode,
    pub lines: Vec<TextLine>,
}

impl Cue {
    pub fn new(id: impl Into<String>, start: TimeCode, end: TimeCode) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: TextLine) {
        self.lines.push(line);
    }

    /// Zero for cues whose end precedes their start.
    pub fn duration(&self) -> TimeCode {
        self.end.saturating_sub(self.start)
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Visible text, one line per text line.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Optional file-level metadata. `None` means absent, not zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentProperties {
    pub frame_rate: Option<f32>,
    pub start_timecode_pre_roll: Option<TimeCode>,
}

/// Cues in source order plus document properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    cues: Vec<Cue>,
    pub properties: DocumentProperties,
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cues whose start is after their end.
    pub fn invalid_cues(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter().filter(|c| !c.is_valid())
    }

    pub fn validate(&self) -> Result<()> {
        let bad: Vec<String> = self
            .invalid_cues()
            .map(|c| format!("cue {} ends at {} before it starts at {}", c.id, c.end, c.start))
            .collect();
        if bad.is_empty() {
            Ok(())
        } else {
            Err(SubconvError::InvalidDocument(bad.join("; ")))
        }
    }
}

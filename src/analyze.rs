use crate::error::Result;
use crate::subtitle::{SubtitleDocument, TimeCode};
use serde::Serialize;

/// Summary of a parsed document, written as JSON by `--analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timecode: Option<TimeCode>,
    /// Start of the first cue in source order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_cue: Option<TimeCode>,
    /// Latest end time over all cues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cue_end: Option<TimeCode>,
    pub cue_count: usize,
}

impl Analysis {
    pub fn from_document(document: &SubtitleDocument) -> Self {
        Self {
            frame_rate: document.properties.frame_rate,
            start_timecode: document.properties.start_timecode_pre_roll,
            first_cue: document.cues().first().map(|c| c.start),
            last_cue_end: document.cues().iter().map(|c| c.end).max(),
            cue_count: document.len(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

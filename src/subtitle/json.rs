// JSON subtitle format
use super::document::SubtitleDocument;
use super::text::TextLine;
use super::timecode::TimeCode;
use super::SubtitleFormatter;
use serde::Serialize;

#[derive(Default)]
pub struct JsonFormatter {
    pub source_file: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: JsonMetadata,
    cues: Vec<JsonCue<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_timecode: Option<TimeCode>,
    cue_count: usize,
}

#[derive(Serialize)]
struct JsonCue<'a> {
    id: &'a str,
    start: TimeCode,
    end: TimeCode,
    start_seconds: f64,
    end_seconds: f64,
    text: String,
    lines: &'a [TextLine],
}

impl SubtitleFormatter for JsonFormatter {
    fn format(&self, document: &SubtitleDocument) -> String {
        let output = JsonOutput {
            metadata: JsonMetadata {
                source_file: self.source_file.clone(),
                frame_rate: document.properties.frame_rate,
                start_timecode: document.properties.start_timecode_pre_roll,
                cue_count: document.len(),
            },
            cues: document
                .cues()
                .iter()
                .map(|c| JsonCue {
                    id: &c.id,
                    start: c.start,
                    end: c.end,
                    start_seconds: c.start.to_duration().as_secs_f64(),
                    end_seconds: c.end.to_duration().as_secs_f64(),
                    text: c.text(),
                    lines: &c.lines,
                })
                .collect(),
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

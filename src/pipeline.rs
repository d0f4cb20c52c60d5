use crate::analyze::Analysis;
use crate::config::{Config, InputFormat, OutputFormat};
use crate::error::Result;
use crate::subtitle::{create_formatter, create_parser, json::JsonFormatter, SubtitleDocument};
use crate::subtitle::{SubtitleFormatter, SubtitleParser, TextSpan};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Output subtitle format.
    pub format: OutputFormat,
    /// Fail on cues that end before they start instead of warning.
    pub strict: bool,
    /// Let unclosed style tags leak into the following cue.
    pub carry_style_across_cues: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            format: config.default_format,
            strict: config.strict,
            carry_style_across_cues: config.carry_style_across_cues,
        }
    }
}

/// Statistics from one conversion.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Time spent reading and parsing the input.
    pub parse_time: Duration,
    /// Total time for the whole conversion.
    pub total_time: Duration,
    /// Number of cues in the document.
    pub cue_count: usize,
    /// Number of text lines across all cues.
    pub line_count: usize,
    /// Number of spans carrying a style.
    pub styled_spans: usize,
    /// Number of cues ending before they start.
    pub invalid_cues: usize,
}

impl PipelineStats {
    fn collect(document: &SubtitleDocument, parse_time: Duration, total_time: Duration) -> Self {
        let lines = document.cues().iter().flat_map(|c| c.lines.iter());
        Self {
            parse_time,
            total_time,
            cue_count: document.len(),
            line_count: lines.clone().count(),
            styled_spans: lines
                .flat_map(|l| l.spans().iter())
                .filter(|s| TextSpan::is_styled(s))
                .count(),
            invalid_cues: document.invalid_cues().count(),
        }
    }
}

/// Result of a conversion.
#[derive(Debug)]
pub struct PipelineResult {
    /// Path the output was written to.
    pub output_path: PathBuf,
    /// Format of the output.
    pub format: OutputFormat,
    /// Conversion statistics.
    pub stats: PipelineStats,
}

/// Strips a leading UTF-8 byte-order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Read and parse a subtitle file, choosing the parser by extension.
pub fn read_document(input: &Path, config: &PipelineConfig) -> Result<SubtitleDocument> {
    let input_format = InputFormat::from_path(input)?;
    let bytes = fs::read(input)?;
    let mut content = strip_bom(&bytes);
    debug!(
        "Read {} bytes from {} as {}",
        content.len(),
        input.display(),
        input_format
    );

    let parser = create_parser(input_format, config.carry_style_across_cues);
    let document = parser.parse(&mut content, config.strict)?;

    if config.strict {
        document.validate()?;
    } else {
        for cue in document.invalid_cues() {
            warn!("Cue {} ends at {} before it starts at {}", cue.id, cue.end, cue.start);
        }
    }

    Ok(document)
}

/// Convert `input` to `config.format` and write it to `output`.
pub fn convert_file(input: &Path, output: &Path, config: &PipelineConfig) -> Result<PipelineResult> {
    let started = Instant::now();

    info!("Parsing {}", input.display());
    let document = read_document(input, config)?;
    let parse_time = started.elapsed();
    info!("Parsed {} cues in {:.2?}", document.len(), parse_time);

    let rendered = match config.format {
        OutputFormat::Json => JsonFormatter {
            source_file: input.file_name().map(|n| n.to_string_lossy().into_owned()),
        }
        .format(&document),
        format => create_formatter(format).format(&document),
    };
    fs::write(output, rendered)?;
    info!("Wrote {} as {}", output.display(), config.format);

    Ok(PipelineResult {
        output_path: output.to_path_buf(),
        format: config.format,
        stats: PipelineStats::collect(&document, parse_time, started.elapsed()),
    })
}

/// Parse `input` and write its [`Analysis`] as JSON to `output`.
pub fn analyze_file(input: &Path, output: &Path, config: &PipelineConfig) -> Result<Analysis> {
    let document = read_document(input, config)?;
    let analysis = Analysis::from_document(&document);
    fs::write(output, analysis.to_json()?)?;
    info!("Wrote analysis of {} cues to {}", analysis.cue_count, output.display());
    Ok(analysis)
}

/// Print a summary of the conversion.
pub fn print_summary(result: &PipelineResult) {
    println!();
    println!("{}", style("Conversion complete").bold().green());
    println!();
    println!("  Output:     {}", result.output_path.display());
    println!("  Format:     {}", result.format);
    println!("  Cues:       {}", result.stats.cue_count);
    println!("  Lines:      {}", result.stats.line_count);
    println!("  Styled:     {} spans", result.stats.styled_spans);
    if result.stats.invalid_cues > 0 {
        println!(
            "  {}",
            style(format!(
                "{} cue(s) end before they start",
                result.stats.invalid_cues
            ))
            .yellow()
        );
    }
    println!();
    println!(
        "  Parse:      {:.2}ms",
        result.stats.parse_time.as_secs_f64() * 1000.0
    );
    println!(
        "  Total:      {:.2}ms",
        result.stats.total_time.as_secs_f64() * 1000.0
    );
    println!();
}

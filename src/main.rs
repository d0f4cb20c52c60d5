use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use subconv::config::{Config, OutputFormat};
use subconv::{analyze_file, convert_file, print_summary, PipelineConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "subconv")]
#[command(version, about = "Convert subtitle files between formats")]
#[command(long_about = "Parse SRT subtitles, including inline <i>, <b>, <u> and <font> styling, and write them as SRT, WebVTT or JSON.")]
struct Cli {
    /// Input subtitle file
    input: PathBuf,

    /// Output file (defaults to input name with appropriate extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: srt, vtt, json (defaults to the configured format)
    #[arg(short, long)]
    format: Option<String>,

    /// Write a JSON summary of the document instead of converting it
    #[arg(short, long)]
    analyze: bool,

    /// Warn about cues that end before they start instead of failing
    #[arg(long)]
    lenient: bool,

    /// Keep unclosed style tags open into the next cue
    #[arg(long)]
    carry_style: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn derive_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut output = input.to_path_buf();
    output.set_file_name(format!("{}.{}", stem.to_string_lossy(), extension));
    output
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Validate input file exists
    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    let config = Config::load().context("Failed to load configuration")?;

    let format: OutputFormat = match cli.format {
        Some(ref f) => f.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => config.default_format,
    };

    let pipeline_config = PipelineConfig {
        format,
        strict: config.strict && !cli.lenient,
        carry_style_across_cues: config.carry_style_across_cues || cli.carry_style,
    };

    if cli.analyze {
        let output = cli
            .output
            .unwrap_or_else(|| derive_output_path(&cli.input, "analysis.json"));
        info!("Analyzing {}", cli.input.display());
        analyze_file(&cli.input, &output, &pipeline_config)
            .with_context(|| format!("Unable to analyze {}", cli.input.display()))?;
        return Ok(());
    }

    let output = cli
        .output
        .unwrap_or_else(|| derive_output_path(&cli.input, format.extension()));
    if output == cli.input {
        anyhow::bail!(
            "Output would overwrite the input file: {}",
            output.display()
        );
    }

    info!("Input:  {}", cli.input.display());
    info!("Output: {}", output.display());
    info!("Format: {}", format);

    let result = convert_file(&cli.input, &output, &pipeline_config)
        .with_context(|| format!("Unable to convert {}", cli.input.display()))?;
    print_summary(&result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        let input = PathBuf::from("/path/to/movie.srt");

        let vtt_output = derive_output_path(&input, OutputFormat::Vtt.extension());
        assert_eq!(vtt_output, PathBuf::from("/path/to/movie.vtt"));

        let json_output = derive_output_path(&input, OutputFormat::Json.extension());
        assert_eq!(json_output, PathBuf::from("/path/to/movie.json"));

        let analysis = derive_output_path(&input, "analysis.json");
        assert_eq!(analysis, PathBuf::from("/path/to/movie.analysis.json"));
    }
}

use crate::error::{Result, SubconvError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Formats that have a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Srt,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Srt => write!(f, "srt"),
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(InputFormat::Srt),
            _ => Err(format!("Unknown input format: {}. Use 'srt'", s)),
        }
    }
}

impl InputFormat {
    /// Picks the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        ext.parse::<InputFormat>()
            .map_err(|_| SubconvError::UnsupportedFormat(format!("{} ({})", path.display(), ext)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Srt,
    Vtt,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(OutputFormat::Srt),
            "vtt" => Ok(OutputFormat::Vtt),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Use 'srt', 'vtt', or 'json'",
                s
            )),
        }
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_format: OutputFormat,
    /// Reject documents with cues that end before they start.
    pub strict: bool,
    /// Let unclosed style tags leak into the following cue.
    pub carry_style_across_cues: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            strict: true,
            carry_style_across_cues: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }

        // Override with environment variables
        if let Ok(format) = std::env::var("SUBCONV_DEFAULT_FORMAT") {
            config.default_format = format.parse::<OutputFormat>().map_err(SubconvError::Config)?;
        }
        if let Ok(strict) = std::env::var("SUBCONV_STRICT") {
            config.strict = parse_flag("SUBCONV_STRICT", &strict)?;
        }
        if let Ok(carry) = std::env::var("SUBCONV_CARRY_STYLE") {
            config.carry_style_across_cues = parse_flag("SUBCONV_CARRY_STYLE", &carry)?;
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SubconvError::Config(e.to_string()))
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subconv").join("config.toml"))
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SubconvError::Config(format!(
            "{} must be true or false, got '{}'",
            name, value
        ))),
    }
}

use thiserror::Error;

/// The grammar rule a rejected line broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedCueIdentifier,
    MalformedTimecodeLine,
    MalformedTimecodeField,
    UnexpectedLine,
    IncompleteCue,
}

/// A grammar violation, carrying the offending line verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} (line {line_number}): {line}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: String,
    pub line_number: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        line: impl Into<String>,
        line_number: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            line: line.into(),
            line_number,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SubconvError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid time code: {0}")]
    InvalidTimeCode(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SubconvError {
    /// The grammar error behind this failure, if the content was at fault.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            SubconvError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubconvError>;

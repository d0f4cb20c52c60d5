pub mod analyze;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod subtitle;

pub use analyze::Analysis;
pub use config::Config;
pub use error::{ParseError, ParseErrorKind, Result, SubconvError};
pub use pipeline::{
    analyze_file, convert_file, print_summary, read_document, PipelineConfig, PipelineResult,
    PipelineStats,
};

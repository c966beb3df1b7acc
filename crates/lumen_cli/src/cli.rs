use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Progressive CPU path tracer")]
pub struct Args {
    /// Preset world to render
    #[arg(short, long, default_value = "spheres")]
    pub world: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: usize,

    /// Image height in pixels
    #[arg(long, default_value_t = 300)]
    pub height: usize,

    /// Samples added to every pixel per pass
    #[arg(short, long, default_value_t = 1)]
    pub samples_per_pass: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = lumen_renderer::DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Number of full passes over the image
    #[arg(short, long, default_value_t = 16)]
    pub passes: usize,

    /// Worker threads (defaults to available parallelism)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Logging level (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Print the preset worlds and exit
    #[arg(long)]
    pub list_worlds: bool,
}

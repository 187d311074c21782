use std::path::PathBuf;

use clap::Parser;
use matcher_logging::LogDestination;

/// Edit JD keyword groups, build boolean queries and tailor resume bullets
/// against a matching backend.
#[derive(Parser, Debug)]
#[command(name = "resume-matcher", author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the matching backend
    #[arg(long)]
    pub backend_url: Option<String>,

    /// RON configuration file (defaults to ./resume_matcher.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log destination: terminal, file or both
    #[arg(long)]
    pub log: Option<LogDestination>,

    /// Log file used by the file destination
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,
}

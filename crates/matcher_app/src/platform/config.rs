use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;
use matcher_engine::BackendSettings;
use matcher_logging::LogDestination;
use serde::Deserialize;

use super::cli::Args;

const DEFAULT_CONFIG_FILENAME: &str = "resume_matcher.ron";
const DEFAULT_LOG_FILENAME: &str = "resume_matcher.log";

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    backend_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    max_response_bytes: Option<u64>,
    log: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendSettings,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub script: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, overridden by the config file, overridden by CLI flags.
    pub fn resolve(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => read_file_config(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    read_file_config(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::merge(file, args)
    }

    fn merge(file: FileConfig, args: &Args) -> Result<Self> {
        let mut backend = BackendSettings::default();
        if let Some(url) = file.backend_url {
            backend.base_url = url;
        }
        if let Some(secs) = file.connect_timeout_secs {
            backend.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            backend.request_timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = file.max_response_bytes {
            backend.max_response_bytes = bytes;
        }
        if let Some(url) = &args.backend_url {
            backend.base_url = url.clone();
        }
        if let Some(secs) = args.timeout_secs {
            backend.request_timeout = Duration::from_secs(secs);
        }

        let file_destination = file
            .log
            .as_deref()
            .map(str::parse::<LogDestination>)
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("invalid `log` in config file")?;

        Ok(Self {
            backend,
            log_destination: args.log.or(file_destination).unwrap_or_default(),
            log_file: args
                .log_file
                .clone()
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILENAME)),
            log_level: if args.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            script: args.script.clone(),
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

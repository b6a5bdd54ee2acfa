use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use directories::BaseDirs;
use engine_logging::{level_for_verbosity, LogOptions};
use halo_engine::{PortalSettings, DEFAULT_BASE_URL};

/// File in the home directory holding the login form fields as JSON.
const CREDENTIALS_FILE: &str = ".halodb";

#[derive(Debug, Parser)]
#[command(
    name = "halo-db",
    version,
    about = "Download the latest released file of every dataset in a HALO-DB mission"
)]
pub struct Cli {
    /// Mission ID
    #[arg(short, long, default_value = "141")]
    pub mission: String,

    /// Directory receiving the downloaded files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON file with the login form fields [default: ~/.halodb]
    #[arg(long, env = "HALODB_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Portal base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of datasets processed at once
    #[arg(short = 'j', long, default_value_t = 1,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Write buffer size for downloads, in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    pub chunk_size: usize,

    /// Resolve everything but download nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn credentials_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.credentials {
            return Ok(path.clone());
        }
        let dirs = BaseDirs::new().ok_or_else(|| anyhow!("cannot determine home directory"))?;
        Ok(dirs.home_dir().join(CREDENTIALS_FILE))
    }

    pub fn portal_settings(&self) -> PortalSettings {
        PortalSettings {
            request_timeout: Duration::from_secs(self.timeout),
            chunk_size: self.chunk_size,
            concurrency: usize::from(self.concurrency),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            ..PortalSettings::with_base_url(self.base_url.clone())
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: level_for_verbosity(self.verbose),
            file: self.log_file.clone(),
        }
    }
}

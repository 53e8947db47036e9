use std::path::PathBuf;

use serde::Deserialize;
use lumen_core::error::{LumenError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            service: ServiceSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LumenError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_log_file")]
    pub file: String,

    #[serde(default = "default_console")]
    pub console: bool,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
            console: default_console(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl LoggingSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.queue_capacity) {
            return Err(LumenError::Config(
                "logging.queue_capacity must be between 1 and 1000000".into(),
            ));
        }
        if self.file.is_empty() || self.file.contains(['/', '\\']) {
            return Err(LumenError::Config(
                "logging.file must be a plain file name".into(),
            ));
        }
        Ok(())
    }

    /// Full path of the append-only log file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

fn default_port() -> u16 {
    3000
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_log_file() -> String {
    "app.log".into()
}
fn default_console() -> bool {
    true
}
fn default_queue_capacity() -> usize {
    1024
}

//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use lumen_core::error::{LumenError, Result};

pub use schema::{LoggingSection, ServiceConfig, ServiceSection};

pub const DEFAULT_CONFIG_PATH: &str = "lumen.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| LumenError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_optional(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ServiceConfig::default()),
        Err(e) => Err(LumenError::Config(format!(
            "read {} failed: {e}",
            path.display()
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| LumenError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply `PORT` and `LOG_DIR` overrides, then re-validate.
pub fn apply_env<F>(cfg: &mut ServiceConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        cfg.service.port = port
            .trim()
            .parse()
            .map_err(|e| LumenError::Config(format!("PORT must be a port number: {e}")))?;
    }
    if let Some(dir) = lookup("LOG_DIR") {
        cfg.logging.dir = dir.into();
    }
    cfg.validate()
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::types::SplitConfig;

/// Environment variable naming the whisper model file
pub const MODEL_ENV_VAR: &str = "WHISPER_MODEL_PATH";
const DEFAULT_MODEL: &str = "models/ggml-base.bin";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
}

impl AppConfig {
    /// Resolve the whisper model: explicit override, then `WHISPER_MODEL_PATH`, then `./models`
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(MODEL_ENV_VAR).map(PathBuf::from);
        Self::resolve(path, env)
    }

    fn resolve(path: Option<PathBuf>, env: Option<PathBuf>) -> Result<Self> {
        let model = path
            .or(env)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL));
        Ok(Self {
            model_path: canonicalize_file(&model)?,
        })
    }
}

fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve whisper model at {:?}", path))?;
    if canonical.is_file() {
        Ok(canonical)
    } else {
        Err(anyhow!("whisper model path {:?} is not a file", canonical))
    }
}

/// Load a split configuration from a JSON file or an inline JSON string, defaulting otherwise
pub fn load_split_config(path: Option<&Path>, json: Option<&str>) -> Result<SplitConfig> {
    if let Some(p) = path {
        let data =
            fs::read_to_string(p).with_context(|| format!("Failed to read config file {:?}", p))?;
        return parse_split_config(&data);
    }

    if let Some(raw) = json {
        return parse_split_config(raw);
    }

    Ok(SplitConfig::default())
}

fn parse_split_config(raw: &str) -> Result<SplitConfig> {
    let config: SplitConfig =
        serde_json::from_str(raw).context("Failed to parse split configuration JSON")?;
    Ok(config)
}

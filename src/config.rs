use crate::catalog::SourceConfig;
use crate::constants::{
    DEFAULT_ALLOWED_ORIGINS, DEFAULT_CONFIG_FILE, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_IMAGE_DIR,
    DEFAULT_PORT, DEFAULT_REMOTE_LINKS, ENV_CONFIG, ENV_DIR, ENV_FETCH_TIMEOUT, ENV_PORT,
    ENV_SOURCE,
};
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub fetch_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            source: SourceConfig::RemoteFetch {
                links: DEFAULT_REMOTE_LINKS.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

impl Config {
    /// Load from `path`, or `CATALOG_CONFIG`, or `catalog.toml` when present,
    /// falling back to defaults; then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `PORT`, `CATALOG_SOURCE`, `CATALOG_DIR` and `FETCH_TIMEOUT_SECS`.
    ///
    /// `lookup` abstracts the environment so overrides can be tested without
    /// touching process state.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| CatalogError::Config(format!("Invalid {}: '{}'", ENV_PORT, port)))?;
        }

        if let Some(secs) = lookup(ENV_FETCH_TIMEOUT) {
            self.fetch_timeout_secs = secs.trim().parse().map_err(|_| {
                CatalogError::Config(format!("Invalid {}: '{}'", ENV_FETCH_TIMEOUT, secs))
            })?;
        }

        let dir_override = lookup(ENV_DIR).map(PathBuf::from);

        if let Some(mode) = lookup(ENV_SOURCE) {
            let mode = mode.trim().to_lowercase();
            if mode != self.source.mode_name() {
                self.source = match mode.as_str() {
                    "remote" => SourceConfig::RemoteFetch {
                        links: DEFAULT_REMOTE_LINKS.iter().map(|s| s.to_string()).collect(),
                    },
                    "local" => SourceConfig::LocalDirectory {
                        dir: PathBuf::from(DEFAULT_IMAGE_DIR),
                    },
                    "direct" => SourceConfig::DirectReference {
                        entries: Vec::new(),
                        fallback_dir: Some(PathBuf::from(DEFAULT_IMAGE_DIR)),
                    },
                    other => {
                        return Err(CatalogError::Config(format!(
                            "Unknown {} '{}' (expected remote, local or direct)",
                            ENV_SOURCE, other
                        )))
                    }
                };
            }
        }

        if let Some(new_dir) = dir_override {
            match &mut self.source {
                SourceConfig::LocalDirectory { dir } => *dir = new_dir,
                SourceConfig::DirectReference { fallback_dir, .. } => *fallback_dir = Some(new_dir),
                SourceConfig::RemoteFetch { .. } => {}
            }
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::constants::{
    CONFIG_JSON_VAR, CONFIG_PATH_VAR, DEFAULT_CONFIG_CANDIDATES, PARALLEL_VAR, ROOT_VAR,
};
use crate::models::{ConfigSource, IndexConfig};
use crate::util::{non_empty, parse_bool};

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Resolves an [`IndexConfig`] from variables and files.
///
/// Variables come from `lookup` so the order of evaluation can be exercised
/// without touching the process environment.
pub struct ConfigLoader<L = fn(&str) -> Option<String>> {
    base_dir: PathBuf,
    lookup: L,
}

impl<L> fmt::Debug for ConfigLoader<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

impl ConfigLoader {
    /// Process environment, files relative to the working directory.
    pub fn from_env() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            lookup: process_env,
        }
    }
}

impl<L> ConfigLoader<L>
where
    L: Fn(&str) -> Option<String>,
{
    pub fn with_lookup(base_dir: impl Into<PathBuf>, lookup: L) -> Self {
        Self {
            base_dir: base_dir.into(),
            lookup,
        }
    }

    /// Evaluation order:
    /// 1) `$PROPDEX_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$PROPDEX_CONFIG_JSON` (inline JSON),
    /// 3) the first existing default file,
    /// 4) defaults.
    ///
    /// `$PROPDEX_ROOT` and `$PROPDEX_PARALLEL` are applied on top.
    pub fn load(&self) -> anyhow::Result<(IndexConfig, ConfigSource)> {
        let (mut config, source) = self.load_base()?;
        self.apply_overrides(&mut config)?;
        info!(%source, "loaded propdex configuration");
        Ok((config, source))
    }

    /// Load an explicitly named file, still applying the variable overrides.
    pub fn load_file(&self, path: &Path) -> anyhow::Result<(IndexConfig, ConfigSource)> {
        let path = self.base_dir.join(path);
        let mut config = IndexConfig::load_from_file(&path)?;
        self.apply_overrides(&mut config)?;
        Ok((config, ConfigSource::File(path)))
    }

    fn load_base(&self) -> anyhow::Result<(IndexConfig, ConfigSource)> {
        if let Some(raw) = self.var(CONFIG_PATH_VAR) {
            let path = self.base_dir.join(raw);
            let config = IndexConfig::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = self.var(CONFIG_JSON_VAR) {
            let config = IndexConfig::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = IndexConfig::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((IndexConfig::default(), ConfigSource::Default))
    }

    fn apply_overrides(&self, config: &mut IndexConfig) -> anyhow::Result<()> {
        if let Some(root) = self.var(ROOT_VAR) {
            debug!(root, "dataset root from environment");
            config.root = Some(PathBuf::from(root));
        }
        if let Some(raw) = self.var(PARALLEL_VAR) {
            config.scan.parallel = parse_bool(&raw)
                .ok_or_else(|| anyhow!("{PARALLEL_VAR} must be a boolean, got '{raw}'"))?;
        }
        Ok(())
    }

    fn var(&self, name: &str) -> Option<String> {
        non_empty((self.lookup)(name))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_CONFIG_CANDIDATES
            .iter()
            .map(|candidate| self.base_dir.join(candidate))
            .find(|path| path.exists())
    }
}

impl IndexConfig {
    /// [`ConfigLoader::load`] against the process environment.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        ConfigLoader::from_env().load()
    }
}

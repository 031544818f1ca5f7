use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

use propdex_core::{DuplicatePolicy, ParserSettings, ScanSettings};

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "built-in defaults"),
            ConfigSource::EnvPath(path) => write!(f, "$PROPDEX_CONFIG_PATH ({})", path.display()),
            ConfigSource::EnvInline => write!(f, "$PROPDEX_CONFIG_JSON"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything an index run needs.
///
/// ```toml
/// root = "/data/uiuc-propdb"
/// duplicate_policy = "keep_last"
///
/// [scan]
/// parallel = true
///
/// [parser]
/// metric_threshold_in = 40.0
///
/// [[parser.unit_quirks]]
/// manufacturer = "ancf"
/// rule = { kind = "implicit_tenths", diameter_above = 60.0, pitch_above = 30.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory holding the volume directories.
    pub root: Option<PathBuf>,
    pub scan: ScanSettings,
    pub parser: ParserSettings,
    /// What happens when a propeller gets a second static, geometry,
    /// thickness or photo file.
    pub duplicate_policy: DuplicatePolicy,
}

impl IndexConfig {
    /// Dataset root, preferring `cli_root` over the configured one.
    pub fn resolve_root(&self, cli_root: Option<&Path>) -> anyhow::Result<PathBuf> {
        cli_root
            .map(Path::to_path_buf)
            .or_else(|| self.root.clone())
            .ok_or_else(|| {
                anyhow!("no dataset root: pass --root, set PROPDEX_ROOT, or add `root` to the config file")
            })
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read propdex config from {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid propdex config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|err| anyhow!("invalid propdex config {}: {}", path.display(), err)),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse propdex config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid propdex config json: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propdex_core::QuirkRule;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = IndexConfig::parse_from_str("", "inline").unwrap();
        assert_eq!(config, IndexConfig::default());
        assert_eq!(config.parser.unit_quirks.len(), 1);
    }

    #[test]
    fn toml_overrides_nested_sections() {
        let config = IndexConfig::parse_from_str(
            r#"
root = "/data/props"
duplicate_policy = "keep_last"

[scan]
parallel = true
data_extensions = ["txt", "dat"]

[parser]
metric_threshold_in = 40.0

[[parser.unit_quirks]]
manufacturer = "gws"
rule = { kind = "implicit_tenths", diameter_above = 20.0, pitch_above = 20.0 }
"#,
            "test.toml",
        )
        .unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/data/props")));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepLast);
        assert!(config.scan.parallel);
        assert_eq!(config.scan.data_dir, "data");
        assert_eq!(config.scan.data_extensions, vec!["txt", "dat"]);
        assert_eq!(config.parser.metric_threshold_in, 40.0);
        assert_eq!(config.parser.field_delimiter, '_');
        assert_eq!(config.parser.unit_quirks[0].manufacturer, "gws");
        assert_eq!(
            config.parser.unit_quirks[0].rule,
            QuirkRule::ImplicitTenths {
                diameter_above: 20.0,
                pitch_above: 20.0
            }
        );
    }

    #[test]
    fn json_is_accepted_as_fallback() {
        let config =
            IndexConfig::parse_from_str(r#"{"scan": {"photos_dir": "photos"}}"#, "inline").unwrap();
        assert_eq!(config.scan.photos_dir, "photos");

        let err = IndexConfig::parse_from_str("root = [", "broken").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn cli_root_wins_over_configured_root() {
        let config = IndexConfig {
            root: Some(PathBuf::from("/configured")),
            ..IndexConfig::default()
        };
        assert_eq!(
            config.resolve_root(Some(Path::new("/cli"))).unwrap(),
            PathBuf::from("/cli")
        );
        assert_eq!(
            config.resolve_root(None).unwrap(),
            PathBuf::from("/configured")
        );
        assert!(IndexConfig::default().resolve_root(None).is_err());
    }
}

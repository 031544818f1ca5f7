/// TOML or JSON file to load instead of the default candidates.
pub const CONFIG_PATH_VAR: &str = "PROPDEX_CONFIG_PATH";
/// Inline JSON configuration.
pub const CONFIG_JSON_VAR: &str = "PROPDEX_CONFIG_JSON";
/// Dataset root; wins over the `root` key of any file.
pub const ROOT_VAR: &str = "PROPDEX_ROOT";
/// Boolean toggle for `scan.parallel`.
pub const PARALLEL_VAR: &str = "PROPDEX_PARALLEL";

/// Files probed, relative to the working directory, when no env var names one.
pub const DEFAULT_CONFIG_CANDIDATES: &[&str] = &[
    "propdex.toml",
    "propdex.json",
    "config/propdex.toml",
    "config/propdex.json",
];

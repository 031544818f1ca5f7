//! Sanity checks run before an index starts.

use std::fmt;

use anyhow::bail;

use propdex_core::scanner::compile_volume_pattern;

use crate::models::IndexConfig;

/// One problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collect every issue instead of stopping at the first.
pub fn find_issues(config: &IndexConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut push = |field, message: String| issues.push(ConfigIssue { field, message });

    if let Err(err) = compile_volume_pattern(&config.scan.volume_pattern) {
        push("scan.volume_pattern", err.to_string());
    }
    if config.scan.data_dir.trim().is_empty() {
        push("scan.data_dir", "must not be empty".to_string());
    }
    if config.scan.photos_dir.trim().is_empty() {
        push("scan.photos_dir", "must not be empty".to_string());
    }

    let parser = &config.parser;
    if parser.field_delimiter == parser.size_delimiter {
        push(
            "parser.size_delimiter",
            format!("must differ from field delimiter '{}'", parser.field_delimiter),
        );
    }
    if !(parser.metric_threshold_in.is_finite() && parser.metric_threshold_in > 0.0) {
        push(
            "parser.metric_threshold_in",
            format!("must be a positive number, got {}", parser.metric_threshold_in),
        );
    }
    for quirk in &parser.unit_quirks {
        if quirk.manufacturer.trim().is_empty() {
            push("parser.unit_quirks", "manufacturer must not be empty".to_string());
        }
    }

    issues
}

/// Fail with every issue listed when the configuration cannot be used.
pub fn validate(config: &IndexConfig) -> anyhow::Result<()> {
    let issues = find_issues(config);
    if issues.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = issues.iter().map(ToString::to_string).collect();
    bail!("invalid propdex configuration:\n  {}", listed.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&IndexConfig::default()).is_ok());
    }

    #[test]
    fn pattern_without_capture_group_is_rejected() {
        let mut config = IndexConfig::default();
        config.scan.volume_pattern = "^volume-\\d+$".to_string();
        let issues = find_issues(&config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "scan.volume_pattern");
    }

    #[test]
    fn all_issues_are_reported_together() {
        let mut config = IndexConfig::default();
        config.scan.volume_pattern = "(".to_string();
        config.parser.size_delimiter = '_';
        config.parser.metric_threshold_in = f64::NAN;
        config.scan.data_dir = " ".to_string();

        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("scan.volume_pattern"));
        assert!(err.contains("scan.data_dir"));
        assert!(err.contains("parser.size_delimiter"));
        assert!(err.contains("parser.metric_threshold_in"));
    }
}

//! Scanner and parser defaults that line up with the configuration crate.
//!
//! Keeping the directory names, extension lists and unit quirks in one place
//! lets `propdex-config` expose them as user-facing knobs without diverging
//! from the core's filtering rules.

use serde::{Deserialize, Serialize};

/// Volume directory names such as `volume-1`, `Volume 2` or `UIUC-propDB-vol-3`.
/// The single capture group holds the volume number.
pub const DEFAULT_VOLUME_PATTERN: &str = r"(?i)^(?:uiuc-propdb-)?vol(?:ume)?[-_ ]?(\d+)$";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PHOTOS_DIR: &str = "prop_photos";

pub const DEFAULT_DATA_FILE_EXTENSIONS: &[&str] = &["txt"];
pub const DEFAULT_IMAGE_FILE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const DEFAULT_FIELD_DELIMITER: char = '_';
pub const DEFAULT_SIZE_DELIMITER: char = 'x';

/// Diameters above this many inches are assumed to be millimetres.
pub const DEFAULT_METRIC_THRESHOLD_IN: f64 = 30.0;
pub const MILLIMETRES_PER_INCH: f64 = 25.4;

/// Manufacturer that writes half-inch sizes without the decimal point
/// (`125` for 12.5 inches).
pub const IMPLICIT_TENTHS_MANUFACTURER: &str = "ancf";

pub fn default_data_file_extensions_vec() -> Vec<String> {
    DEFAULT_DATA_FILE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

pub fn default_image_file_extensions_vec() -> Vec<String> {
    DEFAULT_IMAGE_FILE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Directory layout and file filters used by the volume scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Regex matched against top-level directory names; capture group 1 is
    /// the volume number.
    pub volume_pattern: String,
    /// Per-volume subdirectory holding the numeric tables.
    pub data_dir: String,
    /// Per-volume subdirectory holding photographs. Optional on disk.
    pub photos_dir: String,
    /// Extensions (without the dot, case-insensitive) treated as data files.
    /// An empty list accepts every file.
    pub data_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
    /// List and parse volumes on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            volume_pattern: DEFAULT_VOLUME_PATTERN.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            photos_dir: DEFAULT_PHOTOS_DIR.to_string(),
            data_extensions: default_data_file_extensions_vec(),
            image_extensions: default_image_file_extensions_vec(),
            parallel: false,
        }
    }
}

/// Correction applied to the raw size numbers of one manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuirkRule {
    /// Values above the thresholds were written without their decimal
    /// point and are divided by ten.
    ImplicitTenths {
        diameter_above: f64,
        pitch_above: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitQuirk {
    pub manufacturer: String,
    pub rule: QuirkRule,
}

pub fn default_unit_quirks() -> Vec<UnitQuirk> {
    vec![UnitQuirk {
        manufacturer: IMPLICIT_TENTHS_MANUFACTURER.to_string(),
        rule: QuirkRule::ImplicitTenths {
            diameter_above: 60.0,
            pitch_above: 30.0,
        },
    }]
}

/// Filename grammar knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub field_delimiter: char,
    pub size_delimiter: char,
    pub metric_threshold_in: f64,
    pub unit_quirks: Vec<UnitQuirk>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            field_delimiter: DEFAULT_FIELD_DELIMITER,
            size_delimiter: DEFAULT_SIZE_DELIMITER,
            metric_threshold_in: DEFAULT_METRIC_THRESHOLD_IN,
            unit_quirks: default_unit_quirks(),
        }
    }
}

/// What to do when a propeller already has a static, geometry or thickness
/// file (or a photo for the same view) and another one shows up.
///
/// The displaced file is reported either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    KeepFirst,
    KeepLast,
}

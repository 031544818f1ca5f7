use tracing::debug;

use crate::settings::{
    DEFAULT_METRIC_THRESHOLD_IN, MILLIMETRES_PER_INCH, ParserSettings, QuirkRule, UnitQuirk,
    default_unit_quirks,
};

/// Corrects raw size numbers into inches.
///
/// Manufacturer quirks are checked first. A manufacturer with a quirk entry
/// never goes through the millimetre rule.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitNormalizer {
    quirks: Vec<UnitQuirk>,
    metric_threshold_in: f64,
}

impl Default for UnitNormalizer {
    fn default() -> Self {
        Self {
            quirks: default_unit_quirks(),
            metric_threshold_in: DEFAULT_METRIC_THRESHOLD_IN,
        }
    }
}

impl From<&ParserSettings> for UnitNormalizer {
    fn from(settings: &ParserSettings) -> Self {
        Self {
            quirks: settings.unit_quirks.clone(),
            metric_threshold_in: settings.metric_threshold_in,
        }
    }
}

impl UnitNormalizer {
    pub fn new(quirks: Vec<UnitQuirk>, metric_threshold_in: f64) -> Self {
        Self {
            quirks,
            metric_threshold_in,
        }
    }

    pub fn quirk_for(&self, manufacturer: &str) -> Option<&UnitQuirk> {
        self.quirks
            .iter()
            .find(|quirk| quirk.manufacturer.eq_ignore_ascii_case(manufacturer))
    }

    /// Normalize a `(diameter, pitch)` pair for `manufacturer`.
    pub fn normalize(
        &self,
        manufacturer: &str,
        diameter: Option<f64>,
        pitch: Option<f64>,
    ) -> (Option<f64>, Option<f64>) {
        let Some(diameter) = diameter else {
            return (None, pitch);
        };

        if let Some(quirk) = self.quirk_for(manufacturer) {
            return apply_quirk(quirk.rule, diameter, pitch);
        }

        if diameter > self.metric_threshold_in {
            debug!(manufacturer, diameter, "treating size as millimetres");
            return (
                Some(diameter / MILLIMETRES_PER_INCH),
                pitch.map(|p| p / MILLIMETRES_PER_INCH),
            );
        }

        (Some(diameter), pitch)
    }
}

fn apply_quirk(rule: QuirkRule, diameter: f64, pitch: Option<f64>) -> (Option<f64>, Option<f64>) {
    match rule {
        QuirkRule::ImplicitTenths {
            diameter_above,
            pitch_above,
        } => {
            let diameter = if diameter > diameter_above {
                diameter / 10.0
            } else {
                diameter
            };
            let pitch = pitch.map(|p| if p > pitch_above { p / 10.0 } else { p });
            (Some(diameter), pitch)
        }
    }
}

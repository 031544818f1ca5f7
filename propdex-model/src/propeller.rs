use std::fmt::{self, Display, Formatter};

/// Propeller orientation relative to the airflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    Tractor,
    Pusher,
}

impl Orientation {
    /// Single-letter code used in identifiers and compact size labels.
    pub const fn code(self) -> char {
        match self {
            Orientation::Tractor => 't',
            Orientation::Pusher => 'p',
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Tractor => write!(f, "Tractor"),
            Orientation::Pusher => write!(f, "Pusher"),
        }
    }
}

/// Fields decoded from a filename that describe one physical propeller.
///
/// Sizes are in inches after unit normalization. A field that does not apply
/// to the file stays `None`; zero is never used as a placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropellerTraits {
    pub manufacturer: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub diameter_in: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub pitch_in: Option<f64>,
    /// Ground-adjustable blade angle.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub degree: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub blade_count: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tractor_pusher: Option<Orientation>,
    /// Distinguishes repeated physical units of the same nominal size.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub specimen: Option<u32>,
    /// Free-text label kept when the size token is not `<diameter>x<pitch>`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub model: Option<String>,
}

impl PropellerTraits {
    pub fn new(manufacturer: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, diameter_in: f64, pitch_in: Option<f64>) -> Self {
        self.diameter_in = Some(diameter_in);
        self.pitch_in = pitch_in;
        self
    }

    pub fn has_size(&self) -> bool {
        self.diameter_in.is_some()
    }
}

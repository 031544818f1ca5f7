use std::borrow::Borrow;
use std::fmt;

/// Key that clusters every file belonging to one physical propeller.
///
/// Example: `apcsf_9x4.7`, `mit_5x4_20deg_3b_p_spec2`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CanonicalId(pub String);

impl CanonicalId {
    pub fn new(value: impl Into<String>) -> Self {
        CanonicalId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalId {
    fn from(value: &str) -> Self {
        CanonicalId(value.to_string())
    }
}

impl From<String> for CanonicalId {
    fn from(value: String) -> Self {
        CanonicalId(value)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

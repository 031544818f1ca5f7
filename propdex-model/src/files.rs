use std::fmt::{self, Display, Formatter};

use crate::propeller::PropellerTraits;

/// Content category of a data file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "role", rename_all = "snake_case"))]
pub enum FileRole {
    /// Thrust and power coefficients against advance ratio at one RPM.
    Performance {
        test_label: String,
        #[cfg_attr(feature = "serde", serde(default))]
        rpm: Option<u32>,
    },
    /// Zero advance ratio sweep over RPM.
    Static {
        #[cfg_attr(feature = "serde", serde(default))]
        test_label: Option<String>,
    },
    /// Chord and twist against span fraction.
    Geometry,
    /// Thickness ratio against span fraction.
    Thickness,
}

impl FileRole {
    pub fn kind(&self) -> RoleKind {
        match self {
            FileRole::Performance { .. } => RoleKind::Performance,
            FileRole::Static { .. } => RoleKind::Static,
            FileRole::Geometry => RoleKind::Geometry,
            FileRole::Thickness => RoleKind::Thickness,
        }
    }

    pub fn rpm(&self) -> Option<u32> {
        match self {
            FileRole::Performance { rpm, .. } => *rpm,
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`FileRole`], used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoleKind {
    Performance,
    Static,
    Geometry,
    Thickness,
}

impl Display for RoleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Performance => write!(f, "performance"),
            RoleKind::Static => write!(f, "static"),
            RoleKind::Geometry => write!(f, "geometry"),
            RoleKind::Thickness => write!(f, "thickness"),
        }
    }
}

/// Which side of the propeller a photograph shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewDirection {
    Front,
    Side,
}

impl Display for ViewDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ViewDirection::Front => write!(f, "front"),
            ViewDirection::Side => write!(f, "side"),
        }
    }
}

/// A scanned file is either a data table with one role or a photograph
/// with one view direction, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FileKind {
    Data(FileRole),
    Image(ViewDirection),
}

/// Location of one file relative to the dataset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileRef {
    pub volume: String,
    /// Data files carry the stem only; images keep their full name.
    pub filename: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub extension: Option<String>,
}

impl FileRef {
    pub fn new(
        volume: impl Into<String>,
        filename: impl Into<String>,
        extension: Option<String>,
    ) -> Self {
        Self {
            volume: volume.into(),
            filename: filename.into(),
            extension,
        }
    }

    /// Filename as it exists on disk.
    pub fn disk_name(&self) -> String {
        match &self.extension {
            Some(ext) if !self.filename.ends_with(&format!(".{ext}")) => {
                format!("{}.{}", self.filename, ext)
            }
            _ => self.filename.clone(),
        }
    }
}

impl Display for FileRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.volume, self.disk_name())
    }
}

/// One parsed filename. Built once per scanned file and never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatFileRecord {
    pub volume: String,
    pub volume_number: u32,
    pub filename: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub extension: Option<String>,
    pub traits: PropellerTraits,
    pub kind: FileKind,
}

impl FlatFileRecord {
    pub fn file_ref(&self) -> FileRef {
        FileRef::new(
            self.volume.clone(),
            self.filename.clone(),
            self.extension.clone(),
        )
    }

    pub fn role(&self) -> Option<&FileRole> {
        match &self.kind {
            FileKind::Data(role) => Some(role),
            FileKind::Image(_) => None,
        }
    }

    pub fn view(&self) -> Option<ViewDirection> {
        match self.kind {
            FileKind::Image(view) => Some(view),
            FileKind::Data(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpm_only_exists_on_performance_role() {
        let perf = FileRole::Performance {
            test_label: "kt0925".into(),
            rpm: Some(4001),
        };
        assert_eq!(perf.rpm(), Some(4001));
        assert_eq!(perf.kind(), RoleKind::Performance);
        assert_eq!(FileRole::Geometry.rpm(), None);
        assert_eq!(
            FileRole::Static { test_label: None }.kind(),
            RoleKind::Static
        );
    }

    #[test]
    fn disk_name_restores_stripped_extension() {
        let data = FileRef::new("volume-1", "apc_9x6_geom", Some("txt".into()));
        assert_eq!(data.disk_name(), "apc_9x6_geom.txt");
        assert_eq!(data.to_string(), "volume-1/apc_9x6_geom.txt");

        let image = FileRef::new("volume-1", "apc_9x6_front.jpg", Some("jpg".into()));
        assert_eq!(image.disk_name(), "apc_9x6_front.jpg");

        let bare = FileRef::new("volume-2", "readme", None);
        assert_eq!(bare.disk_name(), "readme");
    }

    #[test]
    fn record_exposes_exactly_one_of_role_or_view() {
        let record = FlatFileRecord {
            volume: "volume-1".into(),
            volume_number: 1,
            filename: "apc_9x6_front.jpg".into(),
            extension: Some("jpg".into()),
            traits: PropellerTraits::new("apc"),
            kind: FileKind::Image(ViewDirection::Front),
        };
        assert_eq!(record.view(), Some(ViewDirection::Front));
        assert!(record.role().is_none());
    }
}

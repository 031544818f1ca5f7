use std::fmt::{self, Display, Formatter};

use crate::files::{FileRef, RoleKind};
use crate::ids::CanonicalId;
use crate::propeller::PropellerTraits;

/// One performance run of a propeller at a single RPM.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceFile {
    pub rpm: Option<u32>,
    pub test_label: String,
    pub file: FileRef,
}

/// Every file that belongs to one physical propeller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropellerRecord {
    pub id: CanonicalId,
    /// Volume of the first file seen for this propeller.
    pub volume: String,
    pub volume_number: u32,
    pub traits: PropellerTraits,
    /// Encounter order; not re-sorted by RPM.
    pub performance_files: Vec<PerformanceFile>,
    pub static_file: Option<FileRef>,
    pub geometry_file: Option<FileRef>,
    pub thickness_file: Option<FileRef>,
    pub front_image: Option<FileRef>,
    pub side_image: Option<FileRef>,
}

impl PropellerRecord {
    pub fn new(
        id: CanonicalId,
        volume: impl Into<String>,
        volume_number: u32,
        traits: PropellerTraits,
    ) -> Self {
        Self {
            id,
            volume: volume.into(),
            volume_number,
            traits,
            performance_files: Vec::new(),
            static_file: None,
            geometry_file: None,
            thickness_file: None,
            front_image: None,
            side_image: None,
        }
    }

    /// RPM values of the performance runs, in encounter order.
    pub fn rpms(&self) -> Vec<u32> {
        self.performance_files
            .iter()
            .filter_map(|file| file.rpm)
            .collect()
    }

    /// Number of data files (not images) assigned to this record.
    pub fn file_count(&self) -> usize {
        self.performance_files.len()
            + [&self.static_file, &self.geometry_file, &self.thickness_file]
                .iter()
                .filter(|slot| slot.is_some())
                .count()
    }
}

/// Why a scanned file did not make it into any propeller record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DropReason {
    /// Short-form name whose second token is not a known role keyword.
    UnrecognizedRole { token: String },
    /// Tokens ran out before a role keyword (or, for photos, a view
    /// segment) was found.
    MissingRole,
    /// Nothing left to parse after stripping the extension.
    EmptyFilename,
    /// Another file already occupies (or replaced this one in) the same slot.
    DuplicateRole { role: RoleKind, kept: FileRef },
}

impl Display for DropReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnrecognizedRole { token } => {
                write!(f, "unrecognized role keyword '{token}'")
            }
            DropReason::MissingRole => write!(f, "no role token"),
            DropReason::EmptyFilename => write!(f, "empty filename"),
            DropReason::DuplicateRole { role, kept } => {
                write!(f, "duplicate {role} file, kept {kept}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedFile {
    pub volume: String,
    pub filename: String,
    pub reason: DropReason,
}

/// Output of one full index run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    /// Order of first appearance in the scan.
    pub propellers: Vec<PropellerRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dropped: Vec<DroppedFile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unmatched_images: Vec<FileRef>,
    /// Volumes whose data directory does not exist.
    #[cfg_attr(feature = "serde", serde(default))]
    pub volumes_without_data: Vec<String>,
}

impl Catalog {
    pub fn find(&self, id: &str) -> Option<&PropellerRecord> {
        self.propellers.iter().find(|record| record.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.propellers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propellers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PropellerRecord {
        PropellerRecord::new(
            CanonicalId::new(id),
            "volume-1",
            1,
            PropellerTraits::new(id.split('_').next().unwrap_or(id)),
        )
    }

    #[test]
    fn file_count_includes_performance_and_singletons() {
        let mut prop = record("apc_9x6");
        assert_eq!(prop.file_count(), 0);

        prop.performance_files.push(PerformanceFile {
            rpm: Some(4000),
            test_label: "t1".into(),
            file: FileRef::new("volume-1", "apc_9x6_t1_4000", Some("txt".into())),
        });
        prop.performance_files.push(PerformanceFile {
            rpm: None,
            test_label: "t1".into(),
            file: FileRef::new("volume-1", "apc_9x6_t1_x", Some("txt".into())),
        });
        prop.static_file = Some(FileRef::new("volume-1", "apc_9x6_static_t1", None));

        assert_eq!(prop.file_count(), 3);
        assert_eq!(prop.rpms(), vec![4000]);
    }

    #[test]
    fn catalog_find_by_id() {
        let catalog = Catalog {
            propellers: vec![record("apc_9x6"), record("apc_10x7"), record("da4002_5x3")],
            ..Catalog::default()
        };
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find("apc_10x7").is_some());
        assert!(catalog.find("apc_11x7").is_none());
        assert_eq!(
            catalog
                .find("da4002_5x3")
                .map(|r| r.traits.manufacturer.as_str()),
            Some("da4002")
        );
    }

    #[test]
    fn drop_reason_display_is_readable() {
        let reason = DropReason::DuplicateRole {
            role: RoleKind::Geometry,
            kept: FileRef::new("volume-2", "apc_9x6_geom", Some("txt".into())),
        };
        assert_eq!(
            reason.to_string(),
            "duplicate geometry file, kept volume-2/apc_9x6_geom.txt"
        );
        assert_eq!(
            DropReason::UnrecognizedRole {
                token: "blah".into()
            }
            .to_string(),
            "unrecognized role keyword 'blah'"
        );
    }
}

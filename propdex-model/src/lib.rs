//! Core data model definitions shared across propdex crates.
#![allow(missing_docs)]

pub mod catalog;
pub mod files;
pub mod ids;
pub mod propeller;

pub use catalog::{Catalog, DropReason, DroppedFile, PerformanceFile, PropellerRecord};
pub use files::{FileKind, FileRef, FileRole, FlatFileRecord, RoleKind, ViewDirection};
pub use ids::CanonicalId;
pub use propeller::{Orientation, PropellerTraits};

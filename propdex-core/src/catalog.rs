//! Clustering of flat per-file records into one record per physical propeller.

use std::collections::HashMap;

use tracing::debug;

use propdex_model::{
    CanonicalId, Catalog, DropReason, DroppedFile, FileKind, FileRef, FileRole, FlatFileRecord,
    PerformanceFile, PropellerRecord, RoleKind, ViewDirection,
};

use crate::identifier::canonical_id;
use crate::settings::DuplicatePolicy;

/// Outcome of offering a file to an occupied singleton slot.
struct Displaced {
    displaced: FileRef,
    kept: FileRef,
}

fn place(
    slot: &mut Option<FileRef>,
    incoming: FileRef,
    policy: DuplicatePolicy,
) -> Option<Displaced> {
    let Some(existing) = slot.as_ref() else {
        *slot = Some(incoming);
        return None;
    };
    match policy {
        DuplicatePolicy::KeepFirst => Some(Displaced {
            kept: existing.clone(),
            displaced: incoming,
        }),
        DuplicatePolicy::KeepLast => {
            let kept = incoming.clone();
            slot.replace(incoming).map(|displaced| Displaced { displaced, kept })
        }
    }
}

/// Single grouping pass over flat records.
///
/// Data records open propeller groups in first-appearance order; images are
/// held back and joined by identifier once every data record has been seen.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    policy: DuplicatePolicy,
    propellers: Vec<PropellerRecord>,
    by_id: HashMap<CanonicalId, usize>,
    dropped: Vec<DroppedFile>,
    pending_images: Vec<(CanonicalId, ViewDirection, FileRef)>,
}

impl CatalogBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Record a file that never produced a flat record.
    pub fn drop_file(
        &mut self,
        volume: impl Into<String>,
        filename: impl Into<String>,
        reason: DropReason,
    ) {
        self.dropped.push(DroppedFile {
            volume: volume.into(),
            filename: filename.into(),
            reason,
        });
    }

    pub fn push(&mut self, record: FlatFileRecord) {
        let id = canonical_id(&record.traits);
        let file = record.file_ref();
        match record.kind {
            FileKind::Data(role) => {
                let index = match self.by_id.get(&id) {
                    Some(index) => *index,
                    None => {
                        let index = self.propellers.len();
                        self.propellers.push(PropellerRecord::new(
                            id.clone(),
                            record.volume,
                            record.volume_number,
                            record.traits,
                        ));
                        self.by_id.insert(id, index);
                        index
                    }
                };
                self.assign(index, role, file);
            }
            FileKind::Image(view) => self.pending_images.push((id, view, file)),
        }
    }

    fn assign(&mut self, index: usize, role: FileRole, file: FileRef) {
        let kind = role.kind();
        let record = &mut self.propellers[index];
        let slot = match role {
            FileRole::Performance { test_label, rpm } => {
                record.performance_files.push(PerformanceFile {
                    rpm,
                    test_label,
                    file,
                });
                return;
            }
            FileRole::Static { .. } => &mut record.static_file,
            FileRole::Geometry => &mut record.geometry_file,
            FileRole::Thickness => &mut record.thickness_file,
        };

        if let Some(Displaced { displaced, kept }) = place(slot, file, self.policy) {
            debug!(id = %record.id, role = %kind, file = %displaced, "duplicate role file");
            self.dropped.push(DroppedFile {
                volume: displaced.volume,
                filename: displaced.filename,
                reason: DropReason::DuplicateRole { role: kind, kept },
            });
        }
    }

    /// Join held-back images and produce the catalog.
    pub fn finish(mut self) -> Catalog {
        let mut unmatched_images = Vec::new();
        for (id, view, file) in std::mem::take(&mut self.pending_images) {
            let Some(&index) = self.by_id.get(&id) else {
                debug!(%id, file = %file, "photo matches no propeller");
                unmatched_images.push(file);
                continue;
            };
            let record = &mut self.propellers[index];
            let slot = match view {
                ViewDirection::Front => &mut record.front_image,
                ViewDirection::Side => &mut record.side_image,
            };
            if let Some(Displaced { displaced, kept }) = place(slot, file, self.policy) {
                debug!(%id, %view, dropped = %displaced, %kept, "duplicate photo");
            }
        }

        Catalog {
            propellers: self.propellers,
            dropped: self.dropped,
            unmatched_images,
            volumes_without_data: Vec::new(),
        }
    }
}

/// Cluster `records` under `policy` in one pass.
pub fn assemble(
    records: impl IntoIterator<Item = FlatFileRecord>,
    policy: DuplicatePolicy,
) -> Catalog {
    let mut builder = CatalogBuilder::new(policy);
    for record in records {
        builder.push(record);
    }
    builder.finish()
}

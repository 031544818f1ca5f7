use std::path::{Path, PathBuf};

#[cfg(feature = "images")]
use image::DynamicImage;
use tracing::{debug, warn};

use propdex_model::{Catalog, FileRef, PropellerRecord};

use super::table::{Table, load_table};
use crate::error::{IndexError, Result};
use crate::settings::ScanSettings;

/// One propeller with every table and photo read from disk.
///
/// A field is `None` when the record has no such file or the file could not
/// be read; read failures are logged, never returned.
#[derive(Debug, Clone)]
pub struct LoadedPropeller {
    pub record: PropellerRecord,
    /// `(rpm, table)` per performance run, in record order.
    pub performance: Vec<(Option<u32>, Table)>,
    pub static_table: Option<Table>,
    pub geometry: Option<Table>,
    pub thickness: Option<Table>,
    #[cfg(feature = "images")]
    pub front_image: Option<DynamicImage>,
    #[cfg(feature = "images")]
    pub side_image: Option<DynamicImage>,
}

/// Resolves [`FileRef`]s under a dataset root and reads them.
#[derive(Debug, Clone)]
pub struct PropellerLoader {
    root: PathBuf,
    data_dir: String,
    photos_dir: String,
}

impl PropellerLoader {
    pub fn new(root: impl Into<PathBuf>, settings: &ScanSettings) -> Self {
        Self {
            root: root.into(),
            data_dir: settings.data_dir.clone(),
            photos_dir: settings.photos_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self, file: &FileRef) -> PathBuf {
        self.root
            .join(&file.volume)
            .join(&self.data_dir)
            .join(file.disk_name())
    }

    pub fn image_path(&self, file: &FileRef) -> PathBuf {
        self.root
            .join(&file.volume)
            .join(&self.photos_dir)
            .join(file.disk_name())
    }

    pub fn load(&self, record: &PropellerRecord) -> LoadedPropeller {
        debug!(id = %record.id, files = record.file_count(), "loading propeller");

        let performance = record
            .performance_files
            .iter()
            .filter_map(|run| self.table(&run.file).map(|table| (run.rpm, table)))
            .collect();

        LoadedPropeller {
            performance,
            static_table: record.static_file.as_ref().and_then(|f| self.table(f)),
            geometry: record.geometry_file.as_ref().and_then(|f| self.table(f)),
            thickness: record.thickness_file.as_ref().and_then(|f| self.table(f)),
            #[cfg(feature = "images")]
            front_image: record.front_image.as_ref().and_then(|f| self.image(f)),
            #[cfg(feature = "images")]
            side_image: record.side_image.as_ref().and_then(|f| self.image(f)),
            record: record.clone(),
        }
    }

    /// Look up `id` in `catalog` and load it.
    pub fn load_by_id(&self, catalog: &Catalog, id: &str) -> Result<LoadedPropeller> {
        catalog
            .find(id)
            .map(|record| self.load(record))
            .ok_or_else(|| IndexError::NotFound(id.to_string()))
    }

    fn table(&self, file: &FileRef) -> Option<Table> {
        let path = self.data_path(file);
        load_table(&path)
            .inspect_err(|err| warn!(file = %path.display(), error = %err, "failed to load table"))
            .ok()
    }

    #[cfg(feature = "images")]
    fn image(&self, file: &FileRef) -> Option<DynamicImage> {
        let path = self.image_path(file);
        super::image::load_image(&path)
            .inspect_err(|err| warn!(file = %path.display(), error = %err, "failed to load image"))
            .ok()
    }
}

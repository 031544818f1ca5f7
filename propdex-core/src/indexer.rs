use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use propdex_model::{Catalog, DropReason, FlatFileRecord};

use crate::catalog::CatalogBuilder;
use crate::error::Result;
use crate::parser::FilenameParser;
use crate::scanner::{FileSystem, RealFs, VolumeListing, VolumeScanner};
use crate::settings::{DuplicatePolicy, ParserSettings, ScanSettings};

/// Flat records and parse failures of one volume.
#[derive(Debug, Default)]
pub struct ParsedVolume {
    pub records: Vec<FlatFileRecord>,
    /// `(filename, reason)` for every file the parser rejected.
    pub rejected: Vec<(String, DropReason)>,
}

/// Scanner, filename parser and clustering assembler wired into one run.
#[derive(Debug, Clone)]
pub struct PropellerIndexer<F = RealFs> {
    scanner: VolumeScanner<F>,
    parser: FilenameParser,
    duplicate_policy: DuplicatePolicy,
}

impl PropellerIndexer<RealFs> {
    pub fn new(scan: ScanSettings, parser: &ParserSettings) -> Result<Self> {
        Self::with_fs(RealFs::new(), scan, parser)
    }
}

impl<F: FileSystem> PropellerIndexer<F> {
    pub fn with_fs(fs: F, scan: ScanSettings, parser: &ParserSettings) -> Result<Self> {
        let parser = FilenameParser::with_settings(parser)
            .with_image_extensions(&scan.image_extensions);
        Ok(Self {
            scanner: VolumeScanner::with_fs(fs, scan)?,
            parser,
            duplicate_policy: DuplicatePolicy::default(),
        })
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn scanner(&self) -> &VolumeScanner<F> {
        &self.scanner
    }

    pub fn parser(&self) -> &FilenameParser {
        &self.parser
    }

    /// Scan `root`, parse every listed file and cluster the results.
    ///
    /// Only structural problems with the root are errors; individual files
    /// that cannot be parsed end up in [`Catalog::dropped`].
    pub fn index(&self, root: &Path) -> Result<Catalog> {
        info!(root = %root.display(), "indexing propeller dataset");
        let listings = self.scanner.scan(root)?;

        let parsed: Vec<ParsedVolume> = if self.scanner.settings().parallel {
            listings
                .par_iter()
                .map(|listing| self.parse_listing(listing))
                .collect()
        } else {
            listings
                .iter()
                .map(|listing| self.parse_listing(listing))
                .collect()
        };

        let mut builder = CatalogBuilder::new(self.duplicate_policy);
        for (listing, volume) in listings.iter().zip(parsed) {
            for (filename, reason) in volume.rejected {
                warn!(volume = %listing.volume.name, file = %filename, %reason, "dropping file");
                builder.drop_file(listing.volume.name.clone(), filename, reason);
            }
            for record in volume.records {
                builder.push(record);
            }
        }
        let mut catalog = builder.finish();
        catalog.volumes_without_data = listings
            .iter()
            .filter(|listing| listing.data_dir_missing)
            .map(|listing| listing.volume.name.clone())
            .collect();

        for dropped in catalog
            .dropped
            .iter()
            .filter(|dropped| matches!(dropped.reason, DropReason::DuplicateRole { .. }))
        {
            warn!(
                volume = %dropped.volume,
                file = %dropped.filename,
                reason = %dropped.reason,
                "dropping file"
            );
        }

        info!(
            volumes = listings.len(),
            propellers = catalog.len(),
            dropped = catalog.dropped.len(),
            unmatched_images = catalog.unmatched_images.len(),
            missing_data_dirs = catalog.volumes_without_data.len(),
            "index complete"
        );
        Ok(catalog)
    }

    /// Parse every file of one listing; data files first, then photos.
    pub fn parse_listing(&self, listing: &VolumeListing) -> ParsedVolume {
        let mut parsed = ParsedVolume::default();
        let volume = &listing.volume;

        for file in &listing.data_files {
            match self.parser.parse_data_file(volume, file) {
                Ok(record) => {
                    debug!(volume = %volume.name, file = %file.filename, kind = ?record.kind, "parsed data file");
                    parsed.records.push(record);
                }
                Err(reason) => parsed.rejected.push((file.filename.clone(), reason)),
            }
        }
        for file in &listing.image_files {
            match self.parser.parse_image_file(volume, file) {
                Ok(record) => parsed.records.push(record),
                Err(reason) => {
                    // photos are optional; a bad photo name never drops data
                    debug!(volume = %volume.name, file = %file.filename, %reason, "unparseable photo name");
                }
            }
        }
        parsed
    }
}

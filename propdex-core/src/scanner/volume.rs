use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info, warn};

use super::fs::{FileSystem, RealFs};
use crate::error::{IndexError, Result};
use crate::settings::ScanSettings;

/// A top-level dataset directory, one per published data release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub name: String,
    pub number: u32,
    pub path: PathBuf,
}

/// A file name found inside a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Stem for data files, full file name for images.
    pub filename: String,
    pub extension: Option<String>,
}

/// Everything the scanner found inside one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeListing {
    pub volume: Volume,
    pub data_files: Vec<ScannedFile>,
    pub image_files: Vec<ScannedFile>,
    /// The volume had no readable data directory and contributes nothing.
    pub data_dir_missing: bool,
}

/// Compile a volume pattern and make sure it captures the volume number.
pub fn compile_volume_pattern(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|err| IndexError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })?;
    if regex.captures_len() < 2 {
        return Err(IndexError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern needs a capture group for the volume number".to_string(),
        });
    }
    Ok(regex)
}

/// Enumerates volumes under a dataset root and lists their data and photo files.
#[derive(Debug, Clone)]
pub struct VolumeScanner<F = RealFs> {
    fs: F,
    settings: ScanSettings,
    volume_regex: Regex,
}

impl VolumeScanner<RealFs> {
    pub fn new(settings: ScanSettings) -> Result<Self> {
        Self::with_fs(RealFs::new(), settings)
    }
}

impl<F: FileSystem> VolumeScanner<F> {
    pub fn with_fs(fs: F, settings: ScanSettings) -> Result<Self> {
        let volume_regex = compile_volume_pattern(&settings.volume_pattern)?;
        Ok(Self {
            fs,
            settings,
            volume_regex,
        })
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Parse the volume number out of a directory name, if it is a volume.
    pub fn volume_number(&self, dir_name: &str) -> Option<u32> {
        self.volume_regex
            .captures(dir_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Find every volume directory directly under `root`, ordered by number.
    pub fn discover_volumes(&self, root: &Path) -> Result<Vec<Volume>> {
        if !self.fs.path_exists(root) || !self.fs.is_dir(root) {
            return Err(IndexError::RootNotFound(root.to_path_buf()));
        }

        let mut volumes = Vec::new();
        for child in self.fs.read_dir(root)? {
            let Some(name) = child.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !self.fs.is_dir(&child) {
                continue;
            }
            match self.volume_number(name) {
                Some(number) => volumes.push(Volume {
                    name: name.to_string(),
                    number,
                    path: child.clone(),
                }),
                None => debug!(dir = %child.display(), "skipping non-volume directory"),
            }
        }

        if volumes.is_empty() {
            return Err(IndexError::NoVolumes(root.to_path_buf()));
        }
        volumes.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
        Ok(volumes)
    }

    /// List the data and photo files of one volume. Never fails: a missing
    /// data directory is reported and yields an empty listing.
    pub fn list_volume(&self, volume: &Volume) -> VolumeListing {
        let data_path = volume.path.join(&self.settings.data_dir);
        let photos_path = volume.path.join(&self.settings.photos_dir);

        let (data_files, data_dir_missing) =
            match self.list_matching(&data_path, &self.settings.data_extensions, true) {
                Some(files) => (files, false),
                None => {
                    warn!(
                        volume = %volume.name,
                        dir = %data_path.display(),
                        "volume has no data directory, skipping"
                    );
                    (Vec::new(), true)
                }
            };

        let image_files = match self.list_matching(
            &photos_path,
            &self.settings.image_extensions,
            false,
        ) {
            Some(files) => files,
            None => {
                debug!(volume = %volume.name, "volume has no photos directory");
                Vec::new()
            }
        };

        info!(
            volume = %volume.name,
            data_files = data_files.len(),
            image_files = image_files.len(),
            "listed volume"
        );

        VolumeListing {
            volume: volume.clone(),
            data_files,
            image_files,
            data_dir_missing,
        }
    }

    /// Discover all volumes and list each one.
    pub fn scan(&self, root: &Path) -> Result<Vec<VolumeListing>> {
        let volumes = self.discover_volumes(root)?;
        let listings = if self.settings.parallel {
            volumes
                .par_iter()
                .map(|volume| self.list_volume(volume))
                .collect()
        } else {
            volumes
                .iter()
                .map(|volume| self.list_volume(volume))
                .collect()
        };
        Ok(listings)
    }

    fn list_matching(
        &self,
        dir: &Path,
        extensions: &[String],
        strip_extension: bool,
    ) -> Option<Vec<ScannedFile>> {
        if !self.fs.is_dir(dir) {
            return None;
        }
        let children = match self.fs.read_dir(dir) {
            Ok(children) => children,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to list directory");
                return None;
            }
        };

        let mut files: Vec<ScannedFile> = children
            .iter()
            .filter(|path| self.fs.metadata(path).map(|md| md.is_file).unwrap_or(false))
            .filter_map(|path| scanned_file(path, extensions, strip_extension))
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Some(files)
    }
}

fn scanned_file(path: &Path, extensions: &[String], strip_extension: bool) -> Option<ScannedFile> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        debug!(path = %path.display(), "skipping non UTF-8 file name");
        return None;
    };
    if name.starts_with('.') {
        return None;
    }
    // an empty allow-list accepts every file but strips nothing, so
    // `apcsf_9x4.7_static` is not split at its pitch
    let extension = match name.rsplit_once('.') {
        Some((_, ext))
            if extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)) =>
        {
            Some(ext.to_string())
        }
        _ if extensions.is_empty() => None,
        _ => return None,
    };

    let filename = match (&extension, strip_extension) {
        (Some(_), true) => name.rsplit_once('.').map_or(name, |(stem, _)| stem),
        _ => name,
    }
    .to_string();
    Some(ScannedFile {
        filename,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::fs::InMemoryFs;

    fn fixture() -> InMemoryFs {
        let mut fs = InMemoryFs::new();
        fs.add_files(
            "/db/volume-2/data",
            &["apc_9x6_geom.txt", "apc_9x6_static_t1.TXT", "notes.md"],
        );
        fs.add_files(
            "/db/volume-2/prop_photos",
            &["apc_9x6_front.jpg", "apc_9x6_side.png", "thumbs.db"],
        );
        fs.add_files("/db/volume-1/data", &["da4002_5x3.75_geom.txt"]);
        fs.add_dir("/db/volume-3");
        fs.add_dir("/db/misc");
        fs.add_file("/db/volume-9", 0);
        fs
    }

    fn scanner(fs: InMemoryFs) -> VolumeScanner<InMemoryFs> {
        VolumeScanner::with_fs(fs, ScanSettings::default()).unwrap()
    }

    #[test]
    fn volume_number_accepts_common_spellings() {
        let scanner = scanner(InMemoryFs::new());
        assert_eq!(scanner.volume_number("volume-1"), Some(1));
        assert_eq!(scanner.volume_number("Volume 2"), Some(2));
        assert_eq!(scanner.volume_number("UIUC-propDB-vol-3"), Some(3));
        assert_eq!(scanner.volume_number("vol4"), Some(4));
        assert_eq!(scanner.volume_number("data"), None);
        assert_eq!(scanner.volume_number("volume-x"), None);
    }

    #[test]
    fn discover_volumes_sorts_by_number_and_skips_files() {
        let scanner = scanner(fixture());
        let volumes = scanner.discover_volumes(Path::new("/db")).unwrap();
        let names: Vec<_> = volumes.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["volume-1", "volume-2", "volume-3"]);
        assert_eq!(volumes[1].number, 2);
    }

    #[test]
    fn listing_strips_data_extensions_and_keeps_image_names() {
        let scanner = scanner(fixture());
        let volumes = scanner.discover_volumes(Path::new("/db")).unwrap();
        let listing = scanner.list_volume(&volumes[1]);

        let data: Vec<_> = listing.data_files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(data, vec!["apc_9x6_geom", "apc_9x6_static_t1"]);
        assert_eq!(listing.data_files[1].extension.as_deref(), Some("TXT"));

        let images: Vec<_> = listing.image_files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(images, vec!["apc_9x6_front.jpg", "apc_9x6_side.png"]);
        assert!(!listing.data_dir_missing);
    }

    #[test]
    fn empty_extension_list_keeps_full_names() {
        let mut fs = InMemoryFs::new();
        fs.add_files(
            "/db/volume-1/data",
            &["apcsf_9x4.7_static_kt0925", "apc_9x6_geom.txt"],
        );
        fs.add_files("/db/volume-1/prop_photos", &["apcsf_9x4.7_front"]);
        let settings = ScanSettings {
            data_extensions: vec![],
            image_extensions: vec![],
            ..ScanSettings::default()
        };
        let scanner = VolumeScanner::with_fs(fs, settings).unwrap();
        let listing = &scanner.scan(Path::new("/db")).unwrap()[0];

        assert_eq!(
            listing.data_files,
            vec![
                ScannedFile {
                    filename: "apc_9x6_geom.txt".into(),
                    extension: None,
                },
                ScannedFile {
                    filename: "apcsf_9x4.7_static_kt0925".into(),
                    extension: None,
                },
            ]
        );
        assert_eq!(listing.image_files[0].filename, "apcsf_9x4.7_front");
        assert_eq!(listing.image_files[0].extension, None);
    }

    #[test]
    fn missing_directories_yield_empty_listings() {
        let scanner = scanner(fixture());
        let listings = scanner.scan(Path::new("/db")).unwrap();

        let first = &listings[0];
        assert_eq!(first.data_files.len(), 1);
        assert!(first.image_files.is_empty());

        let third = &listings[2];
        assert!(third.data_dir_missing);
        assert!(third.data_files.is_empty());
    }

    #[test]
    fn structural_failures_are_fatal() {
        let scanner = scanner(fixture());
        assert!(matches!(
            scanner.discover_volumes(Path::new("/elsewhere")),
            Err(IndexError::RootNotFound(_))
        ));

        let mut empty = InMemoryFs::new();
        empty.add_dir("/empty/misc");
        let scanner = VolumeScanner::with_fs(empty, ScanSettings::default()).unwrap();
        assert!(matches!(
            scanner.discover_volumes(Path::new("/empty")),
            Err(IndexError::NoVolumes(_))
        ));
    }

    #[test]
    fn parallel_scan_matches_sequential_order() {
        let sequential = scanner(fixture()).scan(Path::new("/db")).unwrap();
        let parallel = VolumeScanner::with_fs(
            fixture(),
            ScanSettings {
                parallel: true,
                ..ScanSettings::default()
            },
        )
        .unwrap()
        .scan(Path::new("/db"))
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn volume_pattern_requires_capture_group() {
        assert!(compile_volume_pattern(r"^volume-\d+$").is_err());
        assert!(compile_volume_pattern(r"^volume-(\d+$").is_err());
        assert!(compile_volume_pattern(r"^volume-(\d+)$").is_ok());
    }
}

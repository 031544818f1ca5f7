pub mod fs;
pub mod volume;

pub use fs::{FileSystem, FsMetadata, InMemoryFs, RealFs};
pub use volume::{ScannedFile, Volume, VolumeListing, VolumeScanner, compile_volume_pattern};

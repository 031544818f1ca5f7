use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::error::Result;

/// Format hint from the file extension: `png` decodes as PNG, anything else
/// as JPEG.
pub fn format_hint(path: &Path) -> ImageFormat {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    }
}

/// Decode the photograph at `path`.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory_with_format(&bytes, format_hint(path))?;
    Ok(image)
}

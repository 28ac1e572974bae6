//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG into a 2-D scalar `NdImage`
//!   with samples in [0, 1].
//! - `save_grayscale_normalized`: write a 2-D scalar `NdImage` to a PNG,
//!   rescaling by its maximum.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{NdImage, NdImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit grayscale and then to f32 in
/// [0, 1]. Axis 0 is the image column, axis 1 the row.
pub fn load_grayscale_image(path: &Path) -> Result<NdImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw().into_iter().map(|v| v as f32 / 255.0).collect();
    NdImage::from_vec(&[width, height], 1, data).map_err(|e| e.to_string())
}

/// Save a 2-D scalar image to a grayscale PNG, mapping `[0, max]` to
/// `[0, 255]`. An all-zero image is written black.
pub fn save_grayscale_normalized(image: &NdImage, path: &Path) -> Result<(), String> {
    if image.dimension() != 2 || image.components() != 1 {
        return Err(format!(
            "Cannot save {}-D image with {} components as grayscale PNG",
            image.dimension(),
            image.components()
        ));
    }
    ensure_parent_dir(path)?;
    let (w, h) = (image.shape()[0], image.shape()[1]);
    let max = image.samples().iter().copied().fold(0.0f32, f32::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let mut out = GrayImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let v = (image.get(&[x, y]) * scale).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

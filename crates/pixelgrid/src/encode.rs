//! Binary-threshold texture encoding.
//!
//! Turns a grid into an 8-bit grayscale PNG plus a JSON metadata sidecar.
//! Elements exactly equal to one become full intensity (255), everything
//! else becomes 0; the result is a binary mask image, not a general range
//! mapping. An integer scale factor upsizes the image by nearest-neighbor
//! resampling while the metadata keeps the pre-scale logical dimensions.

use std::ffi::OsStr;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageOutputFormat};
use serde::{Deserialize, Serialize};

use crate::error::{PixelGridError, Result};
use crate::grid::PixelGrid;

/// Dimension and scale metadata written alongside an encoded texture.
///
/// `width` and `height` are the pre-scale logical grid dimensions, not the
/// pixel dimensions of the written image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureMetadata {
    pub width: usize,
    pub height: usize,
    pub scale: u32,
}

/// An encoded texture, fully materialized in memory.
///
/// Both artifacts are produced before anything touches disk so a failed
/// encode can never leave a half-written image/metadata pair behind.
#[derive(Debug, Clone)]
pub struct EncodedTexture {
    /// PNG bytes, 8-bit grayscale, `(H*scale, W*scale)` pixels.
    pub png: Vec<u8>,
    /// Pre-scale dimensions and the applied scale factor.
    pub metadata: TextureMetadata,
}

/// Encode a grid as a thresholded grayscale PNG.
///
/// For `scale == 1` the image has the grid's shape; for `scale > 1` it is
/// resized to `(H*scale, W*scale)` by nearest-neighbor interpolation, so
/// every output pixel is still either 0 or 255.
pub fn encode(grid: &PixelGrid, scale: u32) -> Result<EncodedTexture> {
    if scale == 0 {
        return Err(PixelGridError::InvalidScale(scale));
    }

    let (height, width) = grid.shape();
    let (base_w, base_h, scaled_w, scaled_h) = pixel_dimensions(height, width, scale).ok_or(
        PixelGridError::OversizedImage {
            height,
            width,
            scale,
        },
    )?;

    let intensities = grid.to_intensity();
    // Grids loaded from a fortran_order container are column-major in
    // memory; the raster buffer needs row-major bytes.
    let raw = intensities.as_standard_layout().into_owned().into_raw_vec();

    let image = GrayImage::from_raw(base_w, base_h, raw)
        .ok_or(PixelGridError::InvalidIntensityBuffer { height, width })?;

    let image = if scale > 1 {
        imageops::resize(&image, scaled_w, scaled_h, FilterType::Nearest)
    } else {
        image
    };

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

    Ok(EncodedTexture {
        png,
        metadata: TextureMetadata {
            width,
            height,
            scale,
        },
    })
}

/// Pixel dimensions of the base and scaled image, or `None` when the grid
/// does not fit the image's `u32` pixel range.
fn pixel_dimensions(
    height: usize,
    width: usize,
    scale: u32,
) -> Option<(u32, u32, u32, u32)> {
    let base_w = u32::try_from(width).ok()?;
    let base_h = u32::try_from(height).ok()?;
    let scaled_w = base_w.checked_mul(scale)?;
    let scaled_h = base_h.checked_mul(scale)?;
    Some((base_w, base_h, scaled_w, scaled_h))
}

/// Path of the metadata sidecar for a given image path:
/// the image file name without its extension, suffixed with `_meta.json`.
pub fn metadata_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .unwrap_or_else(|| OsStr::new("texture"));
    let mut name = stem.to_os_string();
    name.push("_meta.json");
    image_path.with_file_name(name)
}

/// Persist an encoded texture: the PNG at `image_path` and the metadata
/// sidecar next to it.
///
/// If the sidecar cannot be written the freshly written image is removed
/// again, so the pair is never left inconsistent on disk. Returns the
/// sidecar path.
pub fn write_texture(image_path: &Path, texture: &EncodedTexture) -> Result<PathBuf> {
    let json = serde_json::to_vec_pretty(&texture.metadata)?;

    std::fs::write(image_path, &texture.png).map_err(|source| PixelGridError::Write {
        path: image_path.into(),
        source,
    })?;

    let sidecar = metadata_path(image_path);
    if let Err(source) = std::fs::write(&sidecar, &json) {
        let _ = std::fs::remove_file(image_path);
        return Err(PixelGridError::Write {
            path: sidecar,
            source,
        });
    }

    Ok(sidecar)
}

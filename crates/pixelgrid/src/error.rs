//! Error types for pixel grid operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, transforming, or exporting a grid.
#[derive(Error, Debug)]
pub enum PixelGridError {
    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file to disk.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The array in the container file is not 2-D.
    #[error("{path}: expected a 2-D array, found rank {rank}")]
    WrongRank { path: PathBuf, rank: usize },

    /// The array's element type is outside the supported set.
    #[error(
        "{path}: unsupported npy payload (supported element types: \
         u8, i8, i32, i64, f32, f64): {source}"
    )]
    UnsupportedElementType {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// Failed to serialize the array into the container format.
    #[error("failed to save array to {path}: {source}")]
    NpyWrite {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    /// Pad requires at least one row and one column.
    #[error("cannot pad a grid with a zero-sized dimension (shape {height}x{width})")]
    EmptyGrid { height: usize, width: usize },

    /// The nearest-neighbor scale factor must be a positive integer.
    #[error("scale factor must be at least 1, got {0}")]
    InvalidScale(u32),

    /// The scaled image would not fit the image's pixel range.
    #[error("grid of shape {height}x{width} at scale {scale} exceeds the supported image size")]
    OversizedImage {
        height: usize,
        width: usize,
        scale: u32,
    },

    /// The intensity buffer did not form a valid image.
    #[error("intensity buffer of shape {height}x{width} does not form an image")]
    InvalidIntensityBuffer { height: usize, width: usize },

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    ImageEncode(#[from] image::ImageError),

    /// Metadata serialization failed.
    #[error("failed to serialize texture metadata: {0}")]
    MetadataEncode(#[from] serde_json::Error),
}

/// Result type for pixel grid operations.
pub type Result<T> = std::result::Result<T, PixelGridError>;

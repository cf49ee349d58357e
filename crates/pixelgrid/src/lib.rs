//! 2-D pixel grid transformations over NumPy `.npy` container files.
//!
//! This crate implements the three stateless shape/encode operations used by
//! the texture tooling:
//!
//! - **Trim**: drop the last row and last column, `(H, W)` → `(H-1, W-1)`
//! - **Pad**: insert symmetric zero-filled border columns,
//!   `(H, W)` → `(H, W+2k)`
//! - **Encode**: binary-threshold the grid to an 8-bit grayscale image
//!   (`value == 1` → 255, anything else → 0), optionally upscale it with
//!   nearest-neighbor resampling, and pair it with a JSON metadata sidecar
//!
//! Grids are loaded from and saved to `.npy` files. The element type is fixed
//! when the file is loaded and carried explicitly as an [`ElementType`] tag;
//! Trim and Pad preserve it exactly.
//!
//! All operations are pure and synchronous. Each call owns its input and
//! output grids for its duration; there is no shared state.

pub mod encode;
pub mod error;
pub mod grid;
pub mod npy;

pub use encode::{encode, metadata_path, write_texture, EncodedTexture, TextureMetadata};
pub use error::{PixelGridError, Result};
pub use grid::{ElementType, PixelGrid};
pub use npy::{load_grid, save_grid};

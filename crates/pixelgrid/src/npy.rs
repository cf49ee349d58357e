//! NumPy `.npy` container I/O.
//!
//! The container format itself belongs to `ndarray-npy`; this module only
//! adds the two policies the tools need on top of it: the element type is
//! sniffed at load time by attempting each supported dtype in turn, and the
//! array must be rank 2.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use ndarray::{Array2, ArrayD, Ix2};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};

use crate::error::{PixelGridError, Result};
use crate::grid::PixelGrid;

/// Load a 2-D grid from a `.npy` file, fixing the element type from the
/// file's dtype descriptor.
///
/// Fails with [`PixelGridError::WrongRank`] when the stored array is not
/// rank 2, and with [`PixelGridError::UnsupportedElementType`] when its dtype
/// is outside the supported set.
pub fn load_grid(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| PixelGridError::Read {
        path: path.into(),
        source,
    })?;

    // Only the dtype actually stored in the header parses; every other
    // attempt fails on the descriptor and we move on to the next candidate.
    macro_rules! try_dtype {
        ($ty:ty, $variant:ident) => {
            match ArrayD::<$ty>::read_npy(Cursor::new(&bytes)) {
                Ok(arr) => return into_rank2(path, arr).map(PixelGrid::$variant),
                Err(err) => err,
            }
        };
    }

    let _ = try_dtype!(u8, U8);
    let _ = try_dtype!(i8, I8);
    let _ = try_dtype!(i32, I32);
    let _ = try_dtype!(i64, I64);
    let _ = try_dtype!(f32, F32);
    let last = try_dtype!(f64, F64);

    Err(PixelGridError::UnsupportedElementType {
        path: path.into(),
        source: last,
    })
}

/// Save a grid to a `.npy` file, preserving its element type.
pub fn save_grid(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PixelGridError::Write {
        path: path.into(),
        source,
    })?;
    let writer = BufWriter::new(file);

    match grid {
        PixelGrid::U8(arr) => arr.write_npy(writer),
        PixelGrid::I8(arr) => arr.write_npy(writer),
        PixelGrid::I32(arr) => arr.write_npy(writer),
        PixelGrid::I64(arr) => arr.write_npy(writer),
        PixelGrid::F32(arr) => arr.write_npy(writer),
        PixelGrid::F64(arr) => arr.write_npy(writer),
    }
    .map_err(|source| PixelGridError::NpyWrite {
        path: path.into(),
        source,
    })
}

fn into_rank2<T>(path: &Path, arr: ArrayD<T>) -> Result<Array2<T>> {
    let rank = arr.ndim();
    arr.into_dimensionality::<Ix2>()
        .map_err(|_| PixelGridError::WrongRank {
            path: path.into(),
            rank,
        })
}

//! The in-memory pixel grid and its shape transformations.
//!
//! A [`PixelGrid`] is a rectangular 2-D array whose element type was fixed
//! when the container file was loaded. The type is carried as an explicit
//! enum variant rather than resolved implicitly, so Trim and Pad can
//! guarantee the output element type equals the input element type exactly.

use ndarray::{s, Array2};
use num_traits::{One, Zero};

use crate::error::{PixelGridError, Result};

/// Element type tag for a [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    I8,
    I32,
    I64,
    F32,
    F64,
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementType::U8 => "u8",
            ElementType::I8 => "i8",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// A rectangular 2-D array of numeric values with a fixed element type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelGrid {
    U8(Array2<u8>),
    I8(Array2<i8>),
    I32(Array2<i32>),
    I64(Array2<i64>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

/// Run `$body` against the inner array, whatever its element type.
macro_rules! for_grid {
    ($grid:expr, $arr:ident => $body:expr) => {
        match $grid {
            PixelGrid::U8($arr) => $body,
            PixelGrid::I8($arr) => $body,
            PixelGrid::I32($arr) => $body,
            PixelGrid::I64($arr) => $body,
            PixelGrid::F32($arr) => $body,
            PixelGrid::F64($arr) => $body,
        }
    };
}

/// Map the inner array through `$body`, keeping the element type variant.
macro_rules! map_grid {
    ($grid:expr, $arr:ident => $body:expr) => {
        match $grid {
            PixelGrid::U8($arr) => PixelGrid::U8($body),
            PixelGrid::I8($arr) => PixelGrid::I8($body),
            PixelGrid::I32($arr) => PixelGrid::I32($body),
            PixelGrid::I64($arr) => PixelGrid::I64($body),
            PixelGrid::F32($arr) => PixelGrid::F32($body),
            PixelGrid::F64($arr) => PixelGrid::F64($body),
        }
    };
}

impl PixelGrid {
    /// The element type fixed at load time.
    pub fn element_type(&self) -> ElementType {
        match self {
            PixelGrid::U8(_) => ElementType::U8,
            PixelGrid::I8(_) => ElementType::I8,
            PixelGrid::I32(_) => ElementType::I32,
            PixelGrid::I64(_) => ElementType::I64,
            PixelGrid::F32(_) => ElementType::F32,
            PixelGrid::F64(_) => ElementType::F64,
        }
    }

    /// Grid shape as `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        for_grid!(self, arr => arr.dim())
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.shape().0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// Drop the last row and last column.
    ///
    /// A `(H, W)` grid becomes `(H-1, W-1)`, keeping the elements at row
    /// indices `[0, H-2]` and column indices `[0, W-2]`. A grid with a single
    /// row or column yields a zero-length dimension; that is allowed and does
    /// not fail.
    pub fn trim(&self) -> PixelGrid {
        map_grid!(self, arr => trim_kernel(arr))
    }

    /// Insert `border` zero-filled columns at each horizontal edge.
    ///
    /// A `(H, W)` grid becomes `(H, W + 2*border)`; the original columns sit
    /// at indices `[border, border+W)` in their original order, and the border
    /// columns hold the zero value of the element type. The element type is
    /// preserved exactly.
    pub fn pad(&self, border: usize) -> Result<PixelGrid> {
        let (height, width) = self.shape();
        if height == 0 || width == 0 {
            return Err(PixelGridError::EmptyGrid { height, width });
        }
        Ok(map_grid!(self, arr => pad_kernel(arr, border)))
    }

    /// Map the grid to 8-bit intensities with the binary threshold rule:
    /// an element exactly equal to one becomes 255, everything else 0.
    pub fn to_intensity(&self) -> Array2<u8> {
        for_grid!(self, arr => threshold_kernel(arr))
    }
}

fn trim_kernel<T: Clone>(arr: &Array2<T>) -> Array2<T> {
    let (h, w) = arr.dim();
    arr.slice(s![..h.saturating_sub(1), ..w.saturating_sub(1)])
        .to_owned()
}

fn pad_kernel<T: Clone + Zero>(arr: &Array2<T>, border: usize) -> Array2<T> {
    let (h, w) = arr.dim();
    let mut out = Array2::zeros((h, w + 2 * border));
    out.slice_mut(s![.., border..border + w]).assign(arr);
    out
}

fn threshold_kernel<T: Clone + PartialEq + One>(arr: &Array2<T>) -> Array2<u8> {
    arr.mapv(|v| if v == T::one() { u8::MAX } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn trim_drops_last_row_and_column() {
        let grid = PixelGrid::I32(array![[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let trimmed = grid.trim();
        assert_eq!(trimmed, PixelGrid::I32(array![[1, 2], [4, 5]]));
    }

    #[test]
    fn trim_of_all_ones_4x5_is_all_ones_3x4() {
        let grid = PixelGrid::F32(Array2::ones((4, 5)));
        let trimmed = grid.trim();
        assert_eq!(trimmed.shape(), (3, 4));
        assert_eq!(trimmed, PixelGrid::F32(Array2::ones((3, 4))));
    }

    #[test]
    fn trim_single_row_yields_zero_height() {
        let grid = PixelGrid::U8(array![[1, 2, 3]]);
        let trimmed = grid.trim();
        assert_eq!(trimmed.shape(), (0, 2));
    }

    #[test]
    fn trim_single_column_yields_zero_width() {
        let grid = PixelGrid::F64(array![[1.0], [2.0]]);
        let trimmed = grid.trim();
        assert_eq!(trimmed.shape(), (1, 0));
    }

    #[test]
    fn trim_shrinks_shape_by_exactly_one_each_call() {
        let mut grid = PixelGrid::I64(Array2::zeros((5, 7)));
        for step in 1..=4 {
            grid = grid.trim();
            assert_eq!(grid.shape(), (5 - step, 7 - step));
        }
    }

    #[test]
    fn pad_inserts_zero_columns_on_both_edges() {
        let grid = PixelGrid::I32(array![[1, 2], [3, 4]]);
        let padded = grid.pad(1).unwrap();
        assert_eq!(padded, PixelGrid::I32(array![[0, 1, 2, 0], [0, 3, 4, 0]]));
    }

    #[test]
    fn pad_grows_width_by_twice_the_border() {
        let grid = PixelGrid::F64(Array2::ones((3, 4)));
        let padded = grid.pad(3).unwrap();
        assert_eq!(padded.shape(), (3, 10));
        let PixelGrid::F64(arr) = padded else {
            panic!("element type changed");
        };
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(arr[[row, col]], 0.0);
                assert_eq!(arr[[row, 9 - col]], 0.0);
            }
            for col in 3..7 {
                assert_eq!(arr[[row, col]], 1.0);
            }
        }
    }

    #[test]
    fn pad_preserves_element_type() {
        let grids = [
            PixelGrid::U8(Array2::ones((2, 2))),
            PixelGrid::I8(Array2::ones((2, 2))),
            PixelGrid::I32(Array2::ones((2, 2))),
            PixelGrid::I64(Array2::ones((2, 2))),
            PixelGrid::F32(Array2::ones((2, 2))),
            PixelGrid::F64(Array2::ones((2, 2))),
        ];
        for grid in grids {
            let tag = grid.element_type();
            assert_eq!(grid.pad(1).unwrap().element_type(), tag);
            assert_eq!(grid.trim().element_type(), tag);
        }
    }

    #[test]
    fn pad_of_empty_grid_is_a_shape_error() {
        let grid = PixelGrid::I32(Array2::zeros((0, 3)));
        let err = grid.pad(1).unwrap_err();
        assert!(matches!(
            err,
            PixelGridError::EmptyGrid {
                height: 0,
                width: 3
            }
        ));
    }

    #[test]
    fn threshold_maps_ones_to_full_intensity() {
        let grid = PixelGrid::I32(array![[1, 0], [0, 1]]);
        assert_eq!(grid.to_intensity(), array![[255u8, 0], [0, 255]]);
    }

    #[test]
    fn threshold_discards_values_other_than_one() {
        let grid = PixelGrid::F64(array![[1.0, 2.0, -1.0], [0.5, 1.0, 255.0]]);
        assert_eq!(grid.to_intensity(), array![[255u8, 0, 0], [0, 255, 0]]);
    }
}

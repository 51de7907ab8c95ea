//! Error types for image materialization.
//!
//! Pixel values and channel arithmetic never fail at runtime: invalid data is
//! carried as data (see the `pixmask` crate). The only fallible operations in
//! this workspace are the ones that move pixels between a view and a buffer:
//!
//! - building an [`Image`](crate::image::Image) from raw data
//! - rasterizing a view region into a destination image
//!
//! # Usage
//!
//! ```rust
//! use pixmask_core::{Error, Rect, Result};
//!
//! fn check(region: Rect, cols: u32, rows: u32) -> Result<()> {
//!     if !region.fits_within(cols, rows) {
//!         return Err(Error::invalid_region(region, cols, rows));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(Rect::new(0, 0, 4, 4), 8, 8).is_ok());
//! assert!(check(Rect::new(6, 0, 4, 4), 8, 8).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive for `Display` and `std::error::Error`

use crate::rect::Rect;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while materializing views into image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested region extends beyond the view.
    #[error("region {region} exceeds view bounds {cols}x{rows}")]
    InvalidRegion {
        /// Region that was requested
        region: Rect,
        /// View width in columns
        cols: u32,
        /// View height in rows
        rows: u32,
    },

    /// Destination buffer size does not match the requested region.
    #[error("dimension mismatch: {a_cols}x{a_rows} vs {b_cols}x{b_rows}")]
    DimensionMismatch {
        /// Expected columns
        a_cols: u32,
        /// Expected rows
        a_rows: u32,
        /// Actual columns
        b_cols: u32,
        /// Actual rows
        b_rows: u32,
    },

    /// Destination buffer has a different plane count than the source view.
    #[error("plane mismatch: expected {expected}, got {got}")]
    PlaneMismatch {
        /// Planes in the source view
        expected: u32,
        /// Planes in the destination
        got: u32,
    },

    /// Raw pixel data does not fit the requested dimensions.
    #[error("invalid dimensions: {cols}x{rows}x{planes} ({reason})")]
    InvalidDimensions {
        /// Requested columns
        cols: u32,
        /// Requested rows
        rows: u32,
        /// Requested planes
        planes: u32,
        /// Why the dimensions were rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(region: Rect, cols: u32, rows: u32) -> Self {
        Self::InvalidRegion { region, cols, rows }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_cols: a.0,
            a_rows: a.1,
            b_cols: b.0,
            b_rows: b.1,
        }
    }

    /// Creates an [`Error::PlaneMismatch`] error.
    #[inline]
    pub fn plane_mismatch(expected: u32, got: u32) -> Self {
        Self::PlaneMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(cols: u32, rows: u32, planes: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            cols,
            rows,
            planes,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a region/bounds error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }

    /// Returns `true` if the destination buffer had the wrong shape.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::PlaneMismatch { .. } | Self::InvalidDimensions { .. }
        )
    }
}

//! Rectangular regions used to request view materialization.
//!
//! A [`Rect`] names the block of columns and rows a consumer wants a view to
//! compute. Every plane of the view is materialized for the requested block.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► col
//!   │
//!   │   ┌──────────┐
//!   │   │  region  │
//!   │   └──────────┘
//!   ▼
//!  row
//! ```
//!
//! Left and top edges are inclusive, right and bottom edges exclusive.

use std::fmt;

/// A region defined by origin (x, y) and size (width, height).
///
/// `x` counts columns and `y` counts rows.
///
/// # Example
///
/// ```rust
/// use pixmask_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert!(rect.fits_within(110, 70));
/// assert!(!rect.fits_within(109, 70));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rect {
    /// First column (inclusive)
    pub x: u32,
    /// First row (inclusive)
    pub y: u32,
    /// Width in columns
    pub width: u32,
    /// Height in rows
    pub height: u32,
}

impl Rect {
    /// Creates a new region with the given origin and size.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a region at the origin covering `width x height`.
    ///
    /// ```rust
    /// use pixmask_core::Rect;
    ///
    /// let rect = Rect::from_size(640, 480);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns `true` if the region has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if this region lies inside a `cols x rows` view.
    ///
    /// Computed in 64-bit so a region near `u32::MAX` cannot wrap around.
    #[inline]
    pub const fn fits_within(&self, cols: u32, rows: u32) -> bool {
        self.x as u64 + self.width as u64 <= cols as u64
            && self.y as u64 + self.height as u64 <= rows as u64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

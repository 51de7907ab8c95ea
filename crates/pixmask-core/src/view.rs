//! Lazy, pull-based image views.
//!
//! An [`ImageView`] describes a `cols x rows x planes` grid of pixels without
//! necessarily storing them. Views compose: an adapter wraps a source view and
//! computes its own pixels from the source's on demand. Nothing is computed
//! until a consumer asks for a region through [`rasterize`] (or
//! [`Image::from_view`](crate::image::Image::from_view)).
//!
//! # Materialization
//!
//! ```text
//! view.prepare(region) ──► Prepared view ──► PixelAccessor walk ──► Image
//! ```
//!
//! [`ImageView::prepare`] gives a view the chance to do per-region setup
//! (pull the source region into memory, resolve parameters) before the pixel
//! walk starts. A prepared view answers pixel queries in the same coordinate
//! system as the view it came from, at least for coordinates inside the
//! requested region.
//!
//! # Concurrency
//!
//! [`ImageView::CONCURRENT_ACCESS`] declares that a prepared view may be read
//! from several threads at once. Adapters forward the flag of their source, so
//! the capability is transitive. [`rasterize_par`] only splits work across
//! threads when the flag is set.
//!
//! # Example
//!
//! ```
//! use pixmask_core::prelude::*;
//!
//! let mut img: Image<u8> = Image::new(4, 3, 1);
//! img.set_pixel(2, 1, 0, 9);
//!
//! let mut out: Image<u8> = Image::new(2, 2, 1);
//! rasterize(&img, &mut out, Rect::new(1, 0, 2, 2)).unwrap();
//! assert_eq!(out.pixel(1, 1, 0), 9);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::rect::Rect`] - Region requests
//! - [`crate::error::Error`] - Region and destination validation
//! - [`rayon`] - Row-parallel rasterization (feature `parallel`)
//! - [`tracing`] - Materialization spans

use crate::error::{Error, Result};
use crate::image::Image;
use crate::rect::Rect;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use tracing::debug;

/// A grid of pixels computed on demand.
pub trait ImageView {
    /// Pixel type produced by this view.
    type Pixel: Copy;

    /// The view returned by [`prepare`](Self::prepare).
    type Prepared: ImageView<Pixel = Self::Pixel>;

    /// Whether a prepared view may be read from several threads at once.
    const CONCURRENT_ACCESS: bool = false;

    /// Width in columns.
    fn cols(&self) -> u32;

    /// Height in rows.
    fn rows(&self) -> u32;

    /// Number of planes.
    fn planes(&self) -> u32;

    /// Computes the pixel at (col, row, plane).
    ///
    /// # Panics
    ///
    /// May panic for coordinates outside the view.
    fn pixel(&self, col: u32, row: u32, plane: u32) -> Self::Pixel;

    /// Readies this view for reading `region` (all planes).
    fn prepare(&self, region: Rect) -> Self::Prepared;

    /// The full extent of one plane.
    #[inline]
    fn bounds(&self) -> Rect {
        Rect::from_size(self.cols(), self.rows())
    }

    /// Accessor positioned at (0, 0, 0).
    #[inline]
    fn origin(&self) -> PixelAccessor<'_, Self>
    where
        Self: Sized,
    {
        PixelAccessor::new(self, 0, 0, 0)
    }
}

impl<V: ImageView> ImageView for &V {
    type Pixel = V::Pixel;
    type Prepared = V::Prepared;
    const CONCURRENT_ACCESS: bool = V::CONCURRENT_ACCESS;

    #[inline]
    fn cols(&self) -> u32 {
        (**self).cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        (**self).rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        (**self).planes()
    }

    #[inline]
    fn pixel(&self, col: u32, row: u32, plane: u32) -> V::Pixel {
        (**self).pixel(col, row, plane)
    }

    #[inline]
    fn prepare(&self, region: Rect) -> V::Prepared {
        (**self).prepare(region)
    }
}

/// Cursor for sequential traversal of a view.
///
/// Moving the cursor never touches the view; only [`get`](Self::get) reads a
/// pixel. Moves wrap on `u32` overflow, and reading from a wrapped position
/// is subject to the view's own bounds behavior.
///
/// ```
/// use pixmask_core::prelude::*;
///
/// let img = Image::from_data(3, 1, 1, vec![1u8, 2, 3]).unwrap();
/// let mut acc = img.origin();
/// assert_eq!(acc.get(), 1);
/// assert_eq!(acc.next_col().next_col().get(), 3);
/// assert_eq!(acc.prev_col().get(), 2);
/// ```
pub struct PixelAccessor<'a, V: ImageView> {
    view: &'a V,
    col: u32,
    row: u32,
    plane: u32,
}

impl<V: ImageView> Clone for PixelAccessor<'_, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ImageView> Copy for PixelAccessor<'_, V> {}

impl<V: ImageView> std::fmt::Debug for PixelAccessor<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelAccessor")
            .field("col", &self.col)
            .field("row", &self.row)
            .field("plane", &self.plane)
            .finish()
    }
}

impl<'a, V: ImageView> PixelAccessor<'a, V> {
    /// Creates an accessor at (col, row, plane).
    #[inline]
    pub fn new(view: &'a V, col: u32, row: u32, plane: u32) -> Self {
        Self {
            view,
            col,
            row,
            plane,
        }
    }

    /// Jumps to (col, row, plane).
    #[inline]
    pub fn move_to(&mut self, col: u32, row: u32, plane: u32) -> &mut Self {
        self.col = col;
        self.row = row;
        self.plane = plane;
        self
    }

    /// Current (col, row, plane).
    #[inline]
    pub fn position(&self) -> (u32, u32, u32) {
        (self.col, self.row, self.plane)
    }

    /// One column right.
    #[inline]
    pub fn next_col(&mut self) -> &mut Self {
        self.col = self.col.wrapping_add(1);
        self
    }

    /// One column left.
    #[inline]
    pub fn prev_col(&mut self) -> &mut Self {
        self.col = self.col.wrapping_sub(1);
        self
    }

    /// One row down.
    #[inline]
    pub fn next_row(&mut self) -> &mut Self {
        self.row = self.row.wrapping_add(1);
        self
    }

    /// One row up.
    #[inline]
    pub fn prev_row(&mut self) -> &mut Self {
        self.row = self.row.wrapping_sub(1);
        self
    }

    /// Next plane.
    #[inline]
    pub fn next_plane(&mut self) -> &mut Self {
        self.plane = self.plane.wrapping_add(1);
        self
    }

    /// Previous plane.
    #[inline]
    pub fn prev_plane(&mut self) -> &mut Self {
        self.plane = self.plane.wrapping_sub(1);
        self
    }

    /// Moves by a signed offset on each axis.
    #[inline]
    pub fn advance(&mut self, cols: i32, rows: i32, planes: i32) -> &mut Self {
        self.col = self.col.wrapping_add_signed(cols);
        self.row = self.row.wrapping_add_signed(rows);
        self.plane = self.plane.wrapping_add_signed(planes);
        self
    }

    /// Reads the pixel under the cursor.
    #[inline]
    pub fn get(&self) -> V::Pixel {
        self.view.pixel(self.col, self.row, self.plane)
    }
}

fn check_destination<V: ImageView>(view: &V, dest: &Image<V::Pixel>, region: Rect) -> Result<()> {
    if !region.fits_within(view.cols(), view.rows()) {
        return Err(Error::invalid_region(region, view.cols(), view.rows()));
    }
    if dest.cols() != region.width || dest.rows() != region.height {
        return Err(Error::dimension_mismatch(
            (region.width, region.height),
            (dest.cols(), dest.rows()),
        ));
    }
    if dest.planes() != view.planes() {
        return Err(Error::plane_mismatch(view.planes(), dest.planes()));
    }
    Ok(())
}

/// Writes one destination row: `plane` and `row` are relative to `region`.
#[inline]
fn fill_row<V: ImageView>(view: &V, region: Rect, plane: usize, row: usize, line: &mut [V::Pixel]) {
    let mut acc = PixelAccessor::new(view, region.x, region.y + row as u32, plane as u32);
    for px in line {
        *px = acc.get();
        acc.next_col();
    }
}

/// Materializes `region` of `view` into `dest`.
///
/// `dest` must be `region.width x region.height` with as many planes as the
/// view. Every plane is written.
///
/// # Errors
///
/// - [`Error::InvalidRegion`] if `region` is not inside the view
/// - [`Error::DimensionMismatch`] if `dest` is not the size of `region`
/// - [`Error::PlaneMismatch`] if the plane counts differ
pub fn rasterize<V: ImageView>(view: &V, dest: &mut Image<V::Pixel>, region: Rect) -> Result<()> {
    check_destination(view, dest, region)?;
    trace!(region = %region, planes = view.planes(), "rasterize");

    if region.is_empty() || view.planes() == 0 {
        return Ok(());
    }

    let prepared = view.prepare(region);
    let width = region.width as usize;
    let height = region.height as usize;
    for (i, line) in dest.data_mut().chunks_exact_mut(width).enumerate() {
        fill_row(&prepared, region, i / height, i % height, line);
    }
    Ok(())
}

/// Row-parallel [`rasterize`].
///
/// Rows of every plane are distributed across the rayon pool. Views that do
/// not declare [`ImageView::CONCURRENT_ACCESS`] are rasterized sequentially.
/// The result is identical to [`rasterize`] either way.
///
/// # Errors
///
/// Same as [`rasterize`].
#[cfg(feature = "parallel")]
pub fn rasterize_par<V>(view: &V, dest: &mut Image<V::Pixel>, region: Rect) -> Result<()>
where
    V: ImageView,
    V::Prepared: Sync,
    V::Pixel: Send + Sync,
{
    if !V::CONCURRENT_ACCESS {
        debug!(region = %region, "view is not concurrent, rasterizing sequentially");
        return rasterize(view, dest, region);
    }

    check_destination(view, dest, region)?;
    trace!(region = %region, planes = view.planes(), "rasterize_par");

    if region.is_empty() || view.planes() == 0 {
        return Ok(());
    }

    let prepared = view.prepare(region);
    let width = region.width as usize;
    let height = region.height as usize;
    dest.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, line)| fill_row(&prepared, region, i / height, i % height, line));
    Ok(())
}

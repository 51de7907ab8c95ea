//! Owned image buffers.
//!
//! [`Image<P>`] stores `cols x rows x planes` pixels of any `Copy` pixel type:
//! bare channels, compound pixels, or masked values from the `pixmask` crate.
//! It is both a materialization target for [`rasterize`](crate::view::rasterize)
//! and an [`ImageView`] source in its own right.
//!
//! # Memory Layout
//!
//! Planes are stored one after another, each in row-major order:
//!
//! ```text
//! Memory: [p0 r0: c0 c1 c2 ...][p0 r1: ...] ... [p1 r0: ...] ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pixmask_core::{Image, Rgb};
//!
//! let mut img: Image<Rgb<u8>> = Image::new(64, 32, 1);
//! img.set_pixel(10, 5, 0, Rgb::new(255, 0, 0));
//! assert_eq!(img.pixel(10, 5, 0).r, 255);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::view::ImageView`] - Images are views
//! - [`crate::rect::Rect`] - Bounds
//! - [`crate::error::Error`] - Construction errors
//! - [`tracing`] - Materialization spans

use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::view::{rasterize, ImageView};
use std::sync::Arc;
use tracing::trace;

/// Owned, plane-major image buffer.
///
/// # Memory Management
///
/// The pixel buffer is stored in an [`Arc<Vec<P>>`]:
/// - cloning shares the buffer
/// - the first mutation of a shared buffer copies it (copy-on-write)
/// - preparing an image as a view is a clone
///
/// # Example
///
/// ```rust
/// use pixmask_core::Image;
///
/// let a: Image<f32> = Image::filled(4, 4, 1, 0.5);
/// let mut b = a.clone();
/// b.set_pixel(0, 0, 0, 1.0);
/// assert_eq!(a.pixel(0, 0, 0), 0.5);
/// assert_eq!(b.pixel(0, 0, 0), 1.0);
/// ```
#[derive(Clone)]
pub struct Image<P> {
    data: Arc<Vec<P>>,
    cols: u32,
    rows: u32,
    planes: u32,
}

impl<P: Copy> Image<P> {
    /// Creates an image filled with `P::default()`.
    ///
    /// # Panics
    ///
    /// Panics if `cols * rows * planes` overflows `usize`.
    #[track_caller]
    pub fn new(cols: u32, rows: u32, planes: u32) -> Self
    where
        P: Default,
    {
        Self::filled(cols, rows, planes, P::default())
    }

    /// Creates an image with every pixel set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `cols * rows * planes` overflows `usize`.
    #[track_caller]
    pub fn filled(cols: u32, rows: u32, planes: u32, value: P) -> Self {
        match Self::try_filled(cols, rows, planes, value) {
            Ok(img) => img,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an image with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `cols * rows * planes`
    /// overflows `usize`.
    pub fn try_filled(cols: u32, rows: u32, planes: u32, value: P) -> Result<Self> {
        let len = pixel_count(cols, rows, planes)?;
        Ok(Self {
            data: Arc::new(vec![value; len]),
            cols,
            rows,
            planes,
        })
    }

    /// Creates an image from existing pixel data in plane-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `cols * rows * planes`.
    ///
    /// ```rust
    /// use pixmask_core::Image;
    ///
    /// assert!(Image::from_data(2, 2, 1, vec![0u8; 4]).is_ok());
    /// assert!(Image::from_data(2, 2, 2, vec![0u8; 4]).is_err());
    /// ```
    pub fn from_data(cols: u32, rows: u32, planes: u32, data: Vec<P>) -> Result<Self> {
        let expected = pixel_count(cols, rows, planes)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                cols,
                rows,
                planes,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            cols,
            rows,
            planes,
        })
    }

    /// Materializes every plane of `view` into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the pixel count overflows, and
    /// propagates errors from [`rasterize`](crate::view::rasterize).
    pub fn from_view<V>(view: &V) -> Result<Self>
    where
        V: ImageView<Pixel = P>,
        P: Default,
    {
        trace!(cols = view.cols(), rows = view.rows(), planes = view.planes(), "Image::from_view");
        let mut img = Self::try_filled(view.cols(), view.rows(), view.planes(), P::default())?;
        rasterize(view, &mut img, view.bounds())?;
        Ok(img)
    }

    /// Width in columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Height in rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of planes.
    #[inline]
    pub fn planes(&self) -> u32 {
        self.planes
    }

    /// The extent of one plane.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.cols, self.rows)
    }

    /// All pixels in plane-major order.
    #[inline]
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Mutable access to all pixels; copies a shared buffer first.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [P] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    #[inline]
    fn index_of(&self, col: u32, row: u32, plane: u32) -> Option<usize> {
        if col >= self.cols || row >= self.rows || plane >= self.planes {
            return None;
        }
        let plane_len = self.cols as usize * self.rows as usize;
        Some(plane as usize * plane_len + row as usize * self.cols as usize + col as usize)
    }

    /// Pixel at (col, row, plane).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    #[track_caller]
    pub fn pixel(&self, col: u32, row: u32, plane: u32) -> P {
        match self.get_pixel(col, row, plane) {
            Some(px) => px,
            None => panic!(
                "pixel ({col}, {row}, {plane}) out of bounds for {}x{}x{} image",
                self.cols, self.rows, self.planes
            ),
        }
    }

    /// Pixel at (col, row, plane), or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, col: u32, row: u32, plane: u32) -> Option<P> {
        self.index_of(col, row, plane).map(|i| self.data[i])
    }

    /// Writes the pixel at (col, row, plane).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[track_caller]
    pub fn set_pixel(&mut self, col: u32, row: u32, plane: u32, value: P) {
        let Some(i) = self.index_of(col, row, plane) else {
            panic!(
                "pixel ({col}, {row}, {plane}) out of bounds for {}x{}x{} image",
                self.cols, self.rows, self.planes
            );
        };
        self.data_mut()[i] = value;
    }
}

fn pixel_count(cols: u32, rows: u32, planes: u32) -> Result<usize> {
    (cols as usize)
        .checked_mul(rows as usize)
        .and_then(|v| v.checked_mul(planes as usize))
        .ok_or_else(|| Error::invalid_dimensions(cols, rows, planes, "pixel count overflows"))
}

impl<P: Copy> std::fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("planes", &self.planes)
            .field("pixel", &std::any::type_name::<P>())
            .finish()
    }
}

impl<P: Copy> ImageView for Image<P> {
    type Pixel = P;
    type Prepared = Image<P>;
    const CONCURRENT_ACCESS: bool = true;

    #[inline]
    fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }

    #[inline]
    fn pixel(&self, col: u32, row: u32, plane: u32) -> P {
        Image::pixel(self, col, row, plane)
    }

    #[inline]
    fn prepare(&self, _region: Rect) -> Image<P> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb;

    #[test]
    fn test_image_new() {
        let img: Image<Rgb<f32>> = Image::new(10, 8, 2);
        assert_eq!((img.cols(), img.rows(), img.planes()), (10, 8, 2));
        assert_eq!(img.data().len(), 160);
        assert_eq!(img.pixel(9, 7, 1), Rgb::default());
    }

    #[test]
    fn test_image_from_data_layout() {
        let data: Vec<u16> = (0..12).collect();
        let img = Image::from_data(3, 2, 2, data).unwrap();
        assert_eq!(img.pixel(0, 0, 0), 0);
        assert_eq!(img.pixel(2, 0, 0), 2);
        assert_eq!(img.pixel(0, 1, 0), 3);
        assert_eq!(img.pixel(0, 0, 1), 6);
        assert_eq!(img.pixel(2, 1, 1), 11);
        assert_eq!(&img.data()[9..], &[9, 10, 11]);
    }

    #[test]
    fn test_image_from_data_wrong_size() {
        let err = Image::from_data(4, 4, 1, vec![0u8; 3]).unwrap_err();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_image_get_pixel_bounds() {
        let img: Image<u8> = Image::new(2, 2, 1);
        assert!(img.get_pixel(1, 1, 0).is_some());
        assert!(img.get_pixel(2, 0, 0).is_none());
        assert!(img.get_pixel(0, 0, 1).is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_image_pixel_out_of_bounds() {
        let img: Image<u8> = Image::new(2, 2, 1);
        let _ = img.pixel(0, 2, 0);
    }

    #[test]
    fn test_image_clone_cow() {
        let a: Image<u8> = Image::filled(4, 4, 1, 7);
        let mut b = a.clone();
        assert!(std::ptr::eq(a.data(), b.data()));
        b.set_pixel(0, 0, 0, 1);
        assert!(!std::ptr::eq(a.data(), b.data()));
        assert_eq!(a.pixel(0, 0, 0), 7);
        assert_eq!(b.pixel(0, 0, 0), 1);
    }

    #[test]
    fn test_image_data_mut_writes_through() {
        let mut img: Image<i8> = Image::new(3, 2, 2);
        img.data_mut().fill(-1);
        assert!(img.data().iter().all(|&px| px == -1));
        assert_eq!(img.pixel(2, 1, 1), -1);
    }

    #[test]
    fn test_image_pixel_count_overflow() {
        let err = Image::try_filled(u32::MAX, u32::MAX, u32::MAX, 0u8).unwrap_err();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("overflows"));
        assert!(Image::from_data(u32::MAX, u32::MAX, u32::MAX, Vec::<u8>::new()).is_err());
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn test_image_filled_overflow_panics() {
        let _ = Image::filled(u32::MAX, u32::MAX, u32::MAX, 0u8);
    }

    #[test]
    fn test_image_from_view_copies() {
        let src = Image::from_data(2, 2, 1, vec![1u8, 2, 3, 4]).unwrap();
        let copy = Image::from_view(&src).unwrap();
        assert_eq!(copy.data(), &[1, 2, 3, 4]);
        assert!(!std::ptr::eq(copy.data(), src.data()));
    }
}

//! Views that add and remove validity masks.
//!
//! - [`CreateMaskView`] turns a plain view into a view of [`Masked`] pixels,
//!   marking every pixel equal to a sentinel ("no data") value as invalid.
//! - [`ApplyMaskView`] turns a view of [`Masked`] pixels back into plain
//!   pixels, substituting a replacement value for every invalid one.
//!
//! Both are lazy: pixels are computed when the view is read, and preparing
//! either view for a region prepares its source.
//!
//! ```rust
//! use pixmask::prelude::*;
//!
//! let raw = Image::from_data(3, 1, 1, vec![4u8, 0, 9]).unwrap();
//! let masked = create_mask(&raw, 0);
//! assert!(!masked.pixel(1, 0, 0).is_valid());
//!
//! let filled = Image::from_view(&apply_mask_with(&masked, 255)).unwrap();
//! assert_eq!(filled.data(), &[4, 255, 9]);
//! ```

use crate::masked::Masked;
use pixmask_core::{ImageView, Payload, Rect};
use tracing::{debug, trace};

/// Wraps a view's pixels in [`Masked`], invalidating a sentinel value.
///
/// Without a sentinel every pixel is valid. Comparison is exact `==` on the
/// whole pixel.
#[derive(Debug, Clone)]
pub struct CreateMaskView<V: ImageView> {
    view: V,
    nodata: Option<V::Pixel>,
}

impl<V: ImageView> CreateMaskView<V>
where
    V::Pixel: Payload,
{
    /// Wraps `view`, optionally with a sentinel value.
    pub fn new(view: V, nodata: Option<V::Pixel>) -> Self {
        Self { view, nodata }
    }

    /// The sentinel value, if one is configured.
    #[inline]
    pub fn nodata_value(&self) -> Option<V::Pixel> {
        self.nodata
    }

    /// Configures the sentinel value.
    pub fn set_nodata_value(&mut self, value: V::Pixel) {
        debug!(nodata = ?value, "mask sentinel set");
        self.nodata = Some(value);
    }

    /// Removes the sentinel; every pixel becomes valid.
    pub fn clear_nodata_value(&mut self) {
        self.nodata = None;
    }

    /// The wrapped view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.view
    }

    /// Unwraps into the source view.
    pub fn into_inner(self) -> V {
        self.view
    }
}

impl<V> ImageView for CreateMaskView<V>
where
    V: ImageView,
    V::Pixel: Payload,
{
    type Pixel = Masked<V::Pixel>;
    type Prepared = CreateMaskView<V::Prepared>;
    const CONCURRENT_ACCESS: bool = V::CONCURRENT_ACCESS;

    #[inline]
    fn cols(&self) -> u32 {
        self.view.cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.view.rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.view.planes()
    }

    #[inline]
    fn pixel(&self, col: u32, row: u32, plane: u32) -> Masked<V::Pixel> {
        let px = self.view.pixel(col, row, plane);
        match self.nodata {
            Some(nodata) if px == nodata => Masked::with_validity(px, false),
            _ => Masked::new(px),
        }
    }

    fn prepare(&self, region: Rect) -> Self::Prepared {
        trace!(region = %region, "prepare create_mask");
        CreateMaskView {
            view: self.view.prepare(region),
            nodata: self.nodata,
        }
    }
}

/// Masks `view`, treating pixels equal to `nodata` as missing.
pub fn create_mask<V>(view: V, nodata: V::Pixel) -> CreateMaskView<V>
where
    V: ImageView,
    V::Pixel: Payload,
{
    debug!(cols = view.cols(), rows = view.rows(), nodata = ?nodata, "create_mask");
    CreateMaskView::new(view, Some(nodata))
}

/// Masks `view` without a sentinel: every pixel is valid until
/// [`CreateMaskView::set_nodata_value`] is called.
pub fn create_mask_unset<V>(view: V) -> CreateMaskView<V>
where
    V: ImageView,
    V::Pixel: Payload,
{
    CreateMaskView::new(view, None)
}

/// Unwraps a view of [`Masked`] pixels, substituting a replacement for
/// invalid ones.
#[derive(Debug, Clone)]
pub struct ApplyMaskView<V, P> {
    view: V,
    replacement: P,
}

impl<V, P> ApplyMaskView<V, P>
where
    V: ImageView<Pixel = Masked<P>>,
    P: Payload,
{
    /// Wraps `view` with the value used for invalid pixels.
    pub fn new(view: V, replacement: P) -> Self {
        Self { view, replacement }
    }

    /// The value used for invalid pixels.
    #[inline]
    pub fn replacement(&self) -> P {
        self.replacement
    }

    /// Changes the value used for invalid pixels.
    pub fn set_replacement(&mut self, replacement: P) {
        self.replacement = replacement;
    }

    /// The wrapped view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.view
    }

    /// Unwraps into the source view.
    pub fn into_inner(self) -> V {
        self.view
    }
}

impl<V, P> ImageView for ApplyMaskView<V, P>
where
    V: ImageView<Pixel = Masked<P>>,
    P: Payload,
{
    type Pixel = P;
    type Prepared = ApplyMaskView<V::Prepared, P>;
    const CONCURRENT_ACCESS: bool = V::CONCURRENT_ACCESS;

    #[inline]
    fn cols(&self) -> u32 {
        self.view.cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.view.rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.view.planes()
    }

    #[inline]
    fn pixel(&self, col: u32, row: u32, plane: u32) -> P {
        self.view.pixel(col, row, plane).unwrap_or(self.replacement)
    }

    fn prepare(&self, region: Rect) -> Self::Prepared {
        trace!(region = %region, "prepare apply_mask");
        ApplyMaskView {
            view: self.view.prepare(region),
            replacement: self.replacement,
        }
    }
}

/// Unmasks `view`, using `P::default()` for invalid pixels.
pub fn apply_mask<V, P>(view: V) -> ApplyMaskView<V, P>
where
    V: ImageView<Pixel = Masked<P>>,
    P: Payload,
{
    apply_mask_with(view, P::default())
}

/// Unmasks `view`, using `replacement` for invalid pixels.
pub fn apply_mask_with<V, P>(view: V, replacement: P) -> ApplyMaskView<V, P>
where
    V: ImageView<Pixel = Masked<P>>,
    P: Payload,
{
    debug!(cols = view.cols(), rows = view.rows(), replacement = ?replacement, "apply_mask");
    ApplyMaskView::new(view, replacement)
}

//! # pixmask
//!
//! Nullable multi-channel pixel values and the views that create and consume
//! them.
//!
//! - [`Masked`] - Any [`Payload`](pixmask_core::Payload) pixel plus one validity channel
//! - [`dispatch`] - Apply per-channel functions with invalidity propagation
//! - [`math`] - `+ - * /` and negation on masked values
//! - [`CreateMaskView`] - Sentinel ("no data") values become invalid pixels
//! - [`ApplyMaskView`] - Invalid pixels become a replacement value
//!
//! ## Pipeline
//!
//! ```text
//! raw view ──create_mask──► Masked view ──per-pixel math──► apply_mask ──► raw view
//! ```
//!
//! Every stage is lazy; pixels are computed when a region is rasterized.
//!
//! ```rust
//! use pixmask::prelude::*;
//!
//! let elevation = Image::from_data(4, 1, 1, vec![120i16, -9999, 80, 95]).unwrap();
//! let masked = create_mask(&elevation, -9999);
//!
//! let above_100: Vec<_> = (0..4)
//!     .map(|c| compound_apply_unary(|h: i16| u8::from(h > 100), &masked.pixel(c, 0, 0)))
//!     .collect();
//! assert_eq!(above_100[0].value(), 1);
//! assert!(!above_100[1].is_valid());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Enables `pixmask_core::rasterize_par` (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dispatch;
pub mod masked;
pub mod math;
pub mod views;

pub use dispatch::{compound_apply, compound_apply_in_place, compound_apply_unary, compound_apply_unary_in_place};
pub use masked::{is_transparent, mean_channel_value, Masked};
pub use pixmask_core;
pub use views::{apply_mask, apply_mask_with, create_mask, create_mask_unset, ApplyMaskView, CreateMaskView};

/// Prelude module for convenient imports.
///
/// Includes the `pixmask_core` prelude.
///
/// # Usage
///
/// ```
/// use pixmask::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dispatch::{
        compound_apply, compound_apply_in_place, compound_apply_unary, compound_apply_unary_in_place,
    };
    pub use crate::masked::{is_transparent, mean_channel_value, Masked};
    pub use crate::views::{apply_mask, apply_mask_with, create_mask, create_mask_unset, ApplyMaskView, CreateMaskView};
    pub use pixmask_core::prelude::*;
}

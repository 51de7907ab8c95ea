//! # pixmask-core
//!
//! Pixel protocols and the lazy image-view framework used by `pixmask`.
//!
//! This crate provides the foundation the masking layer is built on:
//!
//! - [`Channel`] - Numeric channel types and their nominal `MIN`/`MAX` range
//! - [`Compound`] - Channel protocol: count, numeric type, per-channel access
//! - [`Payload`] - Plain pixel layouts that can be masked, with channel retyping
//! - [`ChannelArity`] - Compile-time channel-count dispatch with unrolled 1-4 channel kernels
//! - [`Gray`], [`GrayA`], [`Rgb`], [`Rgba`], [`Hsv`], [`Xyz`], [`Luv`], [`Vector`] - Pixel layouts
//! - [`ImageView`], [`PixelAccessor`], [`rasterize`] - Pull-based views and materialization
//! - [`Image`] - Copy-on-write image buffer, itself a view
//! - [`Rect`] - Region requests
//!
//! ## Crate Structure
//!
//! ```text
//! pixmask-core (this crate)
//!    ^
//!    |
//!    +-- pixmask (masked values, dispatch, mask views)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Row-parallel [`rasterize_par`] on rayon (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod arity;
pub mod channel;
pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;
pub mod view;

pub use arity::{Arity1, Arity2, Arity3, Arity4, ArityN, ChannelArity};
pub use channel::Channel;
pub use error::{Error, Result};
pub use half::f16;
pub use image::Image;
pub use pixel::{Compound, Gray, GrayA, Hsv, Luv, Payload, Rgb, Rgba, SingleChannel, Vector, Xyz};
pub use rect::Rect;
#[cfg(feature = "parallel")]
pub use view::rasterize_par;
pub use view::{rasterize, ImageView, PixelAccessor};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixmask_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arity::ChannelArity;
    pub use crate::channel::Channel;
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{Compound, Gray, GrayA, Hsv, Luv, Payload, Rgb, Rgba, SingleChannel, Vector, Xyz};
    pub use crate::rect::Rect;
    #[cfg(feature = "parallel")]
    pub use crate::view::rasterize_par;
    pub use crate::view::{rasterize, ImageView, PixelAccessor};
}

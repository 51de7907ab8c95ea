//! Compound pixel types and the channel protocol.
//!
//! [`Compound`] is the protocol every pixel-like value speaks: how many
//! channels it has, what numeric type they are, and how to get at channel `i`.
//!
//! [`Payload`] marks the plain pixel types: the ones that can be wrapped in a
//! masked value, and that know what the same layout looks like over a
//! different channel type ([`Payload::Cast`]). Types that carry a validity
//! channel of their own are compounds but not payloads, so masked values
//! never nest.
//!
//! # Types
//!
//! - [`Gray`] - one channel
//! - [`GrayA`] - gray with alpha
//! - [`Rgb`], [`Rgba`] - color with and without alpha
//! - [`Hsv`], [`Xyz`], [`Luv`] - three-channel color layouts
//! - [`Vector`] - `N` channels of the same type
//!
//! Scalars ([`Channel`] types) are one-channel compounds as well.
//!
//! The layouts carry no color-space semantics; they only fix channel order.
//!
//! ```
//! use pixmask_core::prelude::*;
//!
//! let px = Rgb::new(255u8, 128, 64);
//! assert_eq!(<Rgb<u8> as Compound>::CHANNELS, 3);
//! assert_eq!(*px.channel(1), 128);
//!
//! // Same layout, different channel type.
//! let wide: <Rgb<u8> as Payload>::Cast<f32> = Rgb::new(1.0, 0.5, 0.25);
//! assert_eq!(wide.g, 0.5);
//! ```
//!
//! # Memory Layout
//!
//! All pixel structs are `#[repr(C)]` with channels in declaration order.

use crate::arity::{Arity1, Arity2, Arity3, Arity4, ArityN, ChannelArity};
use crate::channel::Channel;
use std::fmt;

/// Channel protocol for pixel-like values.
///
/// # Indexing
///
/// [`channel`](Compound::channel) and [`channel_mut`](Compound::channel_mut)
/// accept `0..CHANNELS`. Any other index panics.
pub trait Compound: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Numeric type of every channel.
    type Channel: Channel;

    /// Compile-time dispatch tag for elementwise kernels.
    type Arity: ChannelArity;

    /// Number of channels.
    const CHANNELS: usize;

    /// Returns channel `i`.
    fn channel(&self, i: usize) -> &Self::Channel;

    /// Returns channel `i` mutably.
    fn channel_mut(&mut self, i: usize) -> &mut Self::Channel;

    /// Iterates channel values in order.
    fn channels(&self) -> impl Iterator<Item = Self::Channel> + '_ {
        (0..Self::CHANNELS).map(move |i| *self.channel(i))
    }
}

/// A plain pixel layout: scalars, the pixel structs and [`Vector`].
///
/// Masked values accept only payloads as their wrapped type.
pub trait Payload: Compound {
    /// The same layout with channel type `U`.
    type Cast<U: Channel>: Payload<Channel = U, Arity = Self::Arity>;
}

/// Payloads with exactly one channel.
///
/// Only these can be built from, or reduced to, a bare channel value.
pub trait SingleChannel: Payload<Arity = Arity1> {
    /// Wraps a bare channel value.
    fn from_channel(value: Self::Channel) -> Self;

    /// Returns the single channel value.
    #[inline]
    fn to_channel(&self) -> Self::Channel {
        *self.channel(0)
    }
}

#[cold]
#[track_caller]
pub(crate) fn channel_out_of_range(i: usize, channels: usize) -> ! {
    panic!("channel index {i} out of range for {channels} channels")
}

macro_rules! declare_pixel {
    ($name:ident, $n:literal, $arity:ty, $($idx:literal => $field:ident),+) => {
        impl<T: Channel> Compound for $name<T> {
            type Channel = T;
            type Arity = $arity;
            const CHANNELS: usize = $n;

            #[inline]
            fn channel(&self, i: usize) -> &T {
                match i {
                    $($idx => &self.$field,)+
                    _ => channel_out_of_range(i, $n),
                }
            }

            #[inline]
            fn channel_mut(&mut self, i: usize) -> &mut T {
                match i {
                    $($idx => &mut self.$field,)+
                    _ => channel_out_of_range(i, $n),
                }
            }
        }

        impl<T: Channel> Payload for $name<T> {
            type Cast<U: Channel> = $name<U>;
        }

        impl<T: Channel> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "("))?;
                for (i, c) in self.channels().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
        }
    };
}

/// Single-channel gray pixel.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Gray<T> {
    /// Gray value.
    pub v: T,
}

impl<T: Channel> Gray<T> {
    /// Create a gray pixel.
    #[inline]
    pub const fn new(v: T) -> Self {
        Self { v }
    }
}

impl<T: Channel> SingleChannel for Gray<T> {
    #[inline]
    fn from_channel(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Channel> From<T> for Gray<T> {
    #[inline]
    fn from(v: T) -> Self {
        Self::new(v)
    }
}

/// Gray pixel with alpha.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GrayA<T> {
    /// Gray value.
    pub v: T,
    /// Alpha value.
    pub a: T,
}

impl<T: Channel> GrayA<T> {
    /// Create a gray+alpha pixel.
    #[inline]
    pub const fn new(v: T, a: T) -> Self {
        Self { v, a }
    }
}

impl<T: Channel> From<Gray<T>> for GrayA<T> {
    /// Opaque gray: alpha is set to the top of the channel range.
    #[inline]
    fn from(g: Gray<T>) -> Self {
        Self::new(g.v, T::MAX)
    }
}

/// RGB pixel.
///
/// # Example
///
/// ```
/// use pixmask_core::Rgb;
///
/// let pixel = Rgb::new(255u8, 128, 64);
/// assert_eq!(pixel.to_string(), "Rgb(255, 128, 64)");
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb<T> {
    /// Red channel value.
    pub r: T,
    /// Green channel value.
    pub g: T,
    /// Blue channel value.
    pub b: T,
}

impl<T: Channel> Rgb<T> {
    /// Create a new RGB pixel.
    #[inline]
    pub const fn new(r: T, g: T, b: T) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel with all three channels equal.
    #[inline]
    pub const fn gray(v: T) -> Self {
        Self::new(v, v, v)
    }
}

impl<T: Channel> From<Gray<T>> for Rgb<T> {
    #[inline]
    fn from(g: Gray<T>) -> Self {
        Self::gray(g.v)
    }
}

/// RGBA pixel (straight alpha).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba<T> {
    /// Red channel value.
    pub r: T,
    /// Green channel value.
    pub g: T,
    /// Blue channel value.
    pub b: T,
    /// Alpha channel value.
    pub a: T,
}

impl<T: Channel> Rgba<T> {
    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }
}

impl<T: Channel> From<Rgb<T>> for Rgba<T> {
    /// Opaque color: alpha is set to the top of the channel range.
    #[inline]
    fn from(c: Rgb<T>) -> Self {
        Self::new(c.r, c.g, c.b, T::MAX)
    }
}

/// Hue, saturation, value.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsv<T> {
    /// Hue.
    pub h: T,
    /// Saturation.
    pub s: T,
    /// Value.
    pub v: T,
}

impl<T: Channel> Hsv<T> {
    /// Create an HSV pixel.
    #[inline]
    pub const fn new(h: T, s: T, v: T) -> Self {
        Self { h, s, v }
    }
}

/// CIE XYZ tristimulus.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Xyz<T> {
    /// X.
    pub x: T,
    /// Y.
    pub y: T,
    /// Z.
    pub z: T,
}

impl<T: Channel> Xyz<T> {
    /// Create an XYZ pixel.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

/// CIE L*u*v*.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Luv<T> {
    /// Lightness.
    pub l: T,
    /// u*.
    pub u: T,
    /// v*.
    pub v: T,
}

impl<T: Channel> Luv<T> {
    /// Create a Luv pixel.
    #[inline]
    pub const fn new(l: T, u: T, v: T) -> Self {
        Self { l, u, v }
    }
}

declare_pixel!(Gray, 1, Arity1, 0 => v);
declare_pixel!(GrayA, 2, Arity2, 0 => v, 1 => a);
declare_pixel!(Rgb, 3, Arity3, 0 => r, 1 => g, 2 => b);
declare_pixel!(Rgba, 4, Arity4, 0 => r, 1 => g, 2 => b, 3 => a);
declare_pixel!(Hsv, 3, Arity3, 0 => h, 1 => s, 2 => v);
declare_pixel!(Xyz, 3, Arity3, 0 => x, 1 => y, 2 => z);
declare_pixel!(Luv, 3, Arity3, 0 => l, 1 => u, 2 => v);

/// Fixed-length vector of `N` channels.
///
/// Vectors always use the [`ArityN`] tag, so elementwise kernels on them take
/// the general loop even for `N` of 1 to 4. The unrolled kernels are reached
/// through the fixed-size pixel structs ([`Gray`] through [`Rgba`]); both
/// paths produce identical values. A tag picked from `N` would need an impl
/// per length, which a generic `const N` cannot express.
///
/// ```
/// use pixmask_core::prelude::*;
///
/// let v = Vector::new([1.0f32, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(<Vector<f32, 5> as Compound>::CHANNELS, 5);
/// assert_eq!(v.channels().sum::<f32>(), 15.0);
/// ```
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector<T, const N: usize>(pub [T; N]);

impl<T: Channel, const N: usize> Vector<T, N> {
    /// Wrap an array.
    #[inline]
    pub const fn new(values: [T; N]) -> Self {
        Self(values)
    }

    /// The underlying array.
    #[inline]
    pub const fn to_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Channel, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T: Channel, const N: usize> Compound for Vector<T, N> {
    type Channel = T;
    type Arity = ArityN;
    const CHANNELS: usize = N;

    #[inline]
    fn channel(&self, i: usize) -> &T {
        match self.0.get(i) {
            Some(v) => v,
            None => channel_out_of_range(i, N),
        }
    }

    #[inline]
    fn channel_mut(&mut self, i: usize) -> &mut T {
        match self.0.get_mut(i) {
            Some(v) => v,
            None => channel_out_of_range(i, N),
        }
    }
}

impl<T: Channel, const N: usize> Payload for Vector<T, N> {
    type Cast<U: Channel> = Vector<U, N>;
}

impl<T: Channel, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vector(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

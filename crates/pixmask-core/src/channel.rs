//! Numeric channel types and their nominal range.
//!
//! Every scalar a pixel is built from implements [`Channel`]. Besides the
//! usual numeric bookkeeping, a channel type reports the bottom and top of its
//! nominal range through [`Channel::MIN`] and [`Channel::MAX`]. Those two
//! values are what the `pixmask` crate stores in a validity channel:
//! `MIN` means "no data", `MAX` means "valid".
//!
//! # Ranges
//!
//! | type                  | `MIN`        | `MAX`        |
//! |-----------------------|--------------|--------------|
//! | `u8`, `u16`, `u32`    | 0            | type maximum |
//! | `i8`, `i16`, `i32`    | type minimum | type maximum |
//! | `f16`, `f32`, `f64`   | 0.0          | 1.0          |
//!
//! Floats use the normalized `[0, 1]` range that image data is stored in, so a
//! float validity channel reads like an alpha channel.
//!
//! A channel type is also a one-channel [`Payload`] value, so bare numbers
//! can be used anywhere a pixel is expected.
//!
//! ```
//! use pixmask_core::Channel;
//!
//! assert_eq!(<u8 as Channel>::MAX, 255);
//! assert_eq!(<f32 as Channel>::MAX, 1.0);
//! assert_eq!(<i16 as Channel>::MIN, i16::MIN);
//! ```

use crate::arity::Arity1;
use crate::pixel::{channel_out_of_range, Compound, Payload, SingleChannel};
use half::f16;
use std::fmt;

/// A scalar numeric channel.
///
/// Implemented for `u8`, `u16`, `u32`, `i8`, `i16`, `i32`, [`f16`], `f32`
/// and `f64`.
pub trait Channel:
    Payload<Channel = Self, Arity = Arity1> + PartialOrd + fmt::Display
{
    /// Bottom of the nominal range.
    const MIN: Self;

    /// Top of the nominal range.
    const MAX: Self;

    /// Raw numeric value as `f64` (not normalized).
    fn to_f64(self) -> f64;
}

macro_rules! scalar_compound {
    ($t:ty) => {
        impl Compound for $t {
            type Channel = $t;
            type Arity = Arity1;
            const CHANNELS: usize = 1;

            #[inline]
            fn channel(&self, i: usize) -> &$t {
                if i != 0 {
                    channel_out_of_range(i, 1);
                }
                self
            }

            #[inline]
            fn channel_mut(&mut self, i: usize) -> &mut $t {
                if i != 0 {
                    channel_out_of_range(i, 1);
                }
                self
            }
        }

        impl Payload for $t {
            type Cast<U: Channel> = U;
        }

        impl SingleChannel for $t {
            #[inline]
            fn from_channel(value: $t) -> Self {
                value
            }
        }
    };
}

macro_rules! int_channel {
    ($($t:ty),+) => {$(
        scalar_compound!($t);

        impl Channel for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )+};
}

int_channel!(u8, u16, u32, i8, i16, i32);

scalar_compound!(f16);
scalar_compound!(f32);
scalar_compound!(f64);

impl Channel for f16 {
    const MIN: Self = f16::ZERO;
    const MAX: Self = f16::ONE;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
}

impl Channel for f32 {
    const MIN: Self = 0.0;
    const MAX: Self = 1.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Channel for f64 {
    const MIN: Self = 0.0;
    const MAX: Self = 1.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

//! Nullable pixel values.
//!
//! [`Masked<T>`] pairs any [`Payload`] pixel with one extra validity
//! channel of the payload's own channel type. The validity channel holds
//! [`Channel::MIN`] for "no data" and [`Channel::MAX`] for "valid", so a
//! masked `Rgb<u8>` is laid out like an `Rgba<u8>` whose alpha is either 0 or
//! 255.
//!
//! # Memory Layout
//!
//! ```text
//! Masked<Rgb<u8>>:  [ r | g | b | valid ]
//!                     0   1   2     3      <- channel index
//! ```
//!
//! Channel indices `0..T::CHANNELS` address the payload, index `T::CHANNELS`
//! addresses the validity channel.
//!
//! # Usage
//!
//! ```rust
//! use pixmask::prelude::*;
//!
//! let mut px = Masked::new(Rgb::new(10u8, 20, 30));
//! assert!(px.is_valid());
//! assert_eq!(px[3], 255);
//!
//! px.invalidate();
//! assert_eq!(px[3], 0);
//! assert_eq!(px.into_option(), None);
//! ```
//!
//! # Dependencies
//!
//! - [`pixmask_core::Payload`] - Plain pixel layouts that can be wrapped
//! - [`pixmask_core::Compound`] - Channel protocol, implemented by `Masked` too
//! - [`pixmask_core::Channel`] - `MIN`/`MAX` validity encoding

use pixmask_core::{Channel, ChannelArity, Compound, Payload, SingleChannel};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A pixel value that may be missing.
///
/// A default-constructed `Masked` is invalid. Values built from a payload
/// with [`Masked::new`] or `From` are valid.
///
/// The payload of an invalid value is unspecified; it is kept only so that
/// round trips through mask views preserve the original pixel.
///
/// # Example
///
/// ```rust
/// use pixmask::prelude::*;
///
/// let none: Masked<Gray<f32>> = Masked::default();
/// assert!(!none.is_valid());
///
/// let some: Masked<Gray<f32>> = Gray::new(0.5).into();
/// assert_eq!(some.valid(), 1.0);
/// assert_eq!(some.value(), 0.5);
/// ```
///
/// The payload must be a plain pixel, so masked values do not nest:
///
/// ```compile_fail
/// use pixmask::prelude::*;
///
/// let inner = Masked::new(Gray::new(5u8));
/// let _ = Masked::new(inner);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Masked<T: Payload> {
    child: T,
    valid: T::Channel,
}

impl<T: Payload> Masked<T> {
    /// Wraps a payload as a valid value.
    #[inline]
    pub fn new(child: T) -> Self {
        Self {
            child,
            valid: <T::Channel as Channel>::MAX,
        }
    }

    /// An invalid value with a default payload.
    #[inline]
    pub fn invalid() -> Self {
        Self {
            child: T::default(),
            valid: <T::Channel as Channel>::MIN,
        }
    }

    /// Wraps a payload with explicit validity.
    #[inline]
    pub fn with_validity(child: T, valid: bool) -> Self {
        Self {
            child,
            valid: if valid { <T::Channel as Channel>::MAX } else { <T::Channel as Channel>::MIN },
        }
    }

    /// Converts the payload into another pixel type.
    ///
    /// The payload is converted only when this value is valid; an invalid
    /// value converts to an invalid `Masked<U>` with a default payload.
    ///
    /// ```rust
    /// use pixmask::prelude::*;
    ///
    /// let gray = Masked::new(Gray::new(7u8));
    /// let rgb: Masked<Rgb<u8>> = gray.convert();
    /// assert_eq!(*rgb.child(), Rgb::new(7, 7, 7));
    ///
    /// let missing: Masked<Rgb<u8>> = Masked::<Gray<u8>>::invalid().convert();
    /// assert!(!missing.is_valid());
    /// ```
    ///
    /// Payloads without a `From` conversion do not convert:
    ///
    /// ```compile_fail
    /// use pixmask::prelude::*;
    ///
    /// let rgb = Masked::new(Rgb::new(1u8, 2, 3));
    /// let _: Masked<Gray<u8>> = rgb.convert();
    /// ```
    #[inline]
    pub fn convert<U>(self) -> Masked<U>
    where
        U: Payload + From<T>,
    {
        if self.is_valid() {
            Masked::new(U::from(self.child))
        } else {
            Masked::invalid()
        }
    }

    /// Raw value of the validity channel.
    #[inline]
    pub fn valid(&self) -> T::Channel {
        self.valid
    }

    /// Returns `true` unless the validity channel holds `Channel::MIN`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid != <T::Channel as Channel>::MIN
    }

    /// Marks this value as missing. The payload is left untouched.
    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = <T::Channel as Channel>::MIN;
    }

    /// Marks this value as present.
    #[inline]
    pub fn validate(&mut self) {
        self.valid = <T::Channel as Channel>::MAX;
    }

    /// The payload, whether valid or not.
    #[inline]
    pub fn child(&self) -> &T {
        &self.child
    }

    /// Mutable payload. Validity is not changed.
    #[inline]
    pub fn child_mut(&mut self) -> &mut T {
        &mut self.child
    }

    /// Consumes the value, returning the payload whether valid or not.
    #[inline]
    pub fn into_child(self) -> T {
        self.child
    }

    /// `Some(payload)` when valid.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        if self.is_valid() { Some(self.child) } else { None }
    }

    /// Payload when valid, `replacement` otherwise.
    #[inline]
    pub fn unwrap_or(self, replacement: T) -> T {
        if self.is_valid() { self.child } else { replacement }
    }

    #[inline]
    fn from_payload_channels(values: &[T::Channel]) -> Self {
        let mut child = T::default();
        for (i, v) in values.iter().enumerate() {
            *child.channel_mut(i) = *v;
        }
        Self::new(child)
    }

    /// Valid two-channel value from positional channels.
    ///
    /// Using this with a payload that does not have exactly two channels is a
    /// compile error. The check is a constant assertion evaluated when the
    /// call is compiled to code, so `cargo build` reports it and `cargo check`
    /// does not. The same holds for [`from_channels3`](Self::from_channels3)
    /// and [`from_channels4`](Self::from_channels4).
    ///
    /// ```compile_fail
    /// use pixmask::prelude::*;
    ///
    /// let _ = Masked::<Rgb<u8>>::from_channels2(1, 2);
    /// ```
    #[inline]
    pub fn from_channels2(a0: T::Channel, a1: T::Channel) -> Self {
        const { assert!(T::CHANNELS == 2, "from_channels2 needs a two-channel payload") };
        Self::from_payload_channels(&[a0, a1])
    }

    /// Valid three-channel value from positional channels.
    ///
    /// ```rust
    /// use pixmask::prelude::*;
    ///
    /// let px = Masked::<Rgb<u8>>::from_channels3(1, 2, 3);
    /// assert_eq!(*px.child(), Rgb::new(1, 2, 3));
    /// ```
    ///
    /// A four-channel payload is rejected at build time:
    ///
    /// ```compile_fail
    /// use pixmask::prelude::*;
    ///
    /// let _ = Masked::<Rgba<u8>>::from_channels3(1, 2, 3);
    /// ```
    #[inline]
    pub fn from_channels3(a0: T::Channel, a1: T::Channel, a2: T::Channel) -> Self {
        const { assert!(T::CHANNELS == 3, "from_channels3 needs a three-channel payload") };
        Self::from_payload_channels(&[a0, a1, a2])
    }

    /// Valid four-channel value from positional channels.
    ///
    /// ```compile_fail
    /// use pixmask::prelude::*;
    ///
    /// let _ = Masked::<Vector<u8, 5>>::from_channels4(1, 2, 3, 4);
    /// ```
    #[inline]
    pub fn from_channels4(a0: T::Channel, a1: T::Channel, a2: T::Channel, a3: T::Channel) -> Self {
        const { assert!(T::CHANNELS == 4, "from_channels4 needs a four-channel payload") };
        Self::from_payload_channels(&[a0, a1, a2, a3])
    }
}

impl<T: SingleChannel> Masked<T> {
    /// Valid value wrapping a bare channel value.
    ///
    /// ```rust
    /// use pixmask::prelude::*;
    ///
    /// let px = Masked::<Gray<u8>>::from_channel(5);
    /// assert!(px.is_valid());
    /// assert_eq!(px.value(), 5);
    /// ```
    #[inline]
    pub fn from_channel(value: T::Channel) -> Self {
        Self::new(T::from_channel(value))
    }

    /// The payload's only channel.
    ///
    /// Validity is not checked. Only single-channel payloads have this method:
    ///
    /// ```compile_fail
    /// use pixmask::prelude::*;
    ///
    /// let _ = Masked::new(Rgb::new(1u8, 2, 3)).value();
    /// ```
    #[inline]
    pub fn value(&self) -> T::Channel {
        self.child.to_channel()
    }
}

impl<T: Payload> Default for Masked<T> {
    /// Invalid, with a default payload.
    #[inline]
    fn default() -> Self {
        Self::invalid()
    }
}

impl<T: Payload> From<T> for Masked<T> {
    #[inline]
    fn from(child: T) -> Self {
        Self::new(child)
    }
}

#[cold]
#[track_caller]
fn masked_index_out_of_range(i: usize, channels: usize) -> ! {
    panic!("channel index {i} out of range for {channels} channels (payload plus validity)")
}

impl<T: Payload> Index<usize> for Masked<T> {
    type Output = T::Channel;

    #[inline]
    #[track_caller]
    fn index(&self, i: usize) -> &T::Channel {
        if i == T::CHANNELS {
            &self.valid
        } else if i < T::CHANNELS {
            self.child.channel(i)
        } else {
            masked_index_out_of_range(i, T::CHANNELS + 1)
        }
    }
}

impl<T: Payload> IndexMut<usize> for Masked<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, i: usize) -> &mut T::Channel {
        if i == T::CHANNELS {
            &mut self.valid
        } else if i < T::CHANNELS {
            self.child.channel_mut(i)
        } else {
            masked_index_out_of_range(i, T::CHANNELS + 1)
        }
    }
}

impl<T: Payload> Compound for Masked<T> {
    type Channel = T::Channel;
    type Arity = <T::Arity as ChannelArity>::Wider;
    const CHANNELS: usize = T::CHANNELS + 1;

    #[inline]
    fn channel(&self, i: usize) -> &T::Channel {
        &self[i]
    }

    #[inline]
    fn channel_mut(&mut self, i: usize) -> &mut T::Channel {
        &mut self[i]
    }
}

impl<T: Payload> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Masked")
            .field("child", &self.child)
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl<T: Payload> fmt::Display for Masked<T> {
    /// `Masked(1, 2, 3)` when valid, `Masked(invalid)` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("Masked(invalid)");
        }
        f.write_str("Masked(")?;
        for (i, c) in self.child.channels().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

/// Returns `true` if the value carries no data.
#[inline]
pub fn is_transparent<T: Payload>(px: &Masked<T>) -> bool {
    !px.is_valid()
}

/// Mean of the payload channels, or `0.0` for an invalid value.
///
/// The validity channel never takes part in the mean.
///
/// ```rust
/// use pixmask::prelude::*;
///
/// let px = Masked::new(Rgb::new(10u8, 20, 60));
/// assert_eq!(mean_channel_value(&px), 30.0);
/// assert_eq!(mean_channel_value(&Masked::<Rgb<u8>>::invalid()), 0.0);
/// ```
pub fn mean_channel_value<T: Payload>(px: &Masked<T>) -> f64 {
    if !px.is_valid() || T::CHANNELS == 0 {
        return 0.0;
    }
    let sum: f64 = px.child.channels().map(Channel::to_f64).sum();
    sum / T::CHANNELS as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pixmask_core::{f16, Arity2, Arity4, ArityN, Gray, GrayA, Hsv, Luv, Rgb, Rgba, Vector, Xyz};

    #[test]
    fn test_default_is_invalid() {
        let px: Masked<Rgb<u8>> = Masked::default();
        assert!(!px.is_valid());
        assert_eq!(px.valid(), 0);
        assert_eq!(*px.child(), Rgb::default());

        let f: Masked<Gray<f32>> = Masked::default();
        assert_eq!(f.valid(), 0.0);
        let s: Masked<i16> = Masked::default();
        assert_eq!(s.valid(), i16::MIN);
    }

    #[test]
    fn test_construction_is_valid() {
        let a = Masked::new(Rgba::new(1u16, 2, 3, 4));
        assert_eq!(a.valid(), u16::MAX);
        let b: Masked<Xyz<f64>> = Xyz::new(0.1, 0.2, 0.3).into();
        assert_eq!(b.valid(), 1.0);
        let c = Masked::<i8>::from_channel(-1);
        assert_eq!(c.valid(), i8::MAX);
        let d = Masked::<GrayA<u8>>::from_channels2(4, 5);
        assert_eq!(*d.child(), GrayA::new(4, 5));
        let e = Masked::<Rgba<u8>>::from_channels4(1, 2, 3, 4);
        assert_eq!(e[3], 4);
        assert_eq!(e[4], 255);
    }

    #[test]
    fn test_validate_invalidate() {
        let mut px = Masked::new(Hsv::new(0.5f32, 0.5, 0.5));
        px.invalidate();
        assert!(!px.is_valid());
        assert_eq!(*px.child(), Hsv::new(0.5, 0.5, 0.5));
        px.validate();
        assert!(px.is_valid());
        assert_eq!(px.into_option(), Some(Hsv::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_is_valid_checks_min_only() {
        let mut px = Masked::new(Gray::new(1u8));
        px[1] = 7;
        assert!(px.is_valid());
        px[1] = 0;
        assert!(!px.is_valid());
    }

    #[test]
    fn test_index_boundary() {
        let mut px = Masked::new(Rgb::new(1u8, 2, 3));
        assert_eq!(px[0], 1);
        assert_eq!(px[2], 3);
        assert_eq!(px[3], 255);
        px[3] = 0;
        assert!(!px.is_valid());
        px[1] = 9;
        assert_eq!(px.child().g, 9);
    }

    #[test]
    #[should_panic(expected = "channel index 4 out of range for 4 channels")]
    fn test_index_past_validity_panics() {
        let px = Masked::new(Rgb::new(1u8, 2, 3));
        let _ = px[4];
    }

    #[test]
    #[should_panic(expected = "channel index 9 out of range for 2 channels")]
    fn test_index_mut_past_validity_panics() {
        let mut px = Masked::new(Gray::new(1u8));
        px[9] = 1;
    }

    #[test]
    fn test_compound_registration() {
        assert_eq!(<Masked<Gray<u8>> as Compound>::CHANNELS, 2);
        assert_eq!(<Masked<Rgb<u8>> as Compound>::CHANNELS, 4);
        assert_eq!(<Masked<Luv<f32>> as Compound>::CHANNELS, 4);
        assert_eq!(<Masked<Rgba<u8>> as Compound>::CHANNELS, 5);
        assert_eq!(<Masked<Vector<f32, 6>> as Compound>::CHANNELS, 7);
        assert_eq!(<Masked<u8> as Compound>::CHANNELS, 2);

        assert_eq!(<<Masked<Gray<u8>> as Compound>::Arity as ChannelArity>::FIXED, Arity2::FIXED);
        assert_eq!(<<Masked<Rgb<u8>> as Compound>::Arity as ChannelArity>::FIXED, Arity4::FIXED);
        assert_eq!(<<Masked<Rgba<u8>> as Compound>::Arity as ChannelArity>::FIXED, ArityN::FIXED);

        let px = Masked::new(Rgb::new(1u8, 2, 3));
        assert_eq!(px.channels().collect::<Vec<_>>(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_convert() {
        let rgb: Masked<Rgba<u8>> = Masked::new(Rgb::new(1u8, 2, 3)).convert();
        assert_eq!(*rgb.child(), Rgba::new(1, 2, 3, 255));
        assert!(rgb.is_valid());

        let mut src = Masked::new(Gray::new(200u8));
        src.invalidate();
        let out: Masked<Rgb<u8>> = src.convert();
        assert!(!out.is_valid());
        assert_eq!(*out.child(), Rgb::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(Masked::new(Rgb::new(1u8, 2, 3)).to_string(), "Masked(1, 2, 3)");
        assert_eq!(Masked::<Rgb<u8>>::invalid().to_string(), "Masked(invalid)");
        assert_eq!(Masked::new(f16::from_f32(0.5)).to_string(), "Masked(0.5)");
    }

    #[test]
    fn test_mean_channel_value() {
        let px = Masked::new(Rgba::new(0.25f32, 0.5, 0.75, 1.0));
        assert_relative_eq!(mean_channel_value(&px), 0.625);

        let gray = Masked::new(Gray::new(200u8));
        assert_relative_eq!(mean_channel_value(&gray), 200.0);

        let mut hidden = gray;
        hidden.invalidate();
        assert_eq!(mean_channel_value(&hidden), 0.0);
        assert!(is_transparent(&hidden));
        assert!(!is_transparent(&gray));
    }

    #[test]
    fn test_unwrap_or() {
        let r = Rgb::new(9u8, 9, 9);
        assert_eq!(Masked::new(Rgb::new(1u8, 1, 1)).unwrap_or(r), Rgb::new(1, 1, 1));
        assert_eq!(Masked::<Rgb<u8>>::invalid().unwrap_or(r), r);
    }
}

//! Compile-time channel-count dispatch.
//!
//! Every [`Compound`] type names a [`ChannelArity`] tag. The tag decides, at
//! compile time, which elementwise kernel runs when a per-channel function is
//! applied to values of that type:
//!
//! | tag        | used by                                   | kernel            |
//! |------------|-------------------------------------------|-------------------|
//! | [`Arity1`] | scalars, `Gray`                           | one call          |
//! | [`Arity2`] | `GrayA`                                   | two calls         |
//! | [`Arity3`] | `Rgb`, `Hsv`, `Xyz`, `Luv`                | three calls       |
//! | [`Arity4`] | `Rgba`                                    | four calls        |
//! | [`ArityN`] | `Vector<T, N>`, anything wider than four  | loop over `0..N`  |
//!
//! The unrolled tags never loop and never branch on the channel count, and they
//! produce exactly the same values as [`ArityN`] for the same inputs.
//!
//! Kernels only see payload channels. Wrapper types that add bookkeeping
//! channels of their own (such as a validity channel) call the kernel on the
//! wrapped payload, never on themselves.

use crate::pixel::Compound;
use std::fmt;

/// A compile-time channel-count tag with its elementwise kernels.
pub trait ChannelArity: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Channel count handled by an unrolled tag, `None` for [`ArityN`].
    const FIXED: Option<usize>;

    /// Tag for a type carrying one more channel than this one.
    type Wider: ChannelArity;

    /// Builds `R` with channel `i` set to `f(a[i], b[i])`.
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel;

    /// Calls `f(&mut a[i], b[i])` on every channel of `a`.
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel);

    /// Builds `R` with channel `i` set to `f(a[i])`.
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel;

    /// Calls `f(&mut a[i])` on every channel of `a`.
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel);
}

/// One channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arity1;

/// Two channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arity2;

/// Three channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arity3;

/// Four channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arity4;

/// Any channel count, handled by a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArityN;

impl ChannelArity for Arity1 {
    const FIXED: Option<usize> = Some(1);
    type Wider = Arity2;

    #[inline]
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 1 && B::CHANNELS == 1 && R::CHANNELS == 1) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0), *b.channel(0));
        out
    }

    #[inline]
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel),
    {
        const { assert!(A::CHANNELS == 1 && B::CHANNELS == 1) };
        f(a.channel_mut(0), *b.channel(0));
    }

    #[inline]
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 1 && R::CHANNELS == 1) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0));
        out
    }

    #[inline]
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel),
    {
        const { assert!(A::CHANNELS == 1) };
        f(a.channel_mut(0));
    }
}

impl ChannelArity for Arity2 {
    const FIXED: Option<usize> = Some(2);
    type Wider = Arity3;

    #[inline]
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 2 && B::CHANNELS == 2 && R::CHANNELS == 2) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0), *b.channel(0));
        *out.channel_mut(1) = f(*a.channel(1), *b.channel(1));
        out
    }

    #[inline]
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel),
    {
        const { assert!(A::CHANNELS == 2 && B::CHANNELS == 2) };
        f(a.channel_mut(0), *b.channel(0));
        f(a.channel_mut(1), *b.channel(1));
    }

    #[inline]
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 2 && R::CHANNELS == 2) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0));
        *out.channel_mut(1) = f(*a.channel(1));
        out
    }

    #[inline]
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel),
    {
        const { assert!(A::CHANNELS == 2) };
        f(a.channel_mut(0));
        f(a.channel_mut(1));
    }
}

impl ChannelArity for Arity3 {
    const FIXED: Option<usize> = Some(3);
    type Wider = Arity4;

    #[inline]
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 3 && B::CHANNELS == 3 && R::CHANNELS == 3) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0), *b.channel(0));
        *out.channel_mut(1) = f(*a.channel(1), *b.channel(1));
        *out.channel_mut(2) = f(*a.channel(2), *b.channel(2));
        out
    }

    #[inline]
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel),
    {
        const { assert!(A::CHANNELS == 3 && B::CHANNELS == 3) };
        f(a.channel_mut(0), *b.channel(0));
        f(a.channel_mut(1), *b.channel(1));
        f(a.channel_mut(2), *b.channel(2));
    }

    #[inline]
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 3 && R::CHANNELS == 3) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0));
        *out.channel_mut(1) = f(*a.channel(1));
        *out.channel_mut(2) = f(*a.channel(2));
        out
    }

    #[inline]
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel),
    {
        const { assert!(A::CHANNELS == 3) };
        f(a.channel_mut(0));
        f(a.channel_mut(1));
        f(a.channel_mut(2));
    }
}

impl ChannelArity for Arity4 {
    const FIXED: Option<usize> = Some(4);
    type Wider = ArityN;

    #[inline]
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 4 && B::CHANNELS == 4 && R::CHANNELS == 4) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0), *b.channel(0));
        *out.channel_mut(1) = f(*a.channel(1), *b.channel(1));
        *out.channel_mut(2) = f(*a.channel(2), *b.channel(2));
        *out.channel_mut(3) = f(*a.channel(3), *b.channel(3));
        out
    }

    #[inline]
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel),
    {
        const { assert!(A::CHANNELS == 4 && B::CHANNELS == 4) };
        f(a.channel_mut(0), *b.channel(0));
        f(a.channel_mut(1), *b.channel(1));
        f(a.channel_mut(2), *b.channel(2));
        f(a.channel_mut(3), *b.channel(3));
    }

    #[inline]
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel,
    {
        const { assert!(A::CHANNELS == 4 && R::CHANNELS == 4) };
        let mut out = R::default();
        *out.channel_mut(0) = f(*a.channel(0));
        *out.channel_mut(1) = f(*a.channel(1));
        *out.channel_mut(2) = f(*a.channel(2));
        *out.channel_mut(3) = f(*a.channel(3));
        out
    }

    #[inline]
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel),
    {
        const { assert!(A::CHANNELS == 4) };
        f(a.channel_mut(0));
        f(a.channel_mut(1));
        f(a.channel_mut(2));
        f(a.channel_mut(3));
    }
}

impl ChannelArity for ArityN {
    const FIXED: Option<usize> = None;
    type Wider = ArityN;

    #[inline]
    fn zip<A, B, R, F>(f: &F, a: &A, b: &B) -> R
    where
        A: Compound,
        B: Compound,
        R: Compound,
        F: Fn(A::Channel, B::Channel) -> R::Channel,
    {
        const { assert!(B::CHANNELS == A::CHANNELS && R::CHANNELS == A::CHANNELS) };
        let mut out = R::default();
        for i in 0..A::CHANNELS {
            *out.channel_mut(i) = f(*a.channel(i), *b.channel(i));
        }
        out
    }

    #[inline]
    fn zip_in_place<A, B, F>(f: &mut F, a: &mut A, b: &B)
    where
        A: Compound,
        B: Compound,
        F: FnMut(&mut A::Channel, B::Channel),
    {
        const { assert!(B::CHANNELS == A::CHANNELS) };
        for i in 0..A::CHANNELS {
            f(a.channel_mut(i), *b.channel(i));
        }
    }

    #[inline]
    fn map<A, R, F>(f: &F, a: &A) -> R
    where
        A: Compound,
        R: Compound,
        F: Fn(A::Channel) -> R::Channel,
    {
        const { assert!(R::CHANNELS == A::CHANNELS) };
        let mut out = R::default();
        for i in 0..A::CHANNELS {
            *out.channel_mut(i) = f(*a.channel(i));
        }
        out
    }

    #[inline]
    fn map_in_place<A, F>(f: &mut F, a: &mut A)
    where
        A: Compound,
        F: FnMut(&mut A::Channel),
    {
        for i in 0..A::CHANNELS {
            f(a.channel_mut(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Gray, GrayA, Rgb, Rgba, Vector};

    // The unrolled kernels must agree bit for bit with the general loop.

    #[test]
    fn test_arity1_matches_loop() {
        let a = Gray::new(0.25f32);
        let b = Gray::new(1.5f32);
        let f = |x: f32, y: f32| x * y - 0.1;
        let unrolled: Gray<f32> = Arity1::zip(&f, &a, &b);
        let general: Gray<f32> = ArityN::zip(&f, &a, &b);
        assert_eq!(unrolled.v.to_bits(), general.v.to_bits());
    }

    #[test]
    fn test_arity2_matches_loop() {
        let a = GrayA::new(10u16, 200);
        let b = GrayA::new(3u16, 7);
        let f = |x: u16, y: u16| x.wrapping_mul(y) ^ 0x55;
        assert_eq!(Arity2::zip::<_, _, GrayA<u16>, _>(&f, &a, &b), ArityN::zip::<_, _, GrayA<u16>, _>(&f, &a, &b));

        let g = |x: u16| x / 3;
        assert_eq!(Arity2::map::<_, GrayA<u16>, _>(&g, &a), ArityN::map::<_, GrayA<u16>, _>(&g, &a));
    }

    #[test]
    fn test_arity3_matches_loop() {
        let a = Rgb::new(0.1f32, 0.2, 0.3);
        let b = Rgb::new(0.7f32, 0.4, 2.0);
        let f = |x: f32, y: f32| (x + y).sqrt();
        let unrolled: Rgb<f32> = Arity3::zip(&f, &a, &b);
        let general: Rgb<f32> = ArityN::zip(&f, &a, &b);
        for i in 0..3 {
            assert_eq!(unrolled.channel(i).to_bits(), general.channel(i).to_bits());
        }

        let mut x = a;
        let mut y = a;
        Arity3::zip_in_place(&mut |c: &mut f32, d: f32| *c = *c * d + 1.0, &mut x, &b);
        ArityN::zip_in_place(&mut |c: &mut f32, d: f32| *c = *c * d + 1.0, &mut y, &b);
        assert_eq!(x, y);
    }

    #[test]
    fn test_arity4_matches_loop() {
        let a = Rgba::new(1u8, 2, 3, 4);
        let b = Rgba::new(250u8, 251, 252, 253);
        let f = |x: u8, y: u8| x.wrapping_add(y);
        assert_eq!(Arity4::zip::<_, _, Rgba<u8>, _>(&f, &a, &b), ArityN::zip::<_, _, Rgba<u8>, _>(&f, &a, &b));

        let mut x = a;
        let mut y = a;
        Arity4::map_in_place(&mut |c: &mut u8| *c = c.rotate_left(3), &mut x);
        ArityN::map_in_place(&mut |c: &mut u8| *c = c.rotate_left(3), &mut y);
        assert_eq!(x, y);
    }

    #[test]
    fn test_result_type_follows_function() {
        let a = Rgb::new(0.1f32, 0.9, 0.5);
        let b = Rgb::new(0.5f32, 0.5, 0.5);
        let above: Rgb<u8> = Arity3::zip(&|x: f32, y: f32| u8::from(x > y), &a, &b);
        assert_eq!(above, Rgb::new(0, 1, 0));
    }

    #[test]
    fn test_general_loop_wide_vector() {
        let a = Vector::new([1i32, 2, 3, 4, 5, 6]);
        let b = Vector::new([10i32, 20, 30, 40, 50, 60]);
        let sum: Vector<i32, 6> = ArityN::zip(&|x: i32, y: i32| x + y, &a, &b);
        assert_eq!(sum, Vector::new([11, 22, 33, 44, 55, 66]));
    }

    #[test]
    fn test_fixed_counts() {
        assert_eq!(Arity1::FIXED, Some(1));
        assert_eq!(Arity4::FIXED, Some(4));
        assert_eq!(ArityN::FIXED, None);
        assert_eq!(<<Arity4 as ChannelArity>::Wider as ChannelArity>::FIXED, None);
    }
}

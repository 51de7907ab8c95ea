//! Elementwise application of channel functions to masked values.
//!
//! Four shapes are provided:
//!
//! | function                          | operands        | result                 |
//! |-----------------------------------|-----------------|------------------------|
//! | [`compound_apply`]                | `&a`, `&b`      | new `Masked`           |
//! | [`compound_apply_in_place`]       | `&mut a`, `&b`  | `a` mutated            |
//! | [`compound_apply_unary`]          | `&a`            | new `Masked`           |
//! | [`compound_apply_unary_in_place`] | `&mut a`        | `a` mutated            |
//!
//! Validity is checked once per call. If any operand is invalid the function
//! is never called and the result is invalid. Otherwise the function runs on
//! each payload channel and the result is valid; the validity channel is
//! never passed to the function.
//!
//! The per-channel loop is chosen at compile time from the payload's arity
//! tag ([`Compound::Arity`](pixmask_core::Compound::Arity)): the pixel structs
//! with 1 to 4 channels use an unrolled kernel, wider payloads and
//! [`Vector`](pixmask_core::Vector) a loop.
//!
//! ```rust
//! use pixmask::prelude::*;
//!
//! let a = Masked::new(Rgb::new(0.2f32, 0.6, 0.9));
//! let b = Masked::new(Rgb::new(0.5f32, 0.5, 0.5));
//!
//! // Result channel type follows the function's return type.
//! let brighter: Masked<Rgb<u8>> = compound_apply(|x, y| u8::from(x > y), &a, &b);
//! assert_eq!(*brighter.child(), Rgb::new(0, 1, 1));
//!
//! let gone = compound_apply(|x: f32, y: f32| x + y, &a, &Masked::<Rgb<f32>>::invalid());
//! assert!(!gone.is_valid());
//! ```

use crate::masked::Masked;
use pixmask_core::{Channel, ChannelArity, Payload};

/// Builds a value with channel `i` set to `f(a[i], b[i])`.
///
/// Returns an invalid value, without calling `f`, unless both operands are
/// valid.
///
/// The operands must have the same number of channels. Different arity tags
/// fail trait resolution:
///
/// ```compile_fail
/// use pixmask::prelude::*;
///
/// let a = Masked::new(Rgb::new(1u8, 2, 3));
/// let b = Masked::new(Rgba::new(1u8, 2, 3, 4));
/// let _ = compound_apply(|x: u8, y: u8| x + y, &a, &b);
/// ```
///
/// Equal tags with different counts, such as two vector lengths, fail a
/// constant assertion. That assertion is evaluated when the call is compiled
/// to code, so `cargo build` reports it and `cargo check` does not:
///
/// ```compile_fail
/// use pixmask::prelude::*;
///
/// let a = Masked::new(Vector::new([1u8; 5]));
/// let b = Masked::new(Vector::new([1u8; 6]));
/// let _ = compound_apply(|x: u8, y: u8| x + y, &a, &b);
/// ```
#[inline]
pub fn compound_apply<A, B, R, F>(f: F, a: &Masked<A>, b: &Masked<B>) -> Masked<A::Cast<R>>
where
    A: Payload,
    B: Payload<Arity = A::Arity>,
    R: Channel,
    F: Fn(A::Channel, B::Channel) -> R,
{
    const { assert!(A::CHANNELS == B::CHANNELS, "operands must have the same channel count") };
    if !(a.is_valid() && b.is_valid()) {
        return Masked::invalid();
    }
    Masked::new(<A::Arity as ChannelArity>::zip::<A, B, A::Cast<R>, F>(&f, a.child(), b.child()))
}

/// Calls `f(&mut a[i], b[i])` on every payload channel of `a`.
///
/// If either operand is invalid, `a` is reset to an invalid default and `f`
/// is not called. Returns `a` for chaining. Channel counts are checked as in
/// [`compound_apply`].
///
/// ```rust
/// use pixmask::prelude::*;
///
/// let mut acc = Masked::new(Gray::new(5i32));
/// compound_apply_in_place(|x: &mut i32, y: i32| *x += y, &mut acc, &Masked::new(Gray::new(7)));
/// assert_eq!(acc.value(), 12);
///
/// compound_apply_in_place(|x: &mut i32, y: i32| *x += y, &mut acc, &Masked::<Gray<i32>>::invalid());
/// assert!(!acc.is_valid());
/// ```
#[inline]
pub fn compound_apply_in_place<'a, A, B, F>(mut f: F, a: &'a mut Masked<A>, b: &Masked<B>) -> &'a mut Masked<A>
where
    A: Payload,
    B: Payload<Arity = A::Arity>,
    F: FnMut(&mut A::Channel, B::Channel),
{
    const { assert!(A::CHANNELS == B::CHANNELS, "operands must have the same channel count") };
    if a.is_valid() && b.is_valid() {
        <A::Arity as ChannelArity>::zip_in_place(&mut f, a.child_mut(), b.child());
    } else {
        *a = Masked::invalid();
    }
    a
}

/// Builds a value with channel `i` set to `f(a[i])`, or an invalid value if
/// `a` is invalid.
#[inline]
pub fn compound_apply_unary<A, R, F>(f: F, a: &Masked<A>) -> Masked<A::Cast<R>>
where
    A: Payload,
    R: Channel,
    F: Fn(A::Channel) -> R,
{
    if !a.is_valid() {
        return Masked::invalid();
    }
    Masked::new(<A::Arity as ChannelArity>::map::<A, A::Cast<R>, F>(&f, a.child()))
}

/// Calls `f(&mut a[i])` on every payload channel, or resets `a` to an
/// invalid default if it is invalid.
#[inline]
pub fn compound_apply_unary_in_place<A, F>(mut f: F, a: &mut Masked<A>) -> &mut Masked<A>
where
    A: Payload,
    F: FnMut(&mut A::Channel),
{
    if a.is_valid() {
        <A::Arity as ChannelArity>::map_in_place(&mut f, a.child_mut());
    } else {
        *a = Masked::invalid();
    }
    a
}

//! Arithmetic operators on masked values.
//!
//! Every operator is channelwise and goes through [`crate::dispatch`], so an
//! invalid operand always produces (or leaves) an invalid result.
//!
//! ```rust
//! use pixmask::prelude::*;
//!
//! let a = Masked::new(Gray::new(5i32));
//! let b = Masked::new(Gray::new(7i32));
//! assert_eq!((a + b).value(), 12);
//! assert!(!(a + Masked::invalid()).is_valid());
//! ```
//!
//! Integer channels follow Rust's integer semantics: overflow panics in debug
//! builds and wraps in release builds.

use crate::dispatch::{compound_apply, compound_apply_in_place, compound_apply_unary};
use crate::masked::Masked;
use pixmask_core::{Channel, Payload};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

macro_rules! binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T> $trait for Masked<T>
        where
            T: Payload,
            T::Channel: $trait,
            <T::Channel as $trait>::Output: Channel,
        {
            type Output = Masked<T::Cast<<T::Channel as $trait>::Output>>;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                compound_apply(|x: T::Channel, y: T::Channel| x $op y, &self, &rhs)
            }
        }
    };
}

macro_rules! assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T> $trait for Masked<T>
        where
            T: Payload,
            T::Channel: $trait,
        {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                compound_apply_in_place(|x: &mut T::Channel, y: T::Channel| *x $op y, self, &rhs);
            }
        }
    };
}

binary_op!(Add, add, +);
binary_op!(Sub, sub, -);
binary_op!(Mul, mul, *);
binary_op!(Div, div, /);

assign_op!(AddAssign, add_assign, +=);
assign_op!(SubAssign, sub_assign, -=);
assign_op!(MulAssign, mul_assign, *=);
assign_op!(DivAssign, div_assign, /=);

impl<T> Neg for Masked<T>
where
    T: Payload,
    T::Channel: Neg,
    <T::Channel as Neg>::Output: Channel,
{
    type Output = Masked<T::Cast<<T::Channel as Neg>::Output>>;

    #[inline]
    fn neg(self) -> Self::Output {
        compound_apply_unary(|x: T::Channel| -x, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use half::f16;
    use pixmask_core::{Gray, Rgb, Rgba, Vector};

    #[test]
    fn test_add_scenario() {
        let five = Masked::new(Gray::new(5u8));
        let seven = Masked::new(Gray::new(7u8));
        let missing = Masked::<Gray<u8>>::invalid();

        let sum = five + seven;
        assert!(sum.is_valid());
        assert_eq!(sum.value(), 12);
        assert!(!(five + missing).is_valid());
        assert!(!(missing + seven).is_valid());
    }

    #[test]
    fn test_channelwise_ops() {
        let a = Masked::new(Rgb::new(8.0f32, 6.0, 4.0));
        let b = Masked::new(Rgb::new(2.0f32, 3.0, 4.0));
        assert_eq!(*(a - b).child(), Rgb::new(6.0, 3.0, 0.0));
        assert_eq!(*(a * b).child(), Rgb::new(16.0, 18.0, 16.0));
        assert_eq!(*(a / b).child(), Rgb::new(4.0, 2.0, 1.0));
        assert_eq!(*(-a).child(), Rgb::new(-8.0, -6.0, -4.0));
        assert!((-a).is_valid());
        assert!(!(-Masked::<Rgb<f32>>::invalid()).is_valid());
    }

    #[test]
    fn test_assign_ops() {
        let mut acc = Masked::new(Rgba::new(1i32, 2, 3, 4));
        acc += Masked::new(Rgba::new(1, 1, 1, 1));
        assert_eq!(*acc.child(), Rgba::new(2, 3, 4, 5));
        acc *= Masked::new(Rgba::new(2, 2, 2, 2));
        acc -= Masked::new(Rgba::new(1, 1, 1, 1));
        acc /= Masked::new(Rgba::new(3, 5, 7, 9));
        assert_eq!(*acc.child(), Rgba::new(1, 1, 1, 1));
        assert!(acc.is_valid());

        acc += Masked::invalid();
        assert!(!acc.is_valid());
        acc += Masked::new(Rgba::new(1, 1, 1, 1));
        assert!(!acc.is_valid());
    }

    #[test]
    fn test_half_and_wide_payloads() {
        let a = Masked::new(Gray::new(f16::from_f32(0.25)));
        let b = Masked::new(Gray::new(f16::from_f32(0.5)));
        assert_relative_eq!((a + b).value().to_f32(), 0.75);

        let v = Masked::new(Vector::new([1.0f64; 5]));
        let w = Masked::new(Vector::new([0.5f64; 5]));
        assert_eq!((v - w).child().to_array(), [0.5; 5]);
    }
}

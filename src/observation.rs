use core::fmt;
use core::hash::Hash;

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Sealed trait module to prevent external implementations.
mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for usize {}
}

/// Trait for integer types that can be captured and indexed.
///
/// This trait is sealed and only implemented for the unsigned primitives
/// `u8`, `u16`, `u32`, `u64`, and `usize`. Restricting observations to
/// unsigned types makes negative values unrepresentable, so every value maps
/// onto a slot of the counting-sort scan that starts at zero.
///
/// | Type    | Largest value          |
/// |---------|------------------------|
/// | `u8`    | 255                    |
/// | `u16`   | 65,535                 |
/// | `u32`   | ~4.29B                 |
/// | `u64`   | ~1.8e19*               |
/// | `usize` | platform word*         |
///
/// *The build step scans every integer up to the largest observation, so
/// the practical limit is the span you can afford to walk, not the type.
///
/// The scan steps through values of the observation type itself, so no
/// value is ever narrowed to `usize`. Widening to `u64` is only used for
/// error reporting.
pub trait Observation:
    private::Sealed + PrimInt + Unsigned + Hash + fmt::Debug + AsPrimitive<u64> + 'static
{
}

impl Observation for u8 {}
impl Observation for u16 {}
impl Observation for u32 {}
impl Observation for u64 {}
impl Observation for usize {}

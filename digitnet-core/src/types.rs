use num_traits::{Float, Num, NumAssignOps};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A trait representing element types that can be stored in a [`Tensor`](crate::Tensor).
///
/// Elements must support basic arithmetic (for `matvec` and friends), ordering,
/// and a textual round trip through `Display`/`FromStr` for the tensor file format.
pub trait Scalar:
    Num // Add, Sub, Mul, Div, Rem, Zero, One
    + NumAssignOps // AddAssign, SubAssign, ...
    + Copy
    + PartialOrd
    + Debug
    + Display
    + FromStr
    + Send
    + Sync
    + 'static
{
}

impl Scalar for f32 {}
impl Scalar for f64 {}
impl Scalar for i32 {}
impl Scalar for i64 {}
impl Scalar for u8 {}
impl Scalar for usize {}

/// Floating-point scalars usable by the layers, losses and the trainer.
///
/// Strictly reserved for `f32` and `f64`.
pub trait Real: Scalar + Float + std::iter::Sum {
    /// Converts an `f64` constant (learning rates, thresholds, samples drawn
    /// from an `f64` distribution) into this type.
    fn cast(value: f64) -> Self;

    /// Widens this value to `f64` for reporting.
    fn widen(self) -> f64;
}

impl Real for f32 {
    fn cast(value: f64) -> Self {
        value as f32
    }

    fn widen(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    fn cast(value: f64) -> Self {
        value
    }

    fn widen(self) -> f64 {
        self
    }
}

use num::{Float, NumCast};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::AddAssign,
};

/// Floating point type the clustering engine calculates with.
pub trait Primitive: Float + NumCast + Sum + AddAssign + Default + Display + Debug + LowerExp
                + Send + Sync + 'static {
    /// Convert an `f64` constant (tolerances, test literals) into `Self`, rounding if needed.
    fn lossy_from_f64(v: f64) -> Self;

    /// Convert a member count into `Self`, rounding if needed.
    fn lossy_from_usize(n: usize) -> Self;
}
impl Primitive for f32 {
    fn lossy_from_f64(v: f64) -> Self { v as f32 }
    fn lossy_from_usize(n: usize) -> Self { n as f32 }
}
impl Primitive for f64 {
    fn lossy_from_f64(v: f64) -> Self { v }
    fn lossy_from_usize(n: usize) -> Self { n as f64 }
}

use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + FromStr
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {
    /// Convert an engine constant (or a count) into this primitive.
    fn from_f64(v: f64) -> Self;

    fn from_usize(v: usize) -> Self { Self::from_f64(v as f64) }
}
impl Primitive for f32 {
    #[inline(always)] fn from_f64(v: f64) -> Self { v as f32 }
}
impl Primitive for f64 {
    #[inline(always)] fn from_f64(v: f64) -> Self { v }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_survive_conversion() {
        assert_eq!(<f64 as Primitive>::from_f64(0.01), 0.01f64);
        assert_eq!(<f32 as Primitive>::from_f64(0.01), 0.01f32);
        assert_eq!(<f32 as Primitive>::from_usize(1000), 1000.0f32);
        assert_eq!(<f64 as Primitive>::from_usize(7), 7.0f64);
    }
}

//! Zero values and the numeric traits used by terminals and generators.
//!
//! The zero value of a type is its [`Default`]: `0` for numbers, `""` for
//! strings, `false` for booleans.

use std::ops::Add;

/// The zero value of `T`
pub fn zero<T: Default>() -> T {
    T::default()
}

/// Check whether `value` equals the zero value of its type
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Primitive numbers that can drive [`count`](crate::generators::count).
pub trait Number: Copy + PartialOrd + Default + Add<Output = Self> + Send + Sync + 'static {
    /// `self + step`, or `None` if the result is not representable.
    ///
    /// Integers use checked addition; floats always succeed.
    fn checked_step(self, step: Self) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                fn checked_step(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl Number for $t {
                fn checked_step(self, step: Self) -> Option<Self> {
                    Some(self + step)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/// Types that can be summed by [`sum`](crate::terminals::sum).
///
/// Numbers add; strings concatenate.
pub trait Summable: Default {
    /// Fold `value` into the running total
    fn accumulate(self, value: &Self) -> Self;
}

impl<T: Number> Summable for T {
    fn accumulate(self, value: &Self) -> Self {
        self + *value
    }
}

impl Summable for String {
    fn accumulate(mut self, value: &Self) -> Self {
        self.push_str(value);
        self
    }
}

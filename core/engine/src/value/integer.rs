use crate::gc::{empty_trace, Finalize, Trace};
use std::cmp::Ordering;

/// Represents the result of the `ToIntegerOrInfinity` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Finalize)]
pub enum IntegerOrInfinity {
    /// Negative infinity.
    NegativeInfinity,
    /// An integer.
    Integer(i64),
    /// Positive infinity.
    PositiveInfinity,
}

unsafe impl Trace for IntegerOrInfinity {
    empty_trace!();
}

impl IntegerOrInfinity {
    /// Clamps an `IntegerOrInfinity` between two `i64`, effectively converting
    /// it to an `i64`.
    #[must_use]
    pub fn clamp_finite(self, min: i64, max: i64) -> i64 {
        assert!(min <= max);
        match self {
            Self::Integer(i) => i.clamp(min, max),
            Self::PositiveInfinity => max,
            Self::NegativeInfinity => min,
        }
    }

    /// Gets the wrapped `i64` if the variant is an `Integer`.
    #[must_use]
    pub const fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl From<f64> for IntegerOrInfinity {
    fn from(number: f64) -> Self {
        // `ToIntegerOrInfinity ( argument )`
        if number.is_nan() || number == 0.0 {
            // 2. If number is NaN, +0𝔽, or -0𝔽, return 0.
            Self::Integer(0)
        } else if number == f64::INFINITY {
            // 3. If number is +∞𝔽, return +∞.
            Self::PositiveInfinity
        } else if number == f64::NEG_INFINITY {
            // 4. If number is -∞𝔽, return -∞.
            Self::NegativeInfinity
        } else {
            // 5. Let integer be floor(abs(ℝ(number))).
            // 6. If number < +0𝔽, set integer to -integer.
            // 7. Return integer.
            Self::Integer(number.trunc() as i64)
        }
    }
}

impl PartialEq<i64> for IntegerOrInfinity {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Integer(i) if i == other)
    }
}

impl PartialOrd<i64> for IntegerOrInfinity {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        match self {
            Self::NegativeInfinity => Some(Ordering::Less),
            Self::Integer(i) => i.partial_cmp(other),
            Self::PositiveInfinity => Some(Ordering::Greater),
        }
    }
}

/// Represents the result of the `ToIntegerOrNan` operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegerOrNan {
    /// An integer.
    Integer(i64),
    /// `NaN`.
    #[default]
    Nan,
}

impl IntegerOrNan {
    /// Gets the wrapped `i64` if the variant is an `Integer`.
    #[must_use]
    pub const fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i),
            Self::Nan => None,
        }
    }
}

impl From<IntegerOrInfinity> for IntegerOrNan {
    fn from(ior: IntegerOrInfinity) -> Self {
        // Infinities are out of the integer range of every consumer of
        // `IntegerOrNan`, which maps them to NaN.
        match ior {
            IntegerOrInfinity::Integer(i) => Self::Integer(i),
            _ => Self::Nan,
        }
    }
}

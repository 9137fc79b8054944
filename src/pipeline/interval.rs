//! Real-valued intervals with open, closed or unbounded ends

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

/// An interval of the real line.
///
/// Buckets of a discretisation use four shapes: `(-∞, b]`, `(a, b]`,
/// `(a, +∞)` and `(-∞, +∞)`. Spans of those may in principle produce any
/// other combination of bounds, so both ends are kept general.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl Interval {
    /// `(-∞, +∞)`
    pub fn all() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    /// `(-∞, upper]`
    pub fn at_most(upper: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Included(upper),
        }
    }

    /// `(lower, +∞)`
    pub fn greater_than(lower: f64) -> Self {
        Self {
            lower: Bound::Excluded(lower),
            upper: Bound::Unbounded,
        }
    }

    /// `(lower, upper]`
    pub fn open_closed(lower: f64, upper: f64) -> Self {
        Self {
            lower: Bound::Excluded(lower),
            upper: Bound::Included(upper),
        }
    }

    pub fn lower(&self) -> Bound<f64> {
        self.lower
    }

    pub fn upper(&self) -> Bound<f64> {
        self.upper
    }

    /// Check whether `value` lies inside the interval. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let above_lower = match self.lower {
            Bound::Unbounded => true,
            Bound::Included(a) => value >= a,
            Bound::Excluded(a) => value > a,
        };
        let below_upper = match self.upper {
            Bound::Unbounded => true,
            Bound::Included(b) => value <= b,
            Bound::Excluded(b) => value < b,
        };
        above_lower && below_upper
    }

    /// Smallest interval enclosing both `self` and `other`.
    ///
    /// The operands do not need to be connected; any gap between them is
    /// included in the result.
    pub fn span(&self, other: &Interval) -> Interval {
        let lower = match cmp_lower(&self.lower, &other.lower) {
            Ordering::Greater => other.lower,
            _ => self.lower,
        };
        let upper = match cmp_upper(&self.upper, &other.upper) {
            Ordering::Less => other.upper,
            _ => self.upper,
        };
        Interval { lower, upper }
    }
}

/// Order lower bounds by how far left they reach
fn cmp_lower(a: &Bound<f64>, b: &Bound<f64>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => {
            x.total_cmp(y)
        }
        (Bound::Included(x), Bound::Excluded(y)) => x.total_cmp(y).then(Ordering::Less),
        (Bound::Excluded(x), Bound::Included(y)) => x.total_cmp(y).then(Ordering::Greater),
    }
}

/// Order upper bounds by how far right they reach
fn cmp_upper(a: &Bound<f64>, b: &Bound<f64>) -> Ordering {
    match (a, b) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Greater,
        (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(x), Bound::Included(y)) | (Bound::Excluded(x), Bound::Excluded(y)) => {
            x.total_cmp(y)
        }
        (Bound::Included(x), Bound::Excluded(y)) => x.total_cmp(y).then(Ordering::Greater),
        (Bound::Excluded(x), Bound::Included(y)) => x.total_cmp(y).then(Ordering::Less),
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Bound::Unbounded => write!(f, "(-∞")?,
            Bound::Included(a) => write!(f, "[{}", a)?,
            Bound::Excluded(a) => write!(f, "({}", a)?,
        }
        write!(f, "..")?;
        match self.upper {
            Bound::Unbounded => write!(f, "+∞)"),
            Bound::Included(b) => write!(f, "{}]", b),
            Bound::Excluded(b) => write!(f, "{})", b),
        }
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

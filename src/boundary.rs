//! Boundary policies for neighborhood samples that fall outside the image.
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an out-of-range neighborhood sample is produced.
///
/// `Replicate` (zero-flux Neumann) is the default and matches the border
/// clamping used by the rest of the crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Nearest edge value: `a a | a b c d | d d`.
    #[default]
    Replicate,
    /// Fixed value: `k k | a b c d | k k`.
    Constant(f32),
    /// Wrap around: `c d | a b c d | a b`.
    Periodic,
    /// Out-of-range samples are an error.
    Error,
}

/// Where a resolved sample comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundarySample {
    /// In-range coordinate along the queried axis.
    Index(usize),
    /// Value supplied directly by the policy.
    Value(f32),
}

impl BoundaryPolicy {
    /// Resolve coordinate `index` on an axis of length `len` (> 0).
    ///
    /// Returns `None` only for [`BoundaryPolicy::Error`] when `index` is out
    /// of range.
    #[inline]
    pub fn resolve(&self, index: isize, len: usize) -> Option<BoundarySample> {
        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(BoundarySample::Index(index as usize));
        }
        match *self {
            BoundaryPolicy::Replicate => Some(BoundarySample::Index(index.clamp(0, n - 1) as usize)),
            BoundaryPolicy::Constant(v) => Some(BoundarySample::Value(v)),
            BoundaryPolicy::Periodic => Some(BoundarySample::Index(index.rem_euclid(n) as usize)),
            BoundaryPolicy::Error => None,
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Replicate => write!(f, "replicate"),
            BoundaryPolicy::Constant(v) => write!(f, "constant({v})"),
            BoundaryPolicy::Periodic => write!(f, "periodic"),
            BoundaryPolicy::Error => write!(f, "error"),
        }
    }
}

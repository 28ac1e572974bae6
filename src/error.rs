//! Error type shared by kernel generation, region planning and the gradient
//! engine.
//!
//! Every variant is fatal for the run that raised it: `GradientFilter`
//! aborts the whole computation and returns no partial image.
use crate::image::Region;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GradientError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    /// The requested orders do not yield a usable stencil.
    #[error(
        "invalid kernel parameters: derivative order {derivative_order}, \
         accuracy order {accuracy_order}: {reason}"
    )]
    InvalidKernelParameters {
        derivative_order: usize,
        accuracy_order: usize,
        reason: &'static str,
    },

    /// Spacing-aware scaling was requested but an axis spacing is zero or
    /// not finite.
    #[error("image spacing cannot be zero: axis {axis} has spacing {spacing} (accuracy order {accuracy_order})")]
    InvalidSpacing {
        axis: usize,
        spacing: f64,
        accuracy_order: usize,
    },

    /// The padded input region lies outside the largest possible region.
    #[error("requested region {requested} is (at least partially) outside the largest possible region {largest}")]
    InsufficientRegion { requested: Region, largest: Region },

    /// Shape, metadata or buffer length disagree with the image dimension.
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// An output region is not contained in the image.
    #[error("region {region} is not inside the largest possible region {largest}")]
    RegionOutOfBounds { region: Region, largest: Region },

    /// Two output regions handed to the engine share pixels.
    #[error("output regions {first} and {second} overlap")]
    OverlappingRegions { first: Region, second: Region },

    /// A neighborhood sample fell outside the image under the `Error`
    /// boundary policy.
    #[error("neighborhood sample at index {index} along axis {axis} is outside the image")]
    BoundaryViolation { axis: usize, index: isize },
}

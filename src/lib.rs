#![doc = include_str!("../README.md")]

// Core: kernel generation and the gradient engine.
pub mod gradient;
pub mod kernel;

// Substrate the engine runs on: images, regions, neighborhoods.
pub mod boundary;
pub mod faces;
pub mod image;
pub mod neighborhood;

pub mod config;
pub mod error;

// --- High-level re-exports -------------------------------------------------

pub use crate::boundary::BoundaryPolicy;
pub use crate::error::{GradientError, Result};
pub use crate::gradient::{
    compute_region, required_input_region, required_padding, GradientConfig, GradientFilter,
    GradientImage, RegionGradient,
};
pub use crate::kernel::{required_input_padding, DerivativeKernel};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use higher_order_gradient::prelude::*;
///
/// let img = NdImage::from_fn(&[16, 16], |i| 0.5 * i[0] as f32);
/// let grad = GradientFilter::new(GradientConfig::new(3)).compute(&img).unwrap();
/// assert!((grad.vector(&[8, 8])[0] - 0.5).abs() < 1e-6);
/// ```
pub mod prelude {
    pub use crate::image::{NdImage, NdImageView, Region};
    pub use crate::{BoundaryPolicy, GradientConfig, GradientFilter, GradientImage};
}

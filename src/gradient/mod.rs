//! Gradient computation engine.
//!
//! - [`GradientConfig`]: immutable run settings.
//! - [`compute_region`]: gradient vectors for one output region.
//! - [`required_padding`] / [`required_input_region`]: what an upstream
//!   planner must materialise before calling the engine.
//! - [`GradientFilter`]: splits the image into disjoint regions and runs
//!   them, in parallel with the `parallel` feature.

pub mod config;
pub mod engine;
pub mod filter;
pub mod kernels;
pub mod output;

pub use self::config::GradientConfig;
pub use self::engine::{compute_region, required_input_region, required_padding};
pub use self::filter::GradientFilter;
pub use self::kernels::AxisKernels;
pub use self::output::{GradientImage, RegionGradient};

//! Per-region kernel setup: one flipped, optionally spacing-scaled
//! first-derivative kernel per axis.
use super::GradientConfig;
use crate::error::{GradientError, Result};
use crate::kernel::DerivativeKernel;

#[derive(Clone, Debug)]
pub struct AxisKernels {
    kernels: Vec<DerivativeKernel>,
    radius: usize,
}

impl AxisKernels {
    /// Build the kernels for an image with the given per-axis spacing.
    ///
    /// Fails with `InvalidSpacing` when spacing-aware scaling is enabled and
    /// any axis spacing is zero or not finite.
    pub fn prepare(config: &GradientConfig, spacing: &[f64]) -> Result<Self> {
        let mut kernels = Vec::with_capacity(spacing.len());
        for (axis, &s) in spacing.iter().enumerate() {
            // Correlation order for the neighborhood inner product.
            let mut kernel = DerivativeKernel::first_derivative(config.accuracy_order)?.flip();
            if config.use_image_spacing {
                if s == 0.0 || !s.is_finite() {
                    return Err(GradientError::InvalidSpacing {
                        axis,
                        spacing: s,
                        accuracy_order: config.accuracy_order,
                    });
                }
                kernel = kernel.scale(1.0 / s);
            }
            kernels.push(kernel);
        }
        let radius = kernels.iter().map(DerivativeKernel::radius).max().unwrap_or(0);
        Ok(Self { kernels, radius })
    }

    /// Shared neighborhood radius (largest kernel half-width).
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn kernel(&self, axis: usize) -> &DerivativeKernel {
        &self.kernels[axis]
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Longest kernel, used to size slice scratch buffers.
    pub fn max_len(&self) -> usize {
        self.kernels.iter().map(DerivativeKernel::len).max().unwrap_or(0)
    }
}

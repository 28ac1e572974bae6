//! Higher-order-accurate finite-difference derivative kernels.
//!
//! A [`DerivativeKernel`] holds the 1-D stencil for a given derivative order
//! `d` and accuracy order `a`. Convolving it with uniformly sampled values
//! approximates the `d`-th derivative with truncation error `O(h^(2a))`.
//!
//! Layout
//! - Kernels are centred and always have odd length `2r + 1` with radius
//!   `r = a + ⌊(d − 1)/2⌋` (so `r = a` for first and second derivatives).
//! - Freshly generated kernels are stored in *convolution* order: tap `j`
//!   multiplies the sample at offset `r − j`. [`DerivativeKernel::flip`]
//!   reverses the taps into *correlation* order (tap `j` ↔ offset `j − r`),
//!   which is what a neighborhood inner product consumes.
//! - [`DerivativeKernel::weight`] always reports the Taylor weight for a
//!   signed offset, independent of the current orientation.
//!
//! Generation is pure: identical inputs always produce identical taps.

mod coefficients;

use crate::error::{GradientError, Result};

/// Widest stencil the closed forms are evaluated for.
const MAX_KERNEL_RADIUS: usize = 4096;
/// The recursion loses double precision well before this width.
const MAX_FORNBERG_RADIUS: usize = 64;

/// Tap ordering of a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOrder {
    /// Tap `j` pairs with offset `r − j` (discrete convolution).
    Convolution,
    /// Tap `j` pairs with offset `j − r` (correlation / inner product).
    Correlation,
}

impl TapOrder {
    fn reversed(self) -> Self {
        match self {
            TapOrder::Convolution => TapOrder::Correlation,
            TapOrder::Correlation => TapOrder::Convolution,
        }
    }
}

/// Immutable 1-D finite-difference stencil.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivativeKernel {
    derivative_order: usize,
    accuracy_order: usize,
    taps: Vec<f64>,
    order: TapOrder,
}

impl DerivativeKernel {
    /// Generate the kernel for `derivative_order ≥ 1` and `accuracy_order ≥ 1`.
    pub fn generate(derivative_order: usize, accuracy_order: usize) -> Result<Self> {
        let invalid = |reason| GradientError::InvalidKernelParameters {
            derivative_order,
            accuracy_order,
            reason,
        };
        if derivative_order == 0 {
            return Err(invalid("derivative order must be at least 1"));
        }
        if accuracy_order == 0 {
            return Err(invalid("accuracy order must be at least 1"));
        }
        let radius = accuracy_order
            .checked_add((derivative_order - 1) / 2)
            .ok_or_else(|| invalid("stencil radius overflows"))?;
        if radius > MAX_KERNEL_RADIUS {
            return Err(invalid("stencil too wide"));
        }

        let weights = match derivative_order {
            1 => coefficients::first_derivative(radius),
            2 => coefficients::second_derivative(radius),
            _ if radius > MAX_FORNBERG_RADIUS => {
                return Err(invalid("stencil too wide for the recursive weights"))
            }
            d => coefficients::fornberg(d, radius),
        };

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(invalid("coefficients are not finite"));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(invalid("coefficient set is degenerate"));
        }

        // Weights are indexed by offset; convolution order is the reverse.
        let mut taps = weights;
        taps.reverse();
        Ok(Self {
            derivative_order,
            accuracy_order,
            taps,
            order: TapOrder::Convolution,
        })
    }

    /// Shorthand for the first-derivative kernel used by the gradient engine.
    pub fn first_derivative(accuracy_order: usize) -> Result<Self> {
        Self::generate(1, accuracy_order)
    }

    pub fn derivative_order(&self) -> usize {
        self.derivative_order
    }

    pub fn accuracy_order(&self) -> usize {
        self.accuracy_order
    }

    /// Half-width of the stencil.
    #[inline]
    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Raw taps in the current [`TapOrder`].
    #[inline]
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn tap_order(&self) -> TapOrder {
        self.order
    }

    /// Taylor weight applied to the sample at signed `offset`, or `0.0` when
    /// the offset lies outside the stencil.
    pub fn weight(&self, offset: isize) -> f64 {
        let r = self.radius() as isize;
        if offset.abs() > r {
            return 0.0;
        }
        let j = match self.order {
            TapOrder::Convolution => r - offset,
            TapOrder::Correlation => r + offset,
        };
        self.taps[j as usize]
    }

    /// Taylor weights for offsets `-r..=r`, in ascending offset order.
    pub fn weights(&self) -> Vec<f64> {
        let r = self.radius() as isize;
        (-r..=r).map(|k| self.weight(k)).collect()
    }

    /// Reverse the tap order, switching between convolution and correlation
    /// orientation. The operator represented does not change.
    pub fn flip(mut self) -> Self {
        self.taps.reverse();
        self.order = self.order.reversed();
        self
    }

    /// Multiply every tap by `factor`.
    pub fn scale(mut self, factor: f64) -> Self {
        for t in &mut self.taps {
            *t *= factor;
        }
        self
    }
}

/// Neighborhood radius an upstream planner must pad the input region by for
/// a first-derivative gradient of the given accuracy order.
pub fn required_input_padding(accuracy_order: usize) -> Result<usize> {
    Ok(DerivativeKernel::first_derivative(accuracy_order)?.radius())
}

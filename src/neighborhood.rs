//! Axis-aligned neighborhood access around a centre pixel.
//!
//! The gradient only ever needs the 1-D slices of the neighborhood that run
//! through the centre along each axis. Interior pixels read them with plain
//! strided loads; boundary pixels resolve each coordinate through the
//! configured [`BoundaryPolicy`]. Both paths fill the same slice layout, so
//! results do not depend on which path produced them.
use crate::boundary::{BoundaryPolicy, BoundarySample};
use crate::error::{GradientError, Result};
use crate::image::NdImageView;

pub struct Neighborhood<'a> {
    samples: &'a [f32],
    shape: &'a [usize],
    strides: Vec<usize>,
    components: usize,
    policy: BoundaryPolicy,
}

impl<'a> Neighborhood<'a> {
    pub fn new<I: NdImageView + ?Sized>(image: &'a I, policy: BoundaryPolicy) -> Self {
        Self {
            samples: image.samples(),
            shape: image.shape(),
            strides: image.pixel_strides(),
            components: image.components(),
            policy,
        }
    }

    /// Linear pixel index of an in-range coordinate.
    #[inline]
    pub fn linear_index(&self, idx: &[isize]) -> usize {
        idx.iter()
            .zip(&self.strides)
            .map(|(&i, &s)| i as usize * s)
            .sum()
    }

    /// Fill `out` with the samples at offsets `-r..=r` (`r = out.len() / 2`)
    /// along `axis` through the pixel `center_linear`.
    ///
    /// Every offset must lie inside the image.
    #[inline]
    pub fn axis_slice_interior(
        &self,
        center_linear: usize,
        axis: usize,
        component: usize,
        out: &mut [f64],
    ) {
        let r = out.len() / 2;
        let step = self.strides[axis] * self.components;
        let mut pos = (center_linear - r * self.strides[axis]) * self.components + component;
        for v in out.iter_mut() {
            *v = f64::from(self.samples[pos]);
            pos += step;
        }
    }

    /// Same layout as [`Self::axis_slice_interior`], but out-of-range
    /// offsets go through the boundary policy.
    pub fn axis_slice_boundary(
        &self,
        center: &[isize],
        center_linear: usize,
        axis: usize,
        component: usize,
        out: &mut [f64],
    ) -> Result<()> {
        let r = (out.len() / 2) as isize;
        let len = self.shape[axis];
        let c = center[axis];
        // Pixel index of the axis line with coordinate 0 along `axis`.
        let line_base = center_linear - c as usize * self.strides[axis];
        for (k, v) in out.iter_mut().enumerate() {
            let coord = c + k as isize - r;
            *v = match self.policy.resolve(coord, len) {
                Some(BoundarySample::Index(i)) => {
                    let pixel = line_base + i * self.strides[axis];
                    f64::from(self.samples[pixel * self.components + component])
                }
                Some(BoundarySample::Value(value)) => f64::from(value),
                None => return Err(GradientError::BoundaryViolation { axis, index: coord }),
            };
        }
        Ok(())
    }
}

/// Inner product of a neighborhood slice with correlation-order taps.
///
/// Symmetric pairs are accumulated from the outside in, so an antisymmetric
/// kernel over a constant slice gives exactly zero.
#[inline]
pub fn inner_product(slice: &[f64], taps: &[f64]) -> f64 {
    debug_assert_eq!(slice.len(), taps.len());
    let n = taps.len();
    if n == 0 {
        return 0.0;
    }
    let (mut i, mut j) = (0, n - 1);
    let mut acc = 0.0;
    while i < j {
        acc += taps[i] * slice[i] + taps[j] * slice[j];
        i += 1;
        j -= 1;
    }
    if i == j {
        acc += taps[i] * slice[i];
    }
    acc
}

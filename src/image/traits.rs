use super::Region;
use nalgebra::DMatrix;

/// Read-only access to an N-dimensional image with per-pixel components.
///
/// Samples are stored pixel-major with axis 0 varying fastest; the
/// `components` samples of one pixel are contiguous.
pub trait NdImageView {
    fn shape(&self) -> &[usize];
    fn components(&self) -> usize;
    fn spacing(&self) -> &[f64];
    /// Orientation matrix (N × N) mapping grid axes to physical axes.
    fn direction(&self) -> &DMatrix<f64>;
    fn samples(&self) -> &[f32];

    fn dimension(&self) -> usize {
        self.shape().len()
    }

    fn num_pixels(&self) -> usize {
        self.shape().iter().product()
    }

    fn largest_region(&self) -> Region {
        Region::from_shape(self.shape())
    }

    /// Pixel strides in units of pixels (not samples).
    fn pixel_strides(&self) -> Vec<usize> {
        let mut strides = Vec::with_capacity(self.dimension());
        let mut acc = 1usize;
        for &n in self.shape() {
            strides.push(acc);
            acc *= n;
        }
        strides
    }

    /// Map a grid-local covariant vector to physical space:
    /// `physical[i] = Σ_j direction[(i, j)] · local[j]`.
    fn transform_local_vector_to_physical(&self, local: &[f64], physical: &mut [f64]) {
        let dir = self.direction();
        for (i, out) in physical.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (j, &l) in local.iter().enumerate() {
                acc += dir[(i, j)] * l;
            }
            *out = acc;
        }
    }
}

//! Gradient buffers: per-region results and the assembled output image.
//!
//! Each pixel stores `components × N` values, component-major: the
//! gradient of component `c` along axis `i` sits at `c * N + i`.
use crate::error::{GradientError, Result};
use crate::image::{NdImage, Region};

/// Gradient vectors written for one output region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionGradient {
    region: Region,
    values_per_pixel: usize,
    data: Vec<f32>,
}

impl RegionGradient {
    pub(crate) fn zeros(region: Region, values_per_pixel: usize) -> Self {
        let data = vec![0.0; region.num_pixels() * values_per_pixel];
        Self {
            region,
            values_per_pixel,
            data,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn values_per_pixel(&self) -> usize {
        self.values_per_pixel
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Position of the first value of pixel `idx` (must lie in the region).
    #[inline]
    pub(crate) fn offset_of(&self, idx: &[isize]) -> usize {
        let mut linear = 0usize;
        let mut stride = 1usize;
        for d in 0..self.region.dimension() {
            linear += (idx[d] - self.region.lower(d)) as usize * stride;
            stride *= self.region.size()[d];
        }
        linear * self.values_per_pixel
    }

    #[inline]
    pub(crate) fn pixel_mut(&mut self, offset: usize) -> &mut [f32] {
        &mut self.data[offset..offset + self.values_per_pixel]
    }

    /// Gradient values at absolute index `idx`, if it lies in the region.
    pub fn vector(&self, idx: &[isize]) -> Option<&[f32]> {
        if !self.region.contains_index(idx) {
            return None;
        }
        let o = self.offset_of(idx);
        Some(&self.data[o..o + self.values_per_pixel])
    }
}

/// Full-size gradient image assembled from disjoint region results.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientImage {
    shape: Vec<usize>,
    components: usize,
    data: Vec<f32>,
}

impl GradientImage {
    pub fn new(shape: &[usize], components: usize) -> Self {
        let pixels: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            components,
            data: vec![0.0; pixels * components * shape.len()],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn dimension(&self) -> usize {
        self.shape.len()
    }

    /// Components of the input image the gradient was taken of.
    pub fn components(&self) -> usize {
        self.components
    }

    pub fn values_per_pixel(&self) -> usize {
        self.components * self.shape.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn region(&self) -> Region {
        Region::from_shape(&self.shape)
    }

    fn linear_index(&self, idx: &[usize]) -> usize {
        let mut linear = 0usize;
        let mut stride = 1usize;
        for (&i, &n) in idx.iter().zip(&self.shape) {
            linear += i * stride;
            stride *= n;
        }
        linear
    }

    /// All gradient values of the pixel at `idx`.
    pub fn vector(&self, idx: &[usize]) -> &[f32] {
        let vpp = self.values_per_pixel();
        let start = self.linear_index(idx) * vpp;
        &self.data[start..start + vpp]
    }

    /// Copy a region result into place.
    pub fn write_region(&mut self, part: &RegionGradient) -> Result<()> {
        let vpp = self.values_per_pixel();
        if part.values_per_pixel() != vpp {
            return Err(GradientError::DimensionMismatch {
                what: "values per pixel",
                expected: vpp,
                found: part.values_per_pixel(),
            });
        }
        let largest = self.region();
        let region = part.region();
        if !region.is_inside(&largest) {
            return Err(GradientError::RegionOutOfBounds {
                region: region.clone(),
                largest,
            });
        }
        if region.is_empty() {
            return Ok(());
        }
        let mut idx = region.index().to_vec();
        let mut uidx = vec![0usize; idx.len()];
        let mut src = 0usize;
        loop {
            for (u, &i) in uidx.iter_mut().zip(&idx) {
                *u = i as usize;
            }
            let dst = self.linear_index(&uidx) * vpp;
            self.data[dst..dst + vpp].copy_from_slice(&part.data[src..src + vpp]);
            src += vpp;
            if !region.next_index(&mut idx) {
                break;
            }
        }
        Ok(())
    }

    /// Euclidean norm of every pixel's gradient values.
    pub fn magnitude(&self) -> NdImage {
        let vpp = self.values_per_pixel();
        let mut out = NdImage::new(&self.shape);
        if vpp == 0 {
            return out;
        }
        for (dst, g) in out.data_mut().iter_mut().zip(self.data.chunks_exact(vpp)) {
            *dst = g.iter().map(|v| v * v).sum::<f32>().sqrt();
        }
        out
    }
}

//! Owned N-dimensional f32 image with spacing and orientation metadata.
//!
//! Layout matches [`NdImageView`]: pixel-major, axis 0 fastest, `components`
//! interleaved samples per pixel.
use super::NdImageView;
use crate::error::{GradientError, Result};
use nalgebra::DMatrix;

#[derive(Clone, Debug, PartialEq)]
pub struct NdImage {
    shape: Vec<usize>,
    components: usize,
    spacing: Vec<f64>,
    direction: DMatrix<f64>,
    data: Vec<f32>,
}

impl NdImage {
    /// Zero-initialised scalar image with unit spacing and identity direction.
    pub fn new(shape: &[usize]) -> Self {
        Self::with_components(shape, 1)
    }

    /// Zero-initialised image with `components` samples per pixel.
    pub fn with_components(shape: &[usize], components: usize) -> Self {
        let n = shape.len();
        let pixels: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            components,
            spacing: vec![1.0; n],
            direction: DMatrix::identity(n, n),
            data: vec![0.0; pixels * components],
        }
    }

    /// Wrap an existing sample buffer.
    pub fn from_vec(shape: &[usize], components: usize, data: Vec<f32>) -> Result<Self> {
        let expected = shape.iter().product::<usize>() * components;
        if data.len() != expected {
            return Err(GradientError::DimensionMismatch {
                what: "sample buffer length",
                expected,
                found: data.len(),
            });
        }
        let mut img = Self::with_components(shape, components);
        img.data = data;
        Ok(img)
    }

    /// Scalar image whose value at each index is `f(index)`.
    pub fn from_fn(shape: &[usize], f: impl Fn(&[usize]) -> f32) -> Self {
        let mut img = Self::new(shape);
        let region = img.largest_region();
        if region.is_empty() {
            return img;
        }
        let mut idx = region.index().to_vec();
        let mut uidx = vec![0usize; shape.len()];
        let mut linear = 0usize;
        loop {
            for (u, &i) in uidx.iter_mut().zip(&idx) {
                *u = i as usize;
            }
            img.data[linear] = f(&uidx);
            linear += 1;
            if !region.next_index(&mut idx) {
                break;
            }
        }
        img
    }

    pub fn with_spacing(mut self, spacing: &[f64]) -> Result<Self> {
        if spacing.len() != self.shape.len() {
            return Err(GradientError::DimensionMismatch {
                what: "spacing",
                expected: self.shape.len(),
                found: spacing.len(),
            });
        }
        self.spacing = spacing.to_vec();
        Ok(self)
    }

    pub fn with_direction(mut self, direction: DMatrix<f64>) -> Result<Self> {
        let n = self.shape.len();
        if direction.nrows() != n || direction.ncols() != n {
            return Err(GradientError::DimensionMismatch {
                what: "direction matrix",
                expected: n,
                found: direction.nrows().max(direction.ncols()),
            });
        }
        self.direction = direction;
        Ok(self)
    }

    #[inline]
    pub fn linear_index(&self, idx: &[usize]) -> usize {
        let mut linear = 0usize;
        let mut stride = 1usize;
        for (&i, &n) in idx.iter().zip(&self.shape) {
            linear += i * stride;
            stride *= n;
        }
        linear
    }

    /// All samples of the pixel at `idx`.
    pub fn pixel(&self, idx: &[usize]) -> &[f32] {
        let start = self.linear_index(idx) * self.components;
        &self.data[start..start + self.components]
    }

    /// First component of the pixel at `idx`.
    pub fn get(&self, idx: &[usize]) -> f32 {
        self.pixel(idx)[0]
    }

    pub fn set_component(&mut self, idx: &[usize], component: usize, v: f32) {
        let i = self.linear_index(idx) * self.components + component;
        self.data[i] = v;
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

impl NdImageView for NdImage {
    #[inline]
    fn shape(&self) -> &[usize] {
        &self.shape
    }
    #[inline]
    fn components(&self) -> usize {
        self.components
    }
    #[inline]
    fn spacing(&self) -> &[f64] {
        &self.spacing
    }
    #[inline]
    fn direction(&self) -> &DMatrix<f64> {
        &self.direction
    }
    #[inline]
    fn samples(&self) -> &[f32] {
        &self.data
    }
}

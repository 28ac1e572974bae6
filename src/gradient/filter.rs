//! Orchestrator: split the image into disjoint regions, compute each one
//! independently (in parallel with the `parallel` feature), and assemble
//! the results. Any region error aborts the whole run.
use super::engine::{compute_region, required_input_region, required_padding};
use super::output::{GradientImage, RegionGradient};
use super::GradientConfig;
use crate::error::{GradientError, Result};
use crate::image::{NdImageView, Region};
use log::debug;

#[derive(Clone, Debug)]
pub struct GradientFilter {
    config: GradientConfig,
    pieces: usize,
}

impl GradientFilter {
    /// Filter splitting work into one piece per worker thread.
    pub fn new(config: GradientConfig) -> Self {
        Self {
            config,
            pieces: default_pieces(),
        }
    }

    /// Number of regions the largest region is split into (>= 1).
    pub fn with_pieces(mut self, pieces: usize) -> Self {
        self.pieces = pieces.max(1);
        self
    }

    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    pub fn pieces(&self) -> usize {
        self.pieces
    }

    pub fn required_padding(&self) -> Result<usize> {
        required_padding(&self.config)
    }

    /// Gradient of the whole image.
    pub fn compute<I: NdImageView + Sync + ?Sized>(&self, input: &I) -> Result<GradientImage> {
        let regions = input.largest_region().split(self.pieces);
        debug!(
            "GradientFilter::compute pieces={} regions={}",
            self.pieces,
            regions.len()
        );
        self.compute_regions(input, &regions)
    }

    /// Gradient over the given regions, which must not overlap. Pixels
    /// outside every region stay zero.
    pub fn compute_regions<I: NdImageView + Sync + ?Sized>(
        &self,
        input: &I,
        regions: &[Region],
    ) -> Result<GradientImage> {
        for (i, a) in regions.iter().enumerate() {
            if let Some(b) = regions[i + 1..].iter().find(|b| a.overlaps(b)) {
                return Err(GradientError::OverlappingRegions {
                    first: a.clone(),
                    second: b.clone(),
                });
            }
        }
        let largest = input.largest_region();
        for region in regions {
            if region.dimension() != largest.dimension() {
                return Err(GradientError::DimensionMismatch {
                    what: "output region",
                    expected: largest.dimension(),
                    found: region.dimension(),
                });
            }
            let input_region = required_input_region(&self.config, region, &largest)?;
            debug!("GradientFilter: output {} needs input {}", region, input_region);
        }

        let parts = compute_parts(input, regions, &self.config)?;
        let mut out = GradientImage::new(input.shape(), input.components());
        for part in &parts {
            out.write_region(part)?;
        }
        Ok(out)
    }
}

impl Default for GradientFilter {
    fn default() -> Self {
        Self::new(GradientConfig::default())
    }
}

#[cfg(feature = "parallel")]
fn default_pieces() -> usize {
    rayon::current_num_threads().max(1)
}

#[cfg(not(feature = "parallel"))]
fn default_pieces() -> usize {
    1
}

#[cfg(feature = "parallel")]
fn compute_parts<I: NdImageView + Sync + ?Sized>(
    input: &I,
    regions: &[Region],
    config: &GradientConfig,
) -> Result<Vec<RegionGradient>> {
    use rayon::prelude::*;

    regions
        .par_iter()
        .map(|region| compute_region(input, region, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn compute_parts<I: NdImageView + Sync + ?Sized>(
    input: &I,
    regions: &[Region],
    config: &GradientConfig,
) -> Result<Vec<RegionGradient>> {
    regions
        .iter()
        .map(|region| compute_region(input, region, config))
        .collect()
}

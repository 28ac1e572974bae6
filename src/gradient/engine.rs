//! Per-region gradient computation.
//!
//! Setup (once per region): build the axis kernels, validate spacing, derive
//! the shared radius and split the region into interior and boundary zones.
//! Then, for every pixel, take the inner product of each axis kernel with
//! the neighborhood slice along that axis, optionally rotate the vector into
//! physical space, and store it.
//!
//! The region is read-only input plus a private output buffer, so disjoint
//! regions can be processed concurrently without synchronisation.
use super::kernels::AxisKernels;
use super::output::RegionGradient;
use super::GradientConfig;
use crate::error::{GradientError, Result};
use crate::faces::{boundary_faces, Face, FaceKind};
use crate::image::{NdImageView, Region};
use crate::kernel::required_input_padding;
use crate::neighborhood::{inner_product, Neighborhood};
use log::debug;

/// Radius the input region must be padded by for `config`.
pub fn required_padding(config: &GradientConfig) -> Result<usize> {
    required_input_padding(config.accuracy_order)
}

/// Input region needed to compute `output_requested`: padded by the kernel
/// radius and cropped to `largest`.
///
/// Fails with `InsufficientRegion` when the padded region does not intersect
/// the largest possible region.
pub fn required_input_region(
    config: &GradientConfig,
    output_requested: &Region,
    largest: &Region,
) -> Result<Region> {
    let padded = output_requested.pad_by_radius(required_padding(config)?);
    padded
        .crop(largest)
        .ok_or_else(|| GradientError::InsufficientRegion {
            requested: padded,
            largest: largest.clone(),
        })
}

/// Compute the gradient of `input` at every pixel of `output_region`.
pub fn compute_region<I: NdImageView + ?Sized>(
    input: &I,
    output_region: &Region,
    config: &GradientConfig,
) -> Result<RegionGradient> {
    let (kernels, largest) = prepare(input, output_region, config)?;
    let faces = boundary_faces(output_region, &largest, kernels.radius());
    debug!(
        "compute_region: region={} radius={} faces={} interior={}",
        output_region,
        kernels.radius(),
        faces.len(),
        faces
            .first()
            .is_some_and(|f| f.kind == FaceKind::Interior)
    );
    run_faces(input, output_region, config, &kernels, &faces)
}

/// Reference path that sends every pixel through the boundary-aware reads.
#[cfg(test)]
pub(crate) fn compute_region_unsplit<I: NdImageView + ?Sized>(
    input: &I,
    output_region: &Region,
    config: &GradientConfig,
) -> Result<RegionGradient> {
    let (kernels, _) = prepare(input, output_region, config)?;
    let faces = vec![Face {
        region: output_region.clone(),
        kind: FaceKind::Boundary,
    }];
    run_faces(input, output_region, config, &kernels, &faces)
}

fn prepare<I: NdImageView + ?Sized>(
    input: &I,
    output_region: &Region,
    config: &GradientConfig,
) -> Result<(AxisKernels, Region)> {
    let n = input.dimension();
    check_dimension("output region", n, output_region.dimension())?;
    check_dimension("spacing", n, input.spacing().len())?;
    if config.use_image_direction {
        let dir = input.direction();
        check_dimension("direction rows", n, dir.nrows())?;
        check_dimension("direction columns", n, dir.ncols())?;
    }
    check_dimension(
        "sample buffer length",
        input.num_pixels() * input.components(),
        input.samples().len(),
    )?;
    let largest = input.largest_region();
    if !output_region.is_inside(&largest) {
        return Err(GradientError::RegionOutOfBounds {
            region: output_region.clone(),
            largest,
        });
    }
    let kernels = AxisKernels::prepare(config, input.spacing())?;
    Ok((kernels, largest))
}

fn check_dimension(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(GradientError::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}

fn run_faces<I: NdImageView + ?Sized>(
    input: &I,
    output_region: &Region,
    config: &GradientConfig,
    kernels: &AxisKernels,
    faces: &[Face],
) -> Result<RegionGradient> {
    let n = input.dimension();
    let components = input.components();
    let mut out = RegionGradient::zeros(output_region.clone(), n * components);
    let nb = Neighborhood::new(input, config.boundary);
    let mut scratch = Scratch::new(n, kernels.max_len());
    for face in faces {
        process_face(input, config, kernels, &nb, face, &mut scratch, &mut out)?;
    }
    Ok(out)
}

struct Scratch {
    slice: Vec<f64>,
    local: Vec<f64>,
    physical: Vec<f64>,
}

impl Scratch {
    fn new(dimension: usize, slice_len: usize) -> Self {
        Self {
            slice: vec![0.0; slice_len],
            local: vec![0.0; dimension],
            physical: vec![0.0; dimension],
        }
    }
}

fn process_face<I: NdImageView + ?Sized>(
    input: &I,
    config: &GradientConfig,
    kernels: &AxisKernels,
    nb: &Neighborhood<'_>,
    face: &Face,
    scratch: &mut Scratch,
    out: &mut RegionGradient,
) -> Result<()> {
    if face.region.is_empty() {
        return Ok(());
    }
    let n = input.dimension();
    let components = input.components();
    let mut idx = face.region.index().to_vec();
    loop {
        let center = nb.linear_index(&idx);
        let offset = out.offset_of(&idx);
        for c in 0..components {
            for axis in 0..n {
                let kernel = kernels.kernel(axis);
                let slice = &mut scratch.slice[..kernel.len()];
                match face.kind {
                    FaceKind::Interior => nb.axis_slice_interior(center, axis, c, slice),
                    FaceKind::Boundary => nb.axis_slice_boundary(&idx, center, axis, c, slice)?,
                }
                scratch.local[axis] = inner_product(slice, kernel.taps());
            }
            let gradient = if config.use_image_direction {
                input.transform_local_vector_to_physical(&scratch.local, &mut scratch.physical);
                &scratch.physical
            } else {
                &scratch.local
            };
            let dst = &mut out.pixel_mut(offset)[c * n..(c + 1) * n];
            for (o, &g) in dst.iter_mut().zip(gradient.iter()) {
                *o = g as f32;
            }
        }
        if !face.region.next_index(&mut idx) {
            return Ok(());
        }
    }
}

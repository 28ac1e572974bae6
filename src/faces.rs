//! Split an output region into an interior zone and boundary zones.
//!
//! A pixel is interior when every offset in `[-radius, radius]` along every
//! axis stays inside the largest possible region, so its neighborhood can be
//! read without boundary handling. The remaining pixels are peeled off axis
//! by axis into low/high slabs. Zones are disjoint and cover the region.
//!
//! Complexity: O(N) zones, at most `2N + 1`.
use crate::image::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceKind {
    /// No neighborhood sample leaves the image.
    Interior,
    /// At least one axis needs the boundary policy.
    Boundary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub region: Region,
    pub kind: FaceKind,
}

/// Compute the zones of `region` (assumed inside `largest`) for a
/// neighborhood of `radius`. The interior zone, if any, comes first.
pub fn boundary_faces(region: &Region, largest: &Region, radius: usize) -> Vec<Face> {
    let mut boundary = Vec::new();
    if region.is_empty() {
        return boundary;
    }
    let r = radius as isize;
    let mut rest = region.clone();
    for d in 0..region.dimension() {
        let (lo, hi) = (rest.lower(d), rest.upper(d));
        let safe_lo = (largest.lower(d) + r).clamp(lo, hi);
        let safe_hi = (largest.upper(d) - r).clamp(safe_lo, hi);
        if safe_lo > lo {
            boundary.push(Face {
                region: rest.with_axis_range(d, lo, safe_lo),
                kind: FaceKind::Boundary,
            });
        }
        if hi > safe_hi {
            boundary.push(Face {
                region: rest.with_axis_range(d, safe_hi, hi),
                kind: FaceKind::Boundary,
            });
        }
        rest = rest.with_axis_range(d, safe_lo, safe_hi);
        if rest.is_empty() {
            return boundary;
        }
    }
    let mut faces = Vec::with_capacity(boundary.len() + 1);
    faces.push(Face {
        region: rest,
        kind: FaceKind::Interior,
    });
    faces.extend(boundary);
    faces
}

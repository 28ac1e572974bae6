//! N-dimensional index regions.
//!
//! A [`Region`] is a box `[index, index + size)` on the integer grid. Indices
//! are signed so a region can be padded past the image origin before it is
//! cropped back to the largest possible region.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    index: Vec<isize>,
    size: Vec<usize>,
}

impl Region {
    /// Build a region from a start index and per-axis size.
    ///
    /// Returns `None` when `index` and `size` disagree in dimension.
    pub fn new(index: Vec<isize>, size: Vec<usize>) -> Option<Self> {
        (index.len() == size.len()).then_some(Self { index, size })
    }

    /// Region covering a full image of the given shape, starting at zero.
    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            index: vec![0; shape.len()],
            size: shape.to_vec(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.size.len()
    }

    #[inline]
    pub fn index(&self) -> &[isize] {
        &self.index
    }

    #[inline]
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// First index along `axis`.
    #[inline]
    pub fn lower(&self, axis: usize) -> isize {
        self.index[axis]
    }

    /// One past the last index along `axis`.
    #[inline]
    pub fn upper(&self, axis: usize) -> isize {
        self.index[axis] + self.size[axis] as isize
    }

    pub fn num_pixels(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&s| s == 0)
    }

    pub fn contains_index(&self, idx: &[isize]) -> bool {
        idx.len() == self.dimension()
            && (0..self.dimension()).all(|d| idx[d] >= self.lower(d) && idx[d] < self.upper(d))
    }

    /// `true` when every pixel of `self` lies in `other`.
    pub fn is_inside(&self, other: &Region) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        (0..self.dimension())
            .all(|d| self.lower(d) >= other.lower(d) && self.upper(d) <= other.upper(d))
    }

    /// Grow the region by `radius` on both sides of every axis.
    pub fn pad_by_radius(&self, radius: usize) -> Region {
        Region {
            index: self.index.iter().map(|&i| i - radius as isize).collect(),
            size: self.size.iter().map(|&s| s + 2 * radius).collect(),
        }
    }

    /// Intersection with `other`, or `None` if they share no pixel.
    pub fn crop(&self, other: &Region) -> Option<Region> {
        if self.dimension() != other.dimension() {
            return None;
        }
        let mut index = Vec::with_capacity(self.dimension());
        let mut size = Vec::with_capacity(self.dimension());
        for d in 0..self.dimension() {
            let lo = self.lower(d).max(other.lower(d));
            let hi = self.upper(d).min(other.upper(d));
            if hi <= lo {
                return None;
            }
            index.push(lo);
            size.push((hi - lo) as usize);
        }
        Some(Region { index, size })
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.crop(other).is_some()
    }

    /// Copy of `self` restricted to `[lo, hi)` along `axis`.
    pub fn with_axis_range(&self, axis: usize, lo: isize, hi: isize) -> Region {
        let mut r = self.clone();
        r.index[axis] = lo;
        r.size[axis] = (hi - lo).max(0) as usize;
        r
    }

    /// Split into at most `pieces` disjoint slabs along the outermost axis
    /// that has more than one index. The slabs cover `self` exactly.
    pub fn split(&self, pieces: usize) -> Vec<Region> {
        if self.is_empty() {
            return Vec::new();
        }
        let axis = match (0..self.dimension()).rev().find(|&d| self.size[d] > 1) {
            Some(axis) if pieces > 1 => axis,
            _ => return vec![self.clone()],
        };
        let len = self.size[axis];
        let count = pieces.min(len);
        let base = len / count;
        let extra = len % count;
        let mut out = Vec::with_capacity(count);
        let mut start = self.lower(axis);
        for i in 0..count {
            let n = (base + usize::from(i < extra)) as isize;
            out.push(self.with_axis_range(axis, start, start + n));
            start += n;
        }
        out
    }

    /// Advance `idx` to the next index of the region with axis 0 varying
    /// fastest. Returns `false` once the region is exhausted.
    pub fn next_index(&self, idx: &mut [isize]) -> bool {
        for d in 0..self.dimension() {
            idx[d] += 1;
            if idx[d] < self.upper(d) {
                return true;
            }
            idx[d] = self.lower(d);
        }
        false
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[index={:?}, size={:?}]", self.index, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(index: &[isize], size: &[usize]) -> Region {
        Region::new(index.to_vec(), size.to_vec()).unwrap()
    }

    #[test]
    fn pad_then_crop_clamps_to_largest() {
        let largest = Region::from_shape(&[10, 6]);
        let r = region(&[1, 0], &[3, 6]).pad_by_radius(2);
        assert_eq!(r, region(&[-1, -2], &[7, 10]));
        let cropped = r.crop(&largest).unwrap();
        assert_eq!(cropped, region(&[0, 0], &[6, 6]));
    }

    #[test]
    fn disjoint_crop_is_none() {
        let a = region(&[0, 0], &[4, 4]);
        let b = region(&[4, 0], &[4, 4]);
        assert!(a.crop(&b).is_none());
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&region(&[3, 3], &[2, 2])));
    }

    #[test]
    fn split_covers_region_without_overlap() {
        let r = region(&[0, 0, 2], &[5, 4, 7]);
        let parts = r.split(3);
        assert_eq!(parts.len(), 3);
        let total: usize = parts.iter().map(Region::num_pixels).sum();
        assert_eq!(total, r.num_pixels());
        for (i, a) in parts.iter().enumerate() {
            assert!(a.is_inside(&r));
            for b in &parts[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
        assert_eq!(parts[0].size(), &[5, 4, 3]);
    }

    #[test]
    fn split_never_exceeds_axis_length() {
        let r = region(&[0, 0], &[8, 2]);
        assert_eq!(r.split(16).len(), 2);
        assert_eq!(region(&[0], &[1]).split(4).len(), 1);
    }

    #[test]
    fn next_index_walks_axis_zero_fastest() {
        let r = region(&[1, 5], &[2, 2]);
        let mut idx = r.index().to_vec();
        let mut seen = vec![idx.clone()];
        while r.next_index(&mut idx) {
            seen.push(idx.clone());
        }
        assert_eq!(seen, vec![vec![1, 5], vec![2, 5], vec![1, 6], vec![2, 6]]);
    }
}

use crate::boundary::BoundaryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable settings for one gradient run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// Kernels are accurate to `2 × accuracy_order` Taylor terms (>= 1).
    pub accuracy_order: usize,
    /// Divide each axis kernel by the image spacing along that axis.
    pub use_image_spacing: bool,
    /// Rotate grid-local gradients into physical space with the image
    /// direction matrix.
    pub use_image_direction: bool,
    /// Policy for neighborhood samples outside the image.
    pub boundary: BoundaryPolicy,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            accuracy_order: 2,
            use_image_spacing: true,
            use_image_direction: true,
            boundary: BoundaryPolicy::Replicate,
        }
    }
}

impl GradientConfig {
    pub fn new(accuracy_order: usize) -> Self {
        Self {
            accuracy_order,
            ..Self::default()
        }
    }

    pub fn with_image_spacing(mut self, enabled: bool) -> Self {
        self.use_image_spacing = enabled;
        self
    }

    pub fn with_image_direction(mut self, enabled: bool) -> Self {
        self.use_image_direction = enabled;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }
}

impl fmt::Display for GradientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |b: bool| if b { "On" } else { "Off" };
        writeln!(f, "UseImageSpacing: {}", on_off(self.use_image_spacing))?;
        writeln!(f, "UseImageDirection: {}", on_off(self.use_image_direction))?;
        writeln!(f, "OrderOfAccuracy: {}", self.accuracy_order)?;
        write!(f, "Boundary: {}", self.boundary)
    }
}

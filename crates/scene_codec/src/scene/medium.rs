//! Participating media
//!
//! A medium affects light transport inside or outside a surface. Media are
//! stored in the scene's asset store and referenced by handle; the export
//! tables resolve those handles to indices by identity, never by content, so
//! two media with identical coefficients but distinct handles serialize as two
//! records.

use crate::foundation::math::Vec3;
use crate::scene::graph::MediumHandle;

/// Medium kind with the per-kind payload
#[derive(Debug, Clone, PartialEq)]
pub enum MediumKind {
    /// Uniform absorption/scattering throughout the volume
    Homogeneous {
        /// Absorption spectrum
        sigma_a: Vec3,
        /// Scattering spectrum
        sigma_s: Vec3,
        /// Henyey-Greenstein anisotropy
        g: f32,
    },
    /// Spatially varying medium; only the tag serializes, the renderer loads
    /// the density grid through its own channel
    Heterogeneous,
}

impl MediumKind {
    /// Wire tag of this kind
    pub fn tag(&self) -> i32 {
        match self {
            MediumKind::Homogeneous { .. } => 0,
            MediumKind::Heterogeneous => 1,
        }
    }
}

/// Named participating medium
#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    /// Medium name; occupies a 128-byte slot in the binary stream
    pub name: String,
    /// Kind and payload
    pub kind: MediumKind,
}

impl Medium {
    /// Create a homogeneous medium
    pub fn homogeneous(name: impl Into<String>, sigma_a: Vec3, sigma_s: Vec3, g: f32) -> Self {
        Self {
            name: name.into(),
            kind: MediumKind::Homogeneous {
                sigma_a,
                sigma_s,
                g,
            },
        }
    }
}

/// Inside/outside medium assignment for a node
///
/// `None` on either side means vacuum and serializes as the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediumInterface {
    /// Medium on the inside of the surface
    pub inside: Option<MediumHandle>,
    /// Medium on the outside of the surface
    pub outside: Option<MediumHandle>,
}

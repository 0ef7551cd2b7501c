//! Light components
//!
//! Pure data; systems and encoders carry the logic.

use crate::foundation::math::Vec3;

/// Kind of an explicit light node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Directional light at infinity; the payload is the negated world
    /// forward direction
    DeltaDistant,
    /// Point light; the payload is the point radius
    DeltaPoint,
    /// Area light, defined by emissive shape geometry; no payload
    Area,
}

impl LightKind {
    /// Wire tag of this kind
    pub fn tag(self) -> i32 {
        match self {
            LightKind::DeltaDistant => 0,
            LightKind::DeltaPoint => 1,
            LightKind::Area => 2,
        }
    }
}

/// Light component for scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct RtLight {
    /// Light kind
    pub kind: LightKind,
    /// RGB color
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Radius for point lights; ignored by other kinds
    pub point_radius: f32,
}

impl RtLight {
    /// White light of the given kind
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            point_radius: 0.0,
        }
    }
}

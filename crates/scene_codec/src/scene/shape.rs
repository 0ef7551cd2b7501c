//! Shape components

use crate::foundation::math::Vec3;

/// Geometry kind of a shape node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Analytic sphere; radius is half the transform's X scale
    Sphere,
    /// Arbitrary triangle mesh referenced through the node's mesh handle
    TriangleMesh,
    /// The canonical two-triangle quad, synthesized once per export run
    Rectangle,
}

impl ShapeKind {
    /// Wire tag of this kind (the renderer reserves 1 for disks)
    pub fn tag(self) -> i32 {
        match self {
            ShapeKind::Sphere => 0,
            ShapeKind::TriangleMesh => 2,
            ShapeKind::Rectangle => 3,
        }
    }

    /// Whether the binary transform for this kind carries non-uniform scale
    ///
    /// Only mesh-backed kinds keep their scale; the analytic sphere encodes
    /// size through its radius field instead. This matches the renderer's
    /// reader field-for-field.
    pub fn includes_scale(self) -> bool {
        matches!(self, ShapeKind::TriangleMesh | ShapeKind::Rectangle)
    }
}

/// Emission attached to an area-light shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEmission {
    /// Emitted radiance per channel
    pub radiance: Vec3,
    /// Scalar intensity multiplier
    pub intensity: f32,
}

/// Shape component for scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Geometry kind
    pub kind: ShapeKind,
    /// Present when the shape emits light
    pub emission: Option<AreaEmission>,
}

impl Shape {
    /// Non-emissive shape of the given kind
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            emission: None,
        }
    }

    /// Emissive shape
    pub fn emissive(kind: ShapeKind, radiance: Vec3, intensity: f32) -> Self {
        Self {
            kind,
            emission: Some(AreaEmission {
                radiance,
                intensity,
            }),
        }
    }
}

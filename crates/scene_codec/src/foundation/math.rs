//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene graph and both codec
//! directions.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let matrix = self.to_matrix();
        matrix.transform_point(&Point3::from(point)).coords
    }

    /// World-space forward axis (+Z rotated by this transform's rotation)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Build a rotation from Euler angles in degrees.
///
/// Composition order is Y, then X, then Z (the editor's convention for the
/// `rotation` field of authored entities), so round trips against scenes
/// authored there keep their orientation.
pub fn quat_from_euler_deg(euler: Vec3) -> Quat {
    let rx = Quat::from_axis_angle(&Vec3::x_axis(), deg_to_rad(euler.x));
    let ry = Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(euler.y));
    let rz = Quat::from_axis_angle(&Vec3::z_axis(), deg_to_rad(euler.z));
    ry * rx * rz
}

/// Build a rotation whose forward (+Z) axis points from `position` at `target`
pub fn quat_look_at(position: Vec3, target: Vec3, up: Vec3) -> Quat {
    let dir = target - position;
    if dir.norm_squared() <= f32::EPSILON {
        return Quat::identity();
    }
    Quat::face_towards(&dir, &up)
}

/// Encode a linear color to its gamma (sRGB-like, 1/2.2 exponent) form
pub fn linear_to_gamma(linear: Vec3) -> Vec3 {
    let g = |c: f32| {
        if c <= 0.0 {
            0.0
        } else {
            c.powf(1.0 / 2.2)
        }
    };
    Vec3::new(g(linear.x), g(linear.y), g(linear.z))
}

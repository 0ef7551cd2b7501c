//! Camera component

/// Camera component for scene nodes
///
/// The binary stream carries only the vertical field of view (converted to
/// radians) and the orthographic flag; near/far planes exist for the
/// structured-text round trip and the engine bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraNode {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Orthographic instead of perspective projection
    pub orthographic: bool,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl Default for CameraNode {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            orthographic: false,
            near: 0.3,
            far: 1000.0,
        }
    }
}

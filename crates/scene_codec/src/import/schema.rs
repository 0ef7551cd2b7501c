//! Structured-text scene schema
//!
//! The serde model of the JSON document the external converter emits and
//! authors edit by hand. Every field carries a default so sparse documents
//! parse; the defaults mirror what the converter writes for omitted values.
//!
//! Vector fields serialize as `[x, y, z]` arrays. One `Scene` object per file.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

fn vec3_one() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

fn vec3_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Default index of refraction: a generic dielectric
fn dielectric_eta() -> Vec3 {
    Vec3::new(1.5, 1.5, 1.5)
}

/// Material entry of the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialDoc {
    /// Material name; the lookup key entities reference
    pub name: String,
    /// Shader name, e.g. `RayTracing/Uber`
    pub shader_name: String,
    /// Shader-side material type tag
    #[serde(rename = "type")]
    pub material_type: i32,
    /// Base color, linear
    pub base_color: Vec3,
    /// Complex IOR eta; generic dielectric when omitted
    pub eta: Vec3,
    /// Complex IOR k (absorption)
    #[serde(rename = "K")]
    pub k: Vec3,
    /// Transmission color
    pub transmission: Vec3,
    /// Glossy specular color
    pub specular: Vec3,
    /// Albedo texture path, relative to the document
    pub albedo_texture: String,
    /// Fresnel type tag
    pub fresnel: i32,
    /// Roughness along U
    pub roughness_u: f32,
    /// Roughness along V
    pub roughness_v: f32,
    /// Emitted radiance (area-light shader)
    pub emission: Vec3,
    /// Named real-world metal; overrides eta/K when it resolves
    pub metal: String,
}

impl Default for MaterialDoc {
    fn default() -> Self {
        Self {
            name: String::new(),
            shader_name: String::new(),
            material_type: 0,
            base_color: vec3_one(),
            eta: dielectric_eta(),
            k: Vec3::zeros(),
            transmission: vec3_one(),
            specular: Vec3::zeros(),
            albedo_texture: String::new(),
            fresnel: 0,
            roughness_u: 0.0,
            roughness_v: 0.0,
            emission: Vec3::zeros(),
            metal: String::new(),
        }
    }
}

/// Entity entry of the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityDoc {
    /// Entity name
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Non-uniform scale
    pub scale: Vec3,
    /// Euler rotation in degrees
    pub rotation: Vec3,
    /// Named primitive (`cube`, `sphere`, `plane`, `quad`, `disk`),
    /// case-insensitive; used when no mesh path is given
    pub mesh_type: String,
    /// Mesh asset path, relative to the document
    pub mesh: String,
    /// Name of a material defined in the document
    pub material: String,
    /// Emitted radiance; non-zero marks the entity emissive
    pub emission: Vec3,
    /// Total emitted power; converted to radiance over the mesh area when
    /// emission is zero
    pub power: f32,
}

impl Default for EntityDoc {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::zeros(),
            scale: vec3_one(),
            rotation: Vec3::zeros(),
            mesh_type: String::new(),
            mesh: String::new(),
            material: String::new(),
            emission: Vec3::zeros(),
            power: 0.0,
        }
    }
}

/// Environment light entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvLightDoc {
    /// Constant environment emission
    pub emission: Vec3,
    /// Skybox material asset path
    pub material: String,
    /// Environment map path, relative to the document
    pub envmap: String,
}

/// Camera entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraDoc {
    /// World position
    pub position: Vec3,
    /// Euler rotation in degrees; ignored when `use_look_at` is set
    pub rotation: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Orient via `look_at`/`up` instead of `rotation`
    pub use_look_at: bool,
    /// Look-at target
    pub look_at: Vec3,
    /// Up vector for look-at orientation
    pub up: Vec3,
}

impl Default for CameraDoc {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            fov: 60.0,
            near: 0.3,
            far: 1000.0,
            use_look_at: false,
            look_at: Vec3::zeros(),
            up: vec3_up(),
        }
    }
}

/// Renderer settings carried alongside the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererDoc {
    /// Samples per pixel
    pub samples_per_pixel: i32,
    /// Maximum path depth
    pub max_depth: i32,
    /// Minimum path depth before roulette
    pub min_depth: i32,
    /// Output exposure
    pub exposure: f32,
    /// Sample the environment map as a light
    pub environment_map_enable: bool,
    /// Uniform light selection instead of power-weighted
    pub uniform_sample_light: bool,
    /// Probability mass assigned to the environment light
    pub environment_light_pmf: f32,
    /// Lens radius for depth of field
    pub lens_radius: f32,
    /// Focal length for depth of field
    pub focal_length: f32,
}

impl Default for RendererDoc {
    fn default() -> Self {
        Self {
            samples_per_pixel: 128,
            max_depth: 5,
            min_depth: 3,
            exposure: 1.0,
            environment_map_enable: true,
            uniform_sample_light: false,
            environment_light_pmf: 0.5,
            lens_radius: 0.0,
            focal_length: 1.0,
        }
    }
}

/// One structured-text scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneDoc {
    /// Material definitions
    pub materials: Vec<MaterialDoc>,
    /// Entities
    pub entities: Vec<EntityDoc>,
    /// Environment light
    pub env_light: EnvLightDoc,
    /// Camera
    pub camera: CameraDoc,
    /// Renderer settings
    pub renderer: RendererDoc,
}

impl SceneDoc {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize a document to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sparse_document_gets_defaults() {
        let doc = SceneDoc::from_json(r#"{ "entities": [ { "name": "floor" } ] }"#).unwrap();
        assert_eq!(doc.entities.len(), 1);
        let e = &doc.entities[0];
        assert_eq!(e.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(e.power, 0.0);
        assert_eq!(doc.camera.fov, 60.0);
        assert_eq!(doc.renderer.samples_per_pixel, 128);
        assert!(doc.renderer.environment_map_enable);
    }

    #[test]
    fn test_material_field_names_and_eta_default() {
        let doc = SceneDoc::from_json(
            r#"{
                "materials": [
                    {
                        "name": "gold",
                        "shaderName": "RayTracing/Uber",
                        "type": 2,
                        "metal": "Au",
                        "baseColor": [1.0, 0.8, 0.4],
                        "roughnessU": 0.2
                    }
                ]
            }"#,
        )
        .unwrap();
        let m = &doc.materials[0];
        assert_eq!(m.shader_name, "RayTracing/Uber");
        assert_eq!(m.material_type, 2);
        assert_eq!(m.metal, "Au");
        assert_relative_eq!(m.roughness_u, 0.2);
        // omitted eta falls back to the generic dielectric
        assert_eq!(m.eta, Vec3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_k_field_is_capitalized() {
        let doc = SceneDoc::from_json(
            r#"{ "materials": [ { "name": "m", "K": [3.0, 2.0, 1.0] } ] }"#,
        )
        .unwrap();
        assert_eq!(doc.materials[0].k, Vec3::new(3.0, 2.0, 1.0));

        let out = doc.to_json().unwrap();
        assert!(out.contains("\"K\""));
    }

    #[test]
    fn test_camera_look_at_fields() {
        let doc = SceneDoc::from_json(
            r#"{
                "camera": {
                    "position": [0.0, 1.0, 5.0],
                    "useLookAt": true,
                    "lookAt": [0.0, 1.0, 0.0],
                    "fov": 40.0
                }
            }"#,
        )
        .unwrap();
        assert!(doc.camera.use_look_at);
        assert_eq!(doc.camera.up, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(doc.camera.fov, 40.0);
    }
}

//! Scene reconstruction from the structured-text model
//!
//! Rebuilds a scene graph from one parsed document: instantiates renderer
//! materials by shader kind, resolves geometry (mesh asset, named primitive,
//! or empty node), derives emissive radiance from power, and wires up the
//! camera and engine resource bindings.
//!
//! Recovery is local: an entity or material whose external asset does not
//! resolve is skipped and reported in the result's failure list while the
//! rest of the document reconstructs. IO and parse failures of the document
//! itself abort the whole call.

use std::path::Path;
use std::sync::Arc;

use crate::config::EngineResourcesConfig;
use crate::foundation::math::{linear_to_gamma, quat_from_euler_deg, quat_look_at, Vec3};
use crate::import::context::{ImportContext, PrimitiveKind};
use crate::import::schema::{EntityDoc, MaterialDoc, RendererDoc, SceneDoc};
use crate::import::ImportError;
use crate::scene::camera::CameraNode;
use crate::scene::graph::{Scene, SceneNode};
use crate::scene::material::{material_type, AssetHandle, RendererMaterial, ShaderKind};

/// A recoverable failure recorded during reconstruction
#[derive(Debug)]
pub struct ImportFailure {
    /// Entity, material, or resource the failure belongs to
    pub subject: String,
    /// What went wrong
    pub error: ImportError,
}

/// Resolved environment-light bindings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentBinding {
    /// Environment map texture
    pub envmap: Option<AssetHandle>,
    /// Skybox material
    pub skybox_material: Option<AssetHandle>,
}

/// Engine resource handles bound from configured paths
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineBindings {
    /// Mega-kernel resource
    pub mega_kernel: Option<AssetHandle>,
    /// Wavefront resource
    pub wavefront: Option<AssetHandle>,
    /// Output blit material
    pub blit_material: Option<AssetHandle>,
}

/// Output of one reconstruction run
#[derive(Debug)]
pub struct ImportResult {
    /// The reconstructed scene graph, fully owned by the caller
    pub scene: Scene,
    /// Renderer settings from the document
    pub renderer: RendererDoc,
    /// Environment-light bindings
    pub environment: EnvironmentBinding,
    /// Engine resource bindings
    pub engine: EngineBindings,
    /// Entities, materials, and resources that failed locally
    pub failures: Vec<ImportFailure>,
}

/// Read, parse, and reconstruct a scene document from `path`
///
/// Relative asset references resolve against the document's own directory.
pub fn import_scene_file(
    path: impl AsRef<Path>,
    ctx: &mut ImportContext<'_>,
    resources: &EngineResourcesConfig,
) -> Result<ImportResult, ImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let doc = SceneDoc::from_json(&text)?;
    Ok(reconstruct(&doc, ctx, resources))
}

/// Reconstruct a scene graph from a parsed document
pub fn reconstruct(
    doc: &SceneDoc,
    ctx: &mut ImportContext<'_>,
    resources: &EngineResourcesConfig,
) -> ImportResult {
    let mut failures = Vec::new();

    // 1. Materials, shared by name across entities.
    let mut materials: Vec<Arc<RendererMaterial>> = Vec::new();
    for mdoc in &doc.materials {
        match instantiate_material(mdoc, ctx, &mut failures) {
            Ok(material) => materials.push(Arc::new(material)),
            Err(error) => {
                log::warn!("material '{}' skipped: {}", mdoc.name, error);
                failures.push(ImportFailure {
                    subject: mdoc.name.clone(),
                    error,
                });
            }
        }
    }

    // Default material, created once on first use.
    let mut default_material: Option<Arc<RendererMaterial>> = None;

    // 2..5. Entities.
    let mut scene = Scene::new();
    for edoc in &doc.entities {
        if let Err(error) =
            build_entity(edoc, ctx, &materials, &mut default_material, &mut scene, &mut failures)
        {
            log::warn!("entity '{}' skipped: {}", edoc.name, error);
            failures.push(ImportFailure {
                subject: edoc.name.clone(),
                error,
            });
        }
    }

    // 6. Environment light.
    let mut environment = EnvironmentBinding::default();
    if !doc.env_light.envmap.is_empty() {
        match ctx.texture(&doc.env_light.envmap) {
            Some(handle) => {
                environment.envmap = Some(handle);
                if !doc.env_light.material.is_empty() {
                    let path = ctx.base_dir().join(&doc.env_light.material);
                    environment.skybox_material = ctx.resource(&path);
                }
            }
            None => failures.push(ImportFailure {
                subject: "envLight".to_string(),
                error: ImportError::MissingAsset {
                    entity: "envLight".to_string(),
                    path: doc.env_light.envmap.clone(),
                },
            }),
        }
    }

    // 7. Camera and engine bindings.
    scene.add_node(build_camera(doc));
    let engine = bind_engine_resources(ctx, resources, &mut failures);

    ImportResult {
        scene,
        renderer: doc.renderer.clone(),
        environment,
        engine,
        failures,
    }
}

/// Instantiate a renderer material from its document entry
fn instantiate_material(
    doc: &MaterialDoc,
    ctx: &mut ImportContext<'_>,
    failures: &mut Vec<ImportFailure>,
) -> Result<RendererMaterial, ImportError> {
    let shader = ShaderKind::from_name(&doc.shader_name).ok_or_else(|| {
        ImportError::UnknownShader {
            material: doc.name.clone(),
            shader: doc.shader_name.clone(),
        }
    })?;

    let mut material = RendererMaterial::new(doc.name.clone(), shader);
    match shader {
        ShaderKind::Uber => {
            let (eta, k, metal_kind) = if doc.material_type == material_type::METAL
                && !doc.metal.is_empty()
            {
                match ctx.metals.metal_ior(&doc.metal) {
                    Some(ior) => (ior.eta, ior.k, ior.kind),
                    None => (doc.eta, doc.k, 0),
                }
            } else {
                (doc.eta, doc.k, 0)
            };
            material.eta = eta;
            material.k = k;
            material.metal_kind = metal_kind;
            material.material_type = doc.material_type;
            material.fresnel = doc.fresnel;
            material.transmission = doc.transmission;
            material.base_color = doc.base_color;
            material.base_color_gamma = linear_to_gamma(doc.base_color);
            material.roughness_u = doc.roughness_u;
            material.roughness_v = doc.roughness_v;
            material.specular = doc.specular;

            if !doc.albedo_texture.is_empty() {
                match ctx.texture(&doc.albedo_texture) {
                    Some(handle) => material.albedo_texture = Some(handle),
                    // The material stays usable without its texture; record
                    // the miss so the caller sees which asset failed.
                    None => failures.push(ImportFailure {
                        subject: doc.name.clone(),
                        error: ImportError::MissingAsset {
                            entity: doc.name.clone(),
                            path: doc.albedo_texture.clone(),
                        },
                    }),
                }
            }
        }
        ShaderKind::AreaLight => {
            material.emission = doc.emission;
            material.emission_gamma = linear_to_gamma(doc.emission);
        }
    }
    Ok(material)
}

/// The fallback material for entities with no usable material reference
fn fallback_material(default_material: &mut Option<Arc<RendererMaterial>>) -> Arc<RendererMaterial> {
    default_material
        .get_or_insert_with(|| {
            Arc::new(RendererMaterial::new("defaultLambert", ShaderKind::Uber))
        })
        .clone()
}

/// Build one entity node and add it to the scene
fn build_entity(
    doc: &EntityDoc,
    ctx: &mut ImportContext<'_>,
    materials: &[Arc<RendererMaterial>],
    default_material: &mut Option<Arc<RendererMaterial>>,
    scene: &mut Scene,
    failures: &mut Vec<ImportFailure>,
) -> Result<(), ImportError> {
    let mut node = SceneNode::new(doc.name.clone());
    node.transform.position = doc.position;
    node.transform.scale = doc.scale;
    node.transform.rotation = quat_from_euler_deg(doc.rotation);

    // Geometry: explicit asset path, else a named primitive, else empty.
    let mesh_data = if !doc.mesh.is_empty() {
        Some(
            ctx.mesh(&doc.mesh)
                .ok_or_else(|| ImportError::MissingAsset {
                    entity: doc.name.clone(),
                    path: doc.mesh.clone(),
                })?,
        )
    } else {
        PrimitiveKind::from_name(&doc.mesh_type).map(|kind| ctx.primitives.generate(kind))
    };

    // Emission first: both the radiance computation and the material
    // assignment depend on it, and the area sum needs the final transform.
    let emissive = doc.emission.norm() > 0.0 || doc.power > 0.0;
    if emissive {
        let radiance = if doc.emission.norm() > 0.0 {
            doc.emission
        } else {
            let mesh = mesh_data
                .as_ref()
                .ok_or_else(|| ImportError::ZeroAreaEmitter {
                    entity: doc.name.clone(),
                })?;
            let area = mesh.surface_area(&node.transform);
            if area <= 0.0 {
                return Err(ImportError::ZeroAreaEmitter {
                    entity: doc.name.clone(),
                });
            }
            let value = doc.power / area;
            Vec3::new(value, value, value)
        };

        let mut material = RendererMaterial::new(
            format!("{}_emission", doc.name),
            ShaderKind::AreaLight,
        );
        material.emission = radiance;
        material.emission_gamma = linear_to_gamma(radiance);
        node.renderer_material = Some(Arc::new(material));
        node.area_light = true;
        node.name.push_str("_light");
    } else if !doc.material.is_empty() {
        match materials.iter().find(|m| m.name == doc.material) {
            Some(material) => node.renderer_material = Some(material.clone()),
            None => {
                // Fall back to the default but surface the dangling name.
                failures.push(ImportFailure {
                    subject: doc.name.clone(),
                    error: ImportError::MissingMaterial {
                        entity: doc.name.clone(),
                        name: doc.material.clone(),
                    },
                });
                node.renderer_material = Some(fallback_material(default_material));
            }
        }
    } else {
        node.renderer_material = Some(fallback_material(default_material));
    }

    node.mesh = mesh_data.map(|mesh| scene.assets.add_mesh(mesh));
    scene.add_node(node);
    Ok(())
}

/// Build the camera node from the document
fn build_camera(doc: &SceneDoc) -> SceneNode {
    let cam = &doc.camera;
    let mut node = SceneNode::new("MainCamera");
    node.transform.position = cam.position;
    node.transform.rotation = if cam.use_look_at {
        quat_look_at(cam.position, cam.look_at, cam.up)
    } else {
        quat_from_euler_deg(cam.rotation)
    };
    node.camera = Some(CameraNode {
        fov_degrees: cam.fov,
        orthographic: false,
        near: cam.near,
        far: cam.far,
    });
    node
}

/// Resolve the fixed engine resource paths from configuration
fn bind_engine_resources(
    ctx: &mut ImportContext<'_>,
    resources: &EngineResourcesConfig,
    failures: &mut Vec<ImportFailure>,
) -> EngineBindings {
    let mut bind = |name: &str, path: &Path, failures: &mut Vec<ImportFailure>| {
        let handle = ctx.resource(path);
        if handle.is_none() {
            log::warn!("engine resource '{}' at {} did not resolve", name, path.display());
            failures.push(ImportFailure {
                subject: name.to_string(),
                error: ImportError::MissingResource {
                    name: name.to_string(),
                    path: path.display().to_string(),
                },
            });
        }
        handle
    };

    EngineBindings {
        mega_kernel: bind("megaKernelResource", &resources.mega_kernel_resource, failures),
        wavefront: bind("wavefrontResource", &resources.wavefront_resource, failures),
        blit_material: bind("blitMaterial", &resources.blit_material, failures),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::context::{
        AssetResolver, MetalIor, MetalLookup, PrimitiveSource,
    };
    use crate::scene::mesh::MeshData;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct TestMetals;

    impl MetalLookup for TestMetals {
        fn metal_ior(&self, name: &str) -> Option<MetalIor> {
            (name == "Au").then(|| MetalIor {
                eta: Vec3::new(0.143, 0.375, 1.442),
                k: Vec3::new(3.983, 2.386, 1.603),
                kind: 6,
            })
        }
    }

    struct TestPrimitives;

    impl PrimitiveSource for TestPrimitives {
        fn generate(&self, kind: PrimitiveKind) -> MeshData {
            // Every primitive is a unit quad; enough for area math.
            let mut mesh = MeshData::new(
                vec![
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::new(1.0, 1.0, 0.0),
                ],
                vec![0, 1, 2, 1, 3, 2],
            );
            if kind == PrimitiveKind::Disk {
                mesh.indices.truncate(3);
            }
            mesh
        }
    }

    #[derive(Default)]
    struct TestResolver {
        assets: HashMap<PathBuf, u64>,
        meshes: HashMap<PathBuf, MeshData>,
    }

    impl AssetResolver for TestResolver {
        fn resolve(&mut self, path: &Path) -> Option<AssetHandle> {
            self.assets.get(path).map(|&id| AssetHandle::new(id))
        }

        fn load_mesh(&mut self, path: &Path) -> Option<MeshData> {
            self.meshes.get(path).cloned()
        }
    }

    fn resources_all_present(resolver: &mut TestResolver) -> EngineResourcesConfig {
        let config = EngineResourcesConfig::default();
        resolver.assets.insert(config.mega_kernel_resource.clone(), 100);
        resolver.assets.insert(config.wavefront_resource.clone(), 101);
        resolver.assets.insert(config.blit_material.clone(), 102);
        config
    }

    fn run(doc: &SceneDoc, resolver: &mut TestResolver) -> ImportResult {
        let config = resources_all_present(resolver);
        let metals = TestMetals;
        let primitives = TestPrimitives;
        let mut ctx = ImportContext::new("/scenes", &metals, &primitives, resolver);
        reconstruct(doc, &mut ctx, &config)
    }

    #[test]
    fn test_emission_from_power_unit_quad() {
        let doc = SceneDoc::from_json(
            r#"{
                "entities": [
                    { "name": "panel", "meshType": "quad", "power": 2.0 }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        assert!(result.failures.is_empty(), "{:?}", result.failures);
        let node = &result.scene.nodes[0];
        assert!(node.area_light);
        assert_eq!(node.name, "panel_light");
        let material = node.renderer_material.as_ref().unwrap();
        assert_eq!(material.shader, ShaderKind::AreaLight);
        for c in 0..3 {
            assert_relative_eq!(material.emission[c], 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_explicit_emission_wins_over_power() {
        let doc = SceneDoc::from_json(
            r#"{
                "entities": [
                    {
                        "name": "panel",
                        "meshType": "quad",
                        "emission": [3.0, 2.0, 1.0],
                        "power": 9.0
                    }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        let material = result.scene.nodes[0].renderer_material.as_ref().unwrap();
        assert_eq!(material.emission, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_zero_area_emitter_is_explicit_error() {
        // power on an entity with no geometry at all
        let doc = SceneDoc::from_json(
            r#"{ "entities": [ { "name": "ghost", "power": 5.0 } ] }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        assert_eq!(result.failures.len(), 1);
        assert!(matches!(
            result.failures[0].error,
            ImportError::ZeroAreaEmitter { .. }
        ));
        // the entity was skipped, only the camera node remains
        assert_eq!(result.scene.nodes.len(), 1);
    }

    #[test]
    fn test_metal_override_and_kind_tag() {
        let doc = SceneDoc::from_json(
            r#"{
                "materials": [
                    { "name": "gold", "shaderName": "RayTracing/Uber", "type": 2, "metal": "Au" },
                    { "name": "odd", "shaderName": "RayTracing/Uber", "type": 2, "metal": "Unobtainium",
                      "eta": [2.0, 2.0, 2.0] }
                ],
                "entities": [
                    { "name": "ring", "meshType": "sphere", "material": "gold" },
                    { "name": "blob", "meshType": "sphere", "material": "odd" }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        let gold = result.scene.nodes[0].renderer_material.as_ref().unwrap();
        assert_eq!(gold.metal_kind, 6);
        assert_relative_eq!(gold.eta.x, 0.143, epsilon = 1e-6);

        // unknown metal name: document eta stands, kind stays custom
        let odd = result.scene.nodes[1].renderer_material.as_ref().unwrap();
        assert_eq!(odd.metal_kind, 0);
        assert_eq!(odd.eta, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_named_material_shared_between_entities() {
        let doc = SceneDoc::from_json(
            r#"{
                "materials": [
                    { "name": "red", "shaderName": "RayTracing/Uber", "baseColor": [1.0, 0.0, 0.0] }
                ],
                "entities": [
                    { "name": "a", "meshType": "cube", "material": "red" },
                    { "name": "b", "meshType": "cube", "material": "red" }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        let a = result.scene.nodes[0].renderer_material.as_ref().unwrap();
        let b = result.scene.nodes[1].renderer_material.as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_default_material_fallback() {
        let doc = SceneDoc::from_json(
            r#"{
                "entities": [
                    { "name": "plain", "meshType": "cube" },
                    { "name": "dangling", "meshType": "cube", "material": "nope" }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        let plain = result.scene.nodes[0].renderer_material.as_ref().unwrap();
        assert_eq!(plain.name, "defaultLambert");

        // dangling reference falls back too, and is reported
        let dangling = result.scene.nodes[1].renderer_material.as_ref().unwrap();
        assert!(Arc::ptr_eq(plain, dangling));
        assert!(result
            .failures
            .iter()
            .any(|f| matches!(f.error, ImportError::MissingMaterial { .. })));
    }

    #[test]
    fn test_missing_mesh_asset_skips_entity_keeps_rest() {
        let doc = SceneDoc::from_json(
            r#"{
                "entities": [
                    { "name": "broken", "mesh": "models/missing.obj" },
                    { "name": "fine", "meshType": "cube" }
                ]
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].subject, "broken");
        // surviving entity + camera
        assert_eq!(result.scene.nodes.len(), 2);
        assert_eq!(result.scene.nodes[0].name, "fine");
    }

    #[test]
    fn test_unknown_mesh_type_yields_empty_node() {
        let doc = SceneDoc::from_json(
            r#"{ "entities": [ { "name": "marker", "meshType": "gizmo" } ] }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        assert!(result.failures.is_empty());
        assert!(result.scene.nodes[0].mesh.is_none());
    }

    #[test]
    fn test_camera_look_at_orientation() {
        let doc = SceneDoc::from_json(
            r#"{
                "camera": {
                    "position": [0.0, 0.0, 5.0],
                    "useLookAt": true,
                    "lookAt": [0.0, 0.0, 0.0],
                    "fov": 45.0,
                    "near": 0.1,
                    "far": 500.0
                }
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        let result = run(&doc, &mut resolver);

        let camera = result
            .scene
            .nodes
            .iter()
            .find(|n| n.camera.is_some())
            .unwrap();
        let forward = camera.transform.forward();
        assert_relative_eq!(forward.z, -1.0, epsilon = 1e-5);
        let component = camera.camera.as_ref().unwrap();
        assert_relative_eq!(component.fov_degrees, 45.0);
        assert_relative_eq!(component.near, 0.1);
    }

    #[test]
    fn test_environment_and_engine_bindings() {
        let doc = SceneDoc::from_json(
            r#"{
                "envLight": { "envmap": "sky.hdr", "material": "skybox.mat" }
            }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        resolver.assets.insert(PathBuf::from("/scenes/sky.hdr"), 7);
        resolver.assets.insert(PathBuf::from("/scenes/skybox.mat"), 8);
        let result = run(&doc, &mut resolver);

        assert_eq!(result.environment.envmap, Some(AssetHandle::new(7)));
        assert_eq!(
            result.environment.skybox_material,
            Some(AssetHandle::new(8))
        );
        assert!(result.engine.mega_kernel.is_some());
        assert!(result.engine.wavefront.is_some());
        assert!(result.engine.blit_material.is_some());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_missing_engine_resource_reported_not_fatal() {
        let doc = SceneDoc::from_json("{}").unwrap();
        let mut resolver = TestResolver::default();
        let metals = TestMetals;
        let primitives = TestPrimitives;
        let config = EngineResourcesConfig::default();
        let mut ctx = ImportContext::new("/scenes", &metals, &primitives, &mut resolver);
        let result = reconstruct(&doc, &mut ctx, &config);

        assert_eq!(result.failures.len(), 3);
        assert!(result.engine.mega_kernel.is_none());
        // the camera is still produced
        assert!(result.scene.nodes.iter().any(|n| n.camera.is_some()));
    }

    #[test]
    fn test_mesh_asset_resolved_relative_to_document() {
        let doc = SceneDoc::from_json(
            r#"{ "entities": [ { "name": "bunny", "mesh": "models/bunny.obj" } ] }"#,
        )
        .unwrap();
        let mut resolver = TestResolver::default();
        resolver.meshes.insert(
            PathBuf::from("/scenes/models/bunny.obj"),
            MeshData::new(vec![Vec3::zeros()], vec![]),
        );
        let result = run(&doc, &mut resolver);

        assert!(result.failures.is_empty());
        assert!(result.scene.nodes[0].mesh.is_some());
    }
}

//! Scene codec demo tool
//!
//! `scene_export export <out_dir>` builds the demo scene and writes the two
//! binary streams. `scene_export import <scene.json> [resources.toml]`
//! reconstructs a scene graph from a structured-text document and prints a
//! summary.

mod metals;
mod obj;
mod primitives;
mod resolver;

use std::path::Path;
use std::process::ExitCode;

use scene_codec::config::{Config, EngineResourcesConfig};
use scene_codec::export::SceneWriter;
use scene_codec::foundation::math::{quat_from_euler_deg, Vec3};
use scene_codec::import::{import_scene_file, ImportContext};
use scene_codec::scene::{
    BsdfMaterial, CameraNode, FloatTexture, LightKind, Medium, MediumInterface, RtLight, Scene,
    SceneNode, Shape, ShapeKind, SpectrumTexture,
};

use metals::MetalTable;
use primitives::BuiltinPrimitives;
use resolver::FsResolver;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("export") if args.len() == 3 => export(Path::new(&args[2])),
        Some("import") if args.len() == 3 || args.len() == 4 => {
            import(Path::new(&args[2]), args.get(3).map(String::as_str))
        }
        _ => {
            eprintln!("Usage: {} export <out_dir>", args[0]);
            eprintln!("       {} import <scene.json> [resources.toml]", args[0]);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Build the demo scene and export both binary streams
fn export(out_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(out_dir).map_err(|e| e.to_string())?;
    let scene = demo_scene();

    let mut writer = SceneWriter::new();
    let scene_bytes = writer
        .write_scene(&scene, out_dir.join("scene.rt"))
        .map_err(|e| e.to_string())?;
    let mesh_bytes = writer
        .write_meshes(&scene, out_dir.join("scene.m"))
        .map_err(|e| e.to_string())?;
    writer.clear();

    println!(
        "exported {} ({} scene bytes, {} mesh bytes)",
        out_dir.display(),
        scene_bytes,
        mesh_bytes
    );
    Ok(())
}

/// Reconstruct a scene from a structured-text document and print a summary
fn import(scene_path: &Path, resources_path: Option<&str>) -> Result<(), String> {
    let resources = match resources_path {
        Some(path) => EngineResourcesConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => EngineResourcesConfig::default(),
    };

    let metals = MetalTable;
    let primitives = BuiltinPrimitives;
    let mut resolver = FsResolver::new();
    let base_dir = scene_path.parent().unwrap_or(Path::new("."));
    let mut ctx = ImportContext::new(base_dir, &metals, &primitives, &mut resolver);

    let result =
        import_scene_file(scene_path, &mut ctx, &resources).map_err(|e| e.to_string())?;
    drop(ctx);

    println!("resolved {} external assets", resolver.resolved().len());
    println!(
        "reconstructed {} nodes ({} emissive), {} meshes",
        result.scene.nodes.len(),
        result.scene.nodes.iter().filter(|n| n.area_light).count(),
        result.scene.assets.mesh_count(),
    );
    println!(
        "renderer: {} spp, depth {}..{}",
        result.renderer.samples_per_pixel, result.renderer.min_depth, result.renderer.max_depth
    );
    for failure in &result.failures {
        println!("warning: {}: {}", failure.subject, failure.error);
    }
    Ok(())
}

/// A small Cornell-style scene exercising every record kind
fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    let fog = scene.assets.add_medium(Medium::homogeneous(
        "fog",
        Vec3::new(0.02, 0.02, 0.02),
        Vec3::new(0.1, 0.1, 0.1),
        0.0,
    ));

    let mut camera = SceneNode::new("camera");
    camera.transform.position = Vec3::new(0.0, 2.0, 12.0);
    camera.transform.rotation = quat_from_euler_deg(Vec3::new(0.0, 180.0, 0.0));
    camera.camera = Some(CameraNode {
        fov_degrees: 45.0,
        ..CameraNode::default()
    });
    scene.add_node(camera);

    let mut sun = SceneNode::new("sun");
    sun.transform.rotation = quat_from_euler_deg(Vec3::new(50.0, -30.0, 0.0));
    sun.light = Some(RtLight {
        color: Vec3::new(1.0, 0.96, 0.9),
        intensity: 3.0,
        ..RtLight::new(LightKind::DeltaDistant)
    });
    scene.add_node(sun);

    let mut floor = SceneNode::new("floor");
    floor.shape = Some(Shape::new(ShapeKind::Rectangle));
    floor.material = Some(BsdfMaterial::Plastic {
        kd: SpectrumTexture::Constant(Vec3::new(0.6, 0.6, 0.6)),
        ks: SpectrumTexture::Constant(Vec3::new(0.2, 0.2, 0.2)),
        roughness: FloatTexture::Constant(0.1),
    });
    scene.add_node(floor);

    let mut ball = SceneNode::new("matte_ball");
    ball.transform.position = Vec3::new(-1.5, 1.0, 0.0);
    ball.transform.scale = Vec3::new(2.0, 2.0, 2.0);
    ball.shape = Some(Shape::new(ShapeKind::Sphere));
    ball.material = Some(BsdfMaterial::Matte {
        kd: SpectrumTexture::Constant(Vec3::new(0.8, 0.3, 0.3)),
        sigma: FloatTexture::Constant(0.0),
    });
    ball.medium_interface = Some(MediumInterface {
        inside: Some(fog),
        outside: None,
    });
    scene.add_node(ball);

    let mut glass = SceneNode::new("glass_ball");
    glass.transform.position = Vec3::new(1.5, 1.0, 0.0);
    glass.transform.scale = Vec3::new(2.0, 2.0, 2.0);
    glass.shape = Some(Shape::new(ShapeKind::Sphere));
    glass.material = Some(BsdfMaterial::Glass {
        kr: SpectrumTexture::Constant(Vec3::new(1.0, 1.0, 1.0)),
        ks: SpectrumTexture::Constant(Vec3::new(1.0, 1.0, 1.0)),
        u_roughness: FloatTexture::Constant(0.0),
        v_roughness: FloatTexture::Constant(0.0),
        index: FloatTexture::Constant(1.5),
    });
    scene.add_node(glass);

    let mut panel = SceneNode::new("light_panel");
    panel.transform.position = Vec3::new(0.0, 6.0, 0.0);
    panel.transform.rotation = quat_from_euler_deg(Vec3::new(180.0, 0.0, 0.0));
    panel.transform.scale = Vec3::new(0.4, 1.0, 0.4);
    panel.shape = Some(Shape::emissive(
        ShapeKind::Rectangle,
        Vec3::new(10.0, 10.0, 9.0),
        1.0,
    ));
    scene.add_node(panel);

    scene
}

//! Material and texture model
//!
//! Two material flavors live on scene nodes. `BsdfMaterial` is the authored,
//! per-kind BSDF description the binary exporter serializes. `RendererMaterial`
//! is the flat shader-parameter block the structured-text reconstructor
//! instantiates and binds for the engine; the material inspector edits its
//! fields afterwards.
//!
//! Every kind is a closed sum type so encode sites are exhaustive; the numeric
//! wire tags keep the renderer's table, including slots it reserves for kinds
//! this codec does not author (bilerp textures, spherical mappings, metal and
//! disk records).

use crate::foundation::math::Vec3;

/// Texture coordinate wrapping behavior for image textures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Tile the image
    Repeat,
    /// Clamp to the edge texel
    Clamp,
    /// Mirror on every repeat
    Mirror,
}

impl WrapMode {
    /// Wire tag of this wrap mode
    pub fn tag(self) -> i32 {
        match self {
            WrapMode::Repeat => 0,
            WrapMode::Clamp => 1,
            WrapMode::Mirror => 2,
        }
    }
}

/// UV coordinate mapping applied before sampling an image texture
#[derive(Debug, Clone, PartialEq)]
pub enum UvMapping {
    /// Planar scale/offset mapping
    UvMapping2d {
        /// U scale
        su: f32,
        /// V scale
        sv: f32,
        /// U offset
        du: f32,
        /// V offset
        dv: f32,
    },
}

impl UvMapping {
    /// Wire tag of this mapping kind (spherical occupies slot 1)
    pub fn tag(&self) -> i32 {
        match self {
            UvMapping::UvMapping2d { .. } => 0,
        }
    }
}

impl Default for UvMapping {
    fn default() -> Self {
        UvMapping::UvMapping2d {
            su: 1.0,
            sv: 1.0,
            du: 0.0,
            dv: 0.0,
        }
    }
}

/// Image-backed texture reference
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTexture {
    /// Image path, resolved by the renderer relative to the scene file
    pub path: String,
    /// Gamma applied on sampling
    pub gamma: f32,
    /// Wrap behavior outside [0, 1]
    pub wrap: WrapMode,
    /// Coordinate mapping
    pub mapping: UvMapping,
}

impl ImageTexture {
    /// Image texture with default mapping and repeat wrapping
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            gamma: 1.0,
            wrap: WrapMode::Repeat,
            mapping: UvMapping::default(),
        }
    }
}

/// RGB-valued texture
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumTexture {
    /// Uniform spectrum
    Constant(Vec3),
    /// Image lookup
    Image(ImageTexture),
}

impl SpectrumTexture {
    /// Wire tag (the renderer reserves 1 for bilerp textures)
    pub fn tag(&self) -> i32 {
        match self {
            SpectrumTexture::Constant(_) => 0,
            SpectrumTexture::Image(_) => 2,
        }
    }
}

/// Scalar-valued texture
#[derive(Debug, Clone, PartialEq)]
pub enum FloatTexture {
    /// Uniform value
    Constant(f32),
    /// Image lookup
    Image(ImageTexture),
}

impl FloatTexture {
    /// Wire tag (the renderer reserves 1 for bilerp textures)
    pub fn tag(&self) -> i32 {
        match self {
            FloatTexture::Constant(_) => 0,
            FloatTexture::Image(_) => 2,
        }
    }
}

/// Authored BSDF material, one variant per shading model
#[derive(Debug, Clone, PartialEq)]
pub enum BsdfMaterial {
    /// Lambertian/Oren-Nayar diffuse
    Matte {
        /// Diffuse reflectance
        kd: SpectrumTexture,
        /// Oren-Nayar sigma (degrees); 0 is pure Lambertian
        sigma: FloatTexture,
    },
    /// Diffuse base with a glossy coat
    Plastic {
        /// Diffuse reflectance
        kd: SpectrumTexture,
        /// Specular reflectance
        ks: SpectrumTexture,
        /// Microfacet roughness
        roughness: FloatTexture,
    },
    /// Perfect specular reflector
    Mirror {
        /// Reflectance
        kr: SpectrumTexture,
    },
    /// Specular or rough dielectric
    Glass {
        /// Reflectance
        kr: SpectrumTexture,
        /// Transmittance
        ks: SpectrumTexture,
        /// Roughness along U
        u_roughness: FloatTexture,
        /// Roughness along V
        v_roughness: FloatTexture,
        /// Index of refraction
        index: FloatTexture,
    },
}

impl BsdfMaterial {
    /// Wire tag (the renderer reserves 3 for its metal record)
    pub fn tag(&self) -> i32 {
        match self {
            BsdfMaterial::Matte { .. } => 0,
            BsdfMaterial::Plastic { .. } => 1,
            BsdfMaterial::Mirror { .. } => 2,
            BsdfMaterial::Glass { .. } => 4,
        }
    }
}

/// Shader-side material type tags used by the structured-text schema
///
/// This is the shader's own table and is distinct from the binary BSDF tags
/// above; the reconstructor copies the value through untouched.
pub mod material_type {
    /// Matte
    pub const MATTE: i32 = 0;
    /// Plastic
    pub const PLASTIC: i32 = 1;
    /// Metal (conductor fresnel; enables the named-metal override)
    pub const METAL: i32 = 2;
    /// Mirror
    pub const MIRROR: i32 = 3;
    /// Glass
    pub const GLASS: i32 = 4;
    /// Substrate
    pub const SUBSTRATE: i32 = 5;
    /// Disney
    pub const DISNEY: i32 = 6;
}

/// Opaque handle to an engine-resolved asset (texture, material, kernel
/// resource). Minted by the host's asset resolver; the codec never looks
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(u64);

impl AssetHandle {
    /// Wrap a resolver-assigned id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The resolver-assigned id
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Shader a reconstructed material is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// The physically-based uber shader
    Uber,
    /// The emissive area-light shader
    AreaLight,
}

impl ShaderKind {
    /// Parse the shader name used by the structured-text format
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RayTracing/Uber" => Some(ShaderKind::Uber),
            "RayTracing/AreaLight" => Some(ShaderKind::AreaLight),
            _ => None,
        }
    }

    /// The shader name used by the structured-text format
    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Uber => "RayTracing/Uber",
            ShaderKind::AreaLight => "RayTracing/AreaLight",
        }
    }
}

/// Flat shader-parameter block instantiated by the reconstructor
///
/// Invariant maintained by the inspector after editing: the fresnel tag is
/// consistent with the material type tag, and scalar parameters stay in their
/// valid ranges. The reconstructor only establishes the initial values.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererMaterial {
    /// Material name (lookup key for entities)
    pub name: String,
    /// Bound shader
    pub shader: ShaderKind,
    /// Material type tag (see [`material_type`])
    pub material_type: i32,
    /// Fresnel type tag
    pub fresnel: i32,
    /// Metal kind tag; 0 when no named metal was resolved
    pub metal_kind: i32,
    /// Base color, linear
    pub base_color: Vec3,
    /// Base color, gamma-encoded form
    pub base_color_gamma: Vec3,
    /// Complex IOR eta
    pub eta: Vec3,
    /// Complex IOR k (absorption)
    pub k: Vec3,
    /// Transmission color
    pub transmission: Vec3,
    /// Glossy specular color
    pub specular: Vec3,
    /// Roughness along U
    pub roughness_u: f32,
    /// Roughness along V
    pub roughness_v: f32,
    /// Bound albedo texture, when the document named one and it resolved
    pub albedo_texture: Option<AssetHandle>,
    /// Emitted radiance (area-light shader)
    pub emission: Vec3,
    /// Emitted radiance, gamma-encoded form
    pub emission_gamma: Vec3,
}

impl RendererMaterial {
    /// A material with neutral parameters bound to `shader`
    pub fn new(name: impl Into<String>, shader: ShaderKind) -> Self {
        Self {
            name: name.into(),
            shader,
            material_type: material_type::MATTE,
            fresnel: 0,
            metal_kind: 0,
            base_color: Vec3::new(1.0, 1.0, 1.0),
            base_color_gamma: Vec3::new(1.0, 1.0, 1.0),
            eta: Vec3::new(1.5, 1.5, 1.5),
            k: Vec3::zeros(),
            transmission: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::zeros(),
            roughness_u: 0.0,
            roughness_v: 0.0,
            albedo_texture: None,
            emission: Vec3::zeros(),
            emission_gamma: Vec3::zeros(),
        }
    }
}

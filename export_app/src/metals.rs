//! Named-metal IOR table
//!
//! Implements the codec's `MetalLookup` collaborator for the metals the demo
//! scenes use. Values are spectral averages over RGB primaries; the kind tags
//! match the shader's metal table.

use scene_codec::foundation::math::Vec3;
use scene_codec::import::{MetalIor, MetalLookup};

/// Static metal-IOR table
pub struct MetalTable;

impl MetalLookup for MetalTable {
    fn metal_ior(&self, name: &str) -> Option<MetalIor> {
        let (eta, k, kind) = match name {
            "Ag" => (
                Vec3::new(2.944_099_9, 2.227_150_3, 1.968_166_9),
                Vec3::new(0.887_432_9, 0.799_321_6, 0.815_286_3),
                2,
            ),
            "Al" => (
                Vec3::new(1.657_459_9, 0.880_369_0, 0.521_228_7),
                Vec3::new(9.223_869_2, 6.269_523_2, 4.837_001_2),
                3,
            ),
            "Au" => (
                Vec3::new(0.143_118_96, 0.374_957_04, 1.442_478_6),
                Vec3::new(3.983_160_4, 2.385_720_7, 1.603_215_3),
                6,
            ),
            "Cu" => (
                Vec3::new(0.200_437_7, 0.924_033_4, 1.102_212_0),
                Vec3::new(3.912_948_5, 2.452_847_7, 2.142_188_0),
                10,
            ),
            _ => return None,
        };
        Some(MetalIor { eta, k, kind })
    }
}

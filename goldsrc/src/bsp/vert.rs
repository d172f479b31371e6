use glam::Vec3;

use crate::binaries::{Field, FieldType};

use super::{
    consts::{LumpType, MAX_MAP_VERTS},
    Lump,
};

impl Lump for Vec3 {
    const LAYOUT: &'static [FieldType] = &[FieldType::F32, FieldType::F32, FieldType::F32];

    fn max() -> usize {
        MAX_MAP_VERTS
    }

    fn lump_type() -> LumpType {
        LumpType::Vertices
    }

    fn from_fields(f: &[Field]) -> Self {
        Vec3::new(f[0].as_f32(), f[1].as_f32(), f[2].as_f32())
    }
}

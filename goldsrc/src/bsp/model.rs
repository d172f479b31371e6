use std::ops::Range;

use glam::Vec3;

use crate::binaries::{Field, FieldType};

use super::{
    consts::{LumpType, MAX_MAP_MODELS},
    node::ChildRef,
    Lump,
};

/// Model 0 is the world, the rest are brush entities (doors, lifts, triggers).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Model {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub origin: Vec3,
    /// render tree root followed by the three clip hull roots
    pub head_nodes: [i32; 4],
    pub vis_leafs: i32,
    pub first_face: i32,
    pub faces: i32,
}

impl Model {
    pub fn maxs(&self) -> Vec3 {
        self.maxs
    }

    pub fn mins(&self) -> Vec3 {
        self.mins
    }

    /// Root of the render tree.
    pub fn root(&self) -> ChildRef {
        ChildRef::from_raw(self.head_nodes[0])
    }

    /// Direct range into the face array, empty when either bound is negative.
    pub fn face_range(&self) -> Range<usize> {
        match (usize::try_from(self.first_face), usize::try_from(self.faces)) {
            (Ok(first), Ok(count)) => first..first + count,
            _ => 0..0,
        }
    }
}

impl Lump for Model {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::I32,
        FieldType::I32,
        FieldType::I32,
        FieldType::I32,
        FieldType::I32,
        FieldType::I32,
        FieldType::I32,
    ];

    fn max() -> usize {
        MAX_MAP_MODELS
    }

    fn lump_type() -> LumpType {
        LumpType::Models
    }

    fn from_fields(f: &[Field]) -> Self {
        let v = |i: usize| Vec3::new(f[i].as_f32(), f[i + 1].as_f32(), f[i + 2].as_f32());
        Self {
            mins: v(0),
            maxs: v(3),
            origin: v(6),
            head_nodes: [f[9].as_i32(), f[10].as_i32(), f[11].as_i32(), f[12].as_i32()],
            vis_leafs: f[13].as_i32(),
            first_face: f[14].as_i32(),
            faces: f[15].as_i32(),
        }
    }
}

use glam::Vec3;
use num_traits::FromPrimitive;

use crate::binaries::{Field, FieldType};

use super::{
    consts::{LumpType, PlaneAxis, MAX_MAP_PLANES},
    Lump,
};

///Plane
///
///The basis of the BSP geometry is defined by planes, which are used as splitting surfaces across the BSP tree structure.
///
/// Each record is 20 bytes: the normal as three f32s, the distance as an f32 and the axis type as a u32.
///
/// The plane is the set of points `(x, y, z)` with `Ax + By + Cz = D`, where `A, B, C` is `normal` and `D` is `dist`.
/// Points with `F > 0` are in front of the plane, `F < 0` behind it.
///
/// `kind` is 0-5: 0, 1 and 2 for planes facing along X, Y and Z, and 3, 4 and 5 for planes that are not axial,
/// naming the axis they are closest to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub dist: f32,
    pub kind: u32,
}

impl Plane {
    /// `None` when the type tag is outside 0-5.
    pub fn axis(&self) -> Option<PlaneAxis> {
        PlaneAxis::from_u32(self.kind)
    }

    /// Signed distance of `point` from the plane.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.dist
    }
}

impl Lump for Plane {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::U32,
    ];

    fn max() -> usize {
        MAX_MAP_PLANES
    }

    fn lump_type() -> LumpType {
        LumpType::Planes
    }

    fn from_fields(f: &[Field]) -> Self {
        Self {
            normal: Vec3::new(f[0].as_f32(), f[1].as_f32(), f[2].as_f32()),
            dist: f[3].as_f32(),
            kind: f[4].as_u32(),
        }
    }
}

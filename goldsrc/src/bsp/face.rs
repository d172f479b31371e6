use crate::binaries::{Field, FieldType};

use super::{
    consts::{LumpType, MAX_MAP_FACES},
    Lump,
};

/// A convex polygon on one plane, described as a run of surfedges.
///
/// 20 bytes per record:
/// ```text,ignore
/// u16 plane, u16 side, u32 first_edge, u16 edges, u16 tex_info, u8 styles[4], u32 lightmap_offset
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    /// Index into the plane array of the plane this face lies on.
    pub plane: u16,
    /// Non-zero when the face points against its plane's normal.
    pub side: u16,
    /// Index into the surfedge array; this and the following `edges` surfedges trace the face.
    ///
    /// The vertices are referenced in clockwise order when looking at the face.
    pub first_edge: u32,
    pub edges: u16,
    /// Index into the texinfo array.
    pub tex_info: u16,
    /// switchable lighting styles, 255 marks an unused slot
    pub styles: [u8; 4],
    /// Byte offset into the lighting lump, `u32::MAX` for unlit faces.
    pub lightmap_offset: u32,
}

impl Face {
    /// Index of this face's colour sample in the decoded lighting array.
    pub fn lightmap_index(&self) -> Option<usize> {
        (self.lightmap_offset != u32::MAX).then(|| self.lightmap_offset as usize / 3)
    }

    /// Range into the surfedge array.
    pub fn surfedges(&self) -> std::ops::Range<usize> {
        let first = self.first_edge as usize;
        first..first + self.edges as usize
    }
}

impl Lump for Face {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::U16,
        FieldType::U16,
        FieldType::U32,
        FieldType::U16,
        FieldType::U16,
        FieldType::U32,
        FieldType::U32,
    ];

    fn max() -> usize {
        MAX_MAP_FACES
    }
    fn lump_type() -> LumpType {
        LumpType::Faces
    }
    fn from_fields(f: &[Field]) -> Self {
        Self {
            plane: f[0].as_u16(),
            side: f[1].as_u16(),
            first_edge: f[2].as_u32(),
            edges: f[3].as_u16(),
            tex_info: f[4].as_u16(),
            styles: f[5].as_u32().to_le_bytes(),
            lightmap_offset: f[6].as_u32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::header::LumpEntry;
    use crate::test_util::Le;

    #[test]
    fn face_fields_in_order() {
        let data = Le::default()
            .u16(3)
            .u16(1)
            .u32(40)
            .u16(5)
            .u16(9)
            .bytes(&[0, 255, 255, 255])
            .u32(12)
            .0;
        let faces = Face::decode(&data, LumpEntry { offset: 0, size: 20 }).unwrap();

        let face = faces[0];
        assert_eq!(face.plane, 3);
        assert_eq!(face.side, 1);
        assert_eq!(face.first_edge, 40);
        assert_eq!(face.edges, 5);
        assert_eq!(face.tex_info, 9);
        assert_eq!(face.styles, [0, 255, 255, 255]);
        assert_eq!(face.lightmap_index(), Some(4));
        assert_eq!(face.surfedges(), 40..45);
    }

    #[test]
    fn unlit_face() {
        let face = Face {
            plane: 0,
            side: 0,
            first_edge: 0,
            edges: 3,
            tex_info: 0,
            styles: [255; 4],
            lightmap_offset: u32::MAX,
        };
        assert_eq!(face.lightmap_index(), None);
    }
}

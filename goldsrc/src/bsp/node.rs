use std::ops::Range;

use num_traits::FromPrimitive;

use crate::binaries::{Field, FieldType};

use super::{
    consts::{
        Contents, LumpType, MAX_MAP_CLIPNODES, MAX_MAP_LEAFS, MAX_MAP_MARKSURFACES, MAX_MAP_NODES,
    },
    Lump,
};

/// A decoded node child.
///
/// The file stores children as signed integers: `>= 0` is a node index, `-1` the shared empty
/// leaf, and anything below that is leaf `-v - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChildRef {
    Node(usize),
    EmptyLeaf,
    Leaf(usize),
}

impl ChildRef {
    pub fn from_raw(v: i32) -> Self {
        match v {
            0.. => ChildRef::Node(v as usize),
            -1 => ChildRef::EmptyLeaf,
            _ => ChildRef::Leaf((-(v as i64) - 1) as usize),
        }
    }
}

/// Internal BSP node, splitting space by `plane`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub plane: u32,
    /// front, back
    pub children: [ChildRef; 2],
    pub mins: [i16; 3],
    pub maxs: [i16; 3],
    /// first face lying on this node's plane
    pub face: u16,
    pub faces: u16,
}

impl Lump for Node {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::U32,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::U16,
        FieldType::U16,
    ];

    fn max() -> usize {
        MAX_MAP_NODES
    }
    fn lump_type() -> LumpType {
        LumpType::Nodes
    }
    fn from_fields(f: &[Field]) -> Self {
        Self {
            plane: f[0].as_u32(),
            children: [
                ChildRef::from_raw(f[1].as_i32()),
                ChildRef::from_raw(f[2].as_i32()),
            ],
            mins: [f[3].as_i16(), f[4].as_i16(), f[5].as_i16()],
            maxs: [f[6].as_i16(), f[7].as_i16(), f[8].as_i16()],
            face: f[9].as_u16(),
            faces: f[10].as_u16(),
        }
    }
}

/// Terminal node of the tree: a convex region of space with uniform contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub contents: i32,
    /// Byte offset into the visibility lump, negative when the leaf has no vis row.
    pub vis_offset: i32,
    pub mins: [i16; 3],
    pub maxs: [i16; 3],
    pub face: u16,
    pub faces: u16,
    /// water, sky, slime, lava sound levels
    pub ambient: [u8; 4],
}

impl Leaf {
    pub fn contents(&self) -> Option<Contents> {
        Contents::from_i32(self.contents)
    }

    pub fn face_range(&self) -> Range<usize> {
        let first = self.face as usize;
        first..first + self.faces as usize
    }
}

impl Lump for Leaf {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::I32,
        FieldType::I32,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::I16,
        FieldType::U16,
        FieldType::U16,
        FieldType::U8,
        FieldType::U8,
        FieldType::U8,
        FieldType::U8,
    ];

    fn max() -> usize {
        MAX_MAP_LEAFS
    }
    fn lump_type() -> LumpType {
        LumpType::Leaves
    }
    fn from_fields(f: &[Field]) -> Self {
        Self {
            contents: f[0].as_i32(),
            vis_offset: f[1].as_i32(),
            mins: [f[2].as_i16(), f[3].as_i16(), f[4].as_i16()],
            maxs: [f[5].as_i16(), f[6].as_i16(), f[7].as_i16()],
            face: f[8].as_u16(),
            faces: f[9].as_u16(),
            ambient: [f[10].as_u8(), f[11].as_u8(), f[12].as_u8(), f[13].as_u8()],
        }
    }
}

/// Child of a clip node: another clip node, or a contents value when negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipChild {
    Node(usize),
    Contents(i32),
}

impl ClipChild {
    pub fn from_raw(v: i16) -> Self {
        if v >= 0 {
            ClipChild::Node(v as usize)
        } else {
            ClipChild::Contents(v.into())
        }
    }

    pub fn contents(&self) -> Option<Contents> {
        match self {
            ClipChild::Node(_) => None,
            ClipChild::Contents(c) => Contents::from_i32(*c),
        }
    }
}

/// Collision hull node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClipNode {
    pub plane: i32,
    pub children: [ClipChild; 2],
}

impl Lump for ClipNode {
    const LAYOUT: &'static [FieldType] = &[FieldType::I32, FieldType::I16, FieldType::I16];

    fn max() -> usize {
        MAX_MAP_CLIPNODES
    }
    fn lump_type() -> LumpType {
        LumpType::ClipNodes
    }
    fn from_fields(f: &[Field]) -> Self {
        Self {
            plane: f[0].as_i32(),
            children: [
                ClipChild::from_raw(f[1].as_i16()),
                ClipChild::from_raw(f[2].as_i16()),
            ],
        }
    }
}

/// Leaf-to-face indirection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkSurface(pub u16);

impl Lump for MarkSurface {
    const LAYOUT: &'static [FieldType] = &[FieldType::U16];

    fn max() -> usize {
        MAX_MAP_MARKSURFACES
    }
    fn lump_type() -> LumpType {
        LumpType::MarkSurfaces
    }
    fn from_fields(f: &[Field]) -> Self {
        MarkSurface(f[0].as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::header::LumpEntry;
    use crate::test_util::Le;

    #[test]
    fn child_classification() {
        assert_eq!(ChildRef::from_raw(0), ChildRef::Node(0));
        assert_eq!(ChildRef::from_raw(17), ChildRef::Node(17));
        assert_eq!(ChildRef::from_raw(-1), ChildRef::EmptyLeaf);
        assert_eq!(ChildRef::from_raw(-2), ChildRef::Leaf(1));
        assert_eq!(ChildRef::from_raw(-8), ChildRef::Leaf(7));
        assert_eq!(ChildRef::from_raw(i32::MIN), ChildRef::Leaf(i32::MAX as usize));
    }

    #[test]
    fn classification_is_exclusive() {
        for v in -1000..1000 {
            let hits = [
                matches!(ChildRef::from_raw(v), ChildRef::Node(_)),
                ChildRef::from_raw(v) == ChildRef::EmptyLeaf,
                matches!(ChildRef::from_raw(v), ChildRef::Leaf(_)),
            ];
            assert_eq!(hits.iter().filter(|h| **h).count(), 1, "value {v}");
        }
    }

    #[test]
    fn node_record() {
        let data = Le::default()
            .u32(4)
            .i16(2)
            .i16(-3)
            .i16(-16)
            .i16(-16)
            .i16(0)
            .i16(16)
            .i16(16)
            .i16(32)
            .u16(10)
            .u16(2)
            .0;
        let nodes = Node::decode(&data, LumpEntry { offset: 0, size: 24 }).unwrap();
        assert_eq!(nodes[0].plane, 4);
        assert_eq!(nodes[0].children, [ChildRef::Node(2), ChildRef::Leaf(2)]);
        assert_eq!(nodes[0].mins, [-16, -16, 0]);
        assert_eq!(nodes[0].maxs, [16, 16, 32]);
        assert_eq!((nodes[0].face, nodes[0].faces), (10, 2));
    }

    #[test]
    fn leaf_record() {
        let data = Le::default()
            .i32(-3)
            .i32(-1)
            .i16(0)
            .i16(0)
            .i16(0)
            .i16(8)
            .i16(8)
            .i16(8)
            .u16(5)
            .u16(3)
            .bytes(&[1, 2, 3, 4])
            .0;
        let leaves = Leaf::decode(&data, LumpEntry { offset: 0, size: 28 }).unwrap();
        assert_eq!(leaves[0].contents(), Some(Contents::Water));
        assert_eq!(leaves[0].face_range(), 5..8);
        assert_eq!(leaves[0].ambient, [1, 2, 3, 4]);
    }

    #[test]
    fn clip_node_children() {
        let data = Le::default().i32(7).i16(3).i16(-2).0;
        let clip = ClipNode::decode(&data, LumpEntry { offset: 0, size: 8 }).unwrap();
        assert_eq!(clip[0].children[0], ClipChild::Node(3));
        assert_eq!(clip[0].children[1].contents(), Some(Contents::Solid));
    }
}

use flagset::flags;
use num_derive::FromPrimitive;

/// Number of lumps in the directory (the `HEADER_LUMPS` trailer of the lump list).
pub const HEADER_LUMPS: usize = 15;
/// Format id followed by one (offset, size) pair per lump.
pub const HEADER_SIZE: usize = 4 + HEADER_LUMPS * 8;

// upper design bounds, only used for sanity logging
pub const MAX_MAP_MODELS: usize = 400;
pub const MAX_MAP_PLANES: usize = 32767;
pub const MAX_MAP_NODES: usize = 32767;
pub const MAX_MAP_CLIPNODES: usize = 32767;
pub const MAX_MAP_LEAFS: usize = 8192;
pub const MAX_MAP_VERTS: usize = 65535;
pub const MAX_MAP_FACES: usize = 65535;
pub const MAX_MAP_MARKSURFACES: usize = 65535;
pub const MAX_MAP_TEXINFO: usize = 8192;
pub const MAX_MAP_EDGES: usize = 256000;
pub const MAX_MAP_SURFEDGES: usize = 512000;
pub const MAX_MAP_TEXTURES: usize = 512;
pub const MAX_MAP_LIGHTING: usize = 0x200000;
pub const MAX_MAP_VISIBILITY: usize = 0x200000;

pub const TEXTURE_NAME_LENGTH: usize = 16;
pub const MIP_LEVELS: usize = 4;

/// The two header variants this crate understands.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum BspVersion {
    /// Quake: greyscale lighting, textures share the Quake palette.
    Quake = 29,
    /// GoldSrc (Half-Life): RGB lighting, every embedded texture carries its own palette.
    GoldSrc = 30,
}

impl BspVersion {
    pub fn has_texture_palettes(self) -> bool {
        self == BspVersion::GoldSrc
    }

    pub fn has_rgb_lighting(self) -> bool {
        self == BspVersion::GoldSrc
    }
}

/// Lumps in directory order.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq, Hash)]
pub enum LumpType {
    Entities = 0,
    Planes = 1,
    Textures = 2,
    Vertices = 3,
    Visibility = 4,
    Nodes = 5,
    TexInfo = 6,
    Faces = 7,
    Lighting = 8,
    ClipNodes = 9,
    Leaves = 10,
    MarkSurfaces = 11,
    Edges = 12,
    SurfEdges = 13,
    Models = 14,
}

impl LumpType {
    pub const ALL: [LumpType; HEADER_LUMPS] = [
        LumpType::Entities,
        LumpType::Planes,
        LumpType::Textures,
        LumpType::Vertices,
        LumpType::Visibility,
        LumpType::Nodes,
        LumpType::TexInfo,
        LumpType::Faces,
        LumpType::Lighting,
        LumpType::ClipNodes,
        LumpType::Leaves,
        LumpType::MarkSurfaces,
        LumpType::Edges,
        LumpType::SurfEdges,
        LumpType::Models,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LumpType::Entities => "ENTITIES",
            LumpType::Planes => "PLANES",
            LumpType::Textures => "TEXTURES",
            LumpType::Vertices => "VERTICES",
            LumpType::Visibility => "VISIBILITY",
            LumpType::Nodes => "NODES",
            LumpType::TexInfo => "TEXINFO",
            LumpType::Faces => "FACES",
            LumpType::Lighting => "LIGHTING",
            LumpType::ClipNodes => "CLIPNODES",
            LumpType::Leaves => "LEAVES",
            LumpType::MarkSurfaces => "MARKSURFACES",
            LumpType::Edges => "EDGES",
            LumpType::SurfEdges => "SURFEDGES",
            LumpType::Models => "MODELS",
        }
    }

    pub fn from_name(name: &str) -> Option<LumpType> {
        LumpType::ALL
            .into_iter()
            .find(|lump| lump.name().eq_ignore_ascii_case(name))
    }
}

/// Leaf and clip node contents.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Contents {
    Empty = -1,
    Solid = -2,
    Water = -3,
    Slime = -4,
    Lava = -5,
    Sky = -6,
    Origin = -7,
    Clip = -8,
    Current0 = -9,
    Current90 = -10,
    Current180 = -11,
    Current270 = -12,
    CurrentUp = -13,
    CurrentDown = -14,
    Translucent = -15,
}

/// Axis a plane is aligned with, or nearest to for the `Any*` variants.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum PlaneAxis {
    X = 0,
    Y = 1,
    Z = 2,
    AnyX = 3,
    AnyY = 4,
    AnyZ = 5,
}

flags! {
    pub enum TexInfoFlags: u32 {
        /// sky or liquid, no lightmap and no subdivision
        Special = 0x1,
    }
}

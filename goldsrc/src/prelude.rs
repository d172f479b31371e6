pub use crate::bsp::{
    consts::{BspVersion, Contents, LumpType, PlaneAxis, TexInfoFlags},
    edges::{Edge, SurfEdge},
    entities::{parse_entities, Entity, Light},
    face::Face,
    header::{LumpDirectory, LumpEntry},
    lightmap::ColorRGB8,
    model::Model,
    node::{ChildRef, ClipChild, ClipNode, Leaf, MarkSurface, Node},
    parse_level,
    plane::Plane,
    textures::{TexInfo, Texture},
    LevelData, Lump,
};
pub use crate::config::DecodeConfig;
pub use crate::error::{BspError, ConfigError, GeometryError, TextureNotFound, WadError};
pub use crate::materials::{resolve_materials, Material, Materials};
pub use crate::meshes::{build_model, build_world, LevelMeshes, MeshBuilder};
pub use crate::palette::{IndexedImage, Palette, RgbaImage, QUAKE_PALETTE};
pub use crate::wad::{WadArchive, WadKind, WadRegistry};

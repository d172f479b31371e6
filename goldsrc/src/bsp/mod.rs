pub mod consts;
pub mod edges;
pub mod entities;
pub mod face;
pub mod header;
pub mod lightmap;
pub mod lump;
pub mod model;
pub mod node;
pub mod plane;
pub mod textures;
pub mod vert;
pub mod visibility;

pub use lump::Lump;

use common::prelude::VFileSystem;
use glam::Vec3;

use crate::error::BspResult;

use self::{
    consts::{BspVersion, LumpType},
    edges::{Edge, SurfEdge},
    entities::{decode_entities, Entity},
    face::Face,
    header::LumpDirectory,
    lightmap::{decode_lighting, ColorRGB8},
    model::Model,
    node::{ClipNode, Leaf, MarkSurface, Node},
    plane::Plane,
    textures::{decode_textures, TexInfo, Texture},
};

// Quake and GoldSrc BSP files
//
// A BSP file holds everything the engine needs to draw and play a map: the polygons of the level,
// references to the textures drawn on them, the BSP tree and visibility table used to find what can
// be seen from where, the collision hulls, and the entities placed in the map.
//
// The file starts with a format id (29 for Quake, 30 for GoldSrc) and a directory of 15 lumps.
// Each lump is an array of fixed-size records, except ENTITIES (text), TEXTURES (a table of
// variable length miptex records), VISIBILITY (run length encoded bits) and LIGHTING (samples whose
// width depends on the version).
//
// All values are little-endian.

/// Every lump of one level, decoded.
///
/// Records are decoded independently, indices between them are only checked when geometry is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    pub directory: LumpDirectory,
    pub entities: Vec<Entity>,
    pub planes: Vec<Plane>,
    pub textures: Vec<Texture>,
    pub vertices: Vec<Vec3>,
    /// compressed PVS rows, see [`LevelData::decompress_vis`]
    pub visibility: Vec<u8>,
    pub nodes: Vec<Node>,
    pub tex_info: Vec<TexInfo>,
    pub faces: Vec<Face>,
    pub lighting: Vec<ColorRGB8>,
    pub clip_nodes: Vec<ClipNode>,
    pub leaves: Vec<Leaf>,
    pub mark_surfaces: Vec<MarkSurface>,
    pub edges: Vec<Edge>,
    pub surf_edges: Vec<SurfEdge>,
    pub models: Vec<Model>,
}

/// Decodes a whole level. Any malformed lump fails the parse.
pub fn parse_level(data: &[u8]) -> BspResult<LevelData> {
    let directory = LumpDirectory::parse(data)?;
    let version = directory.version();

    let level = LevelData {
        entities: decode_entities(data, directory.get_lump_header(LumpType::Entities))?,
        planes: directory.get_lump(data)?,
        textures: decode_textures(data, directory.get_lump_header(LumpType::Textures), version)?,
        vertices: directory.get_lump(data)?,
        visibility: directory.lump_bytes(data, LumpType::Visibility)?.to_vec(),
        nodes: directory.get_lump(data)?,
        tex_info: directory.get_lump(data)?,
        faces: directory.get_lump(data)?,
        lighting: decode_lighting(data, directory.get_lump_header(LumpType::Lighting), version)?,
        clip_nodes: directory.get_lump(data)?,
        leaves: directory.get_lump(data)?,
        mark_surfaces: directory.get_lump(data)?,
        edges: directory.get_lump(data)?,
        surf_edges: directory.get_lump(data)?,
        models: directory.get_lump(data)?,
        directory,
    };

    log::info!(
        "parsed {:?} level: {} entities, {} textures, {} faces, {} leaves, {} models",
        version,
        level.entities.len(),
        level.textures.len(),
        level.faces.len(),
        level.leaves.len(),
        level.models.len()
    );

    Ok(level)
}

impl LevelData {
    pub fn version(&self) -> BspVersion {
        self.directory.version()
    }

    /// The `worldspawn` entity, which by convention is the first block.
    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.classname() == Some("worldspawn"))
    }

    /// File names of the WADs the map was compiled against, from worldspawn's `wad` key.
    ///
    /// The key holds `;` separated paths from the compiling machine, only the file name is kept.
    pub fn required_wads(&self) -> Vec<String> {
        let Some(wads) = self.worldspawn().and_then(|w| w.get("wad")) else {
            return Vec::new();
        };
        wads.split(';')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(VFileSystem::file_name)
            .collect()
    }

    /// Leaves visible from `leaf`, indexed by leaf number.
    ///
    /// Leaf 0 is never marked visible. Leaves without a vis row see every leaf.
    pub fn decompress_vis(&self, leaf: usize) -> Vec<bool> {
        let world_leaves = self
            .models
            .first()
            .map_or(0, |m| m.vis_leafs.max(0) as usize)
            .min(self.leaves.len().saturating_sub(1));

        let offset = self
            .leaves
            .get(leaf)
            .and_then(|l| usize::try_from(l.vis_offset).ok())
            .filter(|_| !self.visibility.is_empty());

        let mut visible = vec![false; self.leaves.len()];
        for (i, seen) in visibility::decompress_vis(&self.visibility, offset, world_leaves)
            .into_iter()
            .enumerate()
        {
            visible[i + 1] = seen;
        }
        visible
    }
}

#[cfg(test)]
mod bsp_tests {
    use super::*;
    use crate::test_util::sample_level;
    use super::consts::Contents;
    use super::node::ChildRef;

    #[test]
    fn sample_level_decodes() {
        let data = sample_level(30);
        let level = parse_level(&data).unwrap();

        assert_eq!(level.version(), BspVersion::GoldSrc);
        assert_eq!(level.entities.len(), 2);
        assert_eq!(level.planes.len(), 1);
        assert_eq!(level.textures.len(), 3);
        assert_eq!(level.vertices.len(), 5);
        assert_eq!(level.nodes.len(), 1);
        assert_eq!(level.tex_info.len(), 3);
        assert_eq!(level.faces.len(), 3);
        assert_eq!(level.lighting.len(), 2);
        assert_eq!(level.clip_nodes.len(), 1);
        assert_eq!(level.leaves.len(), 2);
        assert_eq!(level.mark_surfaces.len(), 3);
        assert_eq!(level.edges.len(), 7);
        assert_eq!(level.surf_edges.len(), 7);
        assert_eq!(level.models.len(), 2);

        assert_eq!(level.nodes[0].children, [ChildRef::Leaf(1), ChildRef::EmptyLeaf]);
        assert_eq!(level.leaves[0].contents(), Some(Contents::Solid));
        assert!(level.textures[0].is_external());
        assert!(!level.textures[1].is_external());
    }

    #[test]
    fn quake_level_decodes() {
        let level = parse_level(&sample_level(29)).unwrap();
        assert_eq!(level.version(), BspVersion::Quake);
        // one grey byte per sample
        assert_eq!(level.lighting.len(), 6);
        assert_eq!(level.lighting[0], ColorRGB8 { r: 128, g: 128, b: 128 });
    }

    #[test]
    fn parse_is_deterministic() {
        let data = sample_level(30);
        assert_eq!(parse_level(&data).unwrap(), parse_level(&data).unwrap());
    }

    #[test]
    fn required_wads_are_file_names() {
        let level = parse_level(&sample_level(30)).unwrap();
        assert_eq!(level.required_wads(), vec!["halflife.wad", "liquids.wad"]);
    }

    #[test]
    fn vis_row_for_leaf() {
        let level = parse_level(&sample_level(30)).unwrap();
        assert_eq!(level.decompress_vis(1), vec![false, true]);
        // solid leaf has no row
        assert_eq!(level.decompress_vis(0), vec![false, true]);
    }

    #[test]
    fn truncated_lump_fails_whole_parse() {
        let mut data = sample_level(30);
        let size_field = 4 + LumpType::Faces as usize * 8 + 4;
        data[size_field..size_field + 4].copy_from_slice(&19u32.to_le_bytes());
        assert!(matches!(
            parse_level(&data),
            Err(crate::error::BspError::MalformedBuffer { .. })
        ));
    }
}

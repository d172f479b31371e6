use std::collections::BTreeMap;

use common::prelude::{UVVertex, Vertex};
use glam::Vec3;

use crate::bsp::{node::ChildRef, LevelData};
use crate::config::DecodeConfig;
use crate::error::GeometryError;

#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuilder<V: Vertex + Default> {
    tris: Vec<u32>,
    verts: Vec<V>,
}

impl<V: Vertex + Default> Default for MeshBuilder<V> {
    fn default() -> Self {
        Self {
            tris: Vec::new(),
            verts: Vec::new(),
        }
    }
}

impl<V: Vertex + Default> MeshBuilder<V> {
    /// Returns the new vertex's index.
    pub fn push_vert(&mut self, vert: V) -> u32 {
        self.verts.push(vert);
        self.verts.len() as u32 - 1
    }

    pub fn add_tri(&mut self, tri: [u32; 3]) {
        self.tris.extend_from_slice(&tri);
    }

    /// Triangulates the convex polygon made of the `count` vertices starting at `first`
    /// as a fan `(0, i, i + 1)` around its first vertex.
    pub fn add_fan(&mut self, first: u32, count: u32) {
        for i in 1..count.saturating_sub(1) {
            self.add_tri([first, first + i, first + i + 1]);
        }
    }

    pub fn tris(&self) -> &[u32] {
        &self.tris
    }

    pub fn verts(&self) -> &[V] {
        &self.verts
    }

    pub fn triangle_count(&self) -> usize {
        self.tris.len() / 3
    }

    /// Index pairs for drawing the triangles as wireframe.
    pub fn tris_to_lines(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.tris.len() * 2);
        for tri in self.tris.chunks_exact(3) {
            lines.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
        }
        lines
    }
}

/// Geometry of one model, one batch per texture index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelMeshes {
    pub batches: BTreeMap<u32, MeshBuilder<UVVertex>>,
    /// leaves reached by the tree walk, in visiting order
    pub leaves: Vec<usize>,
    pub faces_built: usize,
    /// faces left out because their texture is never drawn
    pub faces_skipped: usize,
    /// recovered problems, each one cost a face, leaf or node
    pub issues: Vec<GeometryError>,
}

impl LevelMeshes {
    pub fn triangle_count(&self) -> usize {
        self.batches.values().map(MeshBuilder::triangle_count).sum()
    }

    fn report(&mut self, issue: GeometryError) {
        log::warn!("{issue}");
        self.issues.push(issue);
    }
}

/// Depth-first walk of the world tree from model 0's render root.
///
/// Returns each reachable leaf once, in visiting order. The shared empty leaf is never collected.
pub fn collect_leaves(level: &LevelData, issues: &mut Vec<GeometryError>) -> Vec<usize> {
    let mut leaves = Vec::new();
    let Some(world) = level.models.first() else {
        issues.push(GeometryError::corrupt(None, "model", 0, 0));
        return leaves;
    };

    let mut visited = vec![false; level.nodes.len()];
    let mut visited_leaf = vec![false; level.leaves.len()];
    let mut stack = vec![world.root()];

    while let Some(child) = stack.pop() {
        match child {
            ChildRef::EmptyLeaf => {}
            ChildRef::Leaf(leaf) => {
                if leaf < level.leaves.len() {
                    if !std::mem::replace(&mut visited_leaf[leaf], true) {
                        leaves.push(leaf);
                    }
                } else {
                    issues.push(GeometryError::corrupt(
                        None,
                        "leaf",
                        leaf as i64,
                        level.leaves.len(),
                    ));
                }
            }
            ChildRef::Node(node) => {
                let Some(n) = level.nodes.get(node) else {
                    issues.push(GeometryError::corrupt(
                        None,
                        "node",
                        node as i64,
                        level.nodes.len(),
                    ));
                    continue;
                };
                if std::mem::replace(&mut visited[node], true) {
                    issues.push(GeometryError::CyclicTree { node });
                    continue;
                }
                stack.extend(n.children);
            }
        }
    }

    leaves
}

/// Builds one face into its texture's batch.
///
/// `Ok(false)` means the face uses a texture that is never drawn. On error nothing is added.
pub fn build_face(
    level: &LevelData,
    index: usize,
    config: &DecodeConfig,
    batches: &mut BTreeMap<u32, MeshBuilder<UVVertex>>,
) -> Result<bool, GeometryError> {
    let face = level
        .faces
        .get(index)
        .ok_or_else(|| GeometryError::corrupt(None, "face", index as i64, level.faces.len()))?;
    let at = Some(index);

    if face.edges < 3 {
        return Err(GeometryError::DegenerateFace {
            face: index,
            edges: face.edges as usize,
        });
    }

    let info = level.tex_info.get(face.tex_info as usize).ok_or_else(|| {
        GeometryError::corrupt(at, "texinfo", face.tex_info.into(), level.tex_info.len())
    })?;
    let texture = level.textures.get(info.miptex as usize).ok_or_else(|| {
        GeometryError::corrupt(at, "texture", info.miptex.into(), level.textures.len())
    })?;

    if config.is_special(&texture.name) {
        return Ok(false);
    }
    if texture.width == 0 || texture.height == 0 {
        return Err(GeometryError::corrupt(at, "texture size", 0, 0));
    }

    let mut positions = Vec::with_capacity(face.edges as usize);
    for i in face.surfedges() {
        let surf = level.surf_edges.get(i).ok_or_else(|| {
            GeometryError::corrupt(at, "surfedge", i as i64, level.surf_edges.len())
        })?;
        let vertex = surf.vertex(&level.edges, at)?;
        let position = level.vertices.get(vertex as usize).ok_or_else(|| {
            GeometryError::corrupt(at, "vertex", vertex.into(), level.vertices.len())
        })?;
        positions.push(*position);
    }

    let color = face
        .lightmap_index()
        .and_then(|i| level.lighting.get(i))
        .map_or(Vec3::ONE, |&sample| sample.into());

    let builder = batches.entry(info.miptex).or_default();
    let first = builder.verts().len() as u32;
    for position in positions.iter().copied() {
        builder.push_vert(UVVertex {
            position,
            uv: info.uv(position, texture.width, texture.height),
            color,
        });
    }
    builder.add_fan(first, positions.len() as u32);

    Ok(true)
}

fn build_faces(
    level: &LevelData,
    faces: impl IntoIterator<Item = usize>,
    config: &DecodeConfig,
    meshes: &mut LevelMeshes,
) {
    for index in faces {
        match build_face(level, index, config, &mut meshes.batches) {
            Ok(true) => meshes.faces_built += 1,
            Ok(false) => meshes.faces_skipped += 1,
            Err(issue) => meshes.report(issue),
        }
    }
}

/// Builds the world: every face reachable through model 0's tree, each face once.
pub fn build_world(level: &LevelData, config: &DecodeConfig) -> LevelMeshes {
    let mut meshes = LevelMeshes::default();
    let mut issues = Vec::new();
    let leaves = collect_leaves(level, &mut issues);
    for issue in issues {
        meshes.report(issue);
    }

    let mut seen = vec![false; level.faces.len()];
    let mut faces = Vec::new();

    for &leaf in &leaves {
        for i in level.leaves[leaf].face_range() {
            let face = if config.mark_surfaces {
                match level.mark_surfaces.get(i) {
                    Some(mark) => mark.0 as usize,
                    None => {
                        meshes.report(GeometryError::corrupt(
                            None,
                            "marksurface",
                            i as i64,
                            level.mark_surfaces.len(),
                        ));
                        continue;
                    }
                }
            } else {
                i
            };

            match seen.get_mut(face) {
                Some(true) => {}
                Some(flag) => {
                    *flag = true;
                    faces.push(face);
                }
                None => meshes.report(GeometryError::corrupt(
                    Some(face),
                    "face",
                    face as i64,
                    level.faces.len(),
                )),
            }
        }
    }

    meshes.leaves = leaves;
    build_faces(level, faces, config, &mut meshes);
    log::debug!(
        "world: {} leaves, {} faces, {} skipped, {} triangles in {} batches",
        meshes.leaves.len(),
        meshes.faces_built,
        meshes.faces_skipped,
        meshes.triangle_count(),
        meshes.batches.len()
    );
    meshes
}

/// Builds a brush entity model from its own face range, without walking a tree.
pub fn build_model(level: &LevelData, index: usize, config: &DecodeConfig) -> LevelMeshes {
    let mut meshes = LevelMeshes::default();
    match level.models.get(index) {
        Some(model) => build_faces(level, model.face_range(), config, &mut meshes),
        None => meshes.report(GeometryError::corrupt(
            None,
            "model",
            index as i64,
            level.models.len(),
        )),
    }
    meshes
}

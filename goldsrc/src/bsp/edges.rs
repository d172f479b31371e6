use crate::binaries::{Field, FieldType};
use crate::error::GeometryError;

use super::consts::{LumpType, MAX_MAP_EDGES, MAX_MAP_SURFEDGES};
use super::Lump;

///Edge
///
///Each edge is simply a pair of vertex indices (which index into the vertex lump array). The edge is defined as the straight line between the two vertices. Usually, the edge array is referenced through the Surfedge array (see below).
///
///As for vertices, edges can be shared between adjacent faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge(pub [u16; 2]);

impl Lump for Edge {
    const LAYOUT: &'static [FieldType] = &[FieldType::U16, FieldType::U16];

    fn max() -> usize {
        MAX_MAP_EDGES
    }
    fn lump_type() -> LumpType {
        LumpType::Edges
    }
    fn from_fields(f: &[Field]) -> Self {
        Edge([f[0].as_u16(), f[1].as_u16()])
    }
}

///Surfedge
///
///The Surfedge lump, presumably short for surface edge, is an array of (signed) integers. Surfedges are used to reference the edge array, in a somewhat complex way.
///The absolute value of this number is an index into the edge array:
/// if positive (or zero), the face takes the edge's first vertex; if negative, its second.
///
///By this method, the Surfedge array allows edges to be referenced for a particular direction.
///
///Note that the number of surfedges is not necessarily the same as the number of edges in the map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfEdge(pub i32);

impl Lump for SurfEdge {
    const LAYOUT: &'static [FieldType] = &[FieldType::I32];

    fn max() -> usize {
        MAX_MAP_SURFEDGES
    }
    fn lump_type() -> LumpType {
        LumpType::SurfEdges
    }
    fn from_fields(f: &[Field]) -> Self {
        SurfEdge(f[0].as_i32())
    }
}

impl SurfEdge {
    pub fn edge_index(&self) -> usize {
        self.0.unsigned_abs() as usize
    }

    pub fn reversed(&self) -> bool {
        self.0 < 0
    }

    /// The vertex index this surfedge contributes to its face's loop.
    pub fn vertex(&self, edges: &[Edge], face: Option<usize>) -> Result<u16, GeometryError> {
        let index = self.edge_index();
        let edge = edges
            .get(index)
            .ok_or_else(|| GeometryError::corrupt(face, "edge", index as i64, edges.len()))?;
        Ok(if self.reversed() { edge.0[1] } else { edge.0[0] })
    }
}

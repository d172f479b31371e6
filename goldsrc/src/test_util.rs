//! In-memory writers for synthetic BSP and WAD buffers.

use crate::bsp::consts::{LumpType, HEADER_LUMPS, HEADER_SIZE};

/// Little-endian byte builder.
#[derive(Default, Clone)]
pub struct Le(pub Vec<u8>);

impl Le {
    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }
    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn i16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn vec3(self, v: [f32; 3]) -> Self {
        self.f32(v[0]).f32(v[1]).f32(v[2])
    }
    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.0.extend_from_slice(v);
        self
    }
    pub fn name16(self, name: &str) -> Self {
        let mut raw = [0u8; 16];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        self.bytes(&raw)
    }
}

/// Lumps are laid out back to back after the header, in directory order.
pub struct BspWriter {
    version: u32,
    lumps: [Vec<u8>; HEADER_LUMPS],
}

impl BspWriter {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            lumps: Default::default(),
        }
    }

    pub fn lump(mut self, lump: LumpType, data: Vec<u8>) -> Self {
        self.lumps[lump as usize] = data;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut header = Le::default().u32(self.version);
        let mut body = Vec::new();
        for lump in &self.lumps {
            header = header
                .u32((HEADER_SIZE + body.len()) as u32)
                .u32(lump.len() as u32);
            body.extend_from_slice(lump);
        }
        let mut data = header.0;
        data.extend(body);
        data
    }
}

/// A miptex record. Embedded records carry four mip levels filled with `fill`
/// and, when `palette` is given, the trailing count + palette.
pub fn miptex(name: &str, width: u32, height: u32, embedded: Option<(u8, Option<[u8; 3]>)>) -> Vec<u8> {
    let header_len = 40u32;
    let Some((fill, palette)) = embedded else {
        return Le::default()
            .name16(name)
            .u32(width)
            .u32(height)
            .u32(0)
            .u32(0)
            .u32(0)
            .u32(0)
            .0;
    };

    let area = width * height;
    let mip0 = header_len;
    let mip1 = mip0 + area;
    let mip2 = mip1 + area / 4;
    let mip3 = mip2 + area / 16;
    let mut out = Le::default()
        .name16(name)
        .u32(width)
        .u32(height)
        .u32(mip0)
        .u32(mip1)
        .u32(mip2)
        .u32(mip3);
    let mip_bytes = (area + area / 4 + area / 16 + area / 64) as usize;
    out = out.bytes(&vec![fill; mip_bytes]);

    if let Some(color) = palette {
        out = out.u16(256);
        // colour `fill` gets `color`, the rest stays black
        let mut pal = vec![0u8; 768];
        let at = fill as usize * 3;
        pal[at..at + 3].copy_from_slice(&color);
        out = out.bytes(&pal).u16(0);
    }
    out.0
}

/// TEXTURES lump: count, offsets relative to the lump, records.
pub fn textures_lump(records: &[Vec<u8>]) -> Vec<u8> {
    let mut offset = 4 + 4 * records.len();
    let mut out = Le::default().u32(records.len() as u32);
    for record in records {
        out = out.i32(offset as i32);
        offset += record.len();
    }
    for record in records {
        out = out.bytes(record);
    }
    out.0
}

/// WAD3/WAD2 archive holding miptex entries.
pub fn wad(magic: &[u8; 4], entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let miptex_type = if magic == b"WAD3" { 0x43 } else { 0x44 };
    let mut data = Vec::new();
    let mut positions = Vec::new();
    for (_, entry) in entries {
        positions.push(12 + data.len());
        data.extend_from_slice(entry);
    }
    let dir_offset = 12 + data.len();
    let mut out = Le::default()
        .bytes(magic)
        .i32(entries.len() as i32)
        .i32(dir_offset as i32)
        .bytes(&data);
    for ((name, entry), pos) in entries.iter().zip(positions) {
        out = out
            .i32(pos as i32)
            .i32(entry.len() as i32)
            .i32(entry.len() as i32)
            .u8(miptex_type)
            .u8(0)
            .u16(0)
            .name16(name);
    }
    out.0
}

/// A small level exercising every decoder.
///
/// World (model 0): node 0 splits into leaf 1 (front, faces 0..3) and the empty sentinel.
/// Face 0 is a quad textured with external `WALL1`, face 1 a triangle with the embedded
/// `brick` texture and a reversed surfedge, face 2 uses `sky`. Model 1 is a brush entity
/// owning face 1.
pub fn sample_level(version: u32) -> Vec<u8> {
    let verts = [
        [0.0, 0.0, 0.0],
        [64.0, 0.0, 0.0],
        [64.0, 64.0, 0.0],
        [0.0, 64.0, 0.0],
        [0.0, 0.0, 64.0],
    ];
    let mut vertices = Le::default();
    for v in verts {
        vertices = vertices.vec3(v);
    }

    let edge_pairs = [(0, 0), (0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (4, 1)];
    let mut edges = Le::default();
    for (a, b) in edge_pairs {
        edges = edges.u16(a).u16(b);
    }

    let mut surfedges = Le::default();
    for s in [1, 2, 3, 4, 5, 6, -1] {
        surfedges = surfedges.i32(s);
    }

    // plane, side, firstedge, numedges, texinfo, styles, lightofs
    let mut faces = Le::default();
    for (first, count, texinfo, light) in [(0, 4, 0, 0u32), (4, 3, 1, 3), (0, 4, 2, u32::MAX)] {
        faces = faces
            .u16(0)
            .u16(0)
            .u32(first)
            .u16(count)
            .u16(texinfo)
            .u32(0xFF00_0000)
            .u32(light);
    }

    let mut texinfo = Le::default();
    for (s, s_shift, t, t_shift, miptex, flags) in [
        ([1.0, 0.0, 0.0], 0.0, [0.0, 1.0, 0.0], 0.0, 0, 0),
        ([1.0, 0.0, 0.0], 32.0, [0.0, 0.0, 1.0], 0.0, 1, 0),
        ([1.0, 0.0, 0.0], 0.0, [0.0, 1.0, 0.0], 0.0, 2, 1),
    ] {
        texinfo = texinfo
            .vec3(s)
            .f32(s_shift)
            .vec3(t)
            .f32(t_shift)
            .u32(miptex)
            .u32(flags);
    }

    let palette = (version == 30).then_some([200, 100, 50]);
    let textures = textures_lump(&[
        miptex("WALL1", 64, 64, None),
        miptex("brick", 16, 16, Some((7, palette))),
        miptex("sky", 128, 128, None),
    ]);

    let lighting = if version == 30 {
        vec![255, 0, 0, 0, 255, 0]
    } else {
        vec![128, 64, 32, 16, 8, 4]
    };

    let planes = Le::default().vec3([0.0, 0.0, 1.0]).f32(0.0).u32(2).0;

    let nodes = Le::default()
        .u32(0)
        .i16(-2)
        .i16(-1)
        .i16(0)
        .i16(0)
        .i16(0)
        .i16(64)
        .i16(64)
        .i16(64)
        .u16(0)
        .u16(3)
        .0;

    let mut leaves = Le::default();
    for (contents, vis, first, count) in [(-2, -1, 0u16, 0u16), (-1, 0, 0, 3)] {
        leaves = leaves
            .i32(contents)
            .i32(vis)
            .i16(0)
            .i16(0)
            .i16(0)
            .i16(64)
            .i16(64)
            .i16(64)
            .u16(first)
            .u16(count)
            .bytes(&[0, 0, 0, 0]);
    }

    let mut models = Le::default();
    for (heads, first, count) in [([0, -1, -1, 0], 0, 3), ([-1, -1, -1, 0], 1, 1)] {
        models = models
            .vec3([0.0, 0.0, 0.0])
            .vec3([64.0, 64.0, 64.0])
            .vec3([0.0, 0.0, 0.0]);
        for h in heads {
            models = models.i32(h);
        }
        models = models.i32(1).i32(first).i32(count);
    }

    let clipnodes = Le::default().i32(0).i16(-1).i16(-2).0;
    let marksurfaces = Le::default().u16(0).u16(1).u16(2).0;

    let entities = concat!(
        "{\n",
        "\"classname\" \"worldspawn\"\n",
        "\"wad\" \"\\half-life\\valve\\halflife.wad;\\half-life\\valve\\liquids.wad\"\n",
        "}\n",
        "{\n",
        "\"classname\" \"light\"\n",
        "\"origin\" \"16 32 48\"\n",
        "\"_light\" \"255 128 0 200\"\n",
        "}\n",
        "\0"
    );

    BspWriter::new(version)
        .lump(LumpType::Entities, entities.as_bytes().to_vec())
        .lump(LumpType::Planes, planes)
        .lump(LumpType::Textures, textures)
        .lump(LumpType::Vertices, vertices.0)
        .lump(LumpType::Visibility, vec![0b0000_0001])
        .lump(LumpType::Nodes, nodes)
        .lump(LumpType::TexInfo, texinfo.0)
        .lump(LumpType::Faces, faces.0)
        .lump(LumpType::Lighting, lighting)
        .lump(LumpType::ClipNodes, clipnodes)
        .lump(LumpType::Leaves, leaves.0)
        .lump(LumpType::MarkSurfaces, marksurfaces)
        .lump(LumpType::Edges, edges.0)
        .lump(LumpType::SurfEdges, surfedges.0)
        .lump(LumpType::Models, models.0)
        .build()
}

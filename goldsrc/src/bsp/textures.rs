use flagset::FlagSet;
use glam::{vec2, Vec2, Vec3};

use crate::binaries::{read_i32, read_name, read_u32, Field, FieldType};
use crate::error::{region, BspResult};
use crate::palette::{IndexedImage, Palette, QUAKE_PALETTE};

use super::consts::{
    BspVersion, LumpType, TexInfoFlags, MAX_MAP_TEXINFO, MAX_MAP_TEXTURES, MIP_LEVELS,
    TEXTURE_NAME_LENGTH,
};
use super::header::LumpEntry;
use super::Lump;

// Texinfo
//
// Each texinfo is 40 bytes long: two projection vectors with a shift each, the index of the
// texture in the TEXTURES lump, and flags.
//
// The two vectors, s and t, are the mapping of the left-to-right and down-to-up directions in
// the texture pixel coordinate space onto the world. The texel (u, v) of a world point is:
//
// u = s · point + s_shift
// v = t · point + t_shift
//
// Dividing u and v by the width and height of the texture gives normalised coordinates.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TexInfo {
    pub s: Vec3,
    pub s_shift: f32,
    pub t: Vec3,
    pub t_shift: f32,
    /// index into the TEXTURES lump
    pub miptex: u32,
    pub flags: FlagSet<TexInfoFlags>,
}

impl TexInfo {
    /// Unscaled texel coordinates of `point`.
    pub fn texel(&self, point: Vec3) -> Vec2 {
        vec2(
            self.s.dot(point) + self.s_shift,
            self.t.dot(point) + self.t_shift,
        )
    }

    /// Texture coordinates of `point` for a `width` x `height` texture.
    pub fn uv(&self, point: Vec3, width: u32, height: u32) -> Vec2 {
        self.texel(point) / vec2(width as f32, height as f32)
    }
}

impl Lump for TexInfo {
    const LAYOUT: &'static [FieldType] = &[
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::F32,
        FieldType::U32,
        FieldType::U32,
    ];

    fn max() -> usize {
        MAX_MAP_TEXINFO
    }
    fn lump_type() -> LumpType {
        LumpType::TexInfo
    }
    fn from_fields(f: &[Field]) -> Self {
        Self {
            s: Vec3::new(f[0].as_f32(), f[1].as_f32(), f[2].as_f32()),
            s_shift: f[3].as_f32(),
            t: Vec3::new(f[4].as_f32(), f[5].as_f32(), f[6].as_f32()),
            t_shift: f[7].as_f32(),
            miptex: f[8].as_u32(),
            flags: FlagSet::new_truncated(f[9].as_u32()),
        }
    }
}

/// Byte length of a miptex header: name, width, height and four mip offsets.
pub const MIPTEX_HEADER_SIZE: usize = TEXTURE_NAME_LENGTH + 4 * 2 + 4 * MIP_LEVELS;

///Miptex
///
/// ```text,ignore
/// char name[16]
/// u32  width, height
/// u32  offsets[4]     relative to the record start, 0 when the pixels live in a WAD
/// ```
///
/// Embedded pixels follow the header as four mip levels of `w*h`, `w*h/4`, `w*h/16` and `w*h/64`
/// bytes. GoldSrc files then store a u16 colour count and a 256 entry RGB palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub offsets: [u32; MIP_LEVELS],
    /// Absolute position of the record in the source buffer.
    pub record_offset: Option<usize>,
    /// Level 0 pixels and palette, `None` for external textures.
    pub image: Option<IndexedImage>,
}

impl Texture {
    /// Pixels have to be found by name in a WAD.
    pub fn is_external(&self) -> bool {
        self.image.is_none()
    }
}

/// Reads the miptex record at `start`.
///
/// `palette` is the shared palette to use, or `None` when the record carries its own.
pub(crate) fn read_miptex(
    data: &[u8],
    region_name: &str,
    start: usize,
    palette: Option<&Palette>,
) -> BspResult<Texture> {
    let header = region(data, region_name, start, MIPTEX_HEADER_SIZE)?;
    let name = read_name(&header[..TEXTURE_NAME_LENGTH]);
    let width = read_u32(&header[16..]);
    let height = read_u32(&header[20..]);
    let mut offsets = [0u32; MIP_LEVELS];
    for (i, offset) in offsets.iter_mut().enumerate() {
        *offset = read_u32(&header[24 + i * 4..]);
    }

    if offsets[0] == 0 {
        return Ok(Texture {
            name,
            width,
            height,
            offsets,
            record_offset: Some(start),
            image: None,
        });
    }

    let area = (width as usize).saturating_mul(height as usize);
    let indices = region(data, region_name, start.saturating_add(offsets[0] as usize), area)?.to_vec();

    let palette = match palette {
        Some(shared) => shared.clone(),
        None => {
            // skip the last mip level and the u16 colour count
            let at = start
                .saturating_add(offsets[3] as usize)
                .saturating_add(area / 64)
                .saturating_add(2);
            Palette::read(data, region_name, at)?
        }
    };

    Ok(Texture {
        name,
        width,
        height,
        offsets,
        record_offset: Some(start),
        image: Some(IndexedImage {
            width,
            height,
            palette,
            indices,
        }),
    })
}

/// Decodes the TEXTURES lump: a count, then that many offsets relative to the lump.
pub fn decode_textures(
    data: &[u8],
    entry: LumpEntry,
    version: BspVersion,
) -> BspResult<Vec<Texture>> {
    let name = LumpType::Textures.name();
    if entry.size == 0 {
        return Ok(Vec::new());
    }
    let lump = region(data, name, entry.offset, entry.size)?;
    let count = read_u32(region(lump, name, 0, 4)?) as usize;
    let table = region(lump, name, 4, count.saturating_mul(4))?;

    if count > MAX_MAP_TEXTURES {
        log::warn!("{name} has {count} textures, more than the engine limit of {MAX_MAP_TEXTURES}");
    }

    let palette = (!version.has_texture_palettes()).then_some(&QUAKE_PALETTE);

    let mut textures = Vec::with_capacity(count);
    for (i, raw) in table.chunks_exact(4).enumerate() {
        let offset = read_i32(raw);
        if offset < 0 {
            log::warn!("texture {i} has no record (offset {offset})");
            textures.push(Texture {
                name: String::new(),
                width: 0,
                height: 0,
                offsets: [0; MIP_LEVELS],
                record_offset: None,
                image: None,
            });
            continue;
        }
        textures.push(read_miptex(
            data,
            name,
            entry.offset + offset as usize,
            palette,
        )?);
    }

    log::debug!("decoded {} {name} records", textures.len());
    Ok(textures)
}

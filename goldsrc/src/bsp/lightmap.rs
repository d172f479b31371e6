use glam::{vec3, Vec3};

use crate::binaries::{extract, FieldType};
use crate::error::{region, BspError, BspResult};

use super::consts::{BspVersion, LumpType, MAX_MAP_LIGHTING};
use super::header::LumpEntry;

/// One lighting sample. Quake stores a single grey byte, which is expanded on decode.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorRGB8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<ColorRGB8> for Vec3 {
    fn from(value: ColorRGB8) -> Self {
        vec3(value.r as f32, value.g as f32, value.b as f32) / 255.0
    }
}

/// Lighting is the one lump whose record layout depends on the format version, so it is
/// decoded here rather than through [`super::Lump`].
pub fn decode_lighting(
    data: &[u8],
    entry: LumpEntry,
    version: BspVersion,
) -> BspResult<Vec<ColorRGB8>> {
    let name = LumpType::Lighting.name();
    if entry.size > MAX_MAP_LIGHTING {
        log::warn!("{name} is {} bytes, more than the engine limit", entry.size);
    }

    let samples = if version.has_rgb_lighting() {
        let bytes = region(data, name, entry.offset, entry.size)?;
        let width = std::mem::size_of::<ColorRGB8>();
        if bytes.len() % width != 0 {
            return Err(BspError::MalformedBuffer {
                region: name.to_owned(),
                size: bytes.len(),
                width,
            });
        }
        bytemuck::cast_slice::<u8, ColorRGB8>(bytes).to_vec()
    } else {
        extract(data, name, entry.offset, entry.size, &[FieldType::U8])?
            .iter()
            .map(|f| {
                let grey = f[0].as_u8();
                ColorRGB8 {
                    r: grey,
                    g: grey,
                    b: grey,
                }
            })
            .collect()
    };

    log::debug!("decoded {} {name} samples", samples.len());
    Ok(samples)
}

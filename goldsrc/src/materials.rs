use crate::bsp::LevelData;
use crate::error::TextureNotFound;
use crate::palette::{IndexedImage, RgbaImage};
use crate::wad::WadRegistry;

/// Where a level texture's pixels came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Material<'a> {
    /// stored in the BSP itself
    Embedded(&'a IndexedImage),
    /// found by name in a loaded WAD
    Wad(&'a IndexedImage),
    /// external and not in any loaded WAD; the renderer substitutes a placeholder
    Missing,
}

impl<'a> Material<'a> {
    pub fn image(&self) -> Option<&'a IndexedImage> {
        match *self {
            Material::Embedded(image) | Material::Wad(image) => Some(image),
            Material::Missing => None,
        }
    }

    pub fn to_rgba8(&self, transparent_key: Option<[u8; 3]>) -> Option<RgbaImage> {
        self.image().map(|image| image.to_rgba8(transparent_key))
    }
}

/// One material per entry of the level's texture table, same indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Materials<'a> {
    pub materials: Vec<Material<'a>>,
    pub missing: Vec<TextureNotFound>,
}

/// Pairs every texture of `level` with its pixels, looking external ones up in `wads`.
pub fn resolve_materials<'a>(level: &'a LevelData, wads: &'a WadRegistry) -> Materials<'a> {
    let mut out = Materials::default();
    for texture in &level.textures {
        let material = match &texture.image {
            Some(image) => Material::Embedded(image),
            None => match wads.resolve(&texture.name) {
                Ok(image) => Material::Wad(image),
                Err(missing) => {
                    out.missing.push(missing);
                    Material::Missing
                }
            },
        };
        out.materials.push(material);
    }
    out
}

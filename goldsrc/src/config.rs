use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::ConfigError;

/// Texture name prefixes that are never drawn.
pub const DEFAULT_SPECIAL_TEXTURES: &[&str] = &[
    "sky",
    "aaatrigger",
    "trigger",
    "clip",
    "origin",
    "null",
    "hint",
    "skip",
];

/// Colour that decodes as fully transparent (GoldSrc `{` textures).
pub const DEFAULT_TRANSPARENT_KEY: [u8; 3] = [0, 0, 255];

/// Options for geometry and material building.
///
/// ```ini
/// [decode]
/// special_textures = sky,aaatrigger,trigger,clip,origin,null,hint,skip
/// mark_surfaces = false
/// transparent_key = 0 0 255
///
/// [wads]
/// wad = halflife.wad
/// wad = liquids.wad
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    /// lowercase prefixes
    pub special_textures: Vec<String>,
    /// resolve leaf face ranges through MARKSURFACES instead of indexing FACES directly
    pub mark_surfaces: bool,
    pub transparent_key: Option<[u8; 3]>,
    pub wads: Vec<PathBuf>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            special_textures: DEFAULT_SPECIAL_TEXTURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            mark_surfaces: false,
            transparent_key: Some(DEFAULT_TRANSPARENT_KEY),
            wads: Vec::new(),
        }
    }
}

impl DecodeConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path.as_ref())?;
        Self::from_ini(&ini)
    }

    /// Missing sections and keys keep their defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(decode) = ini.section(Some("decode")) {
            if let Some(list) = decode.get("special_textures") {
                config.special_textures = list
                    .split(',')
                    .map(|s| s.trim().to_ascii_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect();
            }

            if let Some(value) = decode.get("mark_surfaces") {
                config.mark_surfaces = match value.trim() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => return Err(invalid("mark_surfaces", value)),
                };
            }

            if let Some(value) = decode.get("transparent_key") {
                config.transparent_key = parse_key(value)?;
            }
        }

        if let Some(wads) = ini.section(Some("wads")) {
            config.wads = wads.get_all("wad").map(PathBuf::from).collect();
        }

        Ok(config)
    }

    /// Whether faces using this texture are skipped when building geometry.
    pub fn is_special(&self, texture: &str) -> bool {
        self.special_textures.iter().any(|prefix| {
            texture
                .as_bytes()
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
        })
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "decode",
        key,
        value: value.to_owned(),
    }
}

/// `"r g b"`, or `none` to disable the key.
fn parse_key(value: &str) -> Result<Option<[u8; 3]>, ConfigError> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let parts = value
        .split_whitespace()
        .map(str::parse::<u8>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("transparent_key", value))?;
    match parts[..] {
        [r, g, b] => Ok(Some([r, g, b])),
        _ => Err(invalid("transparent_key", value)),
    }
}

use thiserror::Error;

/// Fatal errors. Any of these aborts the parse and no partial level is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BspError {
    #[error("unsupported bsp version {0}")]
    UnsupportedVersion(u32),
    #[error("buffer of {len} bytes is too short for the lump directory")]
    TruncatedHeader { len: usize },
    #[error("{region} ({offset}+{size}) exceeds buffer of {len} bytes")]
    OutOfBounds {
        region: String,
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("{region} is {size} bytes, not a whole number of {width} byte records")]
    MalformedBuffer {
        region: String,
        size: usize,
        width: usize,
    },
    #[error("lump {0} is not part of the directory")]
    MissingLump(String),
}

/// Problems found while reconstructing geometry. The offending face or leaf is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("face {face:?}: {what} index {index} out of range ({len} entries)")]
    CorruptGeometry {
        face: Option<usize>,
        what: &'static str,
        index: i64,
        len: usize,
    },
    #[error("face {face} has {edges} edges, at least 3 are needed")]
    DegenerateFace { face: usize, edges: usize },
    #[error("node {node} is reachable twice, tree is not a tree")]
    CyclicTree { node: usize },
}

impl GeometryError {
    pub(crate) fn corrupt(face: Option<usize>, what: &'static str, index: i64, len: usize) -> Self {
        Self::CorruptGeometry {
            face,
            what,
            index,
            len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WadError {
    #[error("wad magic {0:?} is neither WAD2 nor WAD3")]
    WrongMagic([u8; 4]),
    #[error("wad of {len} bytes is too short for its header")]
    TruncatedHeader { len: usize },
    #[error("wad directory ({offset}+{size}) exceeds buffer of {len} bytes")]
    DirectoryOutOfBounds { offset: usize, size: usize, len: usize },
    #[error("wad entry {name} ({offset}+{size}) exceeds buffer of {len} bytes")]
    EntryOutOfBounds {
        name: String,
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("wad entry {name} is not a valid miptex: {source}")]
    BadTexture { name: String, source: BspError },
}

/// Non-fatal: no loaded archive has a texture of this name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("texture not found: {name}")]
pub struct TextureNotFound {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Ini(#[from] ini::Error),
    #[error("[{section}] {key} = {value:?} is not valid")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

pub type BspResult<T> = Result<T, BspError>;

/// Bounds-checked sub-slice, reporting `region` on failure.
pub(crate) fn region<'a>(
    data: &'a [u8],
    region: &str,
    offset: usize,
    size: usize,
) -> BspResult<&'a [u8]> {
    offset
        .checked_add(size)
        .filter(|&end| end <= data.len())
        .map(|end| &data[offset..end])
        .ok_or_else(|| BspError::OutOfBounds {
            region: region.to_owned(),
            offset,
            size,
            len: data.len(),
        })
}

pub mod registry;

use std::fmt;

use ahash::AHashMap;

use crate::binaries::{read_i32, read_name};
use crate::bsp::textures::read_miptex;
use crate::error::WadError;
use crate::palette::{IndexedImage, QUAKE_PALETTE};

pub use registry::WadRegistry;

/// Size of the file header: magic, entry count, directory offset.
pub const WAD_HEADER_SIZE: usize = 12;
/// Size of one directory entry.
pub const WAD_ENTRY_SIZE: usize = 32;

pub const TYPE_MIPTEX_WAD3: u8 = 0x43;
pub const TYPE_MIPTEX_WAD2: u8 = 0x44;

/// Which texture archive flavour a file is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WadKind {
    /// Quake: textures use the shared Quake palette
    Wad2,
    /// GoldSrc: every texture carries its own palette
    Wad3,
}

impl WadKind {
    fn from_magic(magic: [u8; 4]) -> Result<Self, WadError> {
        match &magic {
            b"WAD2" => Ok(WadKind::Wad2),
            b"WAD3" => Ok(WadKind::Wad3),
            _ => Err(WadError::WrongMagic(magic)),
        }
    }

    fn miptex_type(self) -> u8 {
        match self {
            WadKind::Wad2 => TYPE_MIPTEX_WAD2,
            WadKind::Wad3 => TYPE_MIPTEX_WAD3,
        }
    }
}

/// One directory entry.
///
/// | Offset | Type     | Content                                  |
/// |--------|----------|------------------------------------------|
/// | 0x00   | i32      | position of the entry data in the file   |
/// | 0x04   | i32      | size of the data on disk                 |
/// | 0x08   | i32      | uncompressed size                        |
/// | 0x0c   | u8       | entry type, `0x43`/`0x44` for miptex     |
/// | 0x0d   | u8       | compression, always 0 in practice        |
/// | 0x0e   | u16      | padding                                  |
/// | 0x10   | char[16] | NUL padded name                          |
#[derive(Clone, PartialEq, Eq)]
pub struct WadEntry {
    pub offset: usize,
    pub disk_size: usize,
    pub size: usize,
    pub kind: u8,
    pub compression: u8,
    pub name: String,
}

impl fmt::Debug for WadEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "WadEntry {{ {:?} type {:#04x} at {}+{} }}",
            self.name, self.kind, self.offset, self.disk_size
        )
    }
}

/// A decoded WAD: texture name to indexed image.
///
/// The header is
///
/// | Offset | Type    | Content                        |
/// |--------|---------|--------------------------------|
/// | 0x00   | char[4] | `WAD2` or `WAD3`               |
/// | 0x04   | i32     | number of directory entries    |
/// | 0x08   | i32     | offset of the directory        |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WadArchive {
    kind: WadKind,
    entries: Vec<WadEntry>,
    /// keyed by lowercase name
    textures: AHashMap<String, IndexedImage>,
}

fn checked_usize(v: i32) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

impl WadArchive {
    pub fn parse(data: &[u8]) -> Result<Self, WadError> {
        if data.len() < WAD_HEADER_SIZE {
            return Err(WadError::TruncatedHeader { len: data.len() });
        }
        let kind = WadKind::from_magic([data[0], data[1], data[2], data[3]])?;
        let count = checked_usize(read_i32(&data[4..]));
        let dir_offset = checked_usize(read_i32(&data[8..]));

        let dir_size = count.saturating_mul(WAD_ENTRY_SIZE);
        let directory = dir_offset
            .checked_add(dir_size)
            .and_then(|end| data.get(dir_offset..end))
            .ok_or(WadError::DirectoryOutOfBounds {
                offset: dir_offset,
                size: dir_size,
                len: data.len(),
            })?;

        let entries = directory
            .chunks_exact(WAD_ENTRY_SIZE)
            .map(|raw| WadEntry {
                offset: checked_usize(read_i32(raw)),
                disk_size: checked_usize(read_i32(&raw[4..])),
                size: checked_usize(read_i32(&raw[8..])),
                kind: raw[12],
                compression: raw[13],
                name: read_name(&raw[16..32]),
            })
            .collect::<Vec<_>>();

        let shared = (kind == WadKind::Wad2).then_some(&QUAKE_PALETTE);
        let mut textures = AHashMap::with_capacity(entries.len());

        for entry in &entries {
            if entry.kind != kind.miptex_type() {
                log::debug!("skipping {entry:?}, not a miptex");
                continue;
            }
            if entry.compression != 0 {
                log::warn!("skipping compressed wad entry {}", entry.name);
                continue;
            }

            let bytes = entry
                .offset
                .checked_add(entry.disk_size)
                .and_then(|end| data.get(entry.offset..end))
                .ok_or_else(|| WadError::EntryOutOfBounds {
                    name: entry.name.clone(),
                    offset: entry.offset,
                    size: entry.disk_size,
                    len: data.len(),
                })?;

            let texture = read_miptex(bytes, &entry.name, 0, shared).map_err(|source| {
                WadError::BadTexture {
                    name: entry.name.clone(),
                    source,
                }
            })?;

            match texture.image {
                Some(image) => {
                    textures.insert(entry.name.to_ascii_lowercase(), image);
                }
                None => log::warn!("wad entry {} has no pixels", entry.name),
            }
        }

        Ok(Self {
            kind,
            entries,
            textures,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    pub fn entries(&self) -> &[WadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&IndexedImage> {
        self.textures.get(&name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{miptex, wad};

    #[test]
    fn wad3_textures() {
        let data = wad(
            b"WAD3",
            &[
                ("WALL1", miptex("WALL1", 16, 16, Some((3, Some([9, 8, 7]))))),
                ("{grate", miptex("{grate", 32, 16, Some((255, Some([0, 0, 255]))))),
            ],
        );
        let archive = WadArchive::parse(&data).unwrap();

        assert_eq!(archive.kind(), WadKind::Wad3);
        assert_eq!(archive.entries().len(), 2);
        assert_eq!(archive.len(), 2);

        let wall = archive.get("wall1").unwrap();
        assert_eq!((wall.width, wall.height), (16, 16));
        assert_eq!(wall.palette.rgb(3), [9, 8, 7]);

        let grate = archive.get("{GRATE").unwrap();
        assert_eq!(grate.indices.len(), 32 * 16);
        assert!(grate.to_rgba8(Some([0, 0, 255])).transparent);
    }

    #[test]
    fn wad2_uses_quake_palette() {
        let data = wad(b"WAD2", &[("floor", miptex("floor", 16, 16, Some((1, None))))]);
        let archive = WadArchive::parse(&data).unwrap();
        assert_eq!(archive.kind(), WadKind::Wad2);
        assert_eq!(archive.get("floor").unwrap().palette, QUAKE_PALETTE);
    }

    #[test]
    fn wrong_magic() {
        let mut data = wad(b"WAD3", &[]);
        data[..4].copy_from_slice(b"PWAD");
        assert_eq!(WadArchive::parse(&data), Err(WadError::WrongMagic(*b"PWAD")));
    }

    #[test]
    fn truncated_header() {
        assert_eq!(
            WadArchive::parse(b"WAD3"),
            Err(WadError::TruncatedHeader { len: 4 })
        );
    }

    #[test]
    fn directory_past_end() {
        let mut data = wad(b"WAD3", &[]);
        data[4..8].copy_from_slice(&3i32.to_le_bytes());
        assert!(matches!(
            WadArchive::parse(&data),
            Err(WadError::DirectoryOutOfBounds { size: 96, .. })
        ));
    }

    #[test]
    fn entry_past_end() {
        let mut data = wad(b"WAD3", &[("a", miptex("a", 16, 16, Some((0, Some([0; 3])))))]);
        let dir = data.len() - WAD_ENTRY_SIZE;
        data[dir + 4..dir + 8].copy_from_slice(&100_000i32.to_le_bytes());
        assert!(matches!(
            WadArchive::parse(&data),
            Err(WadError::EntryOutOfBounds { .. })
        ));
    }

    #[test]
    fn other_entry_types_are_skipped() {
        let mut data = wad(b"WAD3", &[("palette", vec![0; 8])]);
        let dir = data.len() - WAD_ENTRY_SIZE;
        data[dir + 12] = 0x40;
        let archive = WadArchive::parse(&data).unwrap();
        assert_eq!(archive.entries().len(), 1);
        assert!(archive.is_empty());
    }
}

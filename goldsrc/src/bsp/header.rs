use std::fmt;

use num_traits::FromPrimitive;

use crate::binaries::read_u32;
use crate::error::{region, BspError, BspResult};

use super::consts::{BspVersion, LumpType, HEADER_LUMPS, HEADER_SIZE};
use super::Lump;

/// Byte range of one lump inside the file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LumpEntry {
    pub offset: usize,
    pub size: usize,
}

/// The format id and the lump directory that follows it.
///
/// ```text,ignore
/// 0x00  u32 version (29 or 30)
/// 0x04  u32 offset, u32 size   ENTITIES
/// 0x0C  u32 offset, u32 size   PLANES
///  ..                          (15 lumps in LumpType order)
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LumpDirectory {
    version: BspVersion,
    lumps: [LumpEntry; HEADER_LUMPS],
}

impl fmt::Debug for LumpDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("LumpDirectory");
        s.field("version", &self.version);
        for lump in LumpType::ALL {
            s.field(lump.name(), &self.lumps[lump as usize]);
        }
        s.finish()
    }
}

impl LumpDirectory {
    /// Reads the version and the directory, checking every lump lies inside `data`.
    pub fn parse(data: &[u8]) -> BspResult<Self> {
        if data.len() < 4 {
            return Err(BspError::TruncatedHeader { len: data.len() });
        }
        let id = read_u32(data);
        let version = BspVersion::from_u32(id).ok_or(BspError::UnsupportedVersion(id))?;

        if data.len() < HEADER_SIZE {
            return Err(BspError::TruncatedHeader { len: data.len() });
        }

        let mut lumps = [LumpEntry::default(); HEADER_LUMPS];
        for (i, entry) in lumps.iter_mut().enumerate() {
            let base = 4 + i * 8;
            *entry = LumpEntry {
                offset: read_u32(&data[base..]) as usize,
                size: read_u32(&data[base + 4..]) as usize,
            };
            region(data, LumpType::ALL[i].name(), entry.offset, entry.size)?;
        }

        Ok(Self { version, lumps })
    }

    pub fn version(&self) -> BspVersion {
        self.version
    }

    /// The raw format id.
    pub fn id(&self) -> u32 {
        self.version as u32
    }

    pub fn get_lump_header(&self, lump: LumpType) -> LumpEntry {
        self.lumps[lump as usize]
    }

    /// Lookup by lump name, e.g. `"SURFEDGES"`.
    pub fn get_by_name(&self, name: &str) -> BspResult<LumpEntry> {
        LumpType::from_name(name)
            .map(|lump| self.get_lump_header(lump))
            .ok_or_else(|| BspError::MissingLump(name.to_owned()))
    }

    pub fn lump_bytes<'a>(&self, data: &'a [u8], lump: LumpType) -> BspResult<&'a [u8]> {
        let entry = self.get_lump_header(lump);
        region(data, lump.name(), entry.offset, entry.size)
    }

    pub fn get_lump<T: Lump>(&self, data: &[u8]) -> BspResult<Vec<T>> {
        T::decode(data, self.get_lump_header(T::lump_type()))
    }

    pub fn entries(&self) -> impl Iterator<Item = (LumpType, LumpEntry)> + '_ {
        LumpType::ALL.into_iter().map(|lump| (lump, self.lumps[lump as usize]))
    }
}

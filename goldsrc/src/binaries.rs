//! Little-endian fixed-width field extraction.
//!
//! A record layout is an ordered list of [`FieldType`] tags. Its width is the sum of the tag
//! widths, and a byte range is read as consecutive records of that width.

use crate::error::{region, BspError, BspResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
}

impl FieldType {
    pub const fn width(self) -> usize {
        match self {
            FieldType::U8 | FieldType::I8 => 1,
            FieldType::U16 | FieldType::I16 => 2,
            FieldType::U32 | FieldType::I32 | FieldType::F32 => 4,
        }
    }

    fn read(self, bytes: &[u8]) -> Field {
        match self {
            FieldType::U8 => Field::U8(bytes[0]),
            FieldType::I8 => Field::I8(bytes[0] as i8),
            FieldType::U16 => Field::U16(u16::from_le_bytes([bytes[0], bytes[1]])),
            FieldType::I16 => Field::I16(i16::from_le_bytes([bytes[0], bytes[1]])),
            FieldType::U32 => Field::U32(read_u32(bytes)),
            FieldType::I32 => Field::I32(read_u32(bytes) as i32),
            FieldType::F32 => Field::F32(f32::from_bits(read_u32(bytes))),
        }
    }
}

/// One decoded field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Field {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    F32(f32),
}

impl Field {
    pub fn as_i64(self) -> i64 {
        match self {
            Field::U8(v) => v.into(),
            Field::I8(v) => v.into(),
            Field::U16(v) => v.into(),
            Field::I16(v) => v.into(),
            Field::U32(v) => v.into(),
            Field::I32(v) => v.into(),
            Field::F32(v) => v as i64,
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Field::F32(v) => v,
            other => other.as_i64() as f32,
        }
    }

    // Narrowing accessors. Decoders only call these on fields whose tag already has that width.
    pub fn as_u32(self) -> u32 {
        self.as_i64() as u32
    }
    pub fn as_i32(self) -> i32 {
        self.as_i64() as i32
    }
    pub fn as_u16(self) -> u16 {
        self.as_i64() as u16
    }
    pub fn as_i16(self) -> i16 {
        self.as_i64() as i16
    }
    pub fn as_u8(self) -> u8 {
        self.as_i64() as u8
    }
}

pub const fn record_width(layout: &[FieldType]) -> usize {
    let mut width = 0;
    let mut i = 0;
    while i < layout.len() {
        width += layout[i].width();
        i += 1;
    }
    width
}

/// Decodes `data[offset..offset + size]` as consecutive `layout` records.
///
/// `name` is only used for error reporting.
pub fn extract(
    data: &[u8],
    name: &str,
    offset: usize,
    size: usize,
    layout: &[FieldType],
) -> BspResult<Vec<Vec<Field>>> {
    let bytes = region(data, name, offset, size)?;
    let width = record_width(layout);

    if width == 0 || size % width != 0 {
        return Err(BspError::MalformedBuffer {
            region: name.to_owned(),
            size,
            width,
        });
    }

    Ok(bytes
        .chunks_exact(width)
        .map(|record| {
            let mut pos = 0;
            layout
                .iter()
                .map(|ty| {
                    let field = ty.read(&record[pos..]);
                    pos += ty.width();
                    field
                })
                .collect()
        })
        .collect())
}

pub(crate) fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

pub(crate) fn read_i32(bytes: &[u8]) -> i32 {
    read_u32(bytes) as i32
}

/// Reads a NUL padded fixed-width name, stopping at the first NUL.
pub(crate) fn read_name(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

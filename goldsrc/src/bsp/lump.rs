use crate::binaries::{extract, Field, FieldType};
use crate::error::BspResult;

use super::{consts::LumpType, header::LumpEntry};

/// A fixed-layout record stored as an array in one lump.
pub trait Lump
where
    Self: Sized,
{
    /// Field tags of one record, in file order.
    const LAYOUT: &'static [FieldType];

    fn max() -> usize;
    fn lump_type() -> LumpType;
    /// `fields` always has exactly `LAYOUT.len()` entries of the tagged types.
    fn from_fields(fields: &[Field]) -> Self;

    fn decode(data: &[u8], entry: LumpEntry) -> BspResult<Vec<Self>> {
        let lump = Self::lump_type();
        let records = extract(data, lump.name(), entry.offset, entry.size, Self::LAYOUT)?;

        if records.len() > Self::max() {
            log::warn!(
                "{} has {} records, more than the engine limit of {}",
                lump.name(),
                records.len(),
                Self::max()
            );
        }
        log::debug!("decoded {} {} records", records.len(), lump.name());

        Ok(records.iter().map(|fields| Self::from_fields(fields)).collect())
    }
}

pub mod binaries;
pub mod bsp;
pub mod config;
pub mod error;
pub mod materials;
pub mod meshes;
pub mod palette;
pub mod prelude;
pub mod wad;

#[cfg(test)]
pub(crate) mod test_util;

use crate::error::{TextureNotFound, WadError};
use crate::palette::IndexedImage;

use super::WadArchive;

/// The set of WADs currently loaded, searched in load order.
///
/// Only this store is mutable; lookups borrow it, so callers serialize loads against them.
#[derive(Debug, Default)]
pub struct WadRegistry {
    archives: Vec<(String, WadArchive)>,
    required: Vec<String>,
}

impl WadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.archives
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Decodes and registers `data` as `name`. Reloading a name replaces it in place.
    pub fn load(&mut self, name: &str, data: &[u8]) -> Result<(), WadError> {
        let archive = WadArchive::parse(data)?;
        log::info!(
            "WAD loaded: {name} ({:?}, {} textures)",
            archive.kind(),
            archive.len()
        );

        match self.position(name) {
            Some(i) => self.archives[i].1 = archive,
            None => self.archives.push((name.to_owned(), archive)),
        }
        Ok(())
    }

    /// Returns whether an archive of that name was loaded.
    pub fn unload(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.archives.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.archives.clear();
    }

    /// Loaded archive names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archives.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn archive(&self, name: &str) -> Option<&WadArchive> {
        self.position(name).map(|i| &self.archives[i].1)
    }

    /// First texture of that name, searching archives in load order.
    pub fn resolve(&self, texture: &str) -> Result<&IndexedImage, TextureNotFound> {
        self.archives
            .iter()
            .find_map(|(_, archive)| archive.get(texture))
            .ok_or_else(|| {
                log::warn!("Texture not found: {texture}");
                TextureNotFound {
                    name: texture.to_owned(),
                }
            })
    }

    /// Archives a level expects, usually [`crate::bsp::LevelData::required_wads`].
    pub fn set_required(&mut self, names: impl IntoIterator<Item = String>) {
        self.required = names.into_iter().collect();
    }

    /// Each required archive and whether it is loaded right now.
    pub fn required_status(&self) -> Vec<(&str, bool)> {
        self.required
            .iter()
            .map(|name| (name.as_str(), self.is_loaded(name)))
            .collect()
    }

    pub fn missing_required(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .filter(|name| !self.is_loaded(name))
            .map(String::as_str)
    }
}

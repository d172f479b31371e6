use glam::{vec3, Vec3};

use crate::error::BspResult;

use super::{consts::LumpType, header::LumpEntry};

/// One `{ ... }` block of the entity lump. Keys keep file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    pairs: Vec<(String, String)>,
}

/// Colour and strength read from a light entity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// 0-1 per channel
    pub color: Vec3,
    pub intensity: f32,
}

impl Entity {
    /// A later duplicate key overwrites the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Not every block has one; callers decide whether that matters.
    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `origin "x y z"`.
    pub fn origin(&self) -> Option<Vec3> {
        let mut parts = self.get("origin")?.split_whitespace().map(str::parse::<f32>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => Some(vec3(x, y, z)),
            _ => None,
        }
    }

    /// Light emitted by a `light*` entity.
    ///
    /// `_light "r g b [brightness]"` gives a colour, with `brightness / 255` as the intensity (1 when
    /// absent). A bare `light "n"` gives a white light of intensity `n`.
    pub fn light(&self) -> Option<Light> {
        if !self.classname()?.starts_with("light") {
            return None;
        }

        if let Some(raw) = self.get("_light") {
            let parts = raw
                .split_whitespace()
                .map(str::parse::<f32>)
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            if parts.len() >= 3 {
                return Some(Light {
                    color: vec3(parts[0], parts[1], parts[2]) / 255.0,
                    intensity: parts.get(3).map_or(1.0, |b| b / 255.0),
                });
            }
        }

        let intensity = self.get("light")?.trim().parse::<f32>().ok()?;
        Some(Light {
            color: Vec3::ONE,
            intensity,
        })
    }
}

/// Parses entity text.
///
/// `{` opens a block (dropping any block left open), `}` closes it. Other lines inside a block
/// have their quotes removed and split at the first run of whitespace into key and value.
pub fn parse_entities(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut current: Option<Entity> = None;

    for line in text.lines() {
        let line = line.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        match line {
            "" => {}
            "{" => {
                if current.is_some() {
                    log::warn!("entity block opened before the previous one was closed");
                }
                current = Some(Entity::default());
            }
            "}" => match current.take() {
                Some(entity) => entities.push(entity),
                None => log::warn!("unmatched '}}' in entity lump"),
            },
            _ => {
                let Some(entity) = current.as_mut() else {
                    continue;
                };
                let stripped = line.replace('"', "");
                match stripped.split_once(char::is_whitespace) {
                    Some((key, value)) => entity.insert(key, value.trim_start()),
                    None => entity.insert(stripped, ""),
                }
            }
        }
    }

    entities
}

pub fn decode_entities(data: &[u8], entry: LumpEntry) -> BspResult<Vec<Entity>> {
    let bytes = crate::error::region(data, LumpType::Entities.name(), entry.offset, entry.size)?;
    let entities = parse_entities(&String::from_utf8_lossy(bytes));
    log::debug!("decoded {} entities", entities.len());
    Ok(entities)
}

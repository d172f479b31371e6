use std::io::{self, Write};

use goldsrc::prelude::*;

/// Everything the readout prints, gathered from one decoded level.
pub struct Report<'a> {
    pub level: &'a LevelData,
    pub wads: &'a WadRegistry,
    pub materials: &'a Materials<'a>,
    pub world: &'a LevelMeshes,
    /// brush entity models, index 1 onwards
    pub models: &'a [LevelMeshes],
    pub config: &'a DecodeConfig,
}

impl Report<'_> {
    pub fn write(&self, out: &mut impl Write, list_entities: bool) -> io::Result<()> {
        let level = self.level;
        writeln!(out, "version {} ({:?})", level.directory.id(), level.version())?;

        writeln!(out, "lumps:")?;
        for (lump, entry) in level.directory.entries() {
            writeln!(
                out,
                "  {:<13} offset {:>9} size {:>9}",
                lump.name(),
                entry.offset,
                entry.size
            )?;
        }

        writeln!(
            out,
            "{} entities, {} textures, {} faces, {} leaves, {} models",
            level.entities.len(),
            level.textures.len(),
            level.faces.len(),
            level.leaves.len(),
            level.models.len()
        )?;

        if list_entities {
            for (i, entity) in level.entities.iter().enumerate() {
                writeln!(out, "  [{i}] {}", entity.classname().unwrap_or("<no classname>"))?;
                if let Some(light) = entity.light() {
                    writeln!(
                        out,
                        "      light {:.2} {:.2} {:.2} x{:.2}",
                        light.color.x, light.color.y, light.color.z, light.intensity
                    )?;
                }
            }
        }

        writeln!(out, "wads:")?;
        for (name, loaded) in self.wads.required_status() {
            let state = if loaded { "loaded" } else { "missing" };
            writeln!(out, "  {name}: {state}")?;
        }
        for name in self.wads.names() {
            if !level
                .required_wads()
                .iter()
                .any(|r| r.eq_ignore_ascii_case(name))
            {
                writeln!(out, "  {name}: loaded, not required")?;
            }
        }

        writeln!(out, "textures:")?;
        for (texture, material) in level.textures.iter().zip(&self.materials.materials) {
            let source = match material {
                Material::Embedded(_) => "embedded",
                Material::Wad(_) => "wad",
                Material::Missing => "MISSING",
            };
            let special = if self.config.is_special(&texture.name) {
                " (not drawn)"
            } else {
                ""
            };
            let transparent = material
                .to_rgba8(self.config.transparent_key)
                .is_some_and(|rgba| rgba.transparent);
            writeln!(
                out,
                "  {:<16} {:>4}x{:<4} {source}{special}{}",
                texture.name,
                texture.width,
                texture.height,
                if transparent { " transparent" } else { "" }
            )?;
        }

        let world = self.world;
        writeln!(
            out,
            "world: {} leaves, {} faces, {} skipped, {} triangles in {} batches, {} issues",
            world.leaves.len(),
            world.faces_built,
            world.faces_skipped,
            world.triangle_count(),
            world.batches.len(),
            world.issues.len()
        )?;
        for issue in &world.issues {
            writeln!(out, "  {issue}")?;
        }

        for (i, (model, meshes)) in level.models.iter().skip(1).zip(self.models).enumerate() {
            writeln!(
                out,
                "model {}: {} faces, {} triangles, bounds {} .. {}",
                i + 1,
                meshes.faces_built,
                meshes.triangle_count(),
                model.mins(),
                model.maxs()
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A GoldSrc header with every lump empty.
    fn empty_level() -> Vec<u8> {
        let mut data = 30u32.to_le_bytes().to_vec();
        data.resize(4 + 15 * 8, 0);
        data
    }

    #[test]
    fn report_for_empty_level() {
        let level = parse_level(&empty_level()).unwrap();
        let wads = WadRegistry::new();
        let materials = resolve_materials(&level, &wads);
        let config = DecodeConfig::default();
        let world = build_world(&level, &config);

        let report = Report {
            level: &level,
            wads: &wads,
            materials: &materials,
            world: &world,
            models: &[],
            config: &config,
        };
        let mut out = Vec::new();
        report.write(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("version 30 (GoldSrc)\n"));
        assert!(text.contains("  SURFEDGES "));
        assert!(text.contains("0 entities, 0 textures, 0 faces, 0 leaves, 0 models"));
        // no world model to walk
        assert!(text.contains("world: 0 leaves, 0 faces, 0 skipped, 0 triangles in 0 batches, 1 issues"));
    }
}

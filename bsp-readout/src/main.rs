mod cli;
mod report;

use std::path::PathBuf;

use cli::CLIOptions;
use common::prelude::VFileSystem;
use goldsrc::prelude::*;
use report::Report;
use thiserror::Error;

#[derive(Debug, Error)]
enum ReadoutError {
    #[error("reading input files: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0:?} was not loaded")]
    NotLoaded(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bsp(#[from] BspError),
}

/// Loads each WAD on its own. An unreadable or corrupt archive is logged and skipped.
fn load_wads(wads: &mut WadRegistry, paths: &[PathBuf]) -> usize {
    let mut loaded = 0;
    for path in paths {
        let files = match VFileSystem::read_paths(std::iter::once(path)) {
            Ok(files) => files,
            Err(e) => {
                log::error!("{path:?}: {e}");
                continue;
            }
        };
        let Some(bytes) = files.get(path) else {
            continue;
        };
        let name = VFileSystem::file_name(&path.to_string_lossy());
        match wads.load(&name, bytes) {
            Ok(()) => loaded += 1,
            Err(e) => log::error!("{name}: {e}"),
        }
    }
    loaded
}

fn main() -> Result<(), ReadoutError> {
    let options: CLIOptions = argh::from_env();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = options.verbose {
        logger.filter_level(level);
    }
    logger.init();

    let config = match &options.config {
        Some(path) => DecodeConfig::load_from_file(path)?,
        None => DecodeConfig::default(),
    };

    let wad_paths: Vec<PathBuf> = config
        .wads
        .iter()
        .chain(&options.wad)
        .cloned()
        .collect();

    let files = VFileSystem::read_paths(std::iter::once(&options.map))?;
    let data = files
        .get(&options.map)
        .ok_or_else(|| ReadoutError::NotLoaded(options.map.clone()))?;

    let level = parse_level(data)?;

    let mut wads = WadRegistry::new();
    wads.set_required(level.required_wads());
    load_wads(&mut wads, &wad_paths);
    for name in wads.missing_required() {
        log::warn!("required WAD {name} is not loaded");
    }

    let world = build_world(&level, &config);
    let models: Vec<LevelMeshes> = (1..level.models.len())
        .map(|i| build_model(&level, i, &config))
        .collect();
    let materials = resolve_materials(&level, &wads);

    let report = Report {
        level: &level,
        wads: &wads,
        materials: &materials,
        world: &world,
        models: &models,
        config: &config,
    };
    report.write(&mut std::io::stdout().lock(), options.entities)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, data: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bsp-readout-{}-{name}", std::process::id()));
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn unreadable_wads_are_skipped() {
        // WAD3 magic, no entries, directory right after the header
        let mut empty = b"WAD3".to_vec();
        empty.extend(0i32.to_le_bytes());
        empty.extend(12i32.to_le_bytes());
        let good = temp_file("good.wad", &empty);
        let corrupt = temp_file("corrupt.wad", b"NOPE");
        let missing = std::env::temp_dir().join("bsp-readout-does-not-exist.wad");

        let mut wads = WadRegistry::new();
        let loaded = load_wads(&mut wads, &[missing, corrupt.clone(), good.clone()]);

        assert_eq!(loaded, 1);
        assert_eq!(wads.names().count(), 1);
        assert!(wads.is_loaded(&VFileSystem::file_name(&good.to_string_lossy())));

        std::fs::remove_file(good).unwrap();
        std::fs::remove_file(corrupt).unwrap();
    }
}

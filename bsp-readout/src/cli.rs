use std::path::PathBuf;

use argh::FromArgs;

/// Decode a Quake or GoldSrc BSP and print what is inside
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// path to the .bsp file
    #[argh(positional)]
    pub map: PathBuf,
    /// texture archive to load, may be repeated. Loaded after the config's WADs
    #[argh(option)]
    pub wad: Vec<PathBuf>,
    /// ini file with [decode] and [wads] sections
    #[argh(option)]
    pub config: Option<PathBuf>,
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// list every entity
    #[argh(switch)]
    pub entities: bool,
}

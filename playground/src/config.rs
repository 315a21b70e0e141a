//! Motion config loading.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use motion::MotionConfig;

/// Config file name inside the asset directory.
pub const CONFIG_FILE: &str = "motion.ron";

/// Config shared by every controller spawned in the playground.
#[derive(Resource, Clone, Debug, Default)]
pub struct PlaygroundConfig(pub MotionConfig);

/// Asset directory: next to the executable when bundled, else the crate's
/// own `assets` folder (for development).
pub fn asset_dir() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                return bundled_assets;
            }
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Read the config file, falling back to defaults on any problem.
pub fn load_motion_config(path: &Path) -> MotionConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not read {:?} ({e}); using default motion config", path);
            return MotionConfig::default();
        }
    };

    match MotionConfig::from_ron(&text) {
        Ok(config) => {
            info!("Loaded motion config from {:?}: {:?}", path, config);
            config
        }
        Err(e) => {
            warn!("{e}; using default motion config");
            MotionConfig::default()
        }
    }
}

pub mod settings;

pub use settings::Settings;

use std::path::PathBuf;

use crate::common::constants::SETTINGS_FILE;

pub fn settings_path() -> PathBuf {
    std::env::var("MOVIL_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SETTINGS_FILE))
}

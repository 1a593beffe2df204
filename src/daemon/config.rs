use anyhow::Result;

use crate::core::config::{self, Settings};

#[derive(Debug, Clone, Default)]
pub struct DaemonConfig {
    pub settings: Settings,
}

impl DaemonConfig {
    pub fn load() -> Result<Self> {
        let settings = Settings::load_or_default(config::settings_path())?;
        Ok(Self { settings })
    }
}

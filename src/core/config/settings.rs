use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::types::Carrier;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub daemon: DaemonSection,
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub battery: BatterySection,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub credit: CreditSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaemonSection {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Every timer interval and delay in the simulation, in milliseconds.
/// Tests shrink these to keep timer behavior observable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingSection {
    #[serde(default = "default_boot_ms")]
    pub boot_ms: u64,
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
    #[serde(default = "default_drain_interval_ms")]
    pub drain_interval_ms: u64,
    #[serde(default = "default_charge_interval_ms")]
    pub charge_interval_ms: u64,
    #[serde(default = "default_signal_interval_ms")]
    pub signal_interval_ms: u64,
    #[serde(default = "default_incoming_call_delay_ms")]
    pub incoming_call_delay_ms: u64,
    #[serde(default = "default_balance_ring_ms")]
    pub balance_ring_ms: u64,
    #[serde(default = "default_volume_hide_ms")]
    pub volume_hide_ms: u64,
    #[serde(default = "default_cleanup_ms")]
    pub cleanup_ms: u64,
    #[serde(default = "default_bot_reply_ms")]
    pub bot_reply_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatterySection {
    #[serde(default = "default_battery_level")]
    pub initial_level: f64,
    #[serde(default = "default_drain_step")]
    pub drain_step: f64,
    #[serde(default = "default_charge_step")]
    pub charge_step: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkSection {
    #[serde(default = "default_carrier")]
    pub carrier: Carrier,
    #[serde(default = "default_signal_bars")]
    pub signal_bars: u8,
    #[serde(default = "default_wifi_enabled")]
    pub wifi_enabled: bool,
    #[serde(default = "default_wifi_bars")]
    pub wifi_bars: u8,
    #[serde(default = "default_signal_flip_chance")]
    pub signal_flip_chance: f64,
    #[serde(default = "default_wifi_flip_chance")]
    pub wifi_flip_chance: f64,
    #[serde(default = "default_incoming_call_chance")]
    pub incoming_call_chance: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreditSection {
    #[serde(default = "default_balance")]
    pub initial_balance: f64,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse settings.toml")
    }

    /// Missing file falls back to defaults; a present-but-broken file is
    /// still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(target: "movil::daemon", "No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

impl Default for DaemonSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            boot_ms: default_boot_ms(),
            restart_delay_ms: default_restart_delay_ms(),
            drain_interval_ms: default_drain_interval_ms(),
            charge_interval_ms: default_charge_interval_ms(),
            signal_interval_ms: default_signal_interval_ms(),
            incoming_call_delay_ms: default_incoming_call_delay_ms(),
            balance_ring_ms: default_balance_ring_ms(),
            volume_hide_ms: default_volume_hide_ms(),
            cleanup_ms: default_cleanup_ms(),
            bot_reply_ms: default_bot_reply_ms(),
        }
    }
}

impl Default for BatterySection {
    fn default() -> Self {
        Self {
            initial_level: default_battery_level(),
            drain_step: default_drain_step(),
            charge_step: default_charge_step(),
        }
    }
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            carrier: default_carrier(),
            signal_bars: default_signal_bars(),
            wifi_enabled: default_wifi_enabled(),
            wifi_bars: default_wifi_bars(),
            signal_flip_chance: default_signal_flip_chance(),
            wifi_flip_chance: default_wifi_flip_chance(),
            incoming_call_chance: default_incoming_call_chance(),
        }
    }
}

impl Default for CreditSection {
    fn default() -> Self {
        Self {
            initial_balance: default_balance(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_boot_ms() -> u64 {
    5000
}

fn default_restart_delay_ms() -> u64 {
    1000
}

fn default_drain_interval_ms() -> u64 {
    60_000
}

fn default_charge_interval_ms() -> u64 {
    30_000
}

fn default_signal_interval_ms() -> u64 {
    30_000
}

fn default_incoming_call_delay_ms() -> u64 {
    30_000
}

fn default_balance_ring_ms() -> u64 {
    2000
}

fn default_volume_hide_ms() -> u64 {
    2000
}

fn default_cleanup_ms() -> u64 {
    2000
}

fn default_bot_reply_ms() -> u64 {
    1000
}

fn default_battery_level() -> f64 {
    85.0
}

fn default_drain_step() -> f64 {
    0.1
}

fn default_charge_step() -> f64 {
    0.2
}

fn default_carrier() -> Carrier {
    Carrier::Movistar
}

fn default_signal_bars() -> u8 {
    3
}

fn default_wifi_enabled() -> bool {
    true
}

fn default_wifi_bars() -> u8 {
    2
}

fn default_signal_flip_chance() -> f64 {
    0.1
}

fn default_wifi_flip_chance() -> f64 {
    0.05
}

fn default_incoming_call_chance() -> f64 {
    0.5
}

fn default_balance() -> f64 {
    100.0
}

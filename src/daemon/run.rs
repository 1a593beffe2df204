use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::{signal, time};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::common::constants::SOCKET_PATH;
use crate::common::types::{LogLevel, PowerState};
use crate::core::config::Settings;
use crate::core::now_ms;
use crate::core::state::DeviceState;
use crate::daemon::config::DaemonConfig;
use crate::daemon::{sensors, SharedState};

pub type ReloadHandle =
    tracing_subscriber::reload::Handle<tracing_subscriber::EnvFilter, tracing_subscriber::Registry>;

/// Drives the power lifecycle. Transitions run over real delays (boot,
/// restart) as spawned tasks; the watch channel tells every sensor when
/// the session ends.
#[derive(Clone)]
pub struct PhoneControl {
    shared: SharedState,
    power_tx: Arc<watch::Sender<PowerState>>,
    settings: Arc<RwLock<Settings>>,
}

impl PhoneControl {
    pub fn new(
        shared: SharedState,
        power_tx: Arc<watch::Sender<PowerState>>,
        settings: Arc<RwLock<Settings>>,
    ) -> Self {
        Self {
            shared,
            power_tx,
            settings,
        }
    }

    pub fn subscribe(&self) -> sensors::PowerRx {
        self.power_tx.subscribe()
    }

    fn boot_ms(&self) -> u64 {
        self.settings
            .read()
            .map(|s| s.timing.boot_ms)
            .unwrap_or(5000)
    }

    fn restart_delay_ms(&self) -> u64 {
        self.settings
            .read()
            .map(|s| s.timing.restart_delay_ms)
            .unwrap_or(1000)
    }

    /// Off -> Booting now, Booting -> On after the boot delay. The boot
    /// generation ties the spawned finisher to this boot; a finisher
    /// left over from an interrupted boot fizzles instead of completing
    /// a later one early.
    pub fn power_on(&self) -> bool {
        let generation = match self.shared.write().map(|mut st| st.power_on()) {
            Ok(Some(g)) => g,
            _ => return false,
        };
        let _ = self.power_tx.send(PowerState::Booting);

        let ctl = self.clone();
        let boot_ms = self.boot_ms();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(boot_ms)).await;
            ctl.finish_boot(generation);
        });
        true
    }

    fn finish_boot(&self, generation: u64) {
        let booted = self
            .shared
            .write()
            .map(|mut st| st.finish_boot(generation))
            .unwrap_or(false);
        if booted {
            let _ = self.power_tx.send(PowerState::On);
        } else {
            debug!(target: "movil::daemon", "Boot aborted, device no longer booting");
        }
    }

    pub fn power_off(&self) {
        if let Ok(mut st) = self.shared.write() {
            st.power_off();
        }
        let _ = self.power_tx.send(PowerState::Off);
    }

    /// Power off, wait, wipe the session, boot again.
    pub fn restart(&self) {
        self.power_off();
        let ctl = self.clone();
        let delay = self.restart_delay_ms();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(delay)).await;
            if let Ok(mut st) = ctl.shared.write() {
                st.reset_session();
            }
            ctl.power_on();
        });
    }
}

pub struct Daemon {
    pub(crate) shared: SharedState,
    pub(crate) settings: Arc<RwLock<Settings>>,
    pub(crate) power_tx: Arc<watch::Sender<PowerState>>,
    pub(crate) control: PhoneControl,
}

impl Daemon {
    pub fn new(cfg: &DaemonConfig) -> Self {
        let shared: SharedState =
            Arc::new(RwLock::new(DeviceState::from_settings(&cfg.settings)));
        let settings = Arc::new(RwLock::new(cfg.settings.clone()));
        let power_tx = Arc::new(watch::channel(PowerState::Off).0);
        let control = PhoneControl::new(shared.clone(), power_tx.clone(), settings.clone());
        Self {
            shared,
            settings,
            power_tx,
            control,
        }
    }

    /// Respawns the sensor set on every Off/Booting -> On edge. Each
    /// sensor holds its own watch receiver and exits when power leaves
    /// On, so nothing survives a power-off.
    fn spawn_sensor_supervisor(&self) {
        let shared = self.shared.clone();
        let settings = self.settings.clone();
        let power_tx = self.power_tx.clone();
        tokio::spawn(async move {
            let mut rx = power_tx.subscribe();
            let mut last = *rx.borrow();
            loop {
                if rx.changed().await.is_err() {
                    break;
                }
                let now = *rx.borrow();
                if now == PowerState::On && last != PowerState::On {
                    let s = settings
                        .read()
                        .map(|s| s.clone())
                        .unwrap_or_default();
                    debug!(target: "movil::daemon", "Power on, spawning sensors");
                    tokio::spawn(sensors::battery_drain_loop(
                        shared.clone(),
                        power_tx.subscribe(),
                        s.timing.drain_interval_ms,
                        s.battery.drain_step,
                    ));
                    tokio::spawn(sensors::battery_charge_loop(
                        shared.clone(),
                        power_tx.subscribe(),
                        s.timing.charge_interval_ms,
                        s.battery.charge_step,
                    ));
                    tokio::spawn(sensors::signal_loop(
                        shared.clone(),
                        power_tx.subscribe(),
                        s.timing.signal_interval_ms,
                        s.network.signal_flip_chance,
                        s.network.wifi_flip_chance,
                    ));
                    tokio::spawn(sensors::recorder_loop(
                        shared.clone(),
                        power_tx.subscribe(),
                        1000,
                    ));
                    tokio::spawn(sensors::incoming_call_task(
                        shared.clone(),
                        power_tx.subscribe(),
                        s.timing.incoming_call_delay_ms,
                        s.network.incoming_call_chance,
                    ));
                }
                last = now;
            }
        });
    }

    async fn init_ipc(&self, filter_handle: ReloadHandle) {
        let current_log_level = Arc::new(RwLock::new(LogLevel::Info));
        let log_level_clone = current_log_level.clone();

        let handle = filter_handle.clone();
        let set_log_level = Arc::new(move |lvl: LogLevel| {
            if let Ok(mut l) = log_level_clone.write() {
                *l = lvl;
            }
            match handle.reload(EnvFilter::new(lvl.to_string())) {
                Ok(_) => debug!(target: "movil::ipc", "Log level changed to {}", lvl),
                Err(e) => error!(target: "movil::ipc", "Failed to change log level: {}", e),
            }
        });

        let ipc_handles = crate::daemon::ipc::server::IpcHandles {
            shared: self.shared.clone(),
            control: self.control.clone(),
            settings: self.settings.clone(),
            set_log_level,
            current_log_level,
        };

        tokio::spawn(async move {
            debug!(target: "movil::daemon", "Starting IPC socket listener...");
            match crate::daemon::ipc::server::start(socket_path(), ipc_handles).await {
                Ok(_) => info!(target: "movil::daemon", "IPC listener stopped"),
                Err(e) => error!(target: "movil::daemon", "IPC error: {:?}", e),
            }
        });
    }
}

pub fn socket_path() -> String {
    std::env::var("MOVIL_SOCKET").unwrap_or_else(|_| SOCKET_PATH.to_string())
}

pub async fn run_with_config_and_logger(cfg: &DaemonConfig, reload: ReloadHandle) -> Result<()> {
    run_with_config(cfg, reload).await
}

pub async fn run_with_config(cfg: &DaemonConfig, filter_handle: ReloadHandle) -> Result<()> {
    let daemon = Daemon::new(cfg);

    daemon.spawn_sensor_supervisor();
    daemon.init_ipc(filter_handle).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    debug!(target: "movil::daemon", "IPC socket ready at {}", socket_path());

    // the device ships powered off; the first POWER_ON boots it
    let mut watch_rx = crate::daemon::watcher::start_settings_watcher(daemon.settings.clone());

    let started = now_ms();
    loop {
        tokio::select! {
            Some(_) = watch_rx.recv() => {
                info!(target: "movil::daemon", "Settings reloaded from disk");
            }
            _ = signal::ctrl_c() => {
                info!(target: "movil::daemon", "Received Ctrl-C, shutting down");
                break;
            }
        }
    }

    daemon.control.power_off();
    info!(
        target: "movil::daemon",
        "Daemon stopped after {} s",
        (now_ms().saturating_sub(started)) / 1000
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_boot_finisher_does_not_shorten_a_second_boot() {
        let mut cfg = DaemonConfig::default();
        cfg.settings.timing.boot_ms = 80;
        let daemon = Daemon::new(&cfg);

        assert!(daemon.control.power_on());
        time::sleep(Duration::from_millis(20)).await;
        daemon.control.power_off();
        assert!(daemon.control.power_on());

        // the first boot's finisher lands around t=80; it must fizzle
        time::sleep(Duration::from_millis(70)).await;
        assert_eq!(daemon.shared.read().unwrap().power(), PowerState::Booting);

        // the second boot's own finisher completes it
        time::sleep(Duration::from_millis(40)).await;
        assert_eq!(daemon.shared.read().unwrap().power(), PowerState::On);
    }
}

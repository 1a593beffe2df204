use std::sync::{Arc, RwLock};

use notify::{EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::core::config::{settings_path, Settings};

/// Watches settings.toml and hot-reloads timing/probability knobs into
/// the shared settings. Sensors pick the new values up on their next
/// respawn; a notification is pushed so the run loop can log it.
pub fn start_settings_watcher(shared_settings: Arc<RwLock<Settings>>) -> mpsc::Receiver<String> {
    let (watch_tx, watch_rx) = mpsc::channel::<String>(10);
    let path = settings_path();

    std::thread::spawn(move || {
        let tx = watch_tx;
        let reload_path = path.clone();
        let shared_for_watcher = shared_settings;

        let mut watcher = match notify::recommended_watcher(
            move |res: Result<notify::Event, notify::Error>| {
                let event = match res {
                    Ok(e) => e,
                    Err(_) => return,
                };
                if !matches!(event.kind, EventKind::Modify(_)) {
                    return;
                }
                match Settings::load(&reload_path) {
                    Ok(new_settings) => match shared_for_watcher.write() {
                        Ok(mut s) => {
                            *s = new_settings;
                            info!(target: "movil::daemon", "Settings reloaded");
                            let _ = tx.blocking_send("settings".to_string());
                        }
                        Err(_) => {
                            error!(target: "movil::daemon", "Failed to acquire settings lock");
                        }
                    },
                    Err(e) => {
                        warn!(target: "movil::daemon", "Settings changed but failed to parse: {:?}", e);
                    }
                }
            },
        ) {
            Ok(w) => w,
            Err(e) => {
                error!(target: "movil::daemon", "Failed to create settings watcher: {}", e);
                return;
            }
        };

        if !path.exists() {
            info!(target: "movil::daemon", "No settings file to watch at {}", path.display());
            return;
        }
        if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
            error!(target: "movil::daemon", "Failed to watch settings file: {}", e);
            return;
        }

        info!(target: "movil::daemon", "Settings file watcher started");
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });

    watch_rx
}

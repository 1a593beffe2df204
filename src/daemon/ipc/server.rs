use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use tokio::net::UnixListener;

use super::handlers::handle_client;
use crate::common::types::LogLevel;
use crate::core::config::Settings;
use crate::daemon::run::PhoneControl;
use crate::daemon::SharedState;

pub struct IpcHandles {
    pub shared: SharedState,
    pub control: PhoneControl,
    pub settings: Arc<RwLock<Settings>>,
    pub set_log_level: Arc<dyn Fn(LogLevel) + Send + Sync>,
    pub current_log_level: Arc<RwLock<LogLevel>>,
}

pub async fn start<P: AsRef<Path>>(path: P, h: IpcHandles) -> Result<()> {
    let path_ref = path.as_ref();
    let _ = std::fs::remove_file(path_ref);
    let listener = UnixListener::bind(path_ref)?;
    let _ = std::fs::set_permissions(path_ref, std::fs::Permissions::from_mode(0o660));
    tracing::debug!(target: "movil::daemon", "IPC listening at {:?}", path_ref);

    loop {
        let (stream, _) = listener.accept().await?;
        let hc = IpcHandles {
            shared: h.shared.clone(),
            control: h.control.clone(),
            settings: h.settings.clone(),
            set_log_level: h.set_log_level.clone(),
            current_log_level: h.current_log_level.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, hc).await {
                tracing::warn!(target: "movil::daemon", "client error: {:?}", e);
            }
        });
    }
}

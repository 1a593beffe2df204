pub mod config;
pub mod ipc;
pub mod run;
pub mod sensors;
pub mod watcher;

use std::sync::{Arc, RwLock};

use crate::core::state::DeviceState;

/// The one store every screen and sensor shares; mutated only through
/// `DeviceState`'s declared operations.
pub type SharedState = Arc<RwLock<DeviceState>>;

pub const SOCKET_PATH: &str = "/tmp/movild.sock";
pub const CONFIG_DIR: &str = "/etc/movil";
pub const SETTINGS_FILE: &str = "/etc/movil/settings.toml";
pub const SHUTTER_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/camera-shutter.oga";

/// Reserved short number for the automated balance-inquiry flow.
pub const BALANCE_NUMBER: &str = "123";

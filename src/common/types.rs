use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    Phone,
    Microphone,
    Camera,
    Battery,
    Connectivity,
    Memory,
    WhatsApp,
    Messages,
}

impl Screen {
    pub fn from_str_ignore_case(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" => Some(Self::Home),
            "phone" => Some(Self::Phone),
            "microphone" => Some(Self::Microphone),
            "camera" => Some(Self::Camera),
            "battery" => Some(Self::Battery),
            "connectivity" => Some(Self::Connectivity),
            "memory" => Some(Self::Memory),
            "whatsapp" => Some(Self::WhatsApp),
            "messages" => Some(Self::Messages),
            _ => None,
        }
    }

    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Phone => "PHONE",
            Self::Microphone => "MICROPHONE",
            Self::Camera => "CAMERA",
            Self::Battery => "BATTERY",
            Self::Connectivity => "CONNECTIVITY",
            Self::Memory => "MEMORY",
            Self::WhatsApp => "WHATSAPP",
            Self::Messages => "MESSAGES",
        }
    }

    /// Label used as the per-app RAM map key and in the recents listing.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Phone => "Phone",
            Self::Microphone => "Microphone",
            Self::Camera => "Camera",
            Self::Battery => "Battery",
            Self::Connectivity => "Connectivity",
            Self::Memory => "Memory",
            Self::WhatsApp => "WhatsApp",
            Self::Messages => "Messages",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    Movistar,
    Digitel,
    Movilnet,
}

impl Carrier {
    pub fn from_str_ignore_case(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movistar" => Some(Self::Movistar),
            "digitel" => Some(Self::Digitel),
            "movilnet" => Some(Self::Movilnet),
            _ => None,
        }
    }

    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Movistar => "MOVISTAR",
            Self::Digitel => "DIGITEL",
            Self::Movilnet => "MOVILNET",
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movistar => write!(f, "Movistar"),
            Self::Digitel => write!(f, "Digitel"),
            Self::Movilnet => write!(f, "Movilnet"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Off,
    Booting,
    On,
}

impl PowerState {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Booting => "BOOTING",
            Self::On => "ON",
        }
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Booting => write!(f, "booting"),
            Self::On => write!(f, "on"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

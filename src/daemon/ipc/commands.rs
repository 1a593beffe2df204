use std::str::FromStr;

use crate::common::types::{Carrier, LogLevel, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDir {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Status,
    Ping,
    Quit,
    SetLog(LogLevel),
    PowerOn,
    PowerOff,
    Restart,
    Open(Screen),
    Close(Screen),
    Recents,
    Dial(String),
    EndCall,
    Charger(bool),
    SetBattery(f64),
    Recharge(f64),
    Balance,
    SetCarrier(Carrier),
    SetSignal(u8),
    Wifi,
    SetWifiBars(u8),
    Volume(VolumeDir),
    Sms(String),
    Inbox,
    Chat(String),
    ChatLog,
    RecordStart,
    RecordStop,
    Recordings,
    Snap,
    Flash,
    Flip,
    Photos,
    Clean,
}

impl FromStr for Command {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut it = s.split_whitespace();
        let c = it.next().ok_or("empty")?.to_ascii_uppercase();
        // free-text commands keep the remainder verbatim
        let rest = s[c.len().min(s.len())..].trim();
        Ok(match c.as_str() {
            "HELP" | "?" => Self::Help,
            "STATUS" => Self::Status,
            "PING" => Self::Ping,
            "QUIT" => Self::Quit,

            "SET_LOG" | "SETLOG" => match it.next().map(|l| l.to_ascii_uppercase()) {
                Some(l) => match l.as_str() {
                    "DEBUG" => Self::SetLog(LogLevel::Debug),
                    "INFO" => Self::SetLog(LogLevel::Info),
                    "WARN" => Self::SetLog(LogLevel::Warn),
                    "ERROR" => Self::SetLog(LogLevel::Error),
                    _ => return Err("usage: SETLOG <DEBUG|INFO|WARN|ERROR>"),
                },
                None => return Err("usage: SETLOG <DEBUG|INFO|WARN|ERROR>"),
            },

            "POWER_ON" | "POWERON" => Self::PowerOn,
            "POWER_OFF" | "POWEROFF" => Self::PowerOff,
            "RESTART" => Self::Restart,

            "OPEN" => {
                let name = it.next().ok_or("usage: OPEN <screen>")?;
                let screen =
                    Screen::from_str_ignore_case(name).ok_or("unknown screen (try HELP)")?;
                Self::Open(screen)
            }
            "CLOSE" => {
                let name = it.next().ok_or("usage: CLOSE <screen>")?;
                let screen =
                    Screen::from_str_ignore_case(name).ok_or("unknown screen (try HELP)")?;
                Self::Close(screen)
            }
            "RECENTS" => Self::Recents,

            "DIAL" => {
                let number = it.next().ok_or("usage: DIAL <number>")?;
                if !number.chars().all(|ch| ch.is_ascii_digit() || "*#+".contains(ch)) {
                    return Err("usage: DIAL <number>");
                }
                Self::Dial(number.to_string())
            }
            "END_CALL" | "ENDCALL" | "HANGUP" => Self::EndCall,

            "CHARGER" => match it.next().map(|v| v.to_ascii_uppercase()) {
                Some(v) if v == "ON" || v == "TRUE" => Self::Charger(true),
                Some(v) if v == "OFF" || v == "FALSE" => Self::Charger(false),
                _ => return Err("usage: CHARGER <ON|OFF>"),
            },
            "SET_BATTERY" | "SETBATTERY" => match it.next().and_then(|v| v.parse::<f64>().ok()) {
                Some(level) => Self::SetBattery(level),
                None => return Err("usage: SET_BATTERY <percent>"),
            },

            "RECHARGE" => match it.next().and_then(|v| v.parse::<f64>().ok()) {
                Some(amount) => Self::Recharge(amount),
                None => return Err("usage: RECHARGE <amount>"),
            },
            "BALANCE" | "SALDO" => Self::Balance,

            "SET_CARRIER" | "SETCARRIER" => {
                let name = it.next().ok_or("usage: SET_CARRIER <MOVISTAR|DIGITEL|MOVILNET>")?;
                let carrier = Carrier::from_str_ignore_case(name)
                    .ok_or("usage: SET_CARRIER <MOVISTAR|DIGITEL|MOVILNET>")?;
                Self::SetCarrier(carrier)
            }
            "SET_SIGNAL" | "SETSIGNAL" => match it.next().and_then(|v| v.parse::<u8>().ok()) {
                Some(bars) => Self::SetSignal(bars),
                None => return Err("usage: SET_SIGNAL <0-4>"),
            },
            "WIFI" => Self::Wifi,
            "SET_WIFI_BARS" | "SETWIFIBARS" => match it.next().and_then(|v| v.parse::<u8>().ok()) {
                Some(bars) => Self::SetWifiBars(bars),
                None => return Err("usage: SET_WIFI_BARS <0-3>"),
            },

            "VOLUME" => match it.next().map(|v| v.to_ascii_uppercase()) {
                Some(v) if v == "UP" => Self::Volume(VolumeDir::Up),
                Some(v) if v == "DOWN" => Self::Volume(VolumeDir::Down),
                _ => return Err("usage: VOLUME <UP|DOWN>"),
            },

            "SMS" => {
                if rest.is_empty() {
                    return Err("usage: SMS <text>");
                }
                Self::Sms(rest.to_string())
            }
            "INBOX" => Self::Inbox,

            "CHAT" => {
                if rest.is_empty() {
                    return Err("usage: CHAT <text>");
                }
                Self::Chat(rest.to_string())
            }
            "CHATLOG" | "CHAT_LOG" => Self::ChatLog,

            "RECORD" => match it.next().map(|v| v.to_ascii_uppercase()) {
                Some(v) if v == "START" => Self::RecordStart,
                Some(v) if v == "STOP" => Self::RecordStop,
                _ => return Err("usage: RECORD <START|STOP>"),
            },
            "RECORDINGS" => Self::Recordings,

            "SNAP" => Self::Snap,
            "FLASH" => Self::Flash,
            "FLIP" => Self::Flip,
            "PHOTOS" => Self::Photos,

            "CLEAN" => Self::Clean,

            _ => return Err("unknown command (try HELP)"),
        })
    }
}

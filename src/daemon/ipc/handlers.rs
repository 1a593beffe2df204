use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tracing::info;

use super::commands::{Command, VolumeDir};
use super::server::IpcHandles;
use crate::core::camera;
use crate::core::chat::SendOutcome;
use crate::core::messages;
use crate::core::rng::SimRng;
use crate::daemon::sensors;

const HELP: &str = "CMDS:
        - HELP | ?
        - STATUS | PING | QUIT
        - SETLOG <DEBUG|INFO|WARN|ERROR>
        - POWER_ON | POWER_OFF | RESTART
        - OPEN <screen> | CLOSE <screen> | RECENTS
        - DIAL <number> | END_CALL
        - CHARGER <ON|OFF> | SET_BATTERY <pct>
        - RECHARGE <amount> | BALANCE
        - SET_CARRIER <name> | SET_SIGNAL <0-4>
        - WIFI | SET_WIFI_BARS <0-3>
        - VOLUME <UP|DOWN>
        - SMS <text> | INBOX
        - CHAT <text> | CHATLOG
        - RECORD <START|STOP> | RECORDINGS
        - SNAP | FLASH | FLIP | PHOTOS
        - CLEAN
 ";

/// Handle a single IPC client connection.
pub async fn handle_client(stream: UnixStream, h: IpcHandles) -> Result<()> {
    let (r, mut w) = stream.into_split();
    let mut reader = BufReader::new(r);
    let mut line = String::new();
    let mut rng = SimRng::new();
    w.write_all(b"OK MOVIL IPC\n").await?;

    while reader.read_line(&mut line).await? > 0 {
        let s = line.trim();
        if s.len() > 512 {
            w.write_all(b"ERR input too long\n").await?;
            line.clear();
            continue;
        }
        let resp = match s.parse::<Command>() {
            Ok(Command::Help) => HELP.to_string(),
            Ok(Command::Ping) => "PONG\n".into(),
            Ok(Command::Quit) => {
                w.write_all(b"BYE\n").await?;
                break;
            }

            Ok(Command::Status) => status_response(&h),

            Ok(Command::SetLog(lvl)) => {
                (h.set_log_level)(lvl);
                "OK SET_LOG\n".into()
            }

            Ok(Command::PowerOn) => {
                if h.control.power_on() {
                    "OK BOOTING\n".into()
                } else {
                    "ERR ALREADY_ON\n".into()
                }
            }
            Ok(Command::PowerOff) => {
                h.control.power_off();
                "OK POWERED_OFF\n".into()
            }
            Ok(Command::Restart) => {
                info!(target: "movil::ipc", "Restart requested via IPC");
                h.control.restart();
                "OK RESTARTING\n".into()
            }

            Ok(Command::Open(screen)) => {
                let ok = h
                    .shared
                    .write()
                    .map(|mut st| st.set_screen(screen, &mut rng))
                    .unwrap_or(false);
                if ok {
                    format!("OK OPEN {}\n", screen.to_upper_str())
                } else {
                    "ERR POWERED_OFF\n".into()
                }
            }
            Ok(Command::Close(screen)) => {
                let ok = h
                    .shared
                    .write()
                    .map(|mut st| st.close_screen(screen))
                    .unwrap_or(false);
                if ok {
                    format!("OK CLOSE {}\n", screen.to_upper_str())
                } else {
                    "ERR POWERED_OFF\n".into()
                }
            }
            Ok(Command::Recents) => {
                let recents = h
                    .shared
                    .read()
                    .map(|st| st.recents().to_vec())
                    .unwrap_or_default();
                if recents.is_empty() {
                    "(no recent apps)\n".into()
                } else {
                    let mut out = String::new();
                    for s in recents {
                        out.push_str(s.label());
                        out.push('\n');
                    }
                    out
                }
            }

            Ok(Command::Dial(number)) => handle_dial(&h, &number),
            Ok(Command::EndCall) => {
                if let Ok(mut st) = h.shared.write() {
                    st.end_call();
                }
                "OK CALL_ENDED\n".into()
            }

            Ok(Command::Charger(plugged)) => {
                if let Ok(mut st) = h.shared.write() {
                    st.set_charging(plugged);
                }
                format!("OK CHARGER {}\n", if plugged { "ON" } else { "OFF" })
            }
            Ok(Command::SetBattery(level)) => {
                let now = h
                    .shared
                    .write()
                    .map(|mut st| {
                        st.set_battery_level(level);
                        st.battery.level()
                    })
                    .unwrap_or(0.0);
                format!("OK BATTERY {:.1}\n", now)
            }

            Ok(Command::Recharge(amount)) => {
                let resp = h
                    .shared
                    .write()
                    .map(|mut st| {
                        if st.recharge_credit(amount) {
                            let balance = st.credit_balance();
                            st.inbox.push_recharge_confirmation(amount, balance);
                            format!("OK BALANCE {:.2}\n", balance)
                        } else {
                            "ERR AMOUNT_MUST_BE_POSITIVE\n".to_string()
                        }
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }
            Ok(Command::Balance) => {
                let resp = h
                    .shared
                    .write()
                    .map(|mut st| {
                        let balance = st.credit_balance();
                        st.inbox.push_balance(balance);
                        format!("BALANCE={:.2}\n", balance)
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }

            Ok(Command::SetCarrier(carrier)) => {
                let bars = h
                    .shared
                    .write()
                    .map(|mut st| {
                        st.set_carrier(carrier, &mut rng);
                        st.network.signal_bars()
                    })
                    .unwrap_or(0);
                format!("OK CARRIER {} SIGNAL={}\n", carrier.to_upper_str(), bars)
            }
            Ok(Command::SetSignal(bars)) => {
                let now = h
                    .shared
                    .write()
                    .map(|mut st| {
                        st.network.set_signal_bars(bars);
                        st.network.signal_bars()
                    })
                    .unwrap_or(0);
                format!("OK SIGNAL {}\n", now)
            }
            Ok(Command::Wifi) => {
                let on = h
                    .shared
                    .write()
                    .map(|mut st| st.network.toggle_wifi())
                    .unwrap_or(false);
                format!("OK WIFI {}\n", if on { "ON" } else { "OFF" })
            }
            Ok(Command::SetWifiBars(bars)) => {
                let now = h
                    .shared
                    .write()
                    .map(|mut st| {
                        st.network.set_wifi_bars(bars);
                        st.network.wifi_bars()
                    })
                    .unwrap_or(0);
                format!("OK WIFI_BARS {}\n", now)
            }

            Ok(Command::Volume(dir)) => {
                let (level, generation) = match h.shared.write() {
                    Ok(mut st) => match dir {
                        VolumeDir::Up => st.volume_up(),
                        VolumeDir::Down => st.volume_down(),
                    },
                    Err(_) => (0, 0),
                };
                let hide_ms = timing(&h, |t| t.volume_hide_ms);
                sensors::schedule_volume_hide(h.shared.clone(), generation, hide_ms);
                format!("OK VOLUME {}\n", level)
            }

            Ok(Command::Sms(text)) => handle_sms(&h, &text),
            Ok(Command::Inbox) => {
                let resp = h
                    .shared
                    .read()
                    .map(|st| {
                        if st.inbox.messages().is_empty() {
                            "(no messages)\n".to_string()
                        } else {
                            let mut out = String::new();
                            for m in st.inbox.messages() {
                                out.push_str(&format!("[{}] {}: {}\n", m.id, m.sender, m.body));
                            }
                            out
                        }
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }

            Ok(Command::Chat(text)) => handle_chat(&h, &text),
            Ok(Command::ChatLog) => {
                let resp = h
                    .shared
                    .read()
                    .map(|st| {
                        let mut out = String::new();
                        for m in st.chat.messages() {
                            let who = if m.from_user { "yo" } else { "bot" };
                            out.push_str(&format!("[{}] {}: {}\n", m.id, who, m.body));
                        }
                        out
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }

            Ok(Command::RecordStart) => {
                let started = h
                    .shared
                    .write()
                    .map(|mut st| st.recorder.start())
                    .unwrap_or(false);
                if started {
                    "OK RECORDING\n".into()
                } else {
                    "ERR ALREADY_RECORDING\n".into()
                }
            }
            Ok(Command::RecordStop) => {
                let filed = h.shared.write().ok().and_then(|mut st| st.recorder.stop());
                match filed {
                    Some(rec) => format!("OK SAVED id={} {}s\n", rec.id, rec.duration_secs),
                    None => "ERR NOT_RECORDING\n".into(),
                }
            }
            Ok(Command::Recordings) => {
                let resp = h
                    .shared
                    .read()
                    .map(|st| {
                        if st.recorder.recordings().is_empty() {
                            "(no recordings)\n".to_string()
                        } else {
                            let mut out = String::new();
                            for r in st.recorder.recordings() {
                                out.push_str(&format!("[{}] {}s\n", r.id, r.duration_secs));
                            }
                            out
                        }
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }

            Ok(Command::Snap) => {
                let photo = h.shared.write().map(|mut st| st.camera.take_photo()).ok();
                match photo {
                    Some(p) => {
                        // best-effort shutter, failure swallowed
                        camera::play_shutter_sound();
                        format!("OK PHOTO {}\n", p.id)
                    }
                    None => "ERR LOCK\n".into(),
                }
            }
            Ok(Command::Flash) => {
                let on = h
                    .shared
                    .write()
                    .map(|mut st| st.camera.toggle_flash())
                    .unwrap_or(false);
                format!("OK FLASH {}\n", if on { "ON" } else { "OFF" })
            }
            Ok(Command::Flip) => {
                let front = h
                    .shared
                    .write()
                    .map(|mut st| st.camera.flip())
                    .unwrap_or(false);
                format!("OK CAMERA {}\n", if front { "FRONT" } else { "BACK" })
            }
            Ok(Command::Photos) => {
                let resp = h
                    .shared
                    .read()
                    .map(|st| {
                        if st.camera.photos().is_empty() {
                            "(no photos)\n".to_string()
                        } else {
                            let mut out = String::new();
                            for p in st.camera.photos() {
                                out.push_str(&format!(
                                    "[{}] flash={} lens={}\n",
                                    p.id,
                                    if p.flash { "on" } else { "off" },
                                    if p.front { "front" } else { "back" },
                                ));
                            }
                            out
                        }
                    })
                    .unwrap_or_else(|_| "ERR LOCK\n".to_string());
                resp
            }

            Ok(Command::Clean) => {
                let delay = timing(&h, |t| t.cleanup_ms);
                sensors::schedule_cleanup(h.shared.clone(), h.control.subscribe(), delay);
                "OK CLEANING\n".into()
            }

            Err(e) => format!("ERR {}\n", e),
        };
        if !resp.is_empty() {
            w.write_all(resp.as_bytes()).await?;
        }
        line.clear();
    }
    Ok(())
}

fn timing(h: &IpcHandles, pick: fn(&crate::core::config::settings::TimingSection) -> u64) -> u64 {
    h.settings.read().map(|s| pick(&s.timing)).unwrap_or(2000)
}

fn handle_dial(h: &IpcHandles, number: &str) -> String {
    use crate::core::call::DialOutcome;

    let (outcome, generation) = h
        .shared
        .write()
        .map(|mut st| {
            let outcome = st.dial(number);
            (outcome, st.call.generation())
        })
        .unwrap_or((DialOutcome::Rejected, 0));
    match outcome {
        DialOutcome::Connected => format!("OK CALLING {}\n", number),
        DialOutcome::BalanceInquiry => {
            let ring = timing(h, |t| t.balance_ring_ms);
            sensors::schedule_balance_completion(
                h.shared.clone(),
                h.control.subscribe(),
                generation,
                ring,
            );
            format!("OK CALLING {} (balance inquiry)\n", number)
        }
        DialOutcome::Rejected => "ERR CANNOT_DIAL\n".into(),
    }
}

fn handle_sms(h: &IpcHandles, text: &str) -> String {
    match messages::parse_recharge(text) {
        Some(amount) => {
            let resp = h
                .shared
                .write()
                .map(|mut st| {
                    if st.recharge_credit(amount) {
                        let balance = st.credit_balance();
                        st.inbox.push_recharge_confirmation(amount, balance);
                        format!("OK RECHARGED {:.2} BALANCE={:.2}\n", amount, balance)
                    } else {
                        "ERR AMOUNT_MUST_BE_POSITIVE\n".to_string()
                    }
                })
                .unwrap_or_else(|_| "ERR LOCK\n".to_string());
            resp
        }
        None => "OK NO_ACTION\n".into(),
    }
}

fn handle_chat(h: &IpcHandles, text: &str) -> String {
    let outcome = h
        .shared
        .write()
        .map(|mut st| {
            let balance = st.credit_balance();
            st.chat.send(text, balance)
        })
        .unwrap_or(SendOutcome::Empty);
    match outcome {
        SendOutcome::Sent { bot_reply } => {
            let delay = timing(h, |t| t.bot_reply_ms);
            sensors::schedule_bot_reply(h.shared.clone(), h.control.subscribe(), bot_reply, delay);
            "OK SENT\n".into()
        }
        SendOutcome::NoCredit => "ERR NO_CREDIT\n".into(),
        SendOutcome::Empty => "ERR EMPTY\n".into(),
    }
}

fn status_response(h: &IpcHandles) -> String {
    let log_level = match h.current_log_level.read() {
        Ok(l) => l.to_upper_str().to_string(),
        Err(_) => "UNKNOWN".to_string(),
    };
    match h.shared.read() {
        Ok(st) => {
            let call = if st.call.in_progress {
                st.call.number.clone()
            } else {
                "none".to_string()
            };
            format!(
                "POWER={}\nSCREEN={}\nBATTERY={:.1}\nCHARGING={}\nCARRIER={}\nSIGNAL={}\n\
                 WIFI={}\nWIFI_BARS={}\nVOLUME={}\nBALANCE={:.2}\nRAM_USED={:.1}\nRAM_TOTAL={:.1}\n\
                 CALL={}\nRECORDING={}\nLOG_LEVEL={}\n",
                st.power(),
                st.screen(),
                st.battery.level(),
                st.battery.charging,
                st.network.carrier,
                st.network.signal_bars(),
                if st.network.wifi_enabled { "on" } else { "off" },
                st.network.wifi_bars(),
                st.volume.level,
                st.credit_balance(),
                st.ram.used_gb(),
                st.ram.total_gb,
                call,
                st.recorder.is_recording(),
                log_level,
            )
        }
        Err(_) => "ERR LOCK\n".to_string(),
    }
}

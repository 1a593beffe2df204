//! Simulated sensors: periodic tasks that nudge the device state while
//! the phone is on. Every task watches the power channel and exits as
//! soon as the state leaves `On`, so no timer outlives the session.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::debug;

use crate::common::types::PowerState;
use crate::core::rng::{DeviceRng, SimRng};
use crate::daemon::SharedState;

pub type PowerRx = watch::Receiver<PowerState>;

fn powered_on(rx: &PowerRx) -> bool {
    *rx.borrow() == PowerState::On
}

/// Battery discharge: `-step` percent per tick while unplugged.
pub async fn battery_drain_loop(
    shared: SharedState,
    mut power_rx: PowerRx,
    interval_ms: u64,
    step: f64,
) {
    let mut tick = time::interval(Duration::from_millis(interval_ms.max(1)));
    tick.tick().await; // consume the immediate first tick
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Ok(mut st) = shared.write() {
                    st.battery_drain_tick(step);
                }
            }
            res = power_rx.changed() => {
                if res.is_err() || !powered_on(&power_rx) {
                    debug!(target: "movil::sensor", "Drain loop stopped");
                    break;
                }
            }
        }
    }
}

/// Battery charge: `+step` percent per tick while plugged in.
pub async fn battery_charge_loop(
    shared: SharedState,
    mut power_rx: PowerRx,
    interval_ms: u64,
    step: f64,
) {
    let mut tick = time::interval(Duration::from_millis(interval_ms.max(1)));
    tick.tick().await;
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Ok(mut st) = shared.write() {
                    st.battery_charge_tick(step);
                }
            }
            res = power_rx.changed() => {
                if res.is_err() || !powered_on(&power_rx) {
                    debug!(target: "movil::sensor", "Charge loop stopped");
                    break;
                }
            }
        }
    }
}

/// Radio fluctuation: occasionally re-rolls signal and wifi bars.
pub async fn signal_loop(
    shared: SharedState,
    mut power_rx: PowerRx,
    interval_ms: u64,
    signal_chance: f64,
    wifi_chance: f64,
) {
    let mut rng = SimRng::new();
    let mut tick = time::interval(Duration::from_millis(interval_ms.max(1)));
    tick.tick().await;
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Ok(mut st) = shared.write() {
                    st.signal_tick(signal_chance, wifi_chance, &mut rng);
                }
            }
            res = power_rx.changed() => {
                if res.is_err() || !powered_on(&power_rx) {
                    debug!(target: "movil::sensor", "Signal loop stopped");
                    break;
                }
            }
        }
    }
}

/// Advances an active voice recording by one second per tick.
pub async fn recorder_loop(shared: SharedState, mut power_rx: PowerRx, interval_ms: u64) {
    let mut tick = time::interval(Duration::from_millis(interval_ms.max(1)));
    tick.tick().await;
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Ok(mut st) = shared.write() {
                    st.recorder_tick();
                }
            }
            res = power_rx.changed() => {
                if res.is_err() || !powered_on(&power_rx) {
                    break;
                }
            }
        }
    }
}

/// One-shot incidental incoming call: a fixed delay after boot, a coin
/// flip decides whether somebody rings in this session.
pub async fn incoming_call_task(
    shared: SharedState,
    mut power_rx: PowerRx,
    delay_ms: u64,
    chance: f64,
) {
    let mut rng = SimRng::new();
    tokio::select! {
        _ = time::sleep(Duration::from_millis(delay_ms)) => {
            if !rng.chance(chance) {
                debug!(target: "movil::sensor", "No incidental call this session");
                return;
            }
            if let Ok(mut st) = shared.write() {
                st.simulate_incoming_call(&mut rng);
            }
        }
        _ = wait_power_loss(&mut power_rx) => {
            debug!(target: "movil::sensor", "Incoming-call timer cancelled");
        }
    }
}

async fn wait_power_loss(power_rx: &mut PowerRx) {
    loop {
        if power_rx.changed().await.is_err() || !powered_on(power_rx) {
            return;
        }
    }
}

/// Completes a ringing 123 balance call after the simulated ring time.
/// `call_generation` pins the timer to the call that scheduled it; if
/// the user hangs up and dials somebody else before the ring elapses,
/// the completion is a no-op.
pub fn schedule_balance_completion(
    shared: SharedState,
    mut power_rx: PowerRx,
    call_generation: u64,
    ring_ms: u64,
) {
    tokio::spawn(async move {
        let mut rng = SimRng::new();
        tokio::select! {
            _ = time::sleep(Duration::from_millis(ring_ms)) => {
                if let Ok(mut st) = shared.write() {
                    st.complete_balance_call(&mut rng, call_generation);
                }
            }
            _ = wait_power_loss(&mut power_rx) => {}
        }
    });
}

/// Dismisses the volume indicator a moment after the last rocker press.
/// The generation check makes a stale timer harmless.
pub fn schedule_volume_hide(shared: SharedState, generation: u64, hide_ms: u64) {
    tokio::spawn(async move {
        time::sleep(Duration::from_millis(hide_ms)).await;
        if let Ok(mut st) = shared.write() {
            st.hide_volume(generation);
        }
    });
}

/// Delivers the chat bot's answer after a simulated typing delay.
pub fn schedule_bot_reply(shared: SharedState, mut power_rx: PowerRx, reply: String, delay_ms: u64) {
    tokio::spawn(async move {
        tokio::select! {
            _ = time::sleep(Duration::from_millis(delay_ms)) => {
                if let Ok(mut st) = shared.write() {
                    st.chat.push_bot_reply(reply);
                }
            }
            _ = wait_power_loss(&mut power_rx) => {}
        }
    });
}

/// Runs the storage cleanup after the simulated scan time.
pub fn schedule_cleanup(shared: SharedState, mut power_rx: PowerRx, delay_ms: u64) {
    tokio::spawn(async move {
        tokio::select! {
            _ = time::sleep(Duration::from_millis(delay_ms)) => {
                if let Ok(mut st) = shared.write() {
                    st.clean_storage();
                }
            }
            _ = wait_power_loss(&mut power_rx) => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};

    use crate::core::config::Settings;
    use crate::core::state::DeviceState;

    fn shared_on() -> (SharedState, watch::Sender<PowerState>) {
        let mut st = DeviceState::from_settings(&Settings::default());
        let boot = st.power_on().unwrap();
        st.finish_boot(boot);
        let (tx, _) = watch::channel(PowerState::On);
        (Arc::new(RwLock::new(st)), tx)
    }

    fn dial(shared: &SharedState, number: &str) -> u64 {
        let mut st = shared.write().unwrap();
        st.dial(number);
        st.call.generation()
    }

    #[tokio::test]
    async fn drain_loop_lowers_level_while_on() {
        let (shared, tx) = shared_on();
        let before = shared.read().unwrap().battery.level();
        let handle = tokio::spawn(battery_drain_loop(shared.clone(), tx.subscribe(), 5, 0.1));
        time::sleep(Duration::from_millis(60)).await;
        tx.send(PowerState::Off).unwrap();
        shared.write().unwrap().power_off();
        handle.await.unwrap();
        let after = shared.read().unwrap().battery.level();
        assert!(after < before, "expected drain: {after} < {before}");
    }

    #[tokio::test]
    async fn no_ghost_drain_after_power_off() {
        let (shared, tx) = shared_on();
        let handle = tokio::spawn(battery_drain_loop(shared.clone(), tx.subscribe(), 5, 0.1));

        // power off immediately; the loop must exit and stop mutating
        shared.write().unwrap().power_off();
        tx.send(PowerState::Off).unwrap();
        handle.await.unwrap();

        let frozen = shared.read().unwrap().battery.level();
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(shared.read().unwrap().battery.level(), frozen);
    }

    #[tokio::test]
    async fn charge_loop_raises_level_while_plugged() {
        let (shared, tx) = shared_on();
        shared.write().unwrap().set_charging(true);
        shared.write().unwrap().set_battery_level(50.0);
        let handle = tokio::spawn(battery_charge_loop(shared.clone(), tx.subscribe(), 5, 0.2));
        time::sleep(Duration::from_millis(60)).await;
        tx.send(PowerState::Off).unwrap();
        handle.await.unwrap();
        assert!(shared.read().unwrap().battery.level() > 50.0);
    }

    #[tokio::test]
    async fn balance_completion_switches_to_messages() {
        let (shared, tx) = shared_on();
        let gen = dial(&shared, "123");
        schedule_balance_completion(shared.clone(), tx.subscribe(), gen, 5);
        time::sleep(Duration::from_millis(50)).await;
        let st = shared.read().unwrap();
        assert!(!st.call.in_progress);
        assert_eq!(st.screen(), crate::common::types::Screen::Messages);
    }

    #[tokio::test]
    async fn balance_completion_cancelled_by_power_off() {
        let (shared, tx) = shared_on();
        let gen = dial(&shared, "123");
        schedule_balance_completion(shared.clone(), tx.subscribe(), gen, 40);
        shared.write().unwrap().power_off();
        tx.send(PowerState::Off).unwrap();
        time::sleep(Duration::from_millis(80)).await;
        let st = shared.read().unwrap();
        assert_eq!(st.screen(), crate::common::types::Screen::Home);
        assert!(st.inbox.messages().iter().all(|m| !m.body.contains("saldo actual")));
    }

    #[tokio::test]
    async fn stale_balance_ring_does_not_end_a_replacement_call() {
        let (shared, tx) = shared_on();
        let gen = dial(&shared, "123");
        schedule_balance_completion(shared.clone(), tx.subscribe(), gen, 40);

        // hang up and call somebody else before the ring elapses
        shared.write().unwrap().end_call();
        dial(&shared, "5551234");

        time::sleep(Duration::from_millis(100)).await;
        let st = shared.read().unwrap();
        assert!(st.call.in_progress, "ordinary call must survive the stale ring timer");
        assert_eq!(st.call.number, "5551234");
        assert_ne!(st.screen(), crate::common::types::Screen::Messages);
    }

    #[tokio::test]
    async fn volume_hide_respects_generation() {
        let (shared, _tx) = shared_on();
        let (_, gen1) = shared.write().unwrap().volume_up();
        schedule_volume_hide(shared.clone(), gen1, 5);
        let (_, _gen2) = shared.write().unwrap().volume_up();
        time::sleep(Duration::from_millis(40)).await;
        assert!(shared.read().unwrap().volume.visible, "newer press keeps indicator up");
    }

    #[tokio::test]
    async fn incoming_call_timer_cancelled_by_power_off() {
        let (shared, tx) = shared_on();
        let handle = tokio::spawn(incoming_call_task(shared.clone(), tx.subscribe(), 30, 1.0));
        shared.write().unwrap().power_off();
        tx.send(PowerState::Off).unwrap();
        handle.await.unwrap();
        assert!(!shared.read().unwrap().call.in_progress);
    }
}

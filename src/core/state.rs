use tracing::{debug, info};

use crate::common::types::{Carrier, PowerState, Screen};
use crate::core::battery::Battery;
use crate::core::call::{Call, DialOutcome};
use crate::core::camera::Camera;
use crate::core::chat::Chat;
use crate::core::config::Settings;
use crate::core::memory::{Ram, Storage};
use crate::core::messages::Inbox;
use crate::core::network::Network;
use crate::core::recorder::Recorder;
use crate::core::rng::DeviceRng;

/// Most-recently-used apps kept for the task switcher.
pub const RECENTS_CAP: usize = 5;
pub const MAX_VOLUME: u8 = 10;

/// Volume rocker state. `generation` guards the auto-hide timer: a hide
/// scheduled for an older press must not dismiss a newer indicator.
#[derive(Debug, Clone, Copy)]
pub struct Volume {
    pub level: u8,
    pub visible: bool,
    pub generation: u64,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            level: 5,
            visible: false,
            generation: 0,
        }
    }
}

/// The whole simulated phone. One instance per daemon, shared behind
/// `Arc<RwLock<_>>`; writes go through these methods or a component's
/// own, which keep the clamped ranges and derived figures honest.
#[derive(Debug, Clone)]
pub struct DeviceState {
    power: PowerState,
    screen: Screen,
    recents: Vec<Screen>,
    pub battery: Battery,
    pub network: Network,
    pub storage: Storage,
    pub ram: Ram,
    pub call: Call,
    credit_balance: f64,
    pub volume: Volume,
    pub inbox: Inbox,
    pub chat: Chat,
    pub recorder: Recorder,
    pub camera: Camera,
    incoming_call_fired: bool,
    boot_generation: u64,
}

impl DeviceState {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut battery = Battery::new(settings.battery.initial_level);
        battery.charging = false;
        Self {
            power: PowerState::Off,
            screen: Screen::Home,
            recents: Vec::new(),
            battery,
            network: Network::new(
                settings.network.carrier,
                settings.network.signal_bars,
                settings.network.wifi_enabled,
                settings.network.wifi_bars,
            ),
            storage: Storage::default(),
            ram: Ram::default(),
            call: Call::default(),
            credit_balance: settings.credit.initial_balance.max(0.0),
            volume: Volume::default(),
            inbox: Inbox::default(),
            chat: Chat::new(),
            recorder: Recorder::default(),
            camera: Camera::default(),
            incoming_call_fired: false,
            boot_generation: 0,
        }
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn recents(&self) -> &[Screen] {
        &self.recents
    }

    pub fn credit_balance(&self) -> f64 {
        self.credit_balance
    }

    // --- power ----------------------------------------------------------

    /// Off -> Booting. Returns the boot generation the caller must hand
    /// back to [`DeviceState::finish_boot`]; the daemon finishes the
    /// boot after the boot delay.
    pub fn power_on(&mut self) -> Option<u64> {
        if self.power != PowerState::Off {
            return None;
        }
        self.power = PowerState::Booting;
        self.boot_generation += 1;
        info!(target: "movil::state", "Powering on");
        Some(self.boot_generation)
    }

    /// Booting -> On. No-op if the device was switched off mid-boot or
    /// if this is the finisher of an earlier, interrupted boot.
    pub fn finish_boot(&mut self, generation: u64) -> bool {
        if self.power != PowerState::Booting || self.boot_generation != generation {
            return false;
        }
        self.power = PowerState::On;
        self.screen = Screen::Home;
        self.inbox.push_welcome();
        info!(target: "movil::state", "Boot complete");
        true
    }

    pub fn power_off(&mut self) {
        if self.power == PowerState::Off {
            return;
        }
        self.power = PowerState::Off;
        self.call.end();
        self.volume.visible = false;
        // a running take survives the power cut
        self.recorder.stop();
        info!(target: "movil::state", "Powered off");
    }

    /// Wipes the volatile session before a reboot: recents, per-app RAM,
    /// app logs, and the one-shot incoming-call arm.
    pub fn reset_session(&mut self) {
        self.recents.clear();
        self.ram.reset();
        self.inbox.clear();
        self.chat = Chat::new();
        self.screen = Screen::Home;
        self.incoming_call_fired = false;
        debug!(target: "movil::state", "Session state reset");
    }

    // --- screens --------------------------------------------------------

    /// Activates a screen. Anything but Home lands at the front of the
    /// recents list (deduplicated, capped) and is charged a simulated
    /// RAM cost.
    pub fn set_screen(&mut self, screen: Screen, rng: &mut dyn DeviceRng) -> bool {
        if self.power != PowerState::On {
            return false;
        }
        self.screen = screen;
        if screen != Screen::Home {
            self.recents.retain(|s| *s != screen);
            self.recents.insert(0, screen);
            self.recents.truncate(RECENTS_CAP);
            self.ram.charge_app(screen, rng);
        }
        debug!(target: "movil::state", "Screen -> {}", screen);
        true
    }

    /// Closes a screen from the task switcher, releasing its RAM. The
    /// active screen falls back to Home if it was the one closed.
    pub fn close_screen(&mut self, screen: Screen) -> bool {
        if self.power != PowerState::On {
            return false;
        }
        self.recents.retain(|s| *s != screen);
        self.ram.release_app(screen);
        if self.screen == screen {
            self.screen = Screen::Home;
        }
        true
    }

    // --- battery --------------------------------------------------------

    pub fn set_charging(&mut self, charging: bool) {
        self.battery.charging = charging;
    }

    pub fn set_battery_level(&mut self, level: f64) {
        self.battery.set_level(level);
    }

    /// Sensor ticks self-guard on power in addition to task cancellation,
    /// so a late timer callback can never mutate a powered-off device.
    pub fn battery_drain_tick(&mut self, step: f64) {
        if self.power != PowerState::On {
            return;
        }
        self.battery.drain_tick(step);
    }

    pub fn battery_charge_tick(&mut self, step: f64) {
        if self.power != PowerState::On {
            return;
        }
        self.battery.charge_tick(step);
    }

    // --- network --------------------------------------------------------

    pub fn set_carrier(&mut self, carrier: Carrier, rng: &mut dyn DeviceRng) {
        self.network.set_carrier(carrier, rng);
        info!(target: "movil::state", "Carrier -> {}", carrier);
    }

    pub fn signal_tick(&mut self, signal_chance: f64, wifi_chance: f64, rng: &mut dyn DeviceRng) {
        if self.power != PowerState::On {
            return;
        }
        self.network.fluctuate(signal_chance, wifi_chance, rng);
    }

    // --- calls ----------------------------------------------------------

    pub fn dial(&mut self, number: &str) -> DialOutcome {
        if self.power != PowerState::On {
            return DialOutcome::Rejected;
        }
        let outcome = self.call.dial(number);
        if outcome != DialOutcome::Rejected {
            info!(target: "movil::state", "Dialing {}", self.call.number);
        }
        outcome
    }

    pub fn end_call(&mut self) {
        self.call.end();
    }

    /// Completes the 123 ring: hangs up, opens Messages, delivers the
    /// balance reply. `generation` pins the completion to the call it
    /// was scheduled for; a stale timer must not touch a later call.
    pub fn complete_balance_call(&mut self, rng: &mut dyn DeviceRng, generation: u64) -> bool {
        if self.power != PowerState::On
            || !self.call.in_progress
            || self.call.generation() != generation
        {
            return false;
        }
        self.call.end();
        self.set_screen(Screen::Messages, rng);
        let balance = self.credit_balance;
        self.inbox.push_balance(balance);
        true
    }

    /// At most one spontaneous incoming call per power session.
    pub fn simulate_incoming_call(&mut self, rng: &mut dyn DeviceRng) -> Option<String> {
        if self.power != PowerState::On || self.incoming_call_fired {
            return None;
        }
        self.incoming_call_fired = true;
        let number = self.call.incoming(rng);
        self.set_screen(Screen::Phone, rng);
        info!(target: "movil::state", "Incoming call from {}", number);
        Some(number)
    }

    // --- credit ---------------------------------------------------------

    /// Adds credit; non-positive amounts are ignored, so the balance can
    /// never go negative.
    pub fn recharge_credit(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return false;
        }
        self.credit_balance += amount;
        info!(target: "movil::state", "Recharged {:.2} Bs (balance {:.2})", amount, self.credit_balance);
        true
    }

    // --- volume ---------------------------------------------------------

    pub fn volume_up(&mut self) -> (u8, u64) {
        self.bump_volume(1)
    }

    pub fn volume_down(&mut self) -> (u8, u64) {
        self.bump_volume(-1)
    }

    fn bump_volume(&mut self, delta: i8) -> (u8, u64) {
        let level = (self.volume.level as i8 + delta).clamp(0, MAX_VOLUME as i8) as u8;
        self.volume.level = level;
        self.volume.visible = true;
        self.volume.generation += 1;
        (level, self.volume.generation)
    }

    /// Hides the indicator only if no newer press happened since the
    /// timer was scheduled.
    pub fn hide_volume(&mut self, generation: u64) {
        if self.volume.generation == generation {
            self.volume.visible = false;
        }
    }

    // --- misc sensors ---------------------------------------------------

    pub fn recorder_tick(&mut self) {
        if self.power != PowerState::On {
            return;
        }
        self.recorder.tick();
    }

    pub fn clean_storage(&mut self) {
        self.storage.clean();
        info!(target: "movil::state", "Storage cleanup done (internal {:.1} GB used)", self.storage.internal.used_gb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::fixed::FixedRng;

    fn powered_on() -> DeviceState {
        let mut st = DeviceState::from_settings(&Settings::default());
        let boot = st.power_on().unwrap();
        st.finish_boot(boot);
        st
    }

    #[test]
    fn boot_sequence_runs_off_booting_on() {
        let mut st = DeviceState::from_settings(&Settings::default());
        assert_eq!(st.power(), PowerState::Off);
        let boot = st.power_on().expect("first power-on starts a boot");
        assert_eq!(st.power(), PowerState::Booting);
        assert!(st.power_on().is_none(), "already booting");
        assert!(st.finish_boot(boot));
        assert_eq!(st.power(), PowerState::On);
        assert_eq!(st.inbox.messages().len(), 1, "welcome SMS after boot");
    }

    #[test]
    fn power_off_mid_boot_cancels_finish() {
        let mut st = DeviceState::from_settings(&Settings::default());
        let boot = st.power_on().unwrap();
        st.power_off();
        assert!(!st.finish_boot(boot));
        assert_eq!(st.power(), PowerState::Off);
    }

    #[test]
    fn interrupted_boot_finisher_cannot_complete_a_later_boot() {
        let mut st = DeviceState::from_settings(&Settings::default());
        let first = st.power_on().unwrap();
        st.power_off();
        let second = st.power_on().unwrap();
        assert!(!st.finish_boot(first), "stale finisher must not fire");
        assert_eq!(st.power(), PowerState::Booting);
        assert!(st.finish_boot(second));
        assert_eq!(st.power(), PowerState::On);
    }

    #[test]
    fn recents_are_unique_and_capped() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        let screens = [
            Screen::Phone,
            Screen::Camera,
            Screen::Battery,
            Screen::Connectivity,
            Screen::Memory,
            Screen::WhatsApp,
            Screen::Messages,
            Screen::Camera,
        ];
        for s in screens {
            st.set_screen(s, &mut rng);
            assert!(st.recents().len() <= RECENTS_CAP);
            let mut seen = std::collections::HashSet::new();
            assert!(st.recents().iter().all(|s| seen.insert(*s)), "duplicate in recents");
        }
        assert_eq!(st.recents()[0], Screen::Camera, "re-open moves to front");
    }

    #[test]
    fn home_is_never_a_recent() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        st.set_screen(Screen::Home, &mut rng);
        assert!(st.recents().is_empty());
    }

    #[test]
    fn ram_used_tracks_per_app_sum() {
        let mut st = powered_on();
        let mut rng = FixedRng {
            ram_gb: 0.5,
            ..Default::default()
        };
        st.set_screen(Screen::Phone, &mut rng);
        st.set_screen(Screen::Camera, &mut rng);
        st.close_screen(Screen::Phone);
        st.set_screen(Screen::WhatsApp, &mut rng);
        let sum: f64 = st.ram.per_app().values().sum();
        assert!((st.ram.used_gb() - sum).abs() < 1e-9);
    }

    #[test]
    fn closing_active_screen_falls_back_home() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        st.set_screen(Screen::Camera, &mut rng);
        st.close_screen(Screen::Camera);
        assert_eq!(st.screen(), Screen::Home);
        assert!(st.recents().is_empty());
        assert!(st.ram.per_app().get("Camera").is_none());
    }

    #[test]
    fn closing_background_screen_keeps_active() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        st.set_screen(Screen::Camera, &mut rng);
        st.set_screen(Screen::Phone, &mut rng);
        st.close_screen(Screen::Camera);
        assert_eq!(st.screen(), Screen::Phone);
    }

    #[test]
    fn balance_call_ends_in_messages_with_sms() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        assert_eq!(st.dial("123"), DialOutcome::BalanceInquiry);
        let gen = st.call.generation();
        assert!(st.complete_balance_call(&mut rng, gen));
        assert_eq!(st.screen(), Screen::Messages);
        assert!(!st.call.in_progress);
        let last = st.inbox.messages().last().unwrap();
        assert!(last.body.contains("100.00 Bs"));
    }

    #[test]
    fn stale_balance_completion_leaves_a_later_call_alone() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        st.dial("123");
        let stale = st.call.generation();
        st.end_call();
        assert_eq!(st.dial("5551234"), DialOutcome::Connected);
        assert!(!st.complete_balance_call(&mut rng, stale));
        assert!(st.call.in_progress, "unrelated call must stay up");
        assert_eq!(st.call.number, "5551234");
        assert_ne!(st.screen(), Screen::Messages);
        assert!(st.inbox.messages().iter().all(|m| !m.body.contains("saldo actual")));
    }

    #[test]
    fn session_reset_restores_baseline() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        st.set_screen(Screen::Camera, &mut rng);
        st.set_screen(Screen::Phone, &mut rng);
        st.power_off();
        st.reset_session();
        let boot = st.power_on().unwrap();
        st.finish_boot(boot);
        assert!(st.recents().is_empty());
        assert_eq!(st.ram.per_app().len(), 1);
        assert_eq!(st.ram.per_app().get("System"), Some(&0.8));
    }

    #[test]
    fn recharges_accumulate() {
        let mut st = powered_on();
        assert!(st.recharge_credit(50.0));
        assert!(st.recharge_credit(100.0));
        assert_eq!(st.credit_balance(), 250.0);
        assert!(!st.recharge_credit(0.0));
        assert!(!st.recharge_credit(-10.0));
        assert_eq!(st.credit_balance(), 250.0);
    }

    #[test]
    fn ticks_are_inert_while_off() {
        let mut st = powered_on();
        let mut rng = FixedRng {
            chance: true,
            bars: 0,
            ..Default::default()
        };
        let level = st.battery.level();
        let bars = st.network.signal_bars();
        st.power_off();
        st.battery_drain_tick(0.1);
        st.battery_charge_tick(0.2);
        st.signal_tick(1.0, 1.0, &mut rng);
        st.recorder_tick();
        assert_eq!(st.battery.level(), level);
        assert_eq!(st.network.signal_bars(), bars);
        assert!(st.simulate_incoming_call(&mut rng).is_none());
    }

    #[test]
    fn screen_switch_requires_power() {
        let mut st = DeviceState::from_settings(&Settings::default());
        let mut rng = FixedRng::default();
        assert!(!st.set_screen(Screen::Camera, &mut rng));
        assert_eq!(st.dial("555"), DialOutcome::Rejected);
    }

    #[test]
    fn incoming_call_fires_once_per_session() {
        let mut st = powered_on();
        let mut rng = FixedRng::default();
        let first = st.simulate_incoming_call(&mut rng);
        assert_eq!(first.as_deref(), Some("412555019"));
        assert_eq!(st.screen(), Screen::Phone);
        assert!(st.call.in_progress);
        st.end_call();
        assert!(st.simulate_incoming_call(&mut rng).is_none());

        // a reboot rearms it
        st.power_off();
        st.reset_session();
        let boot = st.power_on().unwrap();
        st.finish_boot(boot);
        assert!(st.simulate_incoming_call(&mut rng).is_some());
    }

    #[test]
    fn volume_clamps_and_generation_guards_hide() {
        let mut st = powered_on();
        for _ in 0..20 {
            st.volume_up();
        }
        assert_eq!(st.volume.level, MAX_VOLUME);
        let (_, old_gen) = st.volume_down();
        let (_, new_gen) = st.volume_down();
        st.hide_volume(old_gen);
        assert!(st.volume.visible, "stale hide must not dismiss newer press");
        st.hide_volume(new_gen);
        assert!(!st.volume.visible);
        for _ in 0..30 {
            st.volume_down();
        }
        assert_eq!(st.volume.level, 0);
    }

    #[test]
    fn power_off_files_running_recording() {
        let mut st = powered_on();
        st.recorder.start();
        st.recorder_tick();
        st.recorder_tick();
        st.power_off();
        assert!(!st.recorder.is_recording());
        assert_eq!(st.recorder.recordings().len(), 1);
        assert_eq!(st.recorder.recordings()[0].duration_secs, 2);
    }
}

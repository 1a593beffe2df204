use crate::common::types::Carrier;
use crate::core::rng::DeviceRng;

pub const MAX_SIGNAL_BARS: u8 = 4;
pub const MAX_WIFI_BARS: u8 = 3;

/// Cellular and wifi status. Bars are clamped to their display ranges;
/// the fluctuation tick resamples them with small independent
/// probabilities to mimic a live radio.
#[derive(Debug, Clone)]
pub struct Network {
    pub carrier: Carrier,
    signal_bars: u8,
    pub wifi_enabled: bool,
    wifi_bars: u8,
}

impl Network {
    pub fn new(carrier: Carrier, signal_bars: u8, wifi_enabled: bool, wifi_bars: u8) -> Self {
        Self {
            carrier,
            signal_bars: signal_bars.min(MAX_SIGNAL_BARS),
            wifi_enabled,
            wifi_bars: wifi_bars.min(MAX_WIFI_BARS),
        }
    }

    pub fn signal_bars(&self) -> u8 {
        self.signal_bars
    }

    pub fn wifi_bars(&self) -> u8 {
        self.wifi_bars
    }

    pub fn set_signal_bars(&mut self, bars: u8) {
        self.signal_bars = bars.min(MAX_SIGNAL_BARS);
    }

    pub fn set_wifi_bars(&mut self, bars: u8) {
        self.wifi_bars = bars.min(MAX_WIFI_BARS);
    }

    pub fn toggle_wifi(&mut self) -> bool {
        self.wifi_enabled = !self.wifi_enabled;
        self.wifi_enabled
    }

    /// Switching carrier lands the device in a new simulated cell
    /// environment, so the signal is re-rolled.
    pub fn set_carrier(&mut self, carrier: Carrier, rng: &mut dyn DeviceRng) {
        self.carrier = carrier;
        self.signal_bars = rng.bars(MAX_SIGNAL_BARS);
    }

    /// One fluctuation tick.
    pub fn fluctuate(&mut self, signal_chance: f64, wifi_chance: f64, rng: &mut dyn DeviceRng) {
        if rng.chance(signal_chance) {
            self.signal_bars = rng.bars(MAX_SIGNAL_BARS);
        }
        if self.wifi_enabled && rng.chance(wifi_chance) {
            self.wifi_bars = rng.bars(MAX_WIFI_BARS);
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Carrier::Movistar, 3, true, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::fixed::FixedRng;

    #[test]
    fn bars_are_clamped() {
        let mut n = Network::default();
        n.set_signal_bars(9);
        assert_eq!(n.signal_bars(), MAX_SIGNAL_BARS);
        n.set_wifi_bars(9);
        assert_eq!(n.wifi_bars(), MAX_WIFI_BARS);
    }

    #[test]
    fn carrier_change_rerolls_signal() {
        let mut n = Network::default();
        let mut rng = FixedRng {
            bars: 1,
            ..Default::default()
        };
        n.set_carrier(Carrier::Digitel, &mut rng);
        assert_eq!(n.carrier, Carrier::Digitel);
        assert_eq!(n.signal_bars(), 1);
    }

    #[test]
    fn fluctuation_skips_wifi_when_disabled() {
        let mut n = Network::new(Carrier::Movilnet, 3, false, 2);
        let mut rng = FixedRng {
            chance: true,
            bars: 0,
            ..Default::default()
        };
        n.fluctuate(0.1, 0.05, &mut rng);
        assert_eq!(n.signal_bars(), 0);
        assert_eq!(n.wifi_bars(), 2, "wifi bars must not move while disabled");
    }

    #[test]
    fn toggle_flips() {
        let mut n = Network::default();
        assert!(!n.toggle_wifi());
        assert!(n.toggle_wifi());
    }
}

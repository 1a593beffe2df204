/// Simulated battery. The level is a percentage clamped to [0, 100];
/// out-of-range writes are clamped, never rejected.
#[derive(Debug, Clone)]
pub struct Battery {
    level: f64,
    pub charging: bool,
}

pub const DRAIN_STEP: f64 = 0.1;
pub const CHARGE_STEP: f64 = 0.2;

impl Battery {
    pub fn new(level: f64) -> Self {
        Self {
            level: level.clamp(0.0, 100.0),
            charging: false,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn set_level(&mut self, level: f64) {
        self.level = level.clamp(0.0, 100.0);
    }

    /// One drain tick: only discharging while not on the charger and not
    /// already empty.
    pub fn drain_tick(&mut self, step: f64) {
        if !self.charging && self.level > 0.0 {
            self.level = (self.level - step).max(0.0);
        }
    }

    /// One charge tick: only charging while plugged in and below full.
    pub fn charge_tick(&mut self, step: f64) {
        if self.charging && self.level < 100.0 {
            self.level = (self.level + step).min(100.0);
        }
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::new(85.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_level_clamps() {
        let mut b = Battery::default();
        b.set_level(150.0);
        assert_eq!(b.level(), 100.0);
        b.set_level(-3.0);
        assert_eq!(b.level(), 0.0);
    }

    #[test]
    fn drain_stops_at_zero() {
        let mut b = Battery::new(0.25);
        for _ in 0..10 {
            b.drain_tick(DRAIN_STEP);
        }
        assert_eq!(b.level(), 0.0);
    }

    #[test]
    fn charge_stops_at_full() {
        let mut b = Battery::new(99.9);
        b.charging = true;
        for _ in 0..10 {
            b.charge_tick(CHARGE_STEP);
        }
        assert_eq!(b.level(), 100.0);
    }

    #[test]
    fn drain_noop_while_charging() {
        let mut b = Battery::new(50.0);
        b.charging = true;
        b.drain_tick(DRAIN_STEP);
        assert_eq!(b.level(), 50.0);
    }

    #[test]
    fn charge_noop_while_unplugged() {
        let mut b = Battery::new(50.0);
        b.charge_tick(CHARGE_STEP);
        assert_eq!(b.level(), 50.0);
    }

    #[test]
    fn level_stays_in_range_under_mixed_ticks() {
        let mut b = Battery::new(0.5);
        for i in 0..5000 {
            b.charging = i % 3 == 0;
            b.drain_tick(DRAIN_STEP);
            b.charge_tick(CHARGE_STEP);
            assert!((0.0..=100.0).contains(&b.level()));
        }
    }
}

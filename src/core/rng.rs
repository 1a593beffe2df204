use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the simulation's cosmetic randomness (signal bars, per-app
/// RAM cost, incoming-call numbers). Kept behind a trait so tests can
/// substitute a deterministic generator.
pub trait DeviceRng: Send {
    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
    /// Uniform integer in 0..=max.
    fn bars(&mut self, max: u8) -> u8;
    /// Simulated RAM cost for a freshly opened app, uniform in [0.3, 0.8) GB.
    fn app_ram_gb(&mut self) -> f64;
    /// Random 9-digit phone number.
    fn phone_number(&mut self) -> String;
}

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new() -> Self {
        Self(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRng for SimRng {
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    fn bars(&mut self, max: u8) -> u8 {
        self.0.gen_range(0..=max)
    }

    fn app_ram_gb(&mut self) -> f64 {
        self.0.gen_range(0.3..0.8)
    }

    fn phone_number(&mut self) -> String {
        self.0.gen_range(100_000_000u64..1_000_000_000u64).to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_stay_in_range() {
        let mut rng = SimRng::seeded(7);
        for _ in 0..200 {
            assert!(rng.bars(4) <= 4);
            assert!(rng.bars(3) <= 3);
        }
    }

    #[test]
    fn app_ram_within_bounds() {
        let mut rng = SimRng::seeded(7);
        for _ in 0..200 {
            let gb = rng.app_ram_gb();
            assert!((0.3..0.8).contains(&gb), "out of range: {gb}");
        }
    }

    #[test]
    fn phone_number_has_nine_digits() {
        let mut rng = SimRng::seeded(7);
        for _ in 0..50 {
            let n = rng.phone_number();
            assert_eq!(n.len(), 9);
            assert!(n.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

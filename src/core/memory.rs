use std::collections::HashMap;

use crate::common::types::Screen;
use crate::core::rng::DeviceRng;

/// RAM owner key for the baseline system reservation.
pub const SYSTEM_KEY: &str = "System";
pub const SYSTEM_RAM_GB: f64 = 0.8;

/// Per-app RAM bookkeeping. The used figure is always derived from the
/// per-app map, never stored, so it cannot drift out of sync.
#[derive(Debug, Clone)]
pub struct Ram {
    pub total_gb: f64,
    per_app: HashMap<String, f64>,
}

impl Ram {
    pub fn new(total_gb: f64) -> Self {
        let mut per_app = HashMap::new();
        per_app.insert(SYSTEM_KEY.to_string(), SYSTEM_RAM_GB);
        Self { total_gb, per_app }
    }

    pub fn used_gb(&self) -> f64 {
        self.per_app.values().sum()
    }

    pub fn per_app(&self) -> &HashMap<String, f64> {
        &self.per_app
    }

    /// Charges an opened app a fresh simulated RAM cost. Re-opening
    /// re-rolls the cost rather than stacking a second entry.
    pub fn charge_app(&mut self, screen: Screen, rng: &mut dyn DeviceRng) {
        self.per_app.insert(screen.label().to_string(), rng.app_ram_gb());
    }

    pub fn release_app(&mut self, screen: Screen) {
        self.per_app.remove(screen.label());
    }

    /// Back to the post-boot baseline: only the system reservation.
    pub fn reset(&mut self) {
        self.per_app.clear();
        self.per_app.insert(SYSTEM_KEY.to_string(), SYSTEM_RAM_GB);
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new(6.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InternalStorage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub system_gb: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ExternalStorage {
    pub installed: bool,
    pub total_gb: f64,
    pub used_gb: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Storage {
    pub internal: InternalStorage,
    pub external: ExternalStorage,
}

impl Storage {
    /// Simulated cleanup pass: frees a fixed chunk on each volume while
    /// keeping the internal usage above the system footprint.
    pub fn clean(&mut self) {
        self.internal.used_gb =
            (self.internal.used_gb - 8.0).max(self.internal.system_gb + 2.0);
        if self.external.installed {
            self.external.used_gb = (self.external.used_gb - 5.0).max(2.0);
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            internal: InternalStorage {
                total_gb: 64.0,
                used_gb: 32.0,
                system_gb: 8.0,
            },
            external: ExternalStorage {
                installed: true,
                total_gb: 128.0,
                used_gb: 45.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::fixed::FixedRng;

    #[test]
    fn used_is_always_sum_of_per_app() {
        let mut ram = Ram::default();
        let mut rng = FixedRng {
            ram_gb: 0.4,
            ..Default::default()
        };
        ram.charge_app(Screen::Camera, &mut rng);
        ram.charge_app(Screen::Phone, &mut rng);
        assert!((ram.used_gb() - (SYSTEM_RAM_GB + 0.8)).abs() < 1e-9);

        ram.release_app(Screen::Camera);
        assert!((ram.used_gb() - (SYSTEM_RAM_GB + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn reopening_rerolls_instead_of_stacking() {
        let mut ram = Ram::default();
        let mut rng = FixedRng {
            ram_gb: 0.4,
            ..Default::default()
        };
        ram.charge_app(Screen::Camera, &mut rng);
        rng.ram_gb = 0.7;
        ram.charge_app(Screen::Camera, &mut rng);
        assert_eq!(ram.per_app().len(), 2); // System + Camera
        assert!((ram.used_gb() - (SYSTEM_RAM_GB + 0.7)).abs() < 1e-9);
    }

    #[test]
    fn reset_leaves_only_system_entry() {
        let mut ram = Ram::default();
        let mut rng = FixedRng::default();
        ram.charge_app(Screen::WhatsApp, &mut rng);
        ram.reset();
        assert_eq!(ram.per_app().len(), 1);
        assert_eq!(ram.per_app().get(SYSTEM_KEY), Some(&SYSTEM_RAM_GB));
    }

    #[test]
    fn cleanup_keeps_internal_above_system_footprint() {
        let mut st = Storage::default();
        for _ in 0..20 {
            st.clean();
        }
        assert!(st.internal.used_gb >= st.internal.system_gb);
        assert_eq!(st.internal.used_gb, st.internal.system_gb + 2.0);
        assert_eq!(st.external.used_gb, 2.0);
    }

    #[test]
    fn cleanup_skips_missing_sd_card() {
        let mut st = Storage::default();
        st.external.installed = false;
        let before = st.external.used_gb;
        st.clean();
        assert_eq!(st.external.used_gb, before);
    }
}

use std::process::{Command, Stdio};

use tracing::debug;

use crate::common::constants::SHUTTER_SOUND;
use crate::core::now_ms;

#[derive(Debug, Clone, Copy)]
pub struct Photo {
    pub id: u32,
    pub at_ms: u64,
    pub flash: bool,
    pub front: bool,
}

/// The Camera app: flash and lens toggles plus a photo roll. The shutter
/// sound is a fire-and-forget side effect handled separately so state
/// mutation stays silent and testable.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub flash: bool,
    pub front: bool,
    photos: Vec<Photo>,
    next_id: u32,
}

impl Camera {
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn toggle_flash(&mut self) -> bool {
        self.flash = !self.flash;
        self.flash
    }

    pub fn flip(&mut self) -> bool {
        self.front = !self.front;
        self.front
    }

    pub fn take_photo(&mut self) -> Photo {
        self.next_id += 1;
        let photo = Photo {
            id: self.next_id,
            at_ms: now_ms(),
            flash: self.flash,
            front: self.front,
        };
        self.photos.push(photo);
        photo
    }
}

/// Best-effort shutter sound. Failure to spawn a player is swallowed;
/// the photo is taken either way.
pub fn play_shutter_sound() {
    let spawned = Command::new("paplay")
        .arg(SHUTTER_SOUND)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = spawned {
        debug!(target: "movil::state", "Shutter sound unavailable: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_captures_current_toggles() {
        let mut cam = Camera::default();
        cam.toggle_flash();
        cam.flip();
        let p = cam.take_photo();
        assert!(p.flash);
        assert!(p.front);
        assert_eq!(cam.photos().len(), 1);
    }

    #[test]
    fn toggles_flip_back() {
        let mut cam = Camera::default();
        assert!(cam.toggle_flash());
        assert!(!cam.toggle_flash());
        assert!(cam.flip());
        assert!(!cam.flip());
    }

    #[test]
    fn photo_ids_are_sequential() {
        let mut cam = Camera::default();
        let a = cam.take_photo();
        let b = cam.take_photo();
        assert_eq!((a.id, b.id), (1, 2));
    }
}

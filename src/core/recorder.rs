use crate::core::now_ms;

#[derive(Debug, Clone, Copy)]
pub struct Recording {
    pub id: u32,
    pub duration_secs: u32,
    pub at_ms: u64,
}

/// The Microphone app: a simulated voice recorder. While recording, a
/// 1 s sensor tick advances the elapsed counter; stopping files the take.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    recording: bool,
    elapsed_secs: u32,
    recordings: Vec<Recording>,
    next_id: u32,
}

impl Recorder {
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    pub fn start(&mut self) -> bool {
        if self.recording {
            return false;
        }
        self.recording = true;
        self.elapsed_secs = 0;
        true
    }

    /// Stops and files the current take; zero-length takes are dropped.
    pub fn stop(&mut self) -> Option<Recording> {
        if !self.recording {
            return None;
        }
        self.recording = false;
        if self.elapsed_secs == 0 {
            return None;
        }
        self.next_id += 1;
        let rec = Recording {
            id: self.next_id,
            duration_secs: self.elapsed_secs,
            at_ms: now_ms(),
        };
        self.elapsed_secs = 0;
        self.recordings.push(rec);
        Some(rec)
    }

    /// One elapsed second of recording.
    pub fn tick(&mut self) {
        if self.recording {
            self.elapsed_secs += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_elapsed_seconds() {
        let mut rec = Recorder::default();
        assert!(rec.start());
        rec.tick();
        rec.tick();
        rec.tick();
        let filed = rec.stop().unwrap();
        assert_eq!(filed.duration_secs, 3);
        assert_eq!(rec.recordings().len(), 1);
    }

    #[test]
    fn double_start_is_refused() {
        let mut rec = Recorder::default();
        assert!(rec.start());
        assert!(!rec.start());
    }

    #[test]
    fn zero_length_take_is_dropped() {
        let mut rec = Recorder::default();
        rec.start();
        assert!(rec.stop().is_none());
        assert!(rec.recordings().is_empty());
    }

    #[test]
    fn tick_noop_while_idle() {
        let mut rec = Recorder::default();
        rec.tick();
        assert_eq!(rec.elapsed_secs(), 0);
    }

    #[test]
    fn ids_are_sequential() {
        let mut rec = Recorder::default();
        for _ in 0..3 {
            rec.start();
            rec.tick();
            rec.stop();
        }
        let ids: Vec<u32> = rec.recordings().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

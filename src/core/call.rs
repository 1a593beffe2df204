use crate::common::constants::BALANCE_NUMBER;
use crate::core::rng::DeviceRng;

/// Result of placing an outgoing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialOutcome {
    /// Ordinary call, stays up until ended.
    Connected,
    /// The reserved balance number: rings briefly, then the daemon ends
    /// the call and opens Messages with the balance reply.
    BalanceInquiry,
    /// Empty number, nothing dialed.
    Rejected,
}

/// `generation` bumps on every placed or received call. A timer
/// scheduled against one call must not act on a later one; see the
/// volume indicator's auto-hide for the same guard.
#[derive(Debug, Clone, Default)]
pub struct Call {
    pub in_progress: bool,
    pub number: String,
    generation: u64,
}

impl Call {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dial(&mut self, number: &str) -> DialOutcome {
        let number = number.trim();
        if number.is_empty() {
            return DialOutcome::Rejected;
        }
        self.number = number.to_string();
        self.in_progress = true;
        self.generation += 1;
        if number == BALANCE_NUMBER {
            DialOutcome::BalanceInquiry
        } else {
            DialOutcome::Connected
        }
    }

    /// Rings in with a synthesized 9-digit caller.
    pub fn incoming(&mut self, rng: &mut dyn DeviceRng) -> String {
        self.number = rng.phone_number();
        self.in_progress = true;
        self.generation += 1;
        self.number.clone()
    }

    pub fn end(&mut self) {
        self.in_progress = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::fixed::FixedRng;

    #[test]
    fn dial_rejects_empty_number() {
        let mut call = Call::default();
        assert_eq!(call.dial("   "), DialOutcome::Rejected);
        assert!(!call.in_progress);
    }

    #[test]
    fn dial_balance_number_is_distinguished() {
        let mut call = Call::default();
        assert_eq!(call.dial("123"), DialOutcome::BalanceInquiry);
        assert!(call.in_progress);
        assert_eq!(call.number, "123");
    }

    #[test]
    fn ordinary_call_stays_up_until_ended() {
        let mut call = Call::default();
        assert_eq!(call.dial("04125550198"), DialOutcome::Connected);
        assert!(call.in_progress);
        call.end();
        assert!(!call.in_progress);
    }

    #[test]
    fn each_call_gets_a_new_generation() {
        let mut call = Call::default();
        call.dial("123");
        let first = call.generation();
        call.end();
        call.dial("5551234");
        assert_ne!(call.generation(), first);
    }

    #[test]
    fn incoming_uses_generated_number() {
        let mut call = Call::default();
        let mut rng = FixedRng::default();
        let n = call.incoming(&mut rng);
        assert_eq!(n, "412555019");
        assert!(call.in_progress);
    }
}

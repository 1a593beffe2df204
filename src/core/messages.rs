use regex::Regex;

use crate::core::now_ms;

pub const SYSTEM_SENDER: &str = "Sistema";

const WELCOME: &str = "Bienvenido a la app de mensajes. Marca al 123 para consultar tu \
saldo o envia 'recarga saldo Xbs' para recargar.";

#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub sender: String,
    pub body: String,
    pub at_ms: u64,
    pub is_system: bool,
}

/// The Messages app inbox: a system-sender message log fed by the
/// balance-inquiry flow and by recharge confirmations.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    messages: Vec<Message>,
    next_id: u64,
}

impl Inbox {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push_system(&mut self, body: String) {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            sender: SYSTEM_SENDER.to_string(),
            body,
            at_ms: now_ms(),
            is_system: true,
        });
    }

    /// Delivered once per boot.
    pub fn push_welcome(&mut self) {
        if self.messages.is_empty() {
            self.push_system(WELCOME.to_string());
        }
    }

    /// Reply of the 123 balance-inquiry flow.
    pub fn push_balance(&mut self, balance: f64) {
        self.push_system(format!("Tu saldo actual es: {:.2} Bs.", balance));
    }

    pub fn push_recharge_confirmation(&mut self, amount: f64, new_balance: f64) {
        self.push_system(format!(
            "Se ha recargado {:.2} Bs a tu saldo. Tu nuevo saldo es: {:.2} Bs.",
            amount, new_balance
        ));
    }
}

/// Recognizes the "recarga saldo <n>bs" SMS, returning the amount.
pub fn parse_recharge(text: &str) -> Option<f64> {
    let re = Regex::new(r"(?i)recarga saldo (\d+(?:\.\d+)?)\s*bs").ok()?;
    let caps = re.captures(text)?;
    caps[1].parse::<f64>().ok().filter(|a| *a > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_is_delivered_once() {
        let mut inbox = Inbox::default();
        inbox.push_welcome();
        inbox.push_welcome();
        assert_eq!(inbox.messages().len(), 1);
        assert!(inbox.messages()[0].is_system);
    }

    #[test]
    fn balance_message_formats_two_decimals() {
        let mut inbox = Inbox::default();
        inbox.push_balance(100.0);
        assert!(inbox.messages()[0].body.contains("100.00 Bs"));
    }

    #[test]
    fn recharge_sms_is_recognized() {
        assert_eq!(parse_recharge("recarga saldo 50bs"), Some(50.0));
        assert_eq!(parse_recharge("RECARGA SALDO 20 Bs"), Some(20.0));
        assert_eq!(parse_recharge("recarga saldo 12.5bs"), Some(12.5));
    }

    #[test]
    fn unrelated_sms_is_ignored() {
        assert_eq!(parse_recharge("hola"), None);
        assert_eq!(parse_recharge("recarga saldo bs"), None);
        assert_eq!(parse_recharge("recarga saldo 0bs"), None);
    }

    #[test]
    fn message_ids_are_monotonic() {
        let mut inbox = Inbox::default();
        inbox.push_welcome();
        inbox.push_balance(1.0);
        inbox.push_recharge_confirmation(5.0, 6.0);
        let ids: Vec<u64> = inbox.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

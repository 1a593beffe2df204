use crate::core::now_ms;

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub body: String,
    pub from_user: bool,
    pub at_ms: u64,
}

/// Outcome of trying to send a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Message queued; the bot answers after a short delay.
    Sent { bot_reply: String },
    /// No credit left; a notice from the bot lands instead.
    NoCredit,
    /// Blank input, ignored.
    Empty,
}

const GREETING_REPLY: &str = "Hola! Como estas hoy?";
const GOODBYE_REPLY: &str = "Hasta luego! Ha sido un placer charlar contigo.";
const THANKS_REPLY: &str = "De nada! Estoy aqui para ayudarte.";
const FALLBACK_REPLY: &str = "Entiendo. Hay algo mas en lo que pueda ayudarte?";
const NO_CREDIT_REPLY: &str =
    "No tienes saldo suficiente para enviar mensajes. Recarga saldo marcando al 123.";

const ASSISTANT_HELLO: &str = "Hola! Soy el asistente. En que puedo ayudarte hoy?";

/// The WhatsApp-like chat: a local log against a canned keyword bot.
/// Sending requires positive credit.
#[derive(Debug, Clone)]
pub struct Chat {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Chat {
    pub fn new() -> Self {
        let mut chat = Self {
            messages: Vec::new(),
            next_id: 0,
        };
        chat.push(ASSISTANT_HELLO.to_string(), false);
        chat
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, body: String, from_user: bool) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            body,
            from_user,
            at_ms: now_ms(),
        });
    }

    /// Appends the user message and decides the bot's answer. The caller
    /// delivers the reply via [`Chat::push_bot_reply`], typically after a
    /// simulated typing delay.
    pub fn send(&mut self, text: &str, credit_balance: f64) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }
        if credit_balance <= 0.0 {
            self.push(NO_CREDIT_REPLY.to_string(), false);
            return SendOutcome::NoCredit;
        }
        let reply = bot_reply(text);
        self.push(text.to_string(), true);
        SendOutcome::Sent { bot_reply: reply }
    }

    pub fn push_bot_reply(&mut self, reply: String) {
        self.push(reply, false);
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

fn bot_reply(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("hola") || lower.contains("saludos") {
        GREETING_REPLY.to_string()
    } else if lower.contains("adios") || lower.contains("chao") {
        GOODBYE_REPLY.to_string()
    } else if lower.contains("gracias") {
        THANKS_REPLY.to_string()
    } else if lower.contains("hora") {
        format!("Son las {} (hora del sistema).", formatted_clock())
    } else {
        FALLBACK_REPLY.to_string()
    }
}

fn formatted_clock() -> String {
    let now = time::OffsetDateTime::now_utc();
    format!("{:02}:{:02}", now.hour(), now.minute())
}

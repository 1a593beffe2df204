use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "movilctl")]
#[command(version, about = "Control CLI for the movil phone simulator daemon")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(short, long, global = true)]
    pub socket: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the simulated device status
    Status,
    Ping,

    /// Press the power button
    PowerOn,
    PowerOff,
    Restart,

    /// Open an app screen
    Open {
        #[arg(value_enum)]
        screen: ScreenName,
    },
    /// Close an app from the task switcher
    Close {
        #[arg(value_enum)]
        screen: ScreenName,
    },
    /// List recent apps, most recent first
    Recents,

    /// Place a call (dial 123 for the balance inquiry)
    Dial {
        number: String,
    },
    EndCall,

    /// Plug or unplug the charger
    Charger {
        #[arg(value_enum)]
        state: Switch,
    },
    SetBattery {
        percent: f64,
    },

    /// Top up the prepaid balance
    Recharge {
        amount: f64,
    },
    /// Request the balance SMS
    Balance,

    SetCarrier {
        #[arg(value_enum)]
        carrier: CarrierName,
    },
    SetSignal {
        bars: u8,
    },
    /// Toggle wifi on/off
    Wifi,
    SetWifiBars {
        bars: u8,
    },

    /// Press a volume rocker button
    Volume {
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Send an SMS to the system number ("recarga saldo 50bs" tops up)
    Sms {
        text: Vec<String>,
    },
    Inbox,

    /// Message the chat assistant
    Chat {
        text: Vec<String>,
    },
    ChatLog,

    Record {
        #[arg(value_enum)]
        action: RecordAction,
    },
    Recordings,

    /// Take a photo
    Snap,
    Flash,
    Flip,
    Photos,

    /// Run the simulated storage cleanup
    Clean,

    SetLog {
        #[arg(value_enum)]
        level: LogLevel,
    },
}

#[derive(Clone, ValueEnum)]
pub enum ScreenName {
    Home,
    Phone,
    Microphone,
    Camera,
    Battery,
    Connectivity,
    Memory,
    Whatsapp,
    Messages,
}

impl ScreenName {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Phone => "PHONE",
            Self::Microphone => "MICROPHONE",
            Self::Camera => "CAMERA",
            Self::Battery => "BATTERY",
            Self::Connectivity => "CONNECTIVITY",
            Self::Memory => "MEMORY",
            Self::Whatsapp => "WHATSAPP",
            Self::Messages => "MESSAGES",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum CarrierName {
    Movistar,
    Digitel,
    Movilnet,
}

impl CarrierName {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Movistar => "MOVISTAR",
            Self::Digitel => "DIGITEL",
            Self::Movilnet => "MOVILNET",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum RecordAction {
    Start,
    Stop,
}

impl RecordAction {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_upper_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

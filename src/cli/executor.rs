use anyhow::bail;

use super::{app::*, client::IpcClient, output};
use crate::common::SOCKET_PATH;
use crate::Result;

pub async fn execute(cli: Cli) -> Result<()> {
    let socket = cli.socket.as_deref().unwrap_or(SOCKET_PATH);
    let client = IpcClient::with_path(socket);

    if !matches!(cli.command, Commands::Status) && !client.is_alive().await {
        bail!("Daemon is not running");
    }

    match cli.command {
        Commands::Status => {
            if !client.is_alive().await {
                output::print_daemon_stopped();
                return Ok(());
            }
            let resp = client.send("STATUS").await?;
            output::print_status(&resp);
        }

        Commands::Ping => {
            if client.ping().await? {
                output::print_success("Daemon is alive (PONG)");
            } else {
                output::print_error("Daemon not responding");
            }
        }

        Commands::PowerOn => {
            let resp = client.send("POWER_ON").await?;
            output::print_success(&resp);
        }
        Commands::PowerOff => {
            let resp = client.send("POWER_OFF").await?;
            output::print_success(&resp);
        }
        Commands::Restart => {
            let resp = client.send("RESTART").await?;
            output::print_success(&resp);
        }

        Commands::Open { screen } => {
            let resp = client.send(&format!("OPEN {}", screen.to_upper_str())).await?;
            output::print_success(&resp);
        }
        Commands::Close { screen } => {
            let resp = client.send(&format!("CLOSE {}", screen.to_upper_str())).await?;
            output::print_success(&resp);
        }
        Commands::Recents => {
            let resp = client.send("RECENTS").await?;
            println!("Recent apps:\n{}", resp);
        }

        Commands::Dial { number } => {
            let resp = client.send(&format!("DIAL {}", number)).await?;
            output::print_success(&resp);
        }
        Commands::EndCall => {
            let resp = client.send("END_CALL").await?;
            output::print_success(&resp);
        }

        Commands::Charger { state } => {
            let resp = client.send(&format!("CHARGER {}", state.to_upper_str())).await?;
            output::print_success(&resp);
        }
        Commands::SetBattery { percent } => {
            let resp = client.send(&format!("SET_BATTERY {}", percent)).await?;
            output::print_success(&resp);
        }

        Commands::Recharge { amount } => {
            let resp = client.send(&format!("RECHARGE {}", amount)).await?;
            output::print_success(&resp);
        }
        Commands::Balance => {
            let resp = client.send("BALANCE").await?;
            println!("{}", resp);
        }

        Commands::SetCarrier { carrier } => {
            let resp = client
                .send(&format!("SET_CARRIER {}", carrier.to_upper_str()))
                .await?;
            output::print_success(&resp);
        }
        Commands::SetSignal { bars } => {
            let resp = client.send(&format!("SET_SIGNAL {}", bars)).await?;
            output::print_success(&resp);
        }
        Commands::Wifi => {
            let resp = client.send("WIFI").await?;
            output::print_success(&resp);
        }
        Commands::SetWifiBars { bars } => {
            let resp = client.send(&format!("SET_WIFI_BARS {}", bars)).await?;
            output::print_success(&resp);
        }

        Commands::Volume { direction } => {
            let resp = client
                .send(&format!("VOLUME {}", direction.to_upper_str()))
                .await?;
            output::print_success(&resp);
        }

        Commands::Sms { text } => {
            let resp = client.send(&format!("SMS {}", text.join(" "))).await?;
            output::print_success(&resp);
        }
        Commands::Inbox => {
            let resp = client.send("INBOX").await?;
            println!("Messages:\n{}", resp);
        }

        Commands::Chat { text } => {
            let resp = client.send(&format!("CHAT {}", text.join(" "))).await?;
            output::print_success(&resp);
        }
        Commands::ChatLog => {
            let resp = client.send("CHATLOG").await?;
            println!("Chat:\n{}", resp);
        }

        Commands::Record { action } => {
            let resp = client.send(&format!("RECORD {}", action.to_upper_str())).await?;
            output::print_success(&resp);
        }
        Commands::Recordings => {
            let resp = client.send("RECORDINGS").await?;
            println!("Recordings:\n{}", resp);
        }

        Commands::Snap => {
            let resp = client.send("SNAP").await?;
            output::print_success(&resp);
        }
        Commands::Flash => {
            let resp = client.send("FLASH").await?;
            output::print_success(&resp);
        }
        Commands::Flip => {
            let resp = client.send("FLIP").await?;
            output::print_success(&resp);
        }
        Commands::Photos => {
            let resp = client.send("PHOTOS").await?;
            println!("Photos:\n{}", resp);
        }

        Commands::Clean => {
            let resp = client.send("CLEAN").await?;
            output::print_success(&resp);
        }

        Commands::SetLog { level } => {
            let resp = client.send(&format!("SET_LOG {}", level.to_upper_str())).await?;
            output::print_success(&format!("Log level set: {}", resp));
        }
    }

    Ok(())
}

pub fn print_status(response: &str) {
    print!("{}", render_status(response));
}

fn render_status(response: &str) -> String {
    let mut out = String::from("        Movil Device Status        \n");

    if response.is_empty() {
        out.push_str("No response from daemon\n");
        return out;
    }

    out.push_str("Daemon: Running\n\n");
    for line in response.lines() {
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            match key {
                "POWER" => {
                    let icon = if value == "on" { "✓" } else { "✗" };
                    out.push_str(&format!("  {} Power:     {}\n", icon, value));
                }
                "SCREEN" => {
                    out.push_str(&format!("    Screen:    {}\n", value));
                }
                "BATTERY" => {
                    out.push_str(&format!("    Battery:   {}%\n", value));
                }
                "CHARGING" => {
                    if value == "true" {
                        out.push_str("    Charging:  yes\n");
                    }
                }
                "CARRIER" => {
                    out.push_str(&format!("    Carrier:   {}\n", value));
                }
                "SIGNAL" => {
                    out.push_str(&format!("    Signal:    {}/4 bars\n", value));
                }
                "WIFI" => {
                    let icon = if value == "on" { "✓" } else { "✗" };
                    out.push_str(&format!("  {} Wifi:      {}\n", icon, value));
                }
                "WIFI_BARS" => {
                    out.push_str(&format!("    Wifi bars: {}/3\n", value));
                }
                "VOLUME" => {
                    out.push_str(&format!("    Volume:    {}/10\n", value));
                }
                "BALANCE" => {
                    out.push_str(&format!("    Balance:   {} Bs\n", value));
                }
                "RAM_USED" => {
                    out.push_str(&format!("    RAM used:  {} GB\n", value));
                }
                "RAM_TOTAL" => {
                    out.push_str(&format!("    RAM total: {} GB\n", value));
                }
                "CALL" => {
                    if value != "none" {
                        out.push_str(&format!("    In call:   {}\n", value));
                    }
                }
                "RECORDING" => {
                    if value == "true" {
                        out.push_str("    Recording: yes\n");
                    }
                }
                "LOG_LEVEL" => {
                    out.push_str(&format!("    Log level: {}\n", value));
                }
                _ => {}
            }
        }
    }

    out.push('\n');
    out
}

pub fn print_daemon_stopped() {
    println!("        Movil Device Status        ");
    println!(" Daemon: Not running\n");
}

pub fn print_success(message: &str) {
    println!(" {}", message);
}

pub fn print_error(message: &str) {
    eprintln!(" Error: {}", message);
}

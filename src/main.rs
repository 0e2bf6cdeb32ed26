use std::process;

use ftp_session_client::terminal::Terminal;
use ftp_session_client::{ClientConfig, FtpSession};

fn main() {
    // Initialize logging
    env_logger::init();

    // Defaults, then ftp-client.toml, then FTP_CLIENT_* environment variables
    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let session = match FtpSession::connect_with_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", config.display_name(), e);
            process::exit(1);
        }
    };

    let mut terminal = Terminal::new(session, config);
    if let Err(e) = terminal.run_interactive() {
        eprintln!("Terminal error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    println!("FTP Session Client");
    println!("Configuration file (optional): $FTP_CLIENT_CONFIG or ./ftp-client.toml");
    println!("Environment Variables:");
    println!("  FTP_CLIENT_SERVER__HOST=127.0.0.1");
    println!("  FTP_CLIENT_SERVER__HOST_NAME=\"Comp Lab 2\"");
    println!("  FTP_CLIENT_SERVER__PORT=21");
    println!("  FTP_CLIENT_SERVER__CONNECT_TIMEOUT=5");
    println!("  FTP_CLIENT_CLIENT__USER=anonymous");
    println!("  FTP_CLIENT_CLIENT__PASSWORD=secret");
    println!("  RUST_LOG=info");
}

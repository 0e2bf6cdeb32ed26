//! Interactive terminal session
//!
//! Reads commands from stdin and drives an [`FtpSession`].

use log::{debug, error, info};
use std::io::{self, BufRead, Write};

use crate::client::FtpSession;
use crate::commands::{UserInput, get_help_text, parse_input};
use crate::config::ClientConfig;
use crate::error::Result;

/// Terminal handler for interactive FTP sessions
pub struct Terminal {
    session: FtpSession,
    config: ClientConfig,
}

impl Terminal {
    /// Create a new terminal around a connected session
    pub fn new(session: FtpSession, config: ClientConfig) -> Self {
        info!(
            "Creating terminal session for server: {}",
            config.display_name()
        );

        Self { session, config }
    }

    /// Run the interactive session until QUIT, end of input or a fatal error
    pub fn run_interactive(&mut self) -> Result<()> {
        println!("FTP Session Client - Interactive Session");
        println!("Connected to: {}", self.config.display_name());
        println!("{}", self.session.greeting());

        if let Some((user, password)) = self.config.credentials() {
            let user = user.to_string();
            let password = password.to_string();
            match self.session.login(&user, &password) {
                Ok(()) => println!("Logged in as {}", user),
                Err(e) => println!("Login failed: {}", e),
            }
        }

        println!("Type 'HELP' for available commands or 'QUIT' to exit");
        println!();

        let stdin = io::stdin();
        let mut lines = stdin.lock();
        loop {
            print!("ftp ({})> ", self.session.state());
            io::stdout().flush()?;

            let mut input = String::new();
            if lines.read_line(&mut input)? == 0 {
                break;
            }
            if input.trim().is_empty() {
                continue;
            }

            debug!("User entered command: {}", input.trim());
            match self.handle_input(parse_input(&input)) {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) if e.is_fatal() => {
                    error!("Session lost: {}", e);
                    println!("Error: {}", e);
                    return Err(e);
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        // End of input: leave politely, but always drop the channel
        if self.session.is_connected() {
            if let Err(e) = self.session.quit() {
                debug!("QUIT at end of input failed: {}", e);
            }
            self.session.disconnect()?;
        }
        Ok(())
    }

    /// Run one parsed command; returns false when the session should end
    fn handle_input(&mut self, input: UserInput) -> Result<bool> {
        match input {
            UserInput::Login { user, password } => {
                self.session.login(&user, &password)?;
                println!("Logged in as {} (binary mode)", user);
            }
            UserInput::List => {
                let listing = self.session.list_text()?;
                if listing.trim().is_empty() {
                    println!("Directory is empty.");
                } else {
                    print!("{}", listing);
                    if !listing.ends_with('\n') {
                        println!();
                    }
                }
            }
            UserInput::Cwd(dir) => {
                self.session.change_dir(&dir)?;
                println!("Directory changed to {}", dir);
            }
            UserInput::Mkd(dir) => {
                self.session.make_dir(&dir)?;
                println!("Created {}", dir);
            }
            UserInput::Rmd(dir) => {
                self.session.remove_dir(&dir)?;
                println!("Removed {}", dir);
            }
            UserInput::Pwd => println!("{}", self.session.pwd()?),
            UserInput::Rename { from, to } => {
                self.session.rename(&from, &to)?;
                println!("Renamed {} to {}", from, to);
            }
            UserInput::Delete(name) => {
                self.session.delete(&name)?;
                println!("Deleted {}", name);
            }
            UserInput::Binary => {
                self.session.set_binary_type()?;
                println!("Binary mode set");
            }
            UserInput::Help => println!("{}", get_help_text()),
            UserInput::Quit => {
                println!("Disconnecting from server...");
                let result = self.session.quit();
                // Drop the channel even when the server did not answer 221
                self.session.disconnect()?;
                result?;
                return Ok(false);
            }
            UserInput::Invalid(msg) => println!("Error: {}", msg),
        }
        Ok(true)
    }
}

//! Terminal input parsing

/// A line typed at the interactive prompt
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Login { user: String, password: String },
    List,
    Cwd(String),
    Mkd(String),
    Rmd(String),
    Pwd,
    Rename { from: String, to: String },
    Delete(String),
    Binary,
    Help,
    Quit,
    /// Unknown command or missing arguments, with a message for the user
    Invalid(String),
}

/// Parse user input into a terminal command
pub fn parse_input(input: &str) -> UserInput {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return UserInput::Invalid("Empty command".to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "LOGIN" | "USER" => match split_pair(arg) {
            Some((user, password)) => UserInput::Login {
                user: user.to_string(),
                password: password.to_string(),
            },
            None => UserInput::Invalid(format!("{cmd} requires <user> <password>")),
        },
        "LIST" | "LS" | "DIR" => UserInput::List,
        "CWD" | "CD" => require_arg(arg, "CWD requires directory", UserInput::Cwd),
        "MKD" | "MKDIR" => require_arg(arg, "MKD requires directory name", UserInput::Mkd),
        "RMD" | "RMDIR" => require_arg(arg, "RMD requires directory name", UserInput::Rmd),
        "PWD" => UserInput::Pwd,
        "RENAME" | "MV" => match split_pair(arg) {
            Some((from, to)) => UserInput::Rename {
                from: from.to_string(),
                to: to.to_string(),
            },
            None => UserInput::Invalid("RENAME requires <from> <to>".to_string()),
        },
        "DELE" | "DEL" | "RM" => require_arg(arg, "DELE requires filename", UserInput::Delete),
        "BINARY" | "TYPE" => UserInput::Binary,
        "HELP" | "?" => UserInput::Help,
        "QUIT" | "EXIT" | "BYE" => UserInput::Quit,
        _ => UserInput::Invalid(format!("Unknown command: {cmd}")),
    }
}

fn require_arg(arg: &str, missing: &str, build: fn(String) -> UserInput) -> UserInput {
    if arg.is_empty() {
        UserInput::Invalid(missing.to_string())
    } else {
        build(arg.to_string())
    }
}

/// Split "a b" into exactly two whitespace-separated words
fn split_pair(arg: &str) -> Option<(&str, &str)> {
    let mut words = arg.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}

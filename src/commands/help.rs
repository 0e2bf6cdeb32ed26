//! Help text for the interactive terminal

/// Returns the help text for all terminal commands
pub fn get_help_text() -> &'static str {
    "Available commands:
  LOGIN <user> <password>  - Authenticate (switches to binary mode)
  LIST                     - List directory contents (passive mode)
  PWD                      - Print working directory
  CWD <directory>          - Change working directory
  MKD <directory>          - Create directory on server
  RMD <directory>          - Remove directory on server
  RENAME <from> <to>       - Rename file on server
  DELE <filename>          - Delete file on server
  BINARY                   - Set binary transfer type
  HELP                     - Show this help message
  QUIT                     - Log out and exit"
}

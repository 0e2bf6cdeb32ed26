//! Scripted FTP server for integration tests

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Server side of one control connection
pub struct ServerConn {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl ServerConn {
    fn new(stream: TcpStream) -> Self {
        stream.set_read_timeout(Some(IO_TIMEOUT)).unwrap();
        let writer = stream.try_clone().unwrap();
        Self {
            reader: BufReader::new(stream),
            writer,
        }
    }

    /// Send one reply line (CRLF appended)
    pub fn reply(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .unwrap();
        self.writer.flush().unwrap();
    }

    /// Send raw bytes as-is
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).unwrap();
        self.writer.flush().unwrap();
    }

    /// Read one command line from the client, without terminator
    pub fn read_command(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).unwrap();
        line.trim_end_matches(['\r', '\n']).to_string()
    }

    /// Read one command and assert it equals `expected`
    pub fn expect(&mut self, expected: &str) {
        assert_eq!(self.read_command(), expected);
    }

    /// Block until the client closes the control connection; returns true on EOF
    pub fn wait_for_close(&mut self) -> bool {
        let mut rest = Vec::new();
        matches!(self.reader.read_to_end(&mut rest), Ok(_))
    }

    /// Standard greeting + USER/PASS/TYPE I exchange
    pub fn accept_login(&mut self, user: &str, password: &str) {
        self.expect(&format!("USER {}", user));
        self.reply("331 Please specify the password.");
        self.expect(&format!("PASS {}", password));
        self.reply("230 Login successful.");
        self.expect("TYPE I");
        self.reply("200 Switching to Binary mode.");
    }

    /// Open a passive listener and announce it in a 227 reply
    pub fn announce_passive(&mut self) -> TcpListener {
        self.expect("PASV");
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        self.reply(&format!(
            "227 Entering Passive Mode (127,0,0,1,{},{}).",
            port >> 8,
            port & 0xff
        ));
        listener
    }
}

/// Accept the data connection with a read timeout set
pub fn accept_data(listener: &TcpListener) -> TcpStream {
    let (stream, _) = listener.accept().unwrap();
    stream.set_read_timeout(Some(IO_TIMEOUT)).unwrap();
    stream
}

/// Whether the client has closed its end of a data connection
pub fn client_closed(stream: &mut TcpStream) -> bool {
    let mut buf = [0u8; 16];
    matches!(stream.read(&mut buf), Ok(0))
}

/// Mock server running a script against the first client that connects
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Start a server that sends `220` and then runs `script`
    pub fn start<F>(script: F) -> Self
    where
        F: FnOnce(&mut ServerConn) + Send + 'static,
    {
        Self::start_raw(|conn| {
            conn.reply("220 (mockFTPd 1.0)");
            script(conn);
        })
    }

    /// Start a server that runs `script` with no greeting sent
    pub fn start_raw<F>(script: F) -> Self
    where
        F: FnOnce(&mut ServerConn) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut conn = ServerConn::new(stream);
            script(&mut conn);
        });
        Self { addr, handle }
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the script to finish, propagating its assertion failures
    pub fn finish(self) {
        if let Err(panic) = self.handle.join() {
            std::panic::resume_unwind(panic);
        }
    }
}

#[cfg(unix)]
extern crate syslog;

use std::fmt::{Debug, Error, Formatter};
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{stderr, stdout, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

#[cfg(unix)]
type SyslogWriter = syslog::Logger<syslog::LoggerBackend, syslog::Formatter3164>;
#[cfg(not(unix))]
type SyslogWriter = ();

/// Macro to log a message. Uses the `format!` syntax.
/// See `std::fmt` for more information.
///
/// # Examples
///
/// ```
/// # #[macro_use(log)]
/// # extern crate logger;
/// # use logger::{Logger, Level};
/// #
/// # fn main() {
/// # let logger = Logger::new(Level::Warning);
/// log!(logger, Debug, "hello {}", "world");
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger: expr, $level: ident, $($arg:tt)*) => ({
        $logger.log($crate::Level::$level, format!($($arg)*))
    })
}

enum Output {
    /// Sends logs to a channel
    Channel(Sender<Vec<u8>>),
    /// Writes to the standard output
    Stdout,
    /// Writes to the standard error
    Stderr,
    /// Writes to a `File` in `String` path
    File(File, String),
}

impl Debug for Output {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), Error> {
        match *self {
            Output::Channel(_) => fmt.write_str("Channel"),
            Output::Stderr => fmt.write_str("Stderr"),
            Output::Stdout => fmt.write_str("Stdout"),
            Output::File(_, ref filename) => write!(fmt, "File: {}", filename),
        }
    }
}

impl Write for Output {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match *self {
            Output::Channel(ref v) => match v.send(data.to_vec()) {
                Ok(_) => Ok(data.len()),
                Err(_) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "log receiver dropped")),
            },
            Output::Stderr => stderr().write(data),
            Output::Stdout => stdout().write(data),
            Output::File(ref mut v, _) => v.write(data),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match *self {
            Output::Channel(_) => Ok(()),
            Output::Stderr => stderr().flush(),
            Output::Stdout => stdout().flush(),
            Output::File(ref mut v, _) => v.flush(),
        }
    }
}

/// A level that identifies a log message.
/// A lower level includes all higher levels.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Level {
    Debug,
    Verbose,
    Notice,
    Warning,
}

impl Level {
    /// Whether the level is equal or lower than another level.
    /// For example, `Debug` includes all other levels, while `Warning` only
    /// includes itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logger::Level;
    /// #
    /// assert!(Level::Debug.contains(&Level::Debug));
    /// assert!(!Level::Warning.contains(&Level::Debug));
    /// assert!(Level::Debug.contains(&Level::Warning));
    /// ```
    pub fn contains(&self, other: &Level) -> bool {
        match *self {
            Level::Debug => true,
            Level::Verbose => *other != Level::Debug,
            Level::Notice => *other == Level::Notice || *other == Level::Warning,
            Level::Warning => *other == Level::Warning,
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Level, ()> {
        match &*s.to_ascii_lowercase() {
            "debug" => Ok(Level::Debug),
            "verbose" => Ok(Level::Verbose),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            _ => Err(()),
        }
    }
}

/// Instructions for the writer thread.
enum Message {
    Log(Level, String),
    SetLevel(Level),
    SetOutput(Output),
    SetSyslog(Option<SyslogWriter>),
}

#[cfg(unix)]
fn send_syslog(writer: &mut SyslogWriter, level: Level, msg: &str) -> Result<(), String> {
    let res = match level {
        Level::Debug => writer.debug(msg),
        Level::Verbose => writer.info(msg),
        Level::Notice => writer.notice(msg),
        Level::Warning => writer.warning(msg),
    };
    res.map_err(|e| e.to_string())
}

#[cfg(not(unix))]
fn send_syslog(_: &mut SyslogWriter, _: Level, _: &str) -> Result<(), String> {
    Ok(())
}

fn run(rx: Receiver<Message>, mut level: Level, mut output: Output) {
    let mut syslog_writer: Option<SyslogWriter> = None;
    while let Ok(message) = rx.recv() {
        match message {
            Message::Log(lvl, msg) => {
                if !level.contains(&lvl) {
                    continue;
                }
                let line = format!("{}\n", msg);
                if let Err(e) = output.write_all(line.as_bytes()) {
                    // failing to log a message... write straight to stderr
                    let _ = writeln!(stderr(), "Failed to log {:?} {}", e, msg);
                }
                if let Some(ref mut w) = syslog_writer {
                    if let Err(e) = send_syslog(w, lvl, &msg) {
                        let _ = writeln!(stderr(), "Failed to send to syslog {} {}", e, msg);
                    }
                }
            }
            Message::SetLevel(l) => level = l,
            Message::SetOutput(o) => output = o,
            Message::SetSyslog(w) => syslog_writer = w,
        }
    }
}

/// A cheap handle to a background writer thread. Clones share the same
/// thread, level and output.
#[derive(Clone)]
pub struct Logger {
    tx: Sender<Message>,
}

impl Debug for Logger {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), Error> {
        fmt.write_str("Logger")
    }
}

impl Logger {
    /// Creates a new `Logger` for a given `Output` and severity `Level`.
    fn create(level: Level, output: Output) -> Logger {
        let (tx, rx) = channel();
        thread::spawn(move || run(rx, level, output));
        Logger { tx }
    }

    fn send(&self, message: Message) {
        // the writer thread only stops once every handle is gone
        let _ = self.tx.send(message);
    }

    /// Creates a new logger that writes in the standard output.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// #
    /// let logger = Logger::new(Level::Warning);
    /// logger.log(Level::Warning, "hello world".to_owned());
    /// ```
    pub fn new(level: Level) -> Self {
        Self::create(level, Output::Stdout)
    }

    /// Creates a new logger that writes in the standard error.
    pub fn new_err(level: Level) -> Self {
        Self::create(level, Output::Stderr)
    }

    /// Creates a new logger that sends log messages to `s`.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// # use std::sync::mpsc::channel;
    /// #
    /// let (tx, rx) = channel();
    /// let logger = Logger::channel(Level::Debug, tx);
    /// logger.log(Level::Debug, "hello world".to_owned());
    /// assert_eq!(rx.recv().unwrap(), b"hello world\n".to_vec());
    /// ```
    pub fn channel(level: Level, s: Sender<Vec<u8>>) -> Self {
        Self::create(level, Output::Channel(s))
    }

    /// Creates a new logger that writes in a file.
    pub fn file(level: Level, path: &str) -> io::Result<Self> {
        let file = File::create(Path::new(path))?;
        Ok(Self::create(level, Output::File(file, path.to_owned())))
    }

    /// Disables syslog
    pub fn disable_syslog(&mut self) {
        self.send(Message::SetSyslog(None));
    }

    /// Enables syslog, tagging every message with `ident`.
    #[cfg(unix)]
    pub fn set_syslog(&mut self, ident: &str, facility: &str) -> io::Result<()> {
        let formatter = syslog::Formatter3164 {
            facility: match &*facility.to_ascii_lowercase() {
                "local0" => syslog::Facility::LOG_LOCAL0,
                "local1" => syslog::Facility::LOG_LOCAL1,
                "local2" => syslog::Facility::LOG_LOCAL2,
                "local3" => syslog::Facility::LOG_LOCAL3,
                "local4" => syslog::Facility::LOG_LOCAL4,
                "local5" => syslog::Facility::LOG_LOCAL5,
                "local6" => syslog::Facility::LOG_LOCAL6,
                "local7" => syslog::Facility::LOG_LOCAL7,
                _ => syslog::Facility::LOG_USER,
            },
            hostname: None,
            process: ident.to_owned(),
            pid: std::process::id(),
        };
        let writer = syslog::unix(formatter)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        self.send(Message::SetSyslog(Some(writer)));
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn set_syslog(&mut self, _: &str, _: &str) -> io::Result<()> {
        Ok(())
    }

    /// Changes the output to be a file in `path`.
    pub fn set_logfile(&mut self, path: &str) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(Path::new(path))?;
        self.send(Message::SetOutput(Output::File(file, path.to_owned())));
        Ok(())
    }

    /// Sends output back to the standard output.
    pub fn set_stdout(&mut self) {
        self.send(Message::SetOutput(Output::Stdout));
    }

    /// Changes the log level.
    pub fn set_loglevel(&mut self, level: Level) {
        self.send(Message::SetLevel(level));
    }

    /// Logs a message with a log level.
    pub fn log(&self, level: Level, msg: String) {
        self.send(Message::Log(level, msg));
    }
}

extern crate logger;
extern crate util;

#[cfg(test)]
extern crate rand;

use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::path::Path;
use std::str::FromStr;

use logger::{Level, Logger};
use util::{split_args, SplitError};

pub struct Config {
    pub max_level: usize,
    pub level_probability: f64,
    pub seed: Option<u64>,
    pub loglevel: Level,
    pub logfile: Option<String>,
    pub syslog_enabled: bool,
    pub syslog_ident: String,
    pub syslog_facility: String,
    pub logger: Logger,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter,
    UnknownOption(String),
    IOError(IOError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidFormat => f.write_str("invalid format"),
            ConfigError::InvalidParameter => f.write_str("invalid parameter"),
            ConfigError::UnknownOption(ref name) => write!(f, "unknown option {:?}", name),
            ConfigError::IOError(ref e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

fn read_string(args: &[String]) -> Result<String, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(args[1].clone())
    }
}

fn read_parse<T>(args: &[String]) -> Result<T, ConfigError>
where
    T: FromStr,
{
    let s = read_string(args)?;
    match s.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter),
    }
}

fn read_bool(args: &[String]) -> Result<bool, ConfigError> {
    Ok(match &*read_string(args)? {
        "yes" => true,
        "no" => false,
        _ => return Err(ConfigError::InvalidFormat),
    })
}

impl Config {
    pub fn new(logger: Logger) -> Config {
        Config {
            max_level: 32,
            level_probability: 0.5,
            seed: None,
            loglevel: Level::Notice,
            logfile: None,
            syslog_enabled: false,
            syslog_ident: "rankedset".to_owned(),
            syslog_facility: "user".to_owned(),
            logger,
        }
    }

    pub fn parsefile(&mut self, fname: String) -> Result<(), ConfigError> {
        let path = Path::new(&*fname);
        let file = BufReader::new(File::open(&path)?);
        for line_iter in file.lines() {
            let lline = line_iter?;
            let line = lline.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let args = split_args(line)?;
            if args.is_empty() {
                continue;
            }
            match &*args[0] {
                "max-level" => {
                    let level: usize = read_parse(&args)?;
                    if level == 0 {
                        return Err(ConfigError::InvalidParameter);
                    }
                    self.max_level = level;
                }
                "level-probability" => {
                    let p: f64 = read_parse(&args)?;
                    if !(p > 0.0 && p < 1.0) {
                        return Err(ConfigError::InvalidParameter);
                    }
                    self.level_probability = p;
                }
                "seed" => self.seed = Some(read_parse(&args)?),
                "loglevel" => {
                    self.loglevel = read_parse(&args)?;
                    self.logger.set_loglevel(self.loglevel);
                }
                "logfile" => {
                    let logfile = read_string(&args)?;
                    if logfile.is_empty() {
                        self.logger.set_stdout();
                        self.logfile = None;
                    } else {
                        self.logger.set_logfile(&logfile)?;
                        self.logfile = Some(logfile);
                    }
                }
                "syslog-enabled" => {
                    self.syslog_enabled = read_bool(&args)?;
                    self.apply_syslog()?;
                }
                "syslog-ident" => {
                    self.syslog_ident = read_string(&args)?;
                    self.apply_syslog()?;
                }
                "syslog-facility" => {
                    self.syslog_facility = read_string(&args)?;
                    self.apply_syslog()?;
                }
                "include" => {
                    let included = read_string(&args)?;
                    self.parsefile(included)?;
                }
                _ => return Err(ConfigError::UnknownOption(args[0].clone())),
            };
        }

        Ok(())
    }

    fn apply_syslog(&mut self) -> Result<(), ConfigError> {
        if self.syslog_enabled {
            self.logger.set_syslog(&self.syslog_ident, &self.syslog_facility)?;
        } else {
            self.logger.disable_syslog();
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("max_level", &self.max_level)
            .field("level_probability", &self.level_probability)
            .field("seed", &self.seed)
            .field("loglevel", &self.loglevel)
            .field("logfile", &self.logfile)
            .field("syslog_enabled", &self.syslog_enabled)
            .finish()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}

impl From<SplitError> for ConfigError {
    fn from(_: SplitError) -> ConfigError {
        ConfigError::InvalidFormat
    }
}

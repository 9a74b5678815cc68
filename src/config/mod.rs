use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use log::warn;

const DEFAULT_PORT: u16 = 8080;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub port: u16,
    pub host: IpAddr,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            templates_dir: PathBuf::from("templates"),
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        }
    }

    /// Defaults overridden by `WIKI_DATA_DIR`, `WIKI_TEMPLATES_DIR`,
    /// `WIKI_HOST` and `WIKI_PORT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(dir) = lookup("WIKI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("WIKI_HOST") {
            match host.parse() {
                Ok(addr) => config.host = addr,
                Err(_) => warn!("Ignoring invalid WIKI_HOST '{}', using {}", host, config.host),
            }
        }
        if let Some(port) = lookup("WIKI_PORT") {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => warn!("Ignoring invalid WIKI_PORT '{}', using {}", port, config.port),
            }
        }
        config
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKLOG: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn matches(&self, addr: &IpAddr) -> bool {
        matches!(
            (self, addr),
            (AddressFamily::Ipv4, IpAddr::V4(_)) | (AddressFamily::Ipv6, IpAddr::V6(_))
        )
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "ipv4"),
            AddressFamily::Ipv6 => write!(f, "ipv6"),
        }
    }
}

/// Where and how the front-end socket listens.
///
/// The default is the fixed listener of the load balancer: IPv4, every local
/// interface, port 8080, a backlog of 10 pending connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub family: AddressFamily,
    pub bind_address: IpAddr,
    pub port: u16,
    pub backlog: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            family: AddressFamily::Ipv4,
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Same listener on another port. Port 0 asks the OS for an ephemeral one.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_bind_address(mut self, addr: IpAddr) -> Self {
        self.bind_address = addr;
        self
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    /// Backlog as the `c_int` that `listen(2)` takes.
    pub fn backlog_i32(&self) -> i32 {
        // validate() rejects anything above i32::MAX
        i32::try_from(self.backlog).unwrap_or(i32::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.family.matches(&self.bind_address) {
            return Err(ConfigError::FamilyMismatch {
                family: self.family,
                address: self.bind_address,
            });
        }

        if self.backlog == 0 {
            return Err(ConfigError::ZeroBacklog);
        }

        if i32::try_from(self.backlog).is_err() {
            return Err(ConfigError::BacklogTooLarge(self.backlog));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bind address {address} is not an {family} address")]
    FamilyMismatch { family: AddressFamily, address: IpAddr },

    #[error("backlog must be at least 1")]
    ZeroBacklog,

    #[error("backlog {0} exceeds the platform limit")]
    BacklogTooLarge(u32),
}

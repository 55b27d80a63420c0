// ────────────────────────────────
// src/server/bootstrap.rs
// Stands up the front-end listening socket: create → bind → listen.
// ────────────────────────────────
use crate::config::{ConfigError, ListenerConfig};
use crate::server::endpoint::ListeningEndpoint;
use crate::server::listener::{SocketProvider, StreamSocket, SystemSockets};
use socket2::Socket;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootstrapState {
    Unstarted,
    Created,
    Bound,
    Listening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Socket,
    Bind,
    Listen,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupStep::Socket => write!(f, "socket"),
            SetupStep::Bind => write!(f, "bind"),
            SetupStep::Listen => write!(f, "listen"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("invalid listener config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("socket failed: {0}")]
    SocketCreation(#[source] io::Error),

    #[error("bind failed: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("listen failed: {source}")]
    Listen {
        backlog: u32,
        #[source]
        source: io::Error,
    },
}

impl BootstrapError {
    /// The OS step that failed. `None` when the config was rejected up front.
    pub fn step(&self) -> Option<SetupStep> {
        match self {
            BootstrapError::InvalidConfig(_) => None,
            BootstrapError::SocketCreation(_) => Some(SetupStep::Socket),
            BootstrapError::Bind { .. } => Some(SetupStep::Bind),
            BootstrapError::Listen { .. } => Some(SetupStep::Listen),
        }
    }

    pub fn os_error(&self) -> Option<&io::Error> {
        match self {
            BootstrapError::InvalidConfig(_) => None,
            BootstrapError::SocketCreation(e) => Some(e),
            BootstrapError::Bind { source, .. } | BootstrapError::Listen { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Runs the three setup steps against a [`SocketProvider`].
///
/// Every step is a blocking call that finishes before the next one starts.
/// The first failure ends the run; nothing is retried and a half set-up
/// socket is dropped rather than returned.
pub struct Bootstrapper<P: SocketProvider> {
    provider: P,
    config: ListenerConfig,
    state: BootstrapState,
}

impl<P: SocketProvider> Bootstrapper<P> {
    pub fn new(provider: P, config: ListenerConfig) -> Self {
        Self {
            provider,
            config,
            state: BootstrapState::Unstarted,
        }
    }

    /// Furthest state reached so far. After a failed run this is the state
    /// the socket was in when the failing step was attempted.
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn run(&mut self) -> Result<ListeningEndpoint<P::Socket>, BootstrapError> {
        self.config.validate()?;

        let socket = self
            .provider
            .create(self.config.family)
            .map_err(BootstrapError::SocketCreation)?;
        self.advance(BootstrapState::Created);

        let addr = self.config.socket_addr();
        socket
            .bind(addr)
            .map_err(|source| BootstrapError::Bind { addr, source })?;
        self.advance(BootstrapState::Bound);

        socket
            .listen(self.config.backlog_i32())
            .map_err(|source| BootstrapError::Listen {
                backlog: self.config.backlog,
                source,
            })?;
        self.advance(BootstrapState::Listening);

        let local_addr = match socket.local_addr() {
            Ok(local_addr) => local_addr,
            Err(e) => {
                debug!(%addr, error = %e, "local address unavailable, using requested address");
                addr
            }
        };
        info!(
            %local_addr,
            backlog = self.config.backlog,
            "Listener ready"
        );

        Ok(ListeningEndpoint::new(socket, local_addr, self.config.clone()))
    }

    fn advance(&mut self, next: BootstrapState) {
        debug!(from = ?self.state, to = ?next, "bootstrap transition");
        self.state = next;
    }
}

/// Bootstrap a real OS listener for `config`.
pub fn bootstrap(config: ListenerConfig) -> Result<ListeningEndpoint<Socket>, BootstrapError> {
    Bootstrapper::new(SystemSockets, config).run()
}

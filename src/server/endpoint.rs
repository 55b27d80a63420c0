// src/server/endpoint.rs
use crate::config::ListenerConfig;
use socket2::Socket;
use std::io;
use std::net::SocketAddr;

/// A socket that got through create, bind and listen.
///
/// Only [`Bootstrapper::run`](crate::server::Bootstrapper::run) builds one,
/// so holding a `ListeningEndpoint` means all three steps succeeded.
/// Dropping it closes the socket; the binary never does and leaves that to
/// process teardown.
#[derive(Debug)]
pub struct ListeningEndpoint<S> {
    socket: S,
    local_addr: SocketAddr,
    config: ListenerConfig,
}

impl<S> ListeningEndpoint<S> {
    pub(crate) fn new(socket: S, local_addr: SocketAddr, config: ListenerConfig) -> Self {
        Self {
            socket,
            local_addr,
            config,
        }
    }

    /// Address the OS actually bound, with the real port when 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn backlog(&self) -> u32 {
        self.config.backlog
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    pub fn into_inner(self) -> S {
        self.socket
    }
}

impl ListeningEndpoint<Socket> {
    pub fn into_std_listener(self) -> std::net::TcpListener {
        self.socket.into()
    }

    /// Must be called from inside a Tokio runtime.
    pub fn into_tokio_listener(self) -> io::Result<tokio::net::TcpListener> {
        self.socket.set_nonblocking(true)?;
        tokio::net::TcpListener::from_std(self.socket.into())
    }
}

// ────────────────────────────────
// src/server/listener.rs
// Encapsulates the low‑level socket/bind/listen calls so the bootstrap
// sequence can run against a fake in tests.
// ────────────────────────────────
use crate::config::AddressFamily;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;

/// Hands out unbound stream sockets.
pub trait SocketProvider {
    type Socket: StreamSocket;

    fn create(&self, family: AddressFamily) -> io::Result<Self::Socket>;
}

/// The two transitions an unbound stream socket goes through before it can
/// take connections.
pub trait StreamSocket {
    fn bind(&self, addr: SocketAddr) -> io::Result<()>;

    fn listen(&self, backlog: i32) -> io::Result<()>;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

/// Real OS sockets via `socket2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSockets;

impl SocketProvider for SystemSockets {
    type Socket = Socket;

    fn create(&self, family: AddressFamily) -> io::Result<Socket> {
        let domain = match family {
            AddressFamily::Ipv4 => Domain::IPV4,
            AddressFamily::Ipv6 => Domain::IPV6,
        };
        Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
    }
}

impl StreamSocket for Socket {
    fn bind(&self, addr: SocketAddr) -> io::Result<()> {
        // SockAddr carries the port in network byte order
        Socket::bind(self, &addr.into())
    }

    fn listen(&self, backlog: i32) -> io::Result<()> {
        Socket::listen(self, backlog)
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        Socket::local_addr(self)?.as_socket().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "socket has no inet address")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_system_socket_binds_ephemeral_port() {
        let socket = SystemSockets.create(AddressFamily::Ipv4).unwrap();
        StreamSocket::bind(&socket, SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).unwrap();

        let addr = StreamSocket::local_addr(&socket).unwrap();
        assert_eq!(addr.ip(), Ipv4Addr::LOCALHOST);
        assert_ne!(addr.port(), 0);

        StreamSocket::listen(&socket, 10).unwrap();
    }

    #[test]
    fn test_system_socket_rejects_foreign_family_address() {
        let socket = SystemSockets.create(AddressFamily::Ipv4).unwrap();
        let v6 = SocketAddr::from((std::net::Ipv6Addr::LOCALHOST, 0));

        assert!(StreamSocket::bind(&socket, v6).is_err());
    }
}

pub mod bootstrap;
pub mod endpoint;
pub mod listener;

pub use bootstrap::{bootstrap, BootstrapError, BootstrapState, Bootstrapper, SetupStep};
pub use endpoint::ListeningEndpoint;
pub use listener::{SocketProvider, StreamSocket, SystemSockets};

// SPDX-License-Identifier: MPL-2.0

use core::time::Duration;

use crate::{fs::file_handle::FileLike, prelude::*};

pub mod stream;

pub use stream::StreamSocket;

/// A socket port number.
pub type Port = u32;

/// Denotes "no port".
pub const NO_PORT: Port = 0;

/// The largest usable port number.
pub const MAX_PORT: Port = 1023;

bitflags! {
    /// Which half (or halves) of a connection a shutdown applies to.
    pub struct ShutdownMode: u8 {
        const READ = 0b01;
        const WRITE = 0b10;
        const BOTH = 0b11;
    }
}

impl ShutdownMode {
    pub fn shut_read(&self) -> bool {
        self.contains(ShutdownMode::READ)
    }

    pub fn shut_write(&self) -> bool {
        self.contains(ShutdownMode::WRITE)
    }
}

/// Operations defined on a socket.
pub trait Socket: FileLike {
    /// Start listening for connections on the socket's port.
    fn listen(&self) -> Result<()> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "listen() is not supported");
    }

    /// Accept a connection, returning the connected server-side socket.
    ///
    /// Takes the handle by value: while the acceptor waits it pins only the
    /// listener state, so closing the socket's last file handle still tears
    /// the listener down and wakes the acceptor.
    fn accept(self: Arc<Self>) -> Result<Arc<dyn FileLike>> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "accept() is not supported");
    }

    /// Build a connection to the listener at the given port.
    fn connect(&self, _port: Port, _timeout: Option<&Duration>) -> Result<()> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "connect() is not supported");
    }

    /// Shut down part of a full-duplex connection.
    fn shutdown(&self, _mode: ShutdownMode) -> Result<()> {
        return_errno_with_message!(Errno::EOPNOTSUPP, "shutdown() is not supported");
    }
}

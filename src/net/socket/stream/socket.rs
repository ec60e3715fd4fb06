// SPDX-License-Identifier: MPL-2.0

use core::time::Duration;

use super::{connected::Connected, init::Init, listener::Listener};
use crate::{
    fs::file_handle::FileLike,
    net::socket::{Port, ShutdownMode, Socket, MAX_PORT, NO_PORT},
    prelude::*,
};

/// A stream socket, in one of three states: freshly created, listening on
/// its port, or one peer of an established connection.
///
/// State only ever advances (`Init → Listen`, `Init → Connected`); closing
/// releases the state's resources but never demotes it.
pub struct StreamSocket {
    state: RwLock<State>,
}

enum State {
    Init(Arc<Init>),
    Listen(Arc<Listener>),
    Connected(Arc<Connected>),
}

impl StreamSocket {
    pub fn new(port: Port) -> Result<Arc<Self>> {
        if port > MAX_PORT {
            return_errno_with_message!(Errno::EINVAL, "the port is out of range");
        }
        let port = (port != NO_PORT).then_some(port);
        let init = Init::new(port);
        Ok(Arc::new(Self {
            state: RwLock::new(State::Init(Arc::new(init))),
        }))
    }

    pub(super) fn new_connected(connected: Connected) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(State::Connected(Arc::new(connected))),
        })
    }

    fn connected(&self) -> Result<Arc<Connected>> {
        match &*self.state.read() {
            State::Connected(connected) => Ok(connected.clone()),
            _ => return_errno_with_message!(Errno::ENOTCONN, "the socket is not connected"),
        }
    }
}

impl FileLike for StreamSocket {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        let connected = self.connected()?;
        connected.read(buf)
    }

    fn write(&self, buf: &[u8]) -> Result<usize> {
        let connected = self.connected()?;
        connected.write(buf)
    }

    fn as_socket(self: Arc<Self>) -> Option<Arc<dyn Socket>> {
        Some(self)
    }
}

impl Socket for StreamSocket {
    fn listen(&self) -> Result<()> {
        let mut state = self.state.write();

        let init = match &*state {
            State::Init(init) => init.clone(),
            State::Listen(_) => {
                return_errno_with_message!(Errno::EINVAL, "the socket is already listening")
            }
            State::Connected(_) => {
                return_errno_with_message!(Errno::EISCONN, "the socket is already connected")
            }
        };

        let Some(port) = init.port() else {
            return_errno_with_message!(Errno::EINVAL, "the socket is not bound to a port");
        };

        let listener = Listener::new(port)?;
        *state = State::Listen(Arc::new(listener));
        Ok(())
    }

    fn accept(self: Arc<Self>) -> Result<Arc<dyn FileLike>> {
        let listener = match &*self.state.read() {
            State::Listen(listener) => listener.clone(),
            _ => return_errno_with_message!(Errno::EINVAL, "the socket is not listening"),
        };

        // Only the listener is pinned while waiting, so closing the last
        // file handle of this socket still unpublishes the backlog and
        // wakes this thread.
        drop(self);

        let connected_socket = listener.accept()?;
        Ok(connected_socket as Arc<dyn FileLike>)
    }

    fn connect(&self, port: Port, timeout: Option<&Duration>) -> Result<()> {
        if port == NO_PORT || port > MAX_PORT {
            return_errno_with_message!(Errno::EINVAL, "the port is out of range");
        }

        let init = match &*self.state.read() {
            State::Init(init) => init.clone(),
            State::Listen(_) => {
                return_errno_with_message!(Errno::EINVAL, "a listening socket cannot connect")
            }
            State::Connected(_) => {
                return_errno_with_message!(Errno::EISCONN, "the socket is already connected")
            }
        };

        // The rendezvous may block, so the state lock is not held across it.
        let connected = init.connect(port, timeout)?;

        let mut state = self.state.write();
        if !matches!(&*state, State::Init(_)) {
            // Lost a race with another state change on the same socket; the
            // fresh connection cannot be kept.
            connected.shutdown(ShutdownMode::BOTH);
            return_errno_with_message!(Errno::EISCONN, "the socket is already connected");
        }
        *state = State::Connected(Arc::new(connected));
        Ok(())
    }

    fn shutdown(&self, mode: ShutdownMode) -> Result<()> {
        let connected = self.connected()?;
        connected.shutdown(mode);
        Ok(())
    }
}

impl Drop for StreamSocket {
    fn drop(&mut self) {
        // Unpublish eagerly: a blocked acceptor holds its own reference to
        // the listener, so waiting for the listener's own drop would leave
        // it blocked forever.
        if let State::Listen(listener) = &*self.state.read() {
            listener.close();
        }
    }
}

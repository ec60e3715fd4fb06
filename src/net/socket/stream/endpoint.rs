// SPDX-License-Identifier: MPL-2.0

use crate::{
    fs::{
        pipe::PIPE_BUF_SIZE,
        utils::{Channel, Consumer, Producer},
    },
    net::socket::ShutdownMode,
    prelude::*,
};

// Connections reuse the pipe transport, one pipe per direction.
const SOCKET_BUF_SIZE: usize = PIPE_BUF_SIZE;

/// One end of an established connection: the read side of one channel and
/// the write side of the other. The cross-linking of the two channels is the
/// only coupling between the two peers, so each half's liveness is tracked
/// by the channel itself.
pub(super) struct Endpoint {
    reader: Consumer,
    writer: Producer,
}

impl Endpoint {
    pub(super) fn new_pair() -> Result<(Endpoint, Endpoint)> {
        let (writer_this, reader_peer) = Channel::with_capacity(SOCKET_BUF_SIZE)?.split();
        let (writer_peer, reader_this) = Channel::with_capacity(SOCKET_BUF_SIZE)?.split();

        let this = Endpoint {
            reader: reader_this,
            writer: writer_this,
        };
        let peer = Endpoint {
            reader: reader_peer,
            writer: writer_peer,
        };

        Ok((this, peer))
    }

    pub(super) fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.reader.read(buf)
    }

    pub(super) fn write(&self, buf: &[u8]) -> Result<usize> {
        self.writer.write(buf)
    }

    pub(super) fn shutdown(&self, mode: ShutdownMode) {
        if mode.shut_read() {
            self.reader.shutdown();
        }
        if mode.shut_write() {
            self.writer.shutdown();
        }
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Stream sockets connected by port-number rendezvous.

mod connected;
mod endpoint;
mod init;
mod listener;
mod socket;

pub use socket::StreamSocket;

// SPDX-License-Identifier: MPL-2.0

use core::time::Duration;

use super::{connected::Connected, listener};
use crate::{net::socket::Port, prelude::*};

/// A freshly created socket: it carries a port (or none) and nothing else.
pub(super) struct Init {
    port: Option<Port>,
}

impl Init {
    pub(super) fn new(port: Option<Port>) -> Self {
        Self { port }
    }

    pub(super) fn port(&self) -> Option<Port> {
        self.port
    }

    pub(super) fn connect(
        &self,
        remote_port: Port,
        timeout: Option<&Duration>,
    ) -> Result<Connected> {
        let endpoint = listener::connect(remote_port, timeout)?;
        Ok(Connected::new(endpoint))
    }
}

// SPDX-License-Identifier: MPL-2.0

use super::endpoint::Endpoint;
use crate::{net::socket::ShutdownMode, prelude::*};

pub(super) struct Connected {
    local_endpoint: Endpoint,
}

impl Connected {
    pub(super) fn new(local_endpoint: Endpoint) -> Self {
        Connected { local_endpoint }
    }

    pub(super) fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.local_endpoint.read(buf)
    }

    pub(super) fn write(&self, buf: &[u8]) -> Result<usize> {
        self.local_endpoint.write(buf)
    }

    pub(super) fn shutdown(&self, mode: ShutdownMode) {
        self.local_endpoint.shutdown(mode)
    }
}

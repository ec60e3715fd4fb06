// SPDX-License-Identifier: MPL-2.0

//! Opened file handles.

use crate::{net::socket::Socket, prelude::*};

/// The basic operations defined on a stream object.
///
/// The default methods fail; a stream implements exactly the operations its
/// kind supports, so e.g. the read half of a pipe rejects writes.
pub trait FileLike: Send + Sync + Any {
    fn read(&self, _buf: &mut [u8]) -> Result<usize> {
        return_errno_with_message!(Errno::EBADF, "the file is not valid for reading");
    }

    fn write(&self, _buf: &[u8]) -> Result<usize> {
        return_errno_with_message!(Errno::EBADF, "the file is not valid for writing");
    }

    fn as_socket(self: Arc<Self>) -> Option<Arc<dyn Socket>> {
        None
    }
}

impl dyn FileLike {
    pub fn downcast_ref<T: FileLike>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

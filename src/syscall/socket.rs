// SPDX-License-Identifier: MPL-2.0

use crate::{
    fs::file_table::FileDesc,
    net::socket::{Port, StreamSocket},
    prelude::*,
};

/// Creates an unconnected stream socket carrying `port` (`NO_PORT` for
/// none) and installs it in the file table.
pub fn sys_socket(port: Port) -> Result<FileDesc> {
    debug!("port = {}", port);

    let socket = StreamSocket::new(port)?;
    current!().file_table().lock().insert(socket)
}

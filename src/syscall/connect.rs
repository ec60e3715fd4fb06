// SPDX-License-Identifier: MPL-2.0

use core::time::Duration;

use crate::{
    fs::file_table::FileDesc,
    net::socket::Port,
    prelude::*,
};

/// Connects `sockfd` to the listener at `port`. With `timeout` of `None`
/// the call waits indefinitely for admission.
pub fn sys_connect(sockfd: FileDesc, port: Port, timeout: Option<Duration>) -> Result<()> {
    debug!("sockfd = {}, port = {}, timeout = {:?}", sockfd, port, timeout);

    let socket = current!().file_table().lock().get_socket(sockfd)?;
    socket.connect(port, timeout.as_ref())
}

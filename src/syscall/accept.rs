// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_accept(sockfd: FileDesc) -> Result<FileDesc> {
    debug!("sockfd = {}", sockfd);

    // The accept may suspend, so the table lock is not held across it.
    let socket = current!().file_table().lock().get_socket(sockfd)?;
    let connected_socket = socket.accept()?;

    current!().file_table().lock().insert(connected_socket)
}

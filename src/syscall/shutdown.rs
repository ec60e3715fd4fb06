// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, net::socket::ShutdownMode, prelude::*};

pub fn sys_shutdown(sockfd: FileDesc, mode: ShutdownMode) -> Result<()> {
    debug!("sockfd = {}, mode = {:?}", sockfd, mode);

    let socket = current!().file_table().lock().get_socket(sockfd)?;
    socket.shutdown(mode)
}

// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_listen(sockfd: FileDesc) -> Result<()> {
    debug!("sockfd = {}", sockfd);

    let socket = current!().file_table().lock().get_socket(sockfd)?;
    socket.listen()
}

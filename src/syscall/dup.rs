// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_dup2(old_fd: FileDesc, new_fd: FileDesc) -> Result<FileDesc> {
    debug!("old_fd = {}, new_fd = {}", old_fd, new_fd);

    current!().file_table().lock().dup(old_fd, new_fd)
}

// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_write(fd: FileDesc, buf: &[u8]) -> Result<usize> {
    debug!("fd = {}, len = {}", fd, buf.len());

    // The table lock is released before the write, which may suspend.
    let file = current!().file_table().lock().get_file(fd)?.clone();
    file.write(buf)
}

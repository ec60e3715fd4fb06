// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_read(fd: FileDesc, buf: &mut [u8]) -> Result<usize> {
    debug!("fd = {}, len = {}", fd, buf.len());

    // The table lock is released before the read, which may suspend.
    let file = current!().file_table().lock().get_file(fd)?.clone();
    file.read(buf)
}
